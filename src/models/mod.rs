pub mod analysis;
pub mod bar;
pub mod report;
