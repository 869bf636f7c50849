// Public modules
pub mod catalog;
pub mod config;
pub mod errors;
pub mod indicators;
pub mod models;
pub mod services;
pub mod suppliers;
pub mod util;

// Re-export the types most callers need
pub use config::{AnalysisConfig, RsiThresholds};
pub use errors::{InsightError, Result};
pub use indicators::{
    classify_momentum, classify_trend, compute_moving_average, compute_rsi, snapshot,
};
pub use models::analysis::{DerivedSeries, MomentumStatus, Snapshot, TrendStatus};
pub use models::bar::{Bar, Series};
pub use models::report::{AnalysisReport, ReportRow};
pub use services::analysis_service::{AnalysisRequest, AnalysisService};
pub use suppliers::base::MarketDataSupplier;
