use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsightError {
    #[error("No data for {ticker} between {start} and {end}")]
    NoData {
        ticker: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Supplier error: {0}")]
    Supplier(String),

    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Date parsing error: {0}")]
    DateError(#[from] chrono::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl InsightError {
    /// Whether the failure came from the market-data source (unreachable or malformed payload).
    pub fn is_supplier_error(&self) -> bool {
        matches!(
            self,
            InsightError::Supplier(_) | InsightError::RequestError(_) | InsightError::JsonError(_)
        )
    }

    /// Informational outcomes that should be shown to the user rather than treated as failures.
    pub fn is_informational(&self) -> bool {
        matches!(self, InsightError::NoData { .. } | InsightError::InsufficientData(_))
    }
}

pub type Result<T> = std::result::Result<T, InsightError>;
