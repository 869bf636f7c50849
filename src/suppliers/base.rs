use crate::errors::Result;
use crate::models::bar::Series;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Base trait for market-data suppliers
#[async_trait]
pub trait MarketDataSupplier {
    /// Short name of the data source, used in logs
    fn source_name(&self) -> &'static str;

    /// Fetch daily bars for `ticker` with `start <= date < end`.
    ///
    /// An unknown ticker or a range without trading days yields an empty
    /// series, not an error.
    async fn fetch_daily_bars(&self, ticker: &str, start: &NaiveDate, end: &NaiveDate) -> Result<Series>;
}
