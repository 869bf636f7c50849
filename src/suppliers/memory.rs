use crate::errors::Result;
use crate::models::bar::Series;
use crate::suppliers::base::MarketDataSupplier;
use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use std::collections::HashMap;

/// Supplier backed by series held in memory, keyed by ticker
#[derive(Debug, Default, Clone)]
pub struct InMemorySupplier {
    series: HashMap<String, Series>,
}

impl InMemorySupplier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series.insert(series.ticker.clone(), series);
        self
    }
}

#[async_trait]
impl MarketDataSupplier for InMemorySupplier {
    fn source_name(&self) -> &'static str {
        "memory"
    }

    async fn fetch_daily_bars(&self, ticker: &str, start: &NaiveDate, end: &NaiveDate) -> Result<Series> {
        let series = match self.series.get(ticker) {
            Some(series) => series.between(*start, *end),
            None => Series::empty(ticker),
        };
        debug!("In-memory supplier returned {} bars for {}", series.len(), ticker);
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bar::Bar;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[tokio::test]
    async fn returns_requested_range_only() {
        let series = Series::new(
            "UNVR.JK",
            vec![
                Bar::new(date(1, 2), 1.0, 1.0, 1.0, 1.0),
                Bar::new(date(1, 3), 1.0, 1.0, 1.0, 1.0),
                Bar::new(date(1, 4), 1.0, 1.0, 1.0, 1.0),
            ],
        )
        .unwrap();
        let supplier = InMemorySupplier::new().with_series(series);

        let got = supplier
            .fetch_daily_bars("UNVR.JK", &date(1, 3), &date(1, 4))
            .await
            .unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got.bars()[0].date, date(1, 3));
    }

    #[tokio::test]
    async fn unknown_ticker_is_empty() {
        let supplier = InMemorySupplier::new();
        let got = supplier
            .fetch_daily_bars("NOPE", &date(1, 1), &date(2, 1))
            .await
            .unwrap();
        assert!(got.is_empty());
        assert_eq!(got.ticker, "NOPE");
    }
}
