use chrono::NaiveDate;
use serde::Serialize;

use crate::errors::{InsightError, Result};

/// One trading day of OHLC prices
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub date: NaiveDate, // market-local trading day
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
}

impl Bar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume: None,
        }
    }

    pub fn with_volume(mut self, volume: u64) -> Self {
        self.volume = Some(volume);
        self
    }

    pub(crate) fn has_valid_prices(&self) -> bool {
        [self.open, self.high, self.low, self.close]
            .iter()
            .all(|p| p.is_finite() && *p > 0.0)
    }
}

/// Daily bars for one ticker, ascending by date with no duplicates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub ticker: String,
    bars: Vec<Bar>,
}

impl Series {
    /// Builds a series, rejecting unordered dates and non-positive prices.
    pub fn new(ticker: &str, bars: Vec<Bar>) -> Result<Self> {
        for (i, bar) in bars.iter().enumerate() {
            if !bar.has_valid_prices() {
                return Err(InsightError::Supplier(format!(
                    "{}: invalid prices on {} (open {}, high {}, low {}, close {})",
                    ticker, bar.date, bar.open, bar.high, bar.low, bar.close
                )));
            }
            if i > 0 && bars[i - 1].date >= bar.date {
                return Err(InsightError::Supplier(format!(
                    "{}: bar dated {} does not follow {}",
                    ticker,
                    bar.date,
                    bars[i - 1].date
                )));
            }
        }

        Ok(Self {
            ticker: ticker.to_string(),
            bars,
        })
    }

    pub fn empty(ticker: &str) -> Self {
        Self {
            ticker: ticker.to_string(),
            bars: Vec::new(),
        }
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Bars with `start <= date < end`.
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> Series {
        Series {
            ticker: self.ticker.clone(),
            bars: self
                .bars
                .iter()
                .filter(|b| b.date >= start && b.date < end)
                .cloned()
                .collect(),
        }
    }
}
