use chrono::NaiveDate;
use serde::Serialize;

use crate::models::analysis::{DerivedSeries, Snapshot};
use crate::models::bar::Series;

/// One bar joined with its indicator values, as handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sma_short: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sma_long: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
}

/// Result of a single analysis request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub ticker: String,
    pub display_name: String,
    pub rows: Vec<ReportRow>,
    pub snapshot: Snapshot,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl AnalysisReport {
    /// Joins `series` and `derived` row by row. Both must have the same length.
    pub fn rows_from(series: &Series, derived: &DerivedSeries) -> Vec<ReportRow> {
        series
            .bars()
            .iter()
            .enumerate()
            .map(|(i, bar)| ReportRow {
                date: bar.date,
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
                sma_short: derived.sma_short.get(i).copied().flatten(),
                sma_long: derived.sma_long.get(i).copied().flatten(),
                rsi: derived.rsi.get(i).copied().flatten(),
            })
            .collect()
    }

    /// The most recent `n` rows, oldest first.
    pub fn tail(&self, n: usize) -> &[ReportRow] {
        let start = self.rows.len().saturating_sub(n);
        &self.rows[start..]
    }
}
