use crate::config::{AnalysisConfig, RsiThresholds};
use crate::errors::{InsightError, Result};
use crate::indicators::rsi::compute_rsi;
use crate::indicators::signal::{classify_momentum_with, classify_trend};
use crate::indicators::sma::compute_moving_average;
use crate::models::analysis::{DerivedSeries, Snapshot};
use crate::models::bar::Series;

/// Computes the derived series for `series` with the configured windows.
///
/// The long average and RSI are always computed since the snapshot classifies
/// from them; the short average only when it is shown.
pub fn derive(series: &Series, config: &AnalysisConfig) -> DerivedSeries {
    let sma_short = if config.show_sma_short {
        compute_moving_average(series, config.sma_short_window)
    } else {
        vec![None; series.len()]
    };

    DerivedSeries {
        sma_short,
        sma_long: compute_moving_average(series, config.sma_long_window),
        rsi: compute_rsi(series, config.rsi_window),
    }
}

/// Summarises the last bar with the default RSI thresholds.
pub fn snapshot(series: &Series, derived: &DerivedSeries) -> Result<Snapshot> {
    snapshot_with(series, derived, &RsiThresholds::default())
}

pub fn snapshot_with(
    series: &Series,
    derived: &DerivedSeries,
    thresholds: &RsiThresholds,
) -> Result<Snapshot> {
    let last = series.last().ok_or_else(|| {
        InsightError::InsufficientData(format!("{}: series is empty, no last bar", series.ticker))
    })?;

    if !derived.is_aligned_with(series.len()) {
        return Err(InsightError::InsufficientData(format!(
            "{}: derived series not aligned with {} bars",
            series.ticker,
            series.len()
        )));
    }

    let idx = series.len() - 1;
    let last_sma_long = derived.sma_long[idx];
    let last_rsi = derived.rsi[idx];

    Ok(Snapshot {
        last_close: last.close,
        last_open: last.open,
        change: last.close - last.open,
        last_sma_long,
        last_rsi,
        trend: classify_trend(last.close, last_sma_long),
        momentum: classify_momentum_with(last_rsi, thresholds),
    })
}
