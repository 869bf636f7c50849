//! Indicator engine: moving averages, RSI and the last-bar classification.
//!
//! Every function here is pure. Points without a full trailing window are
//! `None` rather than NaN.

pub mod rsi;
pub mod signal;
pub mod sma;
pub mod snapshot;

pub use rsi::compute_rsi;
pub use signal::{classify_momentum, classify_momentum_with, classify_trend};
pub use sma::compute_moving_average;
pub use snapshot::{derive, snapshot, snapshot_with};

/// Trailing mean over `window` values, aligned with the input.
///
/// `result[i]` is defined once `values[i + 1 - window..=i]` are all defined.
pub(crate) fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return result;
    }

    for (start, slice) in values.windows(window).enumerate() {
        result[start + window - 1] = window_mean(slice);
    }

    result
}

// Anchored on the first value: a constant window returns that value exactly.
fn window_mean(slice: &[Option<f64>]) -> Option<f64> {
    let base = slice.first().copied().flatten()?;
    let offset = slice
        .iter()
        .try_fold(0.0, |acc, v| v.map(|v| acc + (v - base)))?;
    Some(base + offset / slice.len() as f64)
}
