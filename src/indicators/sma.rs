use crate::indicators::rolling_mean;
use crate::models::bar::Series;

/// Simple moving average of `close` over the trailing `window` bars.
///
/// The first `window - 1` points are `None`; a series shorter than the window
/// is entirely `None`. Never looks ahead.
pub fn compute_moving_average(series: &Series, window: usize) -> Vec<Option<f64>> {
    moving_average(&series.closes(), window)
}

/// [`compute_moving_average`] over raw closing prices.
pub fn moving_average(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    let values: Vec<Option<f64>> = closes.iter().copied().map(Some).collect();
    rolling_mean(&values, window)
}
