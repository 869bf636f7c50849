// Relative Strength Index, simple-average variant.
//
//   delta[i]  = close[i] - close[i-1]          (undefined at i = 0)
//   gain/loss = max(delta, 0) / max(-delta, 0)
//   avg_*     = trailing mean over `window` deltas
//   RSI       = 100 - 100 / (1 + avg_gain / avg_loss)
//
// avg_loss == 0 with gains gives 100; a completely flat window (0/0) is None.

use crate::indicators::rolling_mean;
use crate::models::bar::Series;

/// RSI of `close` over `window` bars. `None` for the first `window` points.
pub fn compute_rsi(series: &Series, window: usize) -> Vec<Option<f64>> {
    rsi(&series.closes(), window)
}

/// [`compute_rsi`] over raw closing prices.
pub fn rsi(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    let deltas: Vec<Option<f64>> = std::iter::once(None)
        .chain(closes.windows(2).map(|w| Some(w[1] - w[0])))
        .take(closes.len())
        .collect();

    let gains: Vec<Option<f64>> = deltas.iter().map(|d| d.map(|d| d.max(0.0))).collect();
    let losses: Vec<Option<f64>> = deltas.iter().map(|d| d.map(|d| (-d).max(0.0))).collect();

    let avg_gain = rolling_mean(&gains, window);
    let avg_loss = rolling_mean(&losses, window);

    avg_gain
        .into_iter()
        .zip(avg_loss)
        .map(|(gain, loss)| rsi_from_averages(gain?, loss?))
        .collect()
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss <= 0.0 {
        return if avg_gain > 0.0 { Some(100.0) } else { None };
    }

    let rs = avg_gain.max(0.0) / avg_loss;
    Some((100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0))
}
