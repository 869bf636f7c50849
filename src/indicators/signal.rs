use crate::config::RsiThresholds;
use crate::models::analysis::{MomentumStatus, TrendStatus};

/// Bullish when the close is strictly above the long moving average.
pub fn classify_trend(last_close: f64, last_sma_long: Option<f64>) -> TrendStatus {
    match last_sma_long {
        Some(sma) if last_close > sma => TrendStatus::Bullish,
        Some(_) => TrendStatus::Bearish,
        None => TrendStatus::Undefined,
    }
}

/// Momentum against the default 70/30 thresholds.
pub fn classify_momentum(last_rsi: Option<f64>) -> MomentumStatus {
    classify_momentum_with(last_rsi, &RsiThresholds::default())
}

/// Boundary values fall into `Neutral`.
pub fn classify_momentum_with(last_rsi: Option<f64>, thresholds: &RsiThresholds) -> MomentumStatus {
    match last_rsi {
        Some(rsi) if rsi > thresholds.overbought => MomentumStatus::Overbought,
        Some(rsi) if rsi < thresholds.oversold => MomentumStatus::Oversold,
        Some(_) => MomentumStatus::Neutral,
        None => MomentumStatus::Undefined,
    }
}
