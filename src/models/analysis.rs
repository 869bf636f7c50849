use serde::Serialize;

/// Indicator values aligned 1:1 with a [`Series`](crate::models::bar::Series).
///
/// `None` marks points where the trailing window is not yet filled (or, for RSI,
/// where the window is completely flat).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DerivedSeries {
    pub sma_short: Vec<Option<f64>>,
    pub sma_long: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
}

impl DerivedSeries {
    /// All-undefined derived series of length `len`.
    pub fn undefined(len: usize) -> Self {
        Self {
            sma_short: vec![None; len],
            sma_long: vec![None; len],
            rsi: vec![None; len],
        }
    }

    pub fn is_aligned_with(&self, len: usize) -> bool {
        self.sma_short.len() == len && self.sma_long.len() == len && self.rsi.len() == len
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendStatus {
    Bullish,
    Bearish,
    Undefined,
}

impl TrendStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TrendStatus::Bullish => "BULLISH (uptrend)",
            TrendStatus::Bearish => "BEARISH (downtrend)",
            TrendStatus::Undefined => "UNDEFINED",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TrendStatus::Bullish => "Price is above the long-term average.",
            TrendStatus::Bearish => "Price is below the long-term average.",
            TrendStatus::Undefined => "Insufficient history for the long-term average.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MomentumStatus {
    Overbought,
    Oversold,
    Neutral,
    Undefined,
}

impl MomentumStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MomentumStatus::Overbought => "Overbought (expensive)",
            MomentumStatus::Oversold => "Oversold (cheap)",
            MomentumStatus::Neutral => "Neutral",
            MomentumStatus::Undefined => "Undefined",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MomentumStatus::Overbought => "Careful, a downward correction is likely.",
            MomentumStatus::Oversold => "Potential rebound.",
            MomentumStatus::Neutral => "Fairly priced, mid-range.",
            MomentumStatus::Undefined => "Insufficient history, or no price movement in the RSI window.",
        }
    }
}

/// Summary of the most recent bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub last_close: f64,
    pub last_open: f64,
    /// Same-day change, `last_close - last_open`.
    pub change: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sma_long: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_rsi: Option<f64>,
    pub trend: TrendStatus,
    pub momentum: MomentumStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn statuses_serialize_lowercase() {
        assert_eq!(serde_json::to_value(TrendStatus::Bullish).unwrap(), json!("bullish"));
        assert_eq!(serde_json::to_value(TrendStatus::Undefined).unwrap(), json!("undefined"));
        assert_eq!(serde_json::to_value(MomentumStatus::Oversold).unwrap(), json!("oversold"));
        assert_eq!(serde_json::to_value(MomentumStatus::Neutral).unwrap(), json!("neutral"));
    }

    #[test]
    fn snapshot_omits_undefined_fields() {
        let snapshot = Snapshot {
            last_close: 105.0,
            last_open: 100.0,
            change: 5.0,
            last_sma_long: None,
            last_rsi: None,
            trend: TrendStatus::Undefined,
            momentum: MomentumStatus::Undefined,
        };
        assert_eq!(
            serde_json::to_value(&snapshot).unwrap(),
            json!({
                "last_close": 105.0,
                "last_open": 100.0,
                "change": 5.0,
                "trend": "undefined",
                "momentum": "undefined"
            })
        );
    }

    #[test]
    fn alignment_check() {
        let derived = DerivedSeries::undefined(3);
        assert!(derived.is_aligned_with(3));
        assert!(!derived.is_aligned_with(4));
    }
}
