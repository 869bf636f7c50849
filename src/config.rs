use crate::errors::{InsightError, Result};

pub const DEFAULT_SMA_SHORT_WINDOW: usize = 50;
pub const DEFAULT_SMA_LONG_WINDOW: usize = 200;
pub const DEFAULT_RSI_WINDOW: usize = 14;

/// RSI levels above / below which momentum is classified as overbought / oversold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RsiThresholds {
    pub overbought: f64,
    pub oversold: f64,
}

impl Default for RsiThresholds {
    fn default() -> Self {
        Self {
            overbought: 70.0,
            oversold: 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub sma_short_window: usize,
    pub sma_long_window: usize,
    pub rsi_window: usize,
    pub thresholds: RsiThresholds,
    pub show_sma_short: bool,
    pub show_sma_long: bool,
    pub show_rsi: bool,
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self {
            sma_short_window: DEFAULT_SMA_SHORT_WINDOW,
            sma_long_window: DEFAULT_SMA_LONG_WINDOW,
            rsi_window: DEFAULT_RSI_WINDOW,
            thresholds: RsiThresholds::default(),
            show_sma_short: false,
            show_sma_long: false,
            show_rsi: true,
        }
    }

    pub fn with_sma_short_window(mut self, window: usize) -> Self {
        self.sma_short_window = window;
        self
    }

    pub fn with_sma_long_window(mut self, window: usize) -> Self {
        self.sma_long_window = window;
        self
    }

    pub fn with_rsi_window(mut self, window: usize) -> Self {
        self.rsi_window = window;
        self
    }

    pub fn with_thresholds(mut self, overbought: f64, oversold: f64) -> Self {
        self.thresholds = RsiThresholds {
            overbought,
            oversold,
        };
        self
    }

    pub fn with_show_sma_short(mut self, show: bool) -> Self {
        self.show_sma_short = show;
        self
    }

    pub fn with_show_sma_long(mut self, show: bool) -> Self {
        self.show_sma_long = show;
        self
    }

    pub fn with_show_rsi(mut self, show: bool) -> Self {
        self.show_rsi = show;
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (name, window) in [
            ("short moving average", self.sma_short_window),
            ("long moving average", self.sma_long_window),
            ("RSI", self.rsi_window),
        ] {
            if window == 0 {
                return Err(InsightError::Config(format!("{} window must be at least 1", name)));
            }
        }

        let RsiThresholds {
            overbought,
            oversold,
        } = self.thresholds;
        let in_range = |v: f64| (0.0..=100.0).contains(&v);
        if !in_range(overbought) || !in_range(oversold) {
            return Err(InsightError::Config(format!(
                "RSI thresholds must lie within [0, 100], got {}/{}",
                overbought, oversold
            )));
        }
        if oversold >= overbought {
            return Err(InsightError::Config(format!(
                "oversold threshold {} must be below overbought threshold {}",
                oversold, overbought
            )));
        }

        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::new()
    }
}
