use crate::catalog::TickerCatalog;
use crate::config::AnalysisConfig;
use crate::errors::{InsightError, Result};
use crate::indicators;
use crate::models::analysis::{DerivedSeries, Snapshot};
use crate::models::bar::Series;
use crate::models::report::AnalysisReport;
use crate::suppliers::base::MarketDataSupplier;
use crate::util;
use chrono::NaiveDate;
use log::{info, warn};
use std::sync::Arc;

/// One user-triggered analysis: a ticker over `[start, end)`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub ticker: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl AnalysisRequest {
    pub fn new(ticker: &str, start: NaiveDate, end: NaiveDate) -> Result<Self> {
        let ticker = ticker.trim();
        if ticker.is_empty() {
            return Err(InsightError::Config("ticker must not be empty".to_string()));
        }
        util::check_date_range(&start, &end)?;

        Ok(Self {
            ticker: ticker.to_string(),
            start,
            end,
        })
    }
}

/// Fetches a series from the supplier and turns it into an [`AnalysisReport`].
///
/// Holds no per-request state, so one instance can serve concurrent requests.
pub struct AnalysisService {
    config: AnalysisConfig,
    supplier: Arc<dyn MarketDataSupplier + Send + Sync>,
    catalog: TickerCatalog,
}

impl AnalysisService {
    pub fn new(config: AnalysisConfig, supplier: Arc<dyn MarketDataSupplier + Send + Sync>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            supplier,
            catalog: TickerCatalog::new(),
        })
    }

    pub fn with_catalog(mut self, catalog: TickerCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn catalog(&self) -> &TickerCatalog {
        &self.catalog
    }

    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport> {
        util::check_date_range(&request.start, &request.end)?;
        info!(
            "Analyzing {} from {} to {} via {}",
            request.ticker,
            request.start,
            request.end,
            self.supplier.source_name()
        );

        let series = self
            .supplier
            .fetch_daily_bars(&request.ticker, &request.start, &request.end)
            .await?;

        if series.is_empty() {
            warn!("No data found for {}", request.ticker);
            return Err(InsightError::NoData {
                ticker: request.ticker.clone(),
                start: request.start,
                end: request.end,
            });
        }
        info!("Got {} bars for {}", series.len(), request.ticker);

        let report = self.analyze_series(&series)?;
        for warning in &report.warnings {
            warn!("{}: {}", request.ticker, warning);
        }
        Ok(report)
    }

    /// Runs the indicator engine over an already fetched series.
    pub fn analyze_series(&self, series: &Series) -> Result<AnalysisReport> {
        let derived = indicators::derive(series, &self.config);
        let snapshot = indicators::snapshot_with(series, &derived, &self.config.thresholds)?;
        let warnings = self.history_warnings(series, &snapshot);
        let exposed = self.exposed(derived);

        Ok(AnalysisReport {
            ticker: series.ticker.clone(),
            display_name: self.catalog.display_name(&series.ticker),
            rows: AnalysisReport::rows_from(series, &exposed),
            snapshot,
            warnings,
        })
    }

    // hidden indicators are still computed, only masked from the rows
    fn exposed(&self, mut derived: DerivedSeries) -> DerivedSeries {
        if !self.config.show_sma_long {
            derived.sma_long.iter_mut().for_each(|v| *v = None);
        }
        if !self.config.show_rsi {
            derived.rsi.iter_mut().for_each(|v| *v = None);
        }
        derived
    }

    fn history_warnings(&self, series: &Series, snapshot: &Snapshot) -> Vec<String> {
        let mut warnings = Vec::new();
        let bars = series.len();

        if snapshot.last_sma_long.is_none() {
            warnings.push(format!(
                "insufficient history: {} bars, long moving average needs {}",
                bars, self.config.sma_long_window
            ));
        }

        if snapshot.last_rsi.is_none() {
            if bars <= self.config.rsi_window {
                warnings.push(format!(
                    "insufficient history: {} bars, RSI needs more than {}",
                    bars, self.config.rsi_window
                ));
            } else {
                warnings.push(format!(
                    "RSI undefined: no price movement in the last {} bars",
                    self.config.rsi_window
                ));
            }
        }

        if self.config.show_sma_short && bars < self.config.sma_short_window {
            warnings.push(format!(
                "insufficient history: {} bars, short moving average needs {}",
                bars, self.config.sma_short_window
            ));
        }

        warnings
    }
}
