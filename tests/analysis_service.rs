use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use std::sync::Arc;
use stock_insight::catalog::{TickerCatalog, TickerEntry};
use stock_insight::suppliers::memory::InMemorySupplier;
use stock_insight::{
    AnalysisConfig, AnalysisRequest, AnalysisService, Bar, InsightError, MarketDataSupplier,
    MomentumStatus, Result, Series, TrendStatus,
};

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()
}

/// `closes` as consecutive daily bars with open one unit below close.
fn series(ticker: &str, closes: &[f64]) -> Series {
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| Bar::new(start() + Duration::days(i as i64), c - 1.0, c + 2.0, c - 2.0, c))
        .collect();
    Series::new(ticker, bars).unwrap()
}

fn service(supplier: InMemorySupplier, config: AnalysisConfig) -> AnalysisService {
    AnalysisService::new(config, Arc::new(supplier)).unwrap()
}

fn request(ticker: &str, days: i64) -> AnalysisRequest {
    AnalysisRequest::new(ticker, start(), start() + Duration::days(days)).unwrap()
}

struct UnreachableSupplier;

#[async_trait]
impl MarketDataSupplier for UnreachableSupplier {
    fn source_name(&self) -> &'static str {
        "unreachable"
    }

    async fn fetch_daily_bars(&self, _ticker: &str, _start: &NaiveDate, _end: &NaiveDate) -> Result<Series> {
        Err(InsightError::Supplier("connection refused".to_string()))
    }
}

#[tokio::test]
async fn long_uptrend_reports_bullish_overbought() {
    let closes: Vec<f64> = (0..260).map(|i| 1000.0 + 5.0 * i as f64).collect();
    let supplier = InMemorySupplier::new().with_series(series("BBCA.JK", &closes));
    let service = service(supplier, AnalysisConfig::new());

    let report = service.analyze(&request("BBCA.JK", 400)).await.unwrap();

    assert_eq!(report.display_name, "Bank Central Asia");
    assert_eq!(report.rows.len(), 260);
    assert_eq!(report.snapshot.trend, TrendStatus::Bullish);
    assert_eq!(report.snapshot.momentum, MomentumStatus::Overbought);
    assert_eq!(report.snapshot.change, 1.0);
    assert!(report.warnings.is_empty());

    // defaults: RSI shown, moving averages hidden
    let last = report.rows.last().unwrap();
    assert_eq!(last.rsi, Some(100.0));
    assert_eq!(last.sma_short, None);
    assert_eq!(last.sma_long, None);
    assert!(report.snapshot.last_sma_long.is_some());
}

#[tokio::test]
async fn downtrend_is_bearish_and_oversold() {
    let closes: Vec<f64> = (0..220).map(|i| 5000.0 - 10.0 * i as f64).collect();
    let supplier = InMemorySupplier::new().with_series(series("GOTO.JK", &closes));
    let config = AnalysisConfig::new()
        .with_show_sma_short(true)
        .with_show_sma_long(true);
    let report = service(supplier, config)
        .analyze(&request("GOTO.JK", 300))
        .await
        .unwrap();

    assert_eq!(report.snapshot.trend, TrendStatus::Bearish);
    assert_eq!(report.snapshot.momentum, MomentumStatus::Oversold);
    assert_eq!(report.snapshot.last_rsi, Some(0.0));

    let last = report.rows.last().unwrap();
    assert!(last.sma_short.is_some());
    assert!(last.sma_long.is_some());
    assert!(report.rows[198].sma_long.is_none());
    assert!(report.rows[199].sma_long.is_some());
}

#[tokio::test]
async fn single_bar_reports_change_with_undefined_signals() {
    let bars = vec![Bar::new(start(), 100.0, 106.0, 99.0, 105.0)];
    let supplier = InMemorySupplier::new().with_series(Series::new("KLBF.JK", bars).unwrap());
    let report = service(supplier, AnalysisConfig::new())
        .analyze(&request("KLBF.JK", 30))
        .await
        .unwrap();

    assert_eq!(report.display_name, "KLBF.JK");
    assert_eq!(report.snapshot.change, 5.0);
    assert_eq!(report.snapshot.trend, TrendStatus::Undefined);
    assert_eq!(report.snapshot.momentum, MomentumStatus::Undefined);
    assert_eq!(report.warnings.len(), 2);
    assert!(report.warnings.iter().all(|w| w.starts_with("insufficient history")));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["snapshot"]["trend"], "undefined");
    assert_eq!(json["snapshot"]["momentum"], "undefined");
    assert!(json["snapshot"].get("last_rsi").is_none());
}

#[tokio::test]
async fn flat_prices_leave_rsi_undefined() {
    let closes = vec![250.0; 30];
    let supplier = InMemorySupplier::new().with_series(series("ANTM.JK", &closes));
    let config = AnalysisConfig::new().with_sma_long_window(20);
    let report = service(supplier, config)
        .analyze(&request("ANTM.JK", 60))
        .await
        .unwrap();

    assert_eq!(report.snapshot.last_sma_long, Some(250.0));
    assert_eq!(report.snapshot.trend, TrendStatus::Bearish);
    assert_eq!(report.snapshot.momentum, MomentumStatus::Undefined);
    assert_eq!(
        report.warnings,
        vec!["RSI undefined: no price movement in the last 14 bars".to_string()]
    );
}

#[tokio::test]
async fn empty_result_is_no_data() {
    let service = service(InMemorySupplier::new(), AnalysisConfig::new());
    let err = service.analyze(&request("NOPE.JK", 30)).await.unwrap_err();

    assert!(matches!(err, InsightError::NoData { ref ticker, .. } if ticker == "NOPE.JK"));
    assert!(err.is_informational());
}

#[tokio::test]
async fn range_outside_history_is_no_data() {
    let supplier = InMemorySupplier::new().with_series(series("BBRI.JK", &[100.0, 101.0, 102.0]));
    let service = service(supplier, AnalysisConfig::new());
    let later = start() + Duration::days(100);
    let request = AnalysisRequest::new("BBRI.JK", later, later + Duration::days(10)).unwrap();

    let err = service.analyze(&request).await.unwrap_err();
    assert!(matches!(err, InsightError::NoData { .. }));
}

#[tokio::test]
async fn supplier_failure_aborts_request() {
    let service = AnalysisService::new(AnalysisConfig::new(), Arc::new(UnreachableSupplier)).unwrap();
    let err = service.analyze(&request("BBCA.JK", 30)).await.unwrap_err();

    assert!(err.is_supplier_error());
    assert!(!err.is_informational());
}

#[tokio::test]
async fn concurrent_requests_share_one_service() {
    let supplier = InMemorySupplier::new()
        .with_series(series("TLKM.JK", &(1..=40).map(|i| 100.0 + f64::from(i)).collect::<Vec<_>>()))
        .with_series(series("ASII.JK", &(1..=40).rev().map(|i| 100.0 + f64::from(i)).collect::<Vec<_>>()));
    let service = Arc::new(service(supplier, AnalysisConfig::new()));

    let handles: Vec<_> = ["TLKM.JK", "ASII.JK"]
        .into_iter()
        .map(|ticker| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.analyze(&request(ticker, 60)).await })
        })
        .collect();

    let mut momentum = Vec::new();
    for handle in handles {
        momentum.push(handle.await.unwrap().unwrap().snapshot.momentum);
    }
    assert_eq!(momentum, vec![MomentumStatus::Overbought, MomentumStatus::Oversold]);
}

#[test]
fn invalid_config_and_requests_are_rejected() {
    let err = AnalysisService::new(
        AnalysisConfig::new().with_sma_long_window(0),
        Arc::new(InMemorySupplier::new()),
    )
    .err()
    .unwrap();
    assert!(matches!(err, InsightError::Config(_)));

    assert!(AnalysisRequest::new("  ", start(), start()).is_err());
    assert!(AnalysisRequest::new("BBCA.JK", start() + Duration::days(1), start()).is_err());
    assert_eq!(
        AnalysisRequest::new(" BBCA.JK ", start(), start()).unwrap().ticker,
        "BBCA.JK"
    );
}

#[test]
fn custom_catalog_labels_report() {
    let service = service(InMemorySupplier::new(), AnalysisConfig::new()).with_catalog(TickerCatalog::new_with_entries(vec![TickerEntry {
        ticker: "AAPL".to_string(),
        name: "Apple".to_string(),
    }]));

    let report = service
        .analyze_series(&series("AAPL", &[10.0, 11.0]))
        .unwrap();
    assert_eq!(report.display_name, "Apple");
    assert_eq!(report.snapshot.change, 1.0);
}
