use crate::errors::{InsightError, Result};
use crate::models::bar::{Bar, Series};
use crate::suppliers::base::MarketDataSupplier;
use crate::util;
use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use log::{debug, info, warn};
use reqwest::Client;
use serde_json::Value;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) stock_insight";
const SECONDS_PER_DAY: i64 = 86_400;

/// Daily bars from the Yahoo Finance chart API
pub struct YahooSupplier {
    client: Client,
    base_url: String,
    last_request: Mutex<Option<Instant>>,
    request_interval: Duration,
}

impl YahooSupplier {
    pub fn new() -> Result<Self> {
        Self::with_base_url(CHART_URL)
    }

    /// Points the supplier at a different chart endpoint (mirrors, local stubs).
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .map_err(InsightError::RequestError)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            last_request: Mutex::new(None),
            request_interval: Duration::from_millis(500),
        })
    }

    async fn wait_for_rate_limit(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(time) = *last {
            let elapsed = time.elapsed();
            if elapsed < self.request_interval {
                let wait = self.request_interval - elapsed;
                debug!("Waiting {:?} before next chart request", wait);
                tokio::time::sleep(wait).await;
            }
        }

        *last = Some(Instant::now());
    }
}

#[async_trait]
impl MarketDataSupplier for YahooSupplier {
    fn source_name(&self) -> &'static str {
        "yahoo"
    }

    async fn fetch_daily_bars(&self, ticker: &str, start: &NaiveDate, end: &NaiveDate) -> Result<Series> {
        info!("Fetching {} daily bars from {} to {}", ticker, start, end);

        self.wait_for_rate_limit().await;

        let (period1, period2) = request_window(start, end);
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, ticker))
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
                ("events", "history".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        // Unknown tickers come back as 404 with a JSON error body
        let json: Value = match serde_json::from_str(&text) {
            Ok(json) => json,
            Err(e) if status.is_success() => return Err(e.into()),
            Err(_) => {
                return Err(InsightError::Supplier(format!(
                    "chart request for {} failed: HTTP status {}",
                    ticker, status
                )))
            }
        };

        let series = parse_chart_response(ticker, &json)?.between(*start, *end);
        debug!("Got {} bars for {}", series.len(), ticker);
        Ok(series)
    }
}

/// Unix bounds sent to the chart API for a local-date range.
///
/// Bars are stamped at the exchange's local session time, which sits up to a
/// day either side of midnight UTC. The window is padded by a day on each side
/// and trimmed back to `[start, end)` on local dates after parsing.
fn request_window(start: &NaiveDate, end: &NaiveDate) -> (i64, i64) {
    (
        util::date_to_unix(start) - SECONDS_PER_DAY,
        util::date_to_unix(end) + SECONDS_PER_DAY,
    )
}

/// Parses a chart API payload into a series of market-local daily bars.
///
/// Rows with a missing, zero or non-finite price are skipped. When two rows land on the same
/// local date the later one wins.
pub fn parse_chart_response(ticker: &str, json: &Value) -> Result<Series> {
    let chart = json
        .get("chart")
        .ok_or_else(|| InsightError::Supplier("missing `chart` object".to_string()))?;

    if let Some(error) = chart.get("error").filter(|e| !e.is_null()) {
        let code = error.get("code").and_then(Value::as_str).unwrap_or_default();
        if code == "Not Found" {
            info!("No chart data for {}", ticker);
            return Ok(Series::empty(ticker));
        }
        let description = error.get("description").and_then(Value::as_str).unwrap_or_default();
        return Err(InsightError::Supplier(format!("{}: {} {}", ticker, code, description)));
    }

    let result = match chart
        .get("result")
        .and_then(Value::as_array)
        .and_then(|r| r.first())
    {
        Some(result) => result,
        None => return Ok(Series::empty(ticker)),
    };

    let timestamps = match result.get("timestamp").and_then(Value::as_array) {
        Some(ts) => ts,
        None => return Ok(Series::empty(ticker)),
    };

    let tz = exchange_timezone(result);

    let quote = result
        .pointer("/indicators/quote/0")
        .ok_or_else(|| InsightError::Supplier(format!("{}: missing quote indicators", ticker)))?;
    let open = quote_column(quote, ticker, "open")?;
    let high = quote_column(quote, ticker, "high")?;
    let low = quote_column(quote, ticker, "low")?;
    let close = quote_column(quote, ticker, "close")?;
    let volume = quote.get("volume").and_then(Value::as_array);

    let mut bars: Vec<Bar> = Vec::with_capacity(timestamps.len());
    for (i, ts) in timestamps.iter().enumerate() {
        let ts = ts
            .as_i64()
            .ok_or_else(|| InsightError::Supplier(format!("{}: invalid timestamp {}", ticker, ts)))?;
        let date = Utc
            .timestamp_opt(ts, 0)
            .single()
            .ok_or_else(|| InsightError::Supplier(format!("{}: timestamp {} out of range", ticker, ts)))?
            .with_timezone(&tz)
            .date_naive();

        let price = |col: &Vec<Value>| col.get(i).and_then(Value::as_f64);
        let (o, h, l, c) = match (price(open), price(high), price(low), price(close)) {
            (Some(o), Some(h), Some(l), Some(c)) => (o, h, l, c),
            _ => {
                debug!("Skipping {} row {} without prices", ticker, date);
                continue;
            }
        };

        let mut bar = Bar::new(date, o, h, l, c);
        if !bar.has_valid_prices() {
            debug!("Skipping {} row {} with invalid prices {:?}", ticker, date, (o, h, l, c));
            continue;
        }
        if let Some(v) = volume.and_then(|v| v.get(i)).and_then(Value::as_u64) {
            bar = bar.with_volume(v);
        }

        if bars.last().map_or(false, |prev| prev.date == date) {
            bars.pop();
        }
        bars.push(bar);
    }

    Series::new(ticker, bars)
}

fn quote_column<'a>(quote: &'a Value, ticker: &str, name: &str) -> Result<&'a Vec<Value>> {
    quote
        .get(name)
        .and_then(Value::as_array)
        .ok_or_else(|| InsightError::Supplier(format!("{}: missing `{}` column", ticker, name)))
}

fn exchange_timezone(result: &Value) -> Tz {
    let name = result
        .pointer("/meta/exchangeTimezoneName")
        .and_then(Value::as_str)
        .unwrap_or("UTC");
    name.parse::<Tz>().unwrap_or_else(|_| {
        warn!("Unknown exchange timezone {}, using UTC dates", name);
        Tz::UTC
    })
}
