use stock_insight::catalog::TickerCatalog;
use stock_insight::config::AnalysisConfig;
use stock_insight::errors::InsightError;
use stock_insight::models::report::AnalysisReport;
use stock_insight::services::analysis_service::{AnalysisRequest, AnalysisService};
use stock_insight::suppliers::base::MarketDataSupplier;
use stock_insight::suppliers::yahoo::YahooSupplier;
use stock_insight::util;

use clap::{App, Arg, ArgMatches, SubCommand};
use log::{error, info};
use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logger
    env_logger::init();

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();

    let app = App::new("stock_insight")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Moving averages, RSI and trend/momentum signals for a single ticker")
        .subcommand(
            SubCommand::with_name("analyze")
                .about("Fetch daily bars for a ticker and report its indicators")
                .arg(
                    Arg::with_name("ticker")
                        .short('t')
                        .long("ticker")
                        .value_name("TICKER")
                        .help("Ticker to analyze (e.g. BBCA.JK, AAPL)")
                        .required(true)
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("start")
                        .short('s')
                        .long("start")
                        .value_name("DATE")
                        .help("First day of the range (YYYY-MM-DD)")
                        .takes_value(true)
                        .default_value("2023-01-01"),
                )
                .arg(
                    Arg::with_name("end")
                        .short('e')
                        .long("end")
                        .value_name("DATE")
                        .help("End of the range, exclusive (YYYY-MM-DD)")
                        .takes_value(true)
                        .default_value(&today),
                )
                .arg(
                    Arg::with_name("sma-short")
                        .long("sma-short")
                        .value_name("BARS")
                        .help("Short moving average window")
                        .takes_value(true)
                        .default_value("50"),
                )
                .arg(
                    Arg::with_name("sma-long")
                        .long("sma-long")
                        .value_name("BARS")
                        .help("Long moving average window")
                        .takes_value(true)
                        .default_value("200"),
                )
                .arg(
                    Arg::with_name("rsi-window")
                        .long("rsi-window")
                        .value_name("BARS")
                        .help("RSI window")
                        .takes_value(true)
                        .default_value("14"),
                )
                .arg(
                    Arg::with_name("overbought")
                        .long("overbought")
                        .value_name("RSI")
                        .help("RSI above this level is overbought")
                        .takes_value(true)
                        .default_value("70"),
                )
                .arg(
                    Arg::with_name("oversold")
                        .long("oversold")
                        .value_name("RSI")
                        .help("RSI below this level is oversold")
                        .takes_value(true)
                        .default_value("30"),
                )
                .arg(
                    Arg::with_name("show-sma-short")
                        .long("show-sma-short")
                        .help("Include the short moving average in the rows")
                        .takes_value(false),
                )
                .arg(
                    Arg::with_name("show-sma-long")
                        .long("show-sma-long")
                        .help("Include the long moving average in the rows")
                        .takes_value(false),
                )
                .arg(
                    Arg::with_name("hide-rsi")
                        .long("hide-rsi")
                        .help("Leave RSI out of the rows")
                        .takes_value(false),
                )
                .arg(
                    Arg::with_name("format")
                        .short('f')
                        .long("format")
                        .value_name("FORMAT")
                        .help("Output format")
                        .takes_value(true)
                        .possible_values(["text", "json"])
                        .default_value("text"),
                )
                .arg(
                    Arg::with_name("rows")
                        .short('r')
                        .long("rows")
                        .value_name("ROWS")
                        .help("Number of most recent rows to print in text mode")
                        .takes_value(true)
                        .default_value("10"),
                ),
        )
        .subcommand(SubCommand::with_name("tickers").about("List the curated tickers"));

    let matches = app.get_matches();

    if let Some(matches) = matches.subcommand_matches("analyze") {
        let ticker = matches.value_of("ticker").unwrap_or_default();
        let start = util::parse_date(matches.value_of("start").unwrap_or_default())?;
        let end = util::parse_date(matches.value_of("end").unwrap_or_default())?;

        let config = AnalysisConfig::new()
            .with_sma_short_window(parse_value(matches, "sma-short")?)
            .with_sma_long_window(parse_value(matches, "sma-long")?)
            .with_rsi_window(parse_value(matches, "rsi-window")?)
            .with_thresholds(parse_value(matches, "overbought")?, parse_value(matches, "oversold")?)
            .with_show_sma_short(matches.is_present("show-sma-short"))
            .with_show_sma_long(matches.is_present("show-sma-long"))
            .with_show_rsi(!matches.is_present("hide-rsi"));
        let rows: usize = parse_value(matches, "rows")?;

        let supplier: Arc<dyn MarketDataSupplier + Send + Sync> = Arc::new(YahooSupplier::new()?);
        let service = AnalysisService::new(config, supplier)?;
        let request = AnalysisRequest::new(ticker, start, end)?;

        info!("Fetching data for {}", request.ticker);
        let report = match service.analyze(&request).await {
            Ok(report) => report,
            Err(e) if e.is_informational() => {
                if matches!(e, InsightError::NoData { .. }) {
                    println!("{}. Check the ticker spelling or your connection.", e);
                } else {
                    println!("{}", e);
                }
                return Ok(());
            }
            Err(e) => {
                error!("Analysis of {} failed: {}", request.ticker, e);
                return Err(e.into());
            }
        };

        match matches.value_of("format") {
            Some("json") => println!("{}", serde_json::to_string_pretty(&report)?),
            _ => print_report(&report, service.config(), rows),
        }
    } else if matches.subcommand_matches("tickers").is_some() {
        let catalog = TickerCatalog::new();
        for entry in catalog.entries() {
            println!("{:<10} {}", entry.ticker, entry.name);
        }
    } else {
        info!("No command specified. Use --help for usage information.");
    }

    Ok(())
}

fn parse_value<T>(matches: &ArgMatches, name: &str) -> Result<T, Box<dyn Error>>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = matches.value_of(name).unwrap_or_default();
    raw.parse::<T>()
        .map_err(|e| format!("invalid --{} value '{}': {}", name, raw, e).into())
}

fn print_report(report: &AnalysisReport, config: &AnalysisConfig, rows: usize) {
    let snapshot = &report.snapshot;

    println!("Analysis report: {} ({})", report.display_name, report.ticker);
    println!("{:-<72}", "");
    println!(
        "{:<22} {} ({})",
        "Last price",
        util::format_price(snapshot.last_close, 0),
        util::format_change(snapshot.change, 0)
    );
    println!(
        "{:<22} {}",
        format!("Trend (SMA {})", config.sma_long_window),
        snapshot.trend.label()
    );
    println!("{:<22} {}", "", snapshot.trend.description());
    let rsi = snapshot
        .last_rsi
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "-".to_string());
    println!("{:<22} {} {}", "Momentum RSI", rsi, snapshot.momentum.label());
    println!("{:<22} {}", "", snapshot.momentum.description());

    for warning in &report.warnings {
        println!("! {}", warning);
    }

    println!("{:-<72}", "");
    println!(
        "{:<10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>7}",
        "Date", "Open", "High", "Low", "Close", "SMA short", "SMA long", "RSI"
    );
    let cell = |v: Option<f64>, decimals: usize| {
        v.map(|v| format!("{:.*}", decimals, v))
            .unwrap_or_else(|| "-".to_string())
    };
    for row in report.tail(rows) {
        println!(
            "{:<10} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10} {:>10} {:>7}",
            row.date.to_string(),
            row.open,
            row.high,
            row.low,
            row.close,
            cell(row.sma_short, 2),
            cell(row.sma_long, 2),
            cell(row.rsi, 2)
        );
    }
    if report.rows.len() > rows {
        println!("... and {} earlier rows", report.rows.len() - rows);
    }
}
