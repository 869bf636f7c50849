use chrono::NaiveDate;

use crate::errors::{InsightError, Result};

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")?)
}

/// Seconds since the Unix epoch at midnight UTC of `date`.
pub fn date_to_unix(date: &NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

/// Rejects an inverted date range.
pub fn check_date_range(start: &NaiveDate, end: &NaiveDate) -> Result<()> {
    if start > end {
        return Err(InsightError::Config(format!(
            "start date {} is after end date {}",
            start, end
        )));
    }
    Ok(())
}

/// Formats a price with thousands separators, e.g. `9,450` or `1,234.57`.
pub fn format_price(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Like [`format_price`] but always carries a sign.
pub fn format_change(value: f64, decimals: usize) -> String {
    let formatted = format_price(value, decimals);
    if formatted.starts_with('-') {
        formatted
    } else {
        format!("+{}", formatted)
    }
}
