use chrono::{DateTime, Datelike, NaiveDate};

use crate::error::StatsError;

/// Separator between artists and title in display strings.
const DISPLAY_SEPARATOR: &str = " – ";

pub fn track_display_name(artists: &str, title: &str) -> String {
    format!("{artists}{DISPLAY_SEPARATOR}{title}")
}

/// Parses a catalog release date at the precision it was supplied with.
///
/// `year` dates resolve to January 1st and `month` dates to the first of the
/// month. When the precision is missing or does not match the value, every
/// supported format is tried from most to least precise. Year 0 is the
/// catalog's placeholder for an unknown date and is rejected.
pub fn parse_release_date(date: &str, precision: Option<&str>) -> Result<NaiveDate, StatsError> {
    let date = date.trim();
    let parsed = match precision {
        Some("day") => parse_day(date),
        Some("month") => parse_month(date),
        Some("year") => parse_year(date),
        _ => None,
    };

    parsed
        .or_else(|| parse_day(date))
        .or_else(|| parse_month(date))
        .or_else(|| parse_year(date))
        .ok_or_else(|| StatsError::Ungroupable(format!("unparseable release date {date:?}")))
        .and_then(|parsed| {
            if parsed.year() == 0 {
                Err(StatsError::Ungroupable(format!("placeholder release date {date:?}")))
            } else {
                Ok(parsed)
            }
        })
}

fn parse_day(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

fn parse_month(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{date}-01"), "%Y-%m-%d").ok()
}

fn parse_year(date: &str) -> Option<NaiveDate> {
    if date.len() != 4 {
        return None;
    }
    let year = date.parse::<i32>().ok()?;
    NaiveDate::from_ymd_opt(year, 1, 1)
}

/// Seconds since the Unix epoch for midnight UTC of `date`.
pub fn date_to_unix(date: NaiveDate) -> f64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp() as f64)
        .unwrap_or_default()
}

/// Formats a Unix timestamp as `dd/mm/yyyy`.
pub fn format_unix_date(unix: f64) -> Option<String> {
    DateTime::from_timestamp(unix as i64, 0).map(|dt| dt.format("%d/%m/%Y").to_string())
}

/// Calendar year of a Unix timestamp.
pub fn unix_year(unix: f64) -> Option<i32> {
    DateTime::from_timestamp(unix as i64, 0).map(|dt| dt.year())
}

/// Formats milliseconds as `"1h 2m 3s"`, rounded to the nearest second.
///
/// Leading zero components are left out (`"3m 0s"`, `"42s"`), zero is `"0s"`.
pub fn format_duration_ms(ms: f64) -> String {
    let total = (ms / 1000.0).round().max(0.0) as u64;
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);

    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// Keeps the first four characters of a bearer token for log output.
pub fn redact_token(token: &str) -> String {
    let visible: String = token.chars().take(4).collect();
    format!("{visible}…")
}
