//! Typed cell parsing: day-first dates and decimal amounts.

use std::str::FromStr;

use anyhow::{Result, anyhow};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

// Two-digit year layouts come first: `%Y` would happily read "24" as year 24.
const DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%y %H:%M:%S",
    "%d/%m/%y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%y %H:%M:%S",
    "%d-%m-%y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d.%m.%y %H:%M:%S",
    "%d.%m.%y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%d/%m/%y",
    "%d/%m/%Y",
    "%d-%m-%y",
    "%d-%m-%Y",
    "%d.%m.%y",
    "%d.%m.%Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d-%b-%y",
    "%d-%b-%Y",
    "%d %b %Y",
    "%d %B %Y",
];

/// Parses a date with day-first ordering; "03/04/2024" is 3 April 2024.
/// Values without a time of day resolve to midnight.
pub fn parse_day_first_datetime(value: &str) -> Result<NaiveDateTime> {
    let trimmed = value.trim();
    // UTC designator; the wall-clock value is kept as is.
    let trimmed = trimmed.strip_suffix('Z').unwrap_or(trimmed);
    for fmt in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(parsed);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Ok(parsed.and_time(NaiveTime::MIN));
        }
    }
    Err(anyhow!("Failed to parse '{value}' as a day-first date"))
}

/// Parses already-cleaned numeric text (digits and at most one `.`).
pub fn parse_decimal_text(text: &str) -> Option<Decimal> {
    if text.is_empty() || text == "." {
        return None;
    }
    let padded;
    let candidate = match (text.starts_with('.'), text.ends_with('.')) {
        (true, _) => {
            padded = format!("0{text}");
            padded.as_str()
        }
        (false, true) => &text[..text.len() - 1],
        (false, false) => text,
    };
    Decimal::from_str(candidate).ok().map(|d| d.normalize())
}
