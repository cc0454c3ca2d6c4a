//! Lenient field parsing.
//!
//! Every parser here returns a value, falling back to a default instead of
//! failing, and reports whether the fallback was taken so callers can record
//! a data-quality warning.

use chrono::{Datelike, NaiveDate};

/// A parsed value plus whether it is a substituted default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lenient<T> {
    pub value: T,
    pub defaulted: bool,
}

impl<T> Lenient<T> {
    fn parsed(value: T) -> Self {
        Self {
            value,
            defaulted: false,
        }
    }

    fn fallback(value: T) -> Self {
        Self {
            value,
            defaulted: true,
        }
    }
}

/// Parse a number that may use a comma as decimal separator.
pub fn parse_number(raw: &str) -> Lenient<f64> {
    let cleaned = raw.trim().replace(',', ".");
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => Lenient::parsed(v),
        _ => Lenient::fallback(0.0),
    }
}

/// Parse a percentage such as `"57,3%"`, `"100%"` or `" 40 "`.
pub fn parse_percent(raw: &str) -> Lenient<f64> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed);
    parse_number(trimmed)
}

/// Parse the leading integer of an id field (`"12"`, `" 7 "`, `"15*"`).
pub fn parse_id(raw: &str, fallback: i64) -> Lenient<i64> {
    let trimmed = raw.trim();
    let end = trimmed
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && c == '-')))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    match trimmed[..end].parse::<i64>() {
        Ok(v) => Lenient::parsed(v),
        Err(_) => Lenient::fallback(fallback),
    }
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d", "%d/%m/%y", "%m/%d/%Y",
];

/// Parse a display date.
///
/// Accepts a leading weekday word ("Seg 01/09/25") and a trailing time of day
/// ("01/09/2025 08:00", "2025-09-01T08:00:00").
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    raw.split_whitespace()
        .map(|token| token.split('T').next().unwrap_or(token))
        .find_map(parse_date_token)
}

fn parse_date_token(token: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(token, fmt).ok())
        .find(|d| d.year() >= 1900)
}

/// Format a date the way the dashboard displays it.
pub fn display_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// `None` for empty cells and not-applicable markers.
pub fn optional_field(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.to_uppercase().as_str() {
        "NA" | "N/A" | "ND" => None,
        _ => Some(trimmed.to_string()),
    }
}

/// Outline level from the leading whitespace of a raw name: one level per
/// four whitespace characters, each character counting once.
pub fn indent_level(raw_name: &str) -> u32 {
    let leading = raw_name.chars().take_while(|c| c.is_whitespace()).count();
    (leading / 4) as u32
}
