use crate::table::Cell;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const YEAR_FIRST_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const YEAR_FIRST_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

const DATETIME_FORMATS: &[&str] = &["%m/%d/%Y %H:%M:%S", "%m/%d/%Y %H:%M"];

// `%y` precedes `%Y` since `%Y` happily reads "22" as the year 22.
// Month-first is tried before day-first.
const DATE_FORMATS: &[&str] = &[
    "%m/%d/%y",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%d-%b-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%B %d %Y",
];

/// Workbook dates pass through; bare numbers are not dates.
pub(crate) fn cell_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::Text(text) => parse_date(text),
        Cell::Date(date) => Some(*date),
        Cell::Number(_) => None,
    }
}

pub(crate) fn cell_total(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Text(text) => parse_total(text),
        Cell::Number(value) => Some(*value).filter(|value| value.is_finite()),
        Cell::Date(_) => None,
    }
}

/// Parses a date cell leniently. Date-times collapse to their calendar date.
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local().date());
    }

    let (datetime_formats, date_formats) = if starts_with_year(trimmed) {
        (YEAR_FIRST_DATETIME_FORMATS, YEAR_FIRST_DATE_FORMATS)
    } else {
        (DATETIME_FORMATS, DATE_FORMATS)
    };

    if let Some(dt) = datetime_formats
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
    {
        return Some(dt.date());
    }

    if let Some(date) = date_formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
    {
        return Some(date);
    }

    parse_compact(trimmed)
}

/// Four digits followed by a separator.
fn starts_with_year(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() > 4 && bytes[..4].iter().all(u8::is_ascii_digit) && !bytes[4].is_ascii_digit()
}

/// `YYYYMMDD`
fn parse_compact(value: &str) -> Option<NaiveDate> {
    if value.len() != 8 || !value.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    let year = value[0..4].parse().ok()?;
    let month = value[4..6].parse().ok()?;
    let day = value[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parses a value cell as a finite float.
pub(crate) fn parse_total(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
