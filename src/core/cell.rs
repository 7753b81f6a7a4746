//! Typed cell values for tabular sales and shipment data.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fmt;

/// Markers that spreadsheet exports use for blank or error cells.
const MISSING_MARKERS: &[&str] = &["", "NA", "N/A", "#N/A", "NaN", "nan", "null", "NULL", "-"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// A single value in a [`Table`](super::Table).
///
/// `Missing` is the explicit sentinel for blank cells. Coercion helpers
/// return `None` instead of guessing when a value has the wrong shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Missing,
    Number(f64),
    Text(String),
    Date(NaiveDate),
}

impl Cell {
    /// Infer a typed cell from raw text.
    ///
    /// Blank and NA markers become `Missing`, numeric text becomes `Number`,
    /// recognised date layouts become `Date` and anything else stays `Text`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if MISSING_MARKERS.contains(&trimmed) {
            return Cell::Missing;
        }
        if let Ok(v) = trimmed.parse::<f64>() {
            return Cell::Number(v);
        }
        if let Some(date) = parse_date(trimmed) {
            return Cell::Date(date);
        }
        Cell::Text(trimmed.to_string())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Coerce to a finite number.
    ///
    /// Text is parsed after trimming; dates, missing cells, NaN and
    /// infinities yield `None`.
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            Cell::Number(v) => *v,
            Cell::Text(s) => s.trim().parse::<f64>().ok()?,
            Cell::Missing | Cell::Date(_) => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Coerce to a calendar date. Text is parsed with the supported layouts.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Cell::Date(d) => Some(*d),
            Cell::Text(s) => parse_date(s.trim()),
            Cell::Missing | Cell::Number(_) => None,
        }
    }

    /// Short name of the variant, used by schema summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            Cell::Missing => "missing",
            Cell::Number(_) => "number",
            Cell::Text(_) => "text",
            Cell::Date(_) => "date",
        }
    }
}

/// Parse a date (or a date-time, keeping only its date) from text.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.date_naive())
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Missing => write!(f, "NaN"),
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Number(v as f64)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<NaiveDate> for Cell {
    fn from(d: NaiveDate) -> Self {
        Cell::Date(d)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Cell::Missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_infers_cell_types() {
        assert_eq!(Cell::parse(""), Cell::Missing);
        assert_eq!(Cell::parse("  #N/A "), Cell::Missing);
        assert_eq!(Cell::parse("42.5"), Cell::Number(42.5));
        assert_eq!(Cell::parse("2017-03-06"), Cell::Date(ymd(2017, 3, 6)));
        assert_eq!(Cell::parse("03/06/2017"), Cell::Date(ymd(2017, 3, 6)));
        assert_eq!(
            Cell::parse("2017-03-06 00:00:00"),
            Cell::Date(ymd(2017, 3, 6))
        );
        assert_eq!(Cell::parse("Wslr 12"), Cell::Text("Wslr 12".to_string()));
    }

    #[test]
    fn as_number_coerces_text_and_rejects_non_finite() {
        assert_eq!(Cell::Number(3.0).as_number(), Some(3.0));
        assert_eq!(Cell::Text(" 7 ".to_string()).as_number(), Some(7.0));
        assert_eq!(Cell::Text("abc".to_string()).as_number(), None);
        assert_eq!(Cell::Number(f64::NAN).as_number(), None);
        assert_eq!(Cell::Number(f64::INFINITY).as_number(), None);
        assert_eq!(Cell::Missing.as_number(), None);
        assert_eq!(Cell::Date(ymd(2017, 1, 2)).as_number(), None);
    }

    #[test]
    fn as_date_parses_text_but_not_numbers() {
        assert_eq!(
            Cell::Text("2017/01/02".to_string()).as_date(),
            Some(ymd(2017, 1, 2))
        );
        assert_eq!(
            Cell::Text("2017-01-02T10:00:00+02:00".to_string()).as_date(),
            Some(ymd(2017, 1, 2))
        );
        assert_eq!(Cell::Text("not a date".to_string()).as_date(), None);
        assert_eq!(Cell::Number(42736.0).as_date(), None);
    }

    #[test]
    fn option_conversion_maps_none_to_missing() {
        let none: Option<f64> = None;
        assert_eq!(Cell::from(none), Cell::Missing);
        assert_eq!(Cell::from(Some(2.0)), Cell::Number(2.0));
    }
}
