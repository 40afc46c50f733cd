use std::fmt;

use chrono::{Local, NaiveDate};

/// Input and display format for every date the tracker handles.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Human-readable form of [`DATE_FORMAT`], used in prompts and errors.
pub const DATE_FORMAT_HINT: &str = "dd.mm.yyyy";

/// Source of "today" for fallbacks and reminder classification.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Reads the local calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Input did not match `dd.mm.yyyy` or named an impossible date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormatError {
    pub input: String,
}

impl fmt::Display for DateFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid date '{}', expected {}",
            self.input, DATE_FORMAT_HINT
        )
    }
}

impl std::error::Error for DateFormatError {}

/// Outcome of a lenient parse: always a usable date, plus the error when the
/// fallback was substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDate {
    pub date: NaiveDate,
    pub error: Option<DateFormatError>,
}

impl ParsedDate {
    pub fn is_fallback(&self) -> bool {
        self.error.is_some()
    }
}

/// Parse a `dd.mm.yyyy` date.
pub fn parse_date(input: &str) -> Result<NaiveDate, DateFormatError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| DateFormatError {
        input: trimmed.to_string(),
    })
}

/// Parse a `dd.mm.yyyy` date, substituting `fallback` when the input is malformed.
pub fn parse_date_or(input: &str, fallback: NaiveDate) -> ParsedDate {
    match parse_date(input) {
        Ok(date) => ParsedDate { date, error: None },
        Err(error) => ParsedDate {
            date: fallback,
            error: Some(error),
        },
    }
}

/// Zero-padded `dd.mm.yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
