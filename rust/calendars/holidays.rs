//! Parsing of holiday resources.
//!
//! A holiday resource is plain text with one ISO `YYYY-MM-DD` date per line. Calendar files
//! may also declare their non-working weekdays by name, one per line, e.g. `Saturday`.
//! Blank lines are ignored and any other content fails the whole load.

use chrono::{NaiveDate, Weekday};
use std::fs;
use std::path::Path;

use crate::calendars::weekdays::parse_weekday;
use crate::error::{BizdaysError, Result};

/// The frozen content of a holiday resource.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HolidaySource {
    /// Holidays in the order they appear in the resource.
    pub holidays: Vec<NaiveDate>,
    /// Non-working weekdays declared by name.
    pub weekdays: Vec<Weekday>,
}

impl HolidaySource {
    /// Parse the text of a holiday resource.
    ///
    /// # Examples
    /// ```rust
    /// # use bizdays::calendars::HolidaySource;
    /// let source = HolidaySource::parse("Saturday\nSunday\n2002-12-25\n").unwrap();
    /// assert_eq!(source.holidays.len(), 1);
    /// assert_eq!(source.weekdays.len(), 2);
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let mut source = HolidaySource::default();
        for (i, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(date) = parse_iso_date(line) {
                source.holidays.push(date);
            } else if let Some(weekday) = parse_weekday(line).filter(|_| is_alphabetic(line)) {
                if !source.weekdays.contains(&weekday) {
                    source.weekdays.push(weekday);
                }
            } else {
                return Err(BizdaysError::Format {
                    line: i + 1,
                    content: line.to_string(),
                });
            }
        }
        Ok(source)
    }

    /// Read and parse a holiday resource from a file.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(BizdaysError::NotFound(path.display().to_string()));
        }
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }
}

/// Parse a strict `YYYY-MM-DD` date.
pub(crate) fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let b = s.as_bytes();
    let shaped = b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter()
            .enumerate()
            .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit());
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn is_alphabetic(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_alphabetic())
}
