//! Output configuration for calendar queries.
//!
//! An [`Options`] value decides how dates leave the library: as dates, as datetimes at
//! midnight or as ISO strings, and whether sequence results are handed over as plain lists or
//! as arrays. Every [`Calendar`](crate::calendars::Calendar) holds its own copy, seeded from
//! the process-wide store when the calendar is built.
//!
//! ```rust
//! # use bizdays::options::{Options, DateType};
//! let mut opts = Options::default();
//! opts.set("mode.datetype", "iso").unwrap();
//! assert_eq!(opts.datetype, Some(DateType::Iso));
//! assert_eq!(opts.get("mode").unwrap(), "python");
//! ```

use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::{LazyLock, PoisonError, RwLock};
use tracing::info;

use crate::error::{BizdaysError, Result};

/// How results of sequence operations are returned by the bindings.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Plain lists of values.
    #[default]
    Python,
    /// Arrays.
    Pandas,
}

/// The representation of output dates.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateType {
    /// Calendar dates.
    Date,
    /// Datetimes at midnight.
    DateTime,
    /// `YYYY-MM-DD` strings.
    Iso,
}

/// A date converted for output according to an [`Options`] value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateValue {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Iso(String),
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateValue::Date(d) => write!(f, "{d}"),
            DateValue::DateTime(dt) => write!(f, "{dt}"),
            DateValue::Iso(s) => f.write_str(s),
        }
    }
}

/// Output options of a calendar.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    pub mode: Mode,
    /// `None` leaves dates in the type they were given, which for this crate is a date.
    pub datetype: Option<DateType>,
}

impl Options {
    /// Return the value of an option by key, `"mode"` or `"mode.datetype"`.
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "mode" => Ok(self.mode.to_string()),
            "mode.datetype" => Ok(self
                .datetype
                .map_or_else(|| "none".to_string(), |d| d.to_string())),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set an option by key, parsing the value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "mode" => self.mode = value.parse()?,
            "mode.datetype" => {
                self.datetype = match value.trim().to_lowercase().as_str() {
                    "none" | "" => None,
                    v => Some(v.parse()?),
                }
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    /// Convert a date to its output representation.
    pub fn convert(&self, date: NaiveDate) -> DateValue {
        match self.datetype {
            None | Some(DateType::Date) => DateValue::Date(date),
            Some(DateType::DateTime) => DateValue::DateTime(date.and_time(NaiveTime::MIN)),
            Some(DateType::Iso) => DateValue::Iso(date.format("%Y-%m-%d").to_string()),
        }
    }
}

fn unknown_key(key: &str) -> BizdaysError {
    BizdaysError::Value(format!(
        "unknown option: '{key}', expected 'mode' or 'mode.datetype'"
    ))
}

impl FromStr for Mode {
    type Err = BizdaysError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "python" => Ok(Mode::Python),
            "pandas" => Ok(Mode::Pandas),
            _ => Err(BizdaysError::Value(format!(
                "invalid mode: '{s}', expected 'python' or 'pandas'"
            ))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Python => f.write_str("python"),
            Mode::Pandas => f.write_str("pandas"),
        }
    }
}

impl FromStr for DateType {
    type Err = BizdaysError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(DateType::Date),
            "datetime" => Ok(DateType::DateTime),
            "iso" => Ok(DateType::Iso),
            _ => Err(BizdaysError::Value(format!(
                "invalid datetype: '{s}', expected 'date', 'datetime' or 'iso'"
            ))),
        }
    }
}

impl fmt::Display for DateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateType::Date => f.write_str("date"),
            DateType::DateTime => f.write_str("datetime"),
            DateType::Iso => f.write_str("iso"),
        }
    }
}

// Process-wide options, read when a calendar is built.
static OPTIONS: LazyLock<RwLock<Options>> = LazyLock::new(|| RwLock::new(Options::default()));

/// Return a copy of the process-wide options.
pub fn current() -> Options {
    *OPTIONS.read().unwrap_or_else(PoisonError::into_inner)
}

/// Return a process-wide option by key.
pub fn get_option(key: &str) -> Result<String> {
    current().get(key)
}

/// Set a process-wide option by key. Calendars built afterwards inherit the new value.
pub fn set_option(key: &str, value: &str) -> Result<()> {
    let mut w = OPTIONS.write().unwrap_or_else(PoisonError::into_inner);
    let mut updated = *w;
    updated.set(key, value)?;
    *w = updated;
    info!(key, value, "global option updated");
    Ok(())
}
