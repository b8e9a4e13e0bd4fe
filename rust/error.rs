//! Error kinds raised by calendar construction and date queries.

use chrono::NaiveDate;
use thiserror::Error;

/// The error type returned by every fallible operation of the crate.
#[derive(Debug, Error)]
pub enum BizdaysError {
    /// A holiday resource contains a line that is neither an ISO date nor a weekday name.
    #[error("malformed holiday entry at line {line}: '{content}'")]
    Format {
        /// 1-based line number in the resource.
        line: usize,
        /// The offending line, trimmed.
        content: String,
    },

    /// A relative date expression cannot be parsed.
    #[error("invalid date expression: {0}")]
    Expression(String),

    /// A date lies outside the valid range of the calendar.
    #[error("date {date} out of calendar range [{start}, {end}]")]
    DateOutOfRange {
        /// The offending date.
        date: NaiveDate,
        /// First valid date of the calendar.
        start: NaiveDate,
        /// Last valid date of the calendar.
        end: NaiveDate,
    },

    /// An argument is invalid: mismatched lengths, impossible ordinals, unknown options.
    #[error("{0}")]
    Value(String),

    /// A named holiday resource or calendar file does not exist.
    #[error("calendar not found: '{0}'")]
    NotFound(String),

    /// Reading a calendar file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BizdaysError {
    /// Returns `true` for the format error kinds: holiday entries and date expressions.
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. } | Self::Expression(_))
    }
}

/// Shorthand `Result` type used throughout the crate.
pub type Result<T, E = BizdaysError> = std::result::Result<T, E>;

/// Return early with a [`BizdaysError::Value`] unless the condition holds.
macro_rules! ensure_value {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::error::BizdaysError::Value(format!($($msg)*)));
        }
    };
}
pub(crate) use ensure_value;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::nd;

    fn checked(x: i32) -> Result<i32> {
        ensure_value!(x > 0, "x must be positive, got {x}");
        Ok(x)
    }

    #[test]
    fn test_ensure_value() {
        assert_eq!(checked(3).unwrap(), 3);
        match checked(-1) {
            Err(BizdaysError::Value(msg)) => assert_eq!(msg, "x must be positive, got -1"),
            _ => panic!("expected a value error"),
        }
    }

    #[test]
    fn test_display() {
        let e = BizdaysError::DateOutOfRange {
            date: nd(2080, 1, 1),
            start: nd(2001, 1, 1),
            end: nd(2078, 12, 25),
        };
        assert_eq!(
            e.to_string(),
            "date 2080-01-01 out of calendar range [2001-01-01, 2078-12-25]"
        );
        let e = BizdaysError::Format {
            line: 3,
            content: "2001-13-01".to_string(),
        };
        assert_eq!(e.to_string(), "malformed holiday entry at line 3: '2001-13-01'");
        assert!(e.is_format());
        assert!(!BizdaysError::NotFound("B1".to_string()).is_format());
    }
}
