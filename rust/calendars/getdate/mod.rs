//! Dates described by their relative position in a month or year.
//!
//! Expressions name an ordinal and a unit, optionally a window, and optionally shift from a
//! reference:
//!
//! ```text
//! 15th day                        third bizday of next month
//! last fri                        first business day of year
//! 10th fri before 10th bizday     15th bizday before 2018-02-01
//! ```
//!
//! Positions are looked up in the month when one is given, else in the whole year. A shift
//! counts strictly from the reference: `day` moves calendar days, `bizday` moves business
//! days and a weekday moves to the n-th such weekday. In a shift `last` counts as one.

mod expr;
mod resolve;

pub use expr::{DateExpr, Direction, Ordinal, Reference, Scope, Unit};

use chrono::prelude::*;

use crate::calendars::{Adjuster, Adjustment, Calendar};
use crate::error::Result;

impl Calendar {
    /// Return the date described by a relative expression.
    ///
    /// # Examples
    /// ```rust
    /// # use bizdays::calendars::{Calendar, nd};
    /// let cal = Calendar::load("ANBIMA").unwrap();
    /// assert_eq!(cal.getdate("first mon of month", Some(2002), Some(12)).unwrap(), nd(2002, 12, 2));
    /// assert_eq!(cal.getdate("last fri", Some(2002), Some(1)).unwrap(), nd(2002, 1, 25));
    /// ```
    pub fn getdate(&self, expr: &str, year: Option<i32>, month: Option<u32>) -> Result<NaiveDate> {
        let parsed: DateExpr = expr.parse()?;
        self.resolve(&parsed, year, month)
    }

    /// Return the date described by a relative expression, adjusted under a rolling rule.
    pub fn getdate_adjusted(
        &self,
        expr: &str,
        year: Option<i32>,
        month: Option<u32>,
        adjuster: &Adjuster,
    ) -> Result<NaiveDate> {
        let date = self.getdate(expr, year, month)?;
        adjuster.adjust(&date, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::nd;
    use crate::error::BizdaysError;

    fn fixture_anbima() -> Calendar {
        Calendar::load("ANBIMA").unwrap()
    }

    #[test]
    fn test_getdate_january_2002() {
        let cal = fixture_anbima();
        let options = [
            ("15th day", nd(2002, 1, 15)),
            ("first day before 15th day", nd(2002, 1, 14)),
            ("second day after 15th day", nd(2002, 1, 17)),
            ("second bizday before 15th day", nd(2002, 1, 11)),
            ("second bizday after 15th day", nd(2002, 1, 17)),
            ("first bizday", nd(2002, 1, 2)),
            ("second bizday", nd(2002, 1, 3)),
            ("third bizday", nd(2002, 1, 4)),
            ("second bizday before 10th bizday", nd(2002, 1, 11)),
            ("first tue before first day", nd(2001, 12, 25)),
            ("first tue after first day", nd(2002, 1, 8)),
            ("first tue before second day", nd(2002, 1, 1)),
            ("first tue after second day", nd(2002, 1, 8)),
            ("2nd bizday", nd(2002, 1, 3)),
            ("3rd bizday", nd(2002, 1, 4)),
            ("first tue", nd(2002, 1, 1)),
            ("last fri", nd(2002, 1, 25)),
            ("first day before first day", nd(2001, 12, 31)),
            ("2nd day before first day", nd(2001, 12, 30)),
            ("last day", nd(2002, 1, 31)),
            ("first bizday before last day", nd(2002, 1, 30)),
            ("second bizday before last day", nd(2002, 1, 29)),
            ("first day", nd(2002, 1, 1)),
            ("first bizday before first day", nd(2001, 12, 31)),
            ("2nd bizday before first day", nd(2001, 12, 28)),
        ];
        for (expr, expected) in options {
            assert_eq!(cal.getdate(expr, Some(2002), Some(1)).unwrap(), expected, "{expr}");
        }
    }

    #[test]
    fn test_getdate_may_2002() {
        let cal = fixture_anbima();
        let options = [
            ("10th fri before 10th bizday", nd(2002, 3, 8)),
            ("first wed after 15th day", nd(2002, 5, 22)),
            ("first wed before 15th day", nd(2002, 5, 8)),
        ];
        for (expr, expected) in options {
            assert_eq!(cal.getdate(expr, Some(2002), Some(5)).unwrap(), expected, "{expr}");
        }
    }

    #[test]
    fn test_getdate_scopes() {
        let cal = fixture_anbima();
        assert_eq!(
            cal.getdate("first mon of month", Some(2002), Some(12)).unwrap(),
            nd(2002, 12, 2)
        );
        assert_eq!(
            cal.getdate("first bizday of next month", Some(2002), Some(12)).unwrap(),
            nd(2003, 1, 2)
        );
        assert_eq!(
            cal.getdate("last business day of previous month", Some(2002), Some(1)).unwrap(),
            nd(2001, 12, 31)
        );
        // without a month the window is the year
        assert_eq!(cal.getdate("last fri", Some(2002), None).unwrap(), nd(2002, 12, 27));
        assert_eq!(
            cal.getdate("last fri of year", Some(2002), Some(1)).unwrap(),
            nd(2002, 12, 27)
        );
        assert_eq!(cal.getdate("100th bizday", Some(2002), None).unwrap(), nd(2002, 5, 27));
        assert_eq!(cal.getdate("last bizday", Some(2002), None).unwrap(), nd(2002, 12, 31));
    }

    #[test]
    fn test_getdate_literal_reference() {
        let cal = fixture_anbima();
        assert_eq!(
            cal.getdate("15th bizday before 2018-02-01", None, None).unwrap(),
            nd(2018, 1, 11)
        );
        assert_eq!(
            cal.getdate("last bizday after 2002-12-24", None, None).unwrap(),
            nd(2002, 12, 26)
        );
    }

    #[test]
    fn test_getdate_range_clipped() {
        // the calendar ends on 2078-12-25
        let cal = fixture_anbima();
        assert_eq!(cal.getdate("last bizday", Some(2078), None).unwrap(), nd(2078, 12, 23));
        assert!(matches!(
            cal.getdate("first bizday", Some(2080), None),
            Err(BizdaysError::DateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_getdate_errors() {
        let cal = fixture_anbima();
        // ordinal beyond the matches
        assert!(matches!(
            cal.getdate("6th fri", Some(2002), Some(1)),
            Err(BizdaysError::Value(_))
        ));
        assert!(matches!(
            cal.getdate("32nd day", Some(2002), Some(1)),
            Err(BizdaysError::Value(_))
        ));
        // a window needs a year
        match cal.getdate("first day before 10th bizday", None, Some(1)) {
            Err(BizdaysError::Value(msg)) => {
                assert_eq!(msg, "a year is required to resolve '1st day before 10th bizday'")
            }
            other => panic!("expected a value error, got {other:?}"),
        }
        assert!(matches!(
            cal.getdate("first day of month", Some(2002), None),
            Err(BizdaysError::Value(_))
        ));
        // a year too far out for the month arithmetic
        assert!(matches!(
            cal.getdate("first day of next month", Some(200_000_000), Some(1)),
            Err(BizdaysError::Value(_))
        ));
        // malformed
        assert!(cal.getdate("first weekday", Some(2002), None).unwrap_err().is_format());
        assert!(cal.getdate("15th day after", Some(2002), None).unwrap_err().is_format());
    }

    #[test]
    fn test_getdate_adjusted() {
        let cal = fixture_anbima();
        // 2002-12-25 is a holiday
        let date = cal
            .getdate_adjusted("25th day", Some(2002), Some(12), &Adjuster::Following {})
            .unwrap();
        assert_eq!(date, nd(2002, 12, 26));
        let date = cal
            .getdate_adjusted("25th day", Some(2002), Some(12), &Adjuster::Preceding {})
            .unwrap();
        assert_eq!(date, nd(2002, 12, 24));
        let date = cal
            .getdate_adjusted("25th day", Some(2002), Some(12), &Adjuster::Actual {})
            .unwrap();
        assert_eq!(date, nd(2002, 12, 25));
    }
}
