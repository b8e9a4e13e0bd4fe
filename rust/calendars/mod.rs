//! Create business day calendars and perform financial date manipulation.
//!
//! ### Basic usage
//!
//! A [`Calendar`] is built from a list of holidays and the weekdays that are not part of the
//! working week. Bundled calendars are loaded by name.
//!
//! ```rust
//! # use bizdays::calendars::{Calendar, nd};
//! // Christmas 2002, with Saturday and Sunday as the weekend
//! let cal = Calendar::try_new(vec![nd(2002, 12, 25)], vec![5, 6]).unwrap();
//! let anbima = Calendar::load("ANBIMA").unwrap();
//! ```
//! These calendars are used to count and manipulate dates e.g.
//!
//! ```rust
//! # use bizdays::calendars::{Calendar, nd};
//! # let anbima = Calendar::load("ANBIMA").unwrap();
//! let date = nd(2002, 12, 24);  // Tuesday 24th December 2002
//! let next = anbima.offset(&date, 1).unwrap();
//! // Thursday 26th December 2002, observing the holiday.
//! assert_eq!(next, nd(2002, 12, 26));
//! assert_eq!(anbima.bizdays(&date, &next).unwrap(), 1);
//! ```
//!
//! ### Valid range
//!
//! A calendar only knows holidays over a bounded range of dates, by default the span of its
//! holidays. Queries outside of it are errors rather than guesses.
//!
//! ```rust
//! # use bizdays::calendars::{Calendar, nd};
//! # use bizdays::BizdaysError;
//! # let anbima = Calendar::load("ANBIMA").unwrap();
//! assert_eq!(anbima.end(), nd(2078, 12, 25));
//! assert!(matches!(
//!     anbima.isbizday(&nd(2080, 1, 2)),
//!     Err(BizdaysError::DateOutOfRange { .. })
//! ));
//! ```
//!
//! ### Rolling rules
//!
//! Non-business days are mapped to business days by an [`Adjuster`].
//!
//! ```rust
//! # use bizdays::calendars::{Adjuster, Calendar, CalendarAdjustment, nd};
//! # let anbima = Calendar::load("ANBIMA").unwrap();
//! let rule: Adjuster = "modified_following".parse().unwrap();
//! // Saturday 31st August 2002 cannot roll into September
//! assert_eq!(anbima.adjust(&nd(2002, 8, 31), &rule).unwrap(), nd(2002, 8, 30));
//! ```

use chrono::prelude::*;

mod adjuster;
mod cal;
mod dateroll;
mod getdate;
mod holidays;
mod named;
mod seq;
mod weekdays;

pub use crate::calendars::{
    adjuster::{Adjuster, Adjustment, CalendarAdjustment},
    cal::{Calendar, CalendarBuilder},
    dateroll::DateRoll,
    getdate::{DateExpr, Direction, Ordinal, Reference, Scope, Unit},
    holidays::HolidaySource,
    named::available_calendars,
    seq::BusDateRange,
    weekdays::{parse_weekday, weekday_from_index, weekday_name},
};

/// Create a `NaiveDate`.
///
/// Panics if date values are invalid.
pub fn nd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("`year`, `month` `day` are invalid.")
}
