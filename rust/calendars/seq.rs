use chrono::prelude::*;
use std::iter::FusedIterator;

use crate::calendars::{Calendar, DateRoll};
use crate::error::{ensure_value, Result};

/// The ascending business days of a window, generated lazily.
///
/// A clone restarts the sequence from its current position.
#[derive(Clone, Debug)]
pub struct BusDateRange<'a> {
    calendar: &'a Calendar,
    first: Option<NaiveDate>,
    last: Option<NaiveDate>,
    remaining: usize,
}

impl Calendar {
    /// Return the business days between `from` and `to`, inclusive.
    ///
    /// # Examples
    /// ```rust
    /// # use bizdays::calendars::{Calendar, nd};
    /// let cal = Calendar::load("ANBIMA").unwrap();
    /// let days: Vec<_> = cal.seq(&nd(2002, 12, 23), &nd(2002, 12, 27)).unwrap().collect();
    /// assert_eq!(days, vec![nd(2002, 12, 23), nd(2002, 12, 24), nd(2002, 12, 26), nd(2002, 12, 27)]);
    /// ```
    pub fn seq(&self, from: &NaiveDate, to: &NaiveDate) -> Result<BusDateRange<'_>> {
        self.check_range(from)?;
        self.check_range(to)?;
        ensure_value!(from <= to, "sequence start ({from}) must not be after its end ({to})");
        let remaining = self.bus_days_in(from, to)?;
        let (first, last) = if remaining == 0 {
            (None, None)
        } else {
            (
                Some(self.roll_forward_bus_day(from)?),
                Some(self.roll_backward_bus_day(to)?),
            )
        };
        Ok(BusDateRange {
            calendar: self,
            first,
            last,
            remaining,
        })
    }
}

impl BusDateRange<'_> {
    /// Returns `true` if the window holds no business days.
    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }
}

impl Iterator for BusDateRange<'_> {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.first?;
        self.remaining -= 1;
        self.first = if self.remaining > 0 {
            self.calendar.add_bus_days(&current, 1).ok()
        } else {
            None
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for BusDateRange<'_> {
    fn next_back(&mut self) -> Option<NaiveDate> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.last?;
        self.remaining -= 1;
        self.last = if self.remaining > 0 {
            self.calendar.add_bus_days(&current, -1).ok()
        } else {
            None
        };
        Some(current)
    }
}

impl ExactSizeIterator for BusDateRange<'_> {}

impl FusedIterator for BusDateRange<'_> {}
