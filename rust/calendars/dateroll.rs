use chrono::prelude::*;
use chrono::Days;
use std::cmp::Ordering;

use crate::calendars::{Adjuster, Adjustment};
use crate::error::{BizdaysError, Result};

/// Simple date adjustment defining business days, holidays and rolling over a bounded range.
///
/// Every query is checked against [`DateRoll::valid_range`]: dates, and results of rolling,
/// outside of the range return [`BizdaysError::DateOutOfRange`] rather than a silently
/// wrong answer.
pub trait DateRoll {
    /// Returns whether the date is part of the general working week.
    fn is_weekday(&self, date: &NaiveDate) -> bool;

    /// Returns whether the date is a specific holiday excluded from the regular working week.
    fn is_holiday(&self, date: &NaiveDate) -> bool;

    /// Returns the first and last dates, inclusive, for which the calendar is defined.
    fn valid_range(&self) -> (NaiveDate, NaiveDate);

    /// Return the `date` if it lies within the valid range of the calendar.
    fn check_range(&self, date: &NaiveDate) -> Result<NaiveDate> {
        let (start, end) = self.valid_range();
        if *date < start || *date > end {
            return Err(BizdaysError::DateOutOfRange {
                date: *date,
                start,
                end,
            });
        }
        Ok(*date)
    }

    /// Returns whether the date is a business day, i.e. part of the working week and not a holiday.
    fn is_bus_day(&self, date: &NaiveDate) -> Result<bool> {
        self.check_range(date)?;
        Ok(self.is_weekday(date) && !self.is_holiday(date))
    }

    /// Returns whether the date is not a business day, i.e. either not in working week or a specific holiday.
    fn is_non_bus_day(&self, date: &NaiveDate) -> Result<bool> {
        Ok(!self.is_bus_day(date)?)
    }

    /// Return the `date`, if a business day, or get the next business date after `date`.
    fn roll_forward_bus_day(&self, date: &NaiveDate) -> Result<NaiveDate> {
        let mut new_date = *date;
        while !self.is_bus_day(&new_date)? {
            new_date = step(&new_date, 1)?;
        }
        Ok(new_date)
    }

    /// Return the `date`, if a business day, or get the business day preceding `date`.
    fn roll_backward_bus_day(&self, date: &NaiveDate) -> Result<NaiveDate> {
        let mut new_date = *date;
        while !self.is_bus_day(&new_date)? {
            new_date = step(&new_date, -1)?;
        }
        Ok(new_date)
    }

    /// Return the `date`, if a business day, or get the proceeding business date, without rolling
    /// into a new month.
    fn roll_mod_forward_bus_day(&self, date: &NaiveDate) -> Result<NaiveDate> {
        let new_date = self.roll_forward_bus_day(date)?;
        if new_date.month() != date.month() {
            self.roll_backward_bus_day(date)
        } else {
            Ok(new_date)
        }
    }

    /// Return the `date`, if a business day, or get the preceding business date, without rolling
    /// into a previous month.
    fn roll_mod_backward_bus_day(&self, date: &NaiveDate) -> Result<NaiveDate> {
        let new_date = self.roll_backward_bus_day(date)?;
        if new_date.month() != date.month() {
            self.roll_forward_bus_day(date)
        } else {
            Ok(new_date)
        }
    }

    /// Adjust a date by a number of business days, under lag rules.
    ///
    /// *Note*: if the number of business days is **zero** a non-business day will be rolled
    /// **forwards**.
    ///
    /// *Note*: if the given `date` is a non-business date adding or subtracting 1 business
    /// day is equivalent to the rolling forwards or backwards, respectively.
    fn lag_bus_days(&self, date: &NaiveDate, days: i32) -> Result<NaiveDate> {
        if self.is_bus_day(date)? {
            return self.add_bus_days(date, days);
        }
        match days.cmp(&0_i32) {
            Ordering::Equal => self.roll_forward_bus_day(date),
            Ordering::Less => self.add_bus_days(&self.roll_backward_bus_day(date)?, days + 1),
            Ordering::Greater => self.add_bus_days(&self.roll_forward_bus_day(date)?, days - 1),
        }
    }

    /// Add a given number of calendar days to a `date` with the result adjusted to a business
    /// day under the given rule.
    fn add_cal_days(&self, date: &NaiveDate, days: i32, adjuster: &Adjuster) -> Result<NaiveDate>
    where
        Self: Sized,
    {
        let new_date = step(date, days)?;
        adjuster.adjust(&new_date, self)
    }

    /// Add a given number of business days to a business day `date`.
    fn add_bus_days(&self, date: &NaiveDate, days: i32) -> Result<NaiveDate> {
        if self.is_non_bus_day(date)? {
            return Err(BizdaysError::Value(format!(
                "cannot add business days to {date}, which is not a business day"
            )));
        }
        let mut new_date = *date;
        let mut counter: i32 = 0;
        if days < 0 {
            // then we subtract business days
            while counter > days {
                new_date = self.roll_backward_bus_day(&step(&new_date, -1)?)?;
                counter -= 1;
            }
        } else {
            // add business days
            while counter < days {
                new_date = self.roll_forward_bus_day(&step(&new_date, 1)?)?;
                counter += 1;
            }
        }
        Ok(new_date)
    }

    /// Count the business days between `start` and `end`, both inclusive.
    ///
    /// Returns zero when `end` precedes `start`.
    fn bus_days_in(&self, start: &NaiveDate, end: &NaiveDate) -> Result<usize> {
        self.check_range(start)?;
        self.check_range(end)?;
        let mut count = 0_usize;
        for date in start.iter_days().take_while(|d| d <= end) {
            if self.is_bus_day(&date)? {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Return a vector of business dates between a start and end, inclusive.
    fn bus_date_range(&self, start: &NaiveDate, end: &NaiveDate) -> Result<Vec<NaiveDate>> {
        let mut vec = Vec::new();
        for date in start.iter_days().take_while(|d| d <= end) {
            if self.is_bus_day(&date)? {
                vec.push(date);
            }
        }
        Ok(vec)
    }
}

/// Move a date by a signed number of calendar days.
pub(crate) fn step(date: &NaiveDate, days: i32) -> Result<NaiveDate> {
    let n = Days::new(u64::from(days.unsigned_abs()));
    let moved = if days < 0 {
        date.checked_sub_days(n)
    } else {
        date.checked_add_days(n)
    };
    moved.ok_or_else(|| BizdaysError::Value(format!("{date} moved by {days} days overflows")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::{nd, Calendar, CalendarAdjustment};

    fn fixture_hol_cal() -> Calendar {
        let hols = vec![nd(2015, 9, 5), nd(2015, 9, 7)]; // Saturday and Monday
        Calendar::builder()
            .with_holidays(hols)
            .with_week_mask(vec![5, 6])
            .with_start(nd(2015, 1, 1))
            .with_end(nd(2025, 12, 31))
            .build()
            .unwrap()
    }

    #[test]
    fn test_roll_forward_bus_day() {
        let cal = fixture_hol_cal();
        let next = cal.roll_forward_bus_day(&nd(2015, 9, 7)).unwrap();
        assert_eq!(next, nd(2015, 9, 8));

        let next = cal.roll_forward_bus_day(&nd(2015, 9, 5)).unwrap();
        assert_eq!(next, nd(2015, 9, 8));

        let next = cal.roll_forward_bus_day(&nd(2015, 9, 4)).unwrap();
        assert_eq!(next, nd(2015, 9, 4))
    }

    #[test]
    fn test_roll_backward_bus_day() {
        let cal = fixture_hol_cal();
        let prev = cal.roll_backward_bus_day(&nd(2015, 9, 7)).unwrap();
        assert_eq!(prev, nd(2015, 9, 4));

        let prev = cal.roll_backward_bus_day(&nd(2015, 9, 4)).unwrap();
        assert_eq!(prev, nd(2015, 9, 4))
    }

    #[test]
    fn test_roll_mod() {
        let cal = fixture_hol_cal();
        // Saturday 31st October 2015 cannot roll forward into November
        assert_eq!(
            cal.roll_mod_forward_bus_day(&nd(2015, 10, 31)).unwrap(),
            nd(2015, 10, 30)
        );
        // Sunday 1st November 2015 cannot roll back into October
        assert_eq!(
            cal.roll_mod_backward_bus_day(&nd(2015, 11, 1)).unwrap(),
            nd(2015, 11, 2)
        );
        // inside a month the modified rules agree with the plain ones
        assert_eq!(
            cal.roll_mod_forward_bus_day(&nd(2015, 9, 5)).unwrap(),
            nd(2015, 9, 8)
        );
        assert_eq!(
            cal.roll_mod_backward_bus_day(&nd(2015, 9, 7)).unwrap(),
            nd(2015, 9, 4)
        );
    }

    #[test]
    fn test_is_business_day() {
        let cal = fixture_hol_cal();
        assert!(!cal.is_bus_day(&nd(2015, 9, 7)).unwrap()); // Monday in Hol list
        assert!(cal.is_bus_day(&nd(2015, 9, 10)).unwrap()); // Thursday
        assert!(!cal.is_bus_day(&nd(2024, 1, 6)).unwrap()); // Saturday
        assert!(cal.is_non_bus_day(&nd(2024, 1, 6)).unwrap());
    }

    #[test]
    fn test_out_of_range() {
        let cal = fixture_hol_cal();
        match cal.is_bus_day(&nd(2014, 12, 31)) {
            Err(BizdaysError::DateOutOfRange { date, start, end }) => {
                assert_eq!(date, nd(2014, 12, 31));
                assert_eq!(start, nd(2015, 1, 1));
                assert_eq!(end, nd(2025, 12, 31));
            }
            _ => panic!("expected a range error"),
        }
        // the roll itself leaves the range: 2025-12-31 is a Wednesday, 2026-01-01 is not valid
        assert!(cal.roll_forward_bus_day(&nd(2025, 12, 31)).is_ok());
        assert!(cal.add_bus_days(&nd(2025, 12, 31), 1).is_err());
        // 2015-01-01 is a Thursday, rolling back from a Saturday on the boundary fails
        let cal = Calendar::builder()
            .with_week_mask(vec![5, 6])
            .with_start(nd(2015, 1, 3))
            .with_end(nd(2015, 1, 31))
            .build()
            .unwrap();
        assert!(cal.roll_backward_bus_day(&nd(2015, 1, 4)).is_err());
    }

    #[test]
    fn test_lag_bus_days() {
        let cal = fixture_hol_cal();
        let result = cal.lag_bus_days(&nd(2015, 9, 7), 1).unwrap();
        assert_eq!(result, nd(2015, 9, 8));

        let result = cal.lag_bus_days(&nd(2025, 2, 15), -1).unwrap();
        assert_eq!(result, nd(2025, 2, 14));

        let result = cal.lag_bus_days(&nd(2015, 9, 7), 0).unwrap();
        assert_eq!(result, nd(2015, 9, 8));

        let result = cal.lag_bus_days(&nd(2015, 9, 5), 2).unwrap();
        assert_eq!(result, nd(2015, 9, 9));

        let result = cal.lag_bus_days(&nd(2015, 9, 5), -2).unwrap();
        assert_eq!(result, nd(2015, 9, 3));
    }

    #[test]
    fn test_add_cal_days() {
        let cal = fixture_hol_cal();
        // 2015-09-03 + 2 days is Saturday 5th, rolled to Tuesday 8th over the holiday
        let next = cal
            .add_cal_days(&nd(2015, 9, 3), 2, &Adjuster::Following {})
            .unwrap();
        assert_eq!(next, nd(2015, 9, 8));

        let prev = cal
            .add_cal_days(&nd(2015, 9, 9), -2, &Adjuster::Preceding {})
            .unwrap();
        assert_eq!(prev, nd(2015, 9, 4));
    }

    #[test]
    fn test_add_bus_days() {
        let cal = fixture_hol_cal();
        let next = cal.add_bus_days(&nd(2015, 9, 4), 2).unwrap();
        assert_eq!(next, nd(2015, 9, 9));

        let prev = cal.add_bus_days(&nd(2015, 9, 9), -2).unwrap();
        assert_eq!(prev, nd(2015, 9, 4));

        let same = cal.add_bus_days(&nd(2015, 9, 9), 0).unwrap();
        assert_eq!(same, nd(2015, 9, 9));
    }

    #[test]
    fn test_add_bus_days_error() {
        let cal = fixture_hol_cal();
        match cal.add_bus_days(&nd(2015, 9, 7), 3) {
            Err(BizdaysError::Value(_)) => {}
            _ => panic!("expected a value error"),
        }
    }

    #[test]
    fn test_rolls() {
        let cal = fixture_hol_cal();
        let udates = vec![
            nd(2015, 9, 4),
            nd(2015, 9, 5),
            nd(2015, 9, 6),
            nd(2015, 9, 7),
        ];
        let result = cal.adjusts(&udates, &Adjuster::Following {}).unwrap();
        assert_eq!(
            result,
            vec![
                nd(2015, 9, 4),
                nd(2015, 9, 8),
                nd(2015, 9, 8),
                nd(2015, 9, 8)
            ]
        );
    }

    #[test]
    fn test_bus_date_range() {
        let cal = fixture_hol_cal();
        let result = cal.bus_date_range(&nd(2015, 9, 3), &nd(2015, 9, 9)).unwrap();
        assert_eq!(
            result,
            vec![nd(2015, 9, 3), nd(2015, 9, 4), nd(2015, 9, 8), nd(2015, 9, 9)]
        );
        assert_eq!(cal.bus_days_in(&nd(2015, 9, 3), &nd(2015, 9, 9)).unwrap(), 4);
        assert_eq!(cal.bus_days_in(&nd(2015, 9, 9), &nd(2015, 9, 3)).unwrap(), 0);
    }

    #[test]
    fn test_step() {
        assert_eq!(step(&nd(2015, 9, 30), 1).unwrap(), nd(2015, 10, 1));
        assert_eq!(step(&nd(2015, 3, 1), -1).unwrap(), nd(2015, 2, 28));
        assert!(step(&NaiveDate::MAX, 1).is_err());
    }
}
