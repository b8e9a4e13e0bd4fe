use chrono::prelude::*;

use crate::calendars::cal::period_window;
use crate::calendars::dateroll::step;
use crate::calendars::getdate::expr::{DateExpr, Direction, Ordinal, Reference, Scope, Unit};
use crate::calendars::{Calendar, DateRoll};
use crate::error::{ensure_value, BizdaysError, Result};

impl Calendar {
    /// Resolve a parsed [`DateExpr`] against this calendar.
    ///
    /// `year` and `month` select the window positions are looked up in. Expressions shifting
    /// from a literal date need neither.
    pub fn resolve(&self, expr: &DateExpr, year: Option<i32>, month: Option<u32>) -> Result<NaiveDate> {
        ensure_value!(
            year.is_some() || !expr.needs_window(),
            "a year is required to resolve '{expr}'"
        );
        match expr {
            DateExpr::Position {
                ordinal,
                unit,
                scope,
            } => self.position(*ordinal, *unit, *scope, year, month),
            DateExpr::Shift {
                count,
                unit,
                direction,
                reference,
            } => {
                let from = match reference {
                    Reference::Position {
                        ordinal,
                        unit,
                        scope,
                    } => self.position(*ordinal, *unit, *scope, year, month)?,
                    Reference::Date(d) => *d,
                };
                self.shift(&from, *count, *unit, *direction)
            }
        }
    }

    fn position(
        &self,
        ordinal: Ordinal,
        unit: Unit,
        scope: Scope,
        year: Option<i32>,
        month: Option<u32>,
    ) -> Result<NaiveDate> {
        let (first, last) = window(scope, year, month)?;
        let days = first.iter_days().take_while(|d| *d <= last);
        let matches: Vec<NaiveDate> = match unit {
            Unit::Day => days.collect(),
            Unit::Weekday(w) => days.filter(|d| d.weekday() == w).collect(),
            Unit::BizDay => {
                // business days exist only inside the valid range
                let lo = first.max(self.start);
                let hi = last.min(self.end);
                if lo > hi {
                    return Err(BizdaysError::DateOutOfRange {
                        date: first,
                        start: self.start,
                        end: self.end,
                    });
                }
                self.bus_date_range(&lo, &hi)?
            }
        };
        select(ordinal, &matches)
    }

    fn shift(&self, from: &NaiveDate, count: u32, unit: Unit, direction: Direction) -> Result<NaiveDate> {
        let n = i32::try_from(count)
            .map_err(|_| BizdaysError::Value(format!("ordinal {count} is too large")))?;
        let sign = match direction {
            Direction::Before => -1,
            Direction::After => 1,
        };
        match unit {
            Unit::Day => step(from, sign * n),
            Unit::BizDay => self.lag_bus_days(from, sign * n),
            Unit::Weekday(w) => {
                let diff = w.num_days_from_monday() as i64 - from.weekday().num_days_from_monday() as i64;
                // days to the nearest such weekday strictly on that side, 1..=7
                let nearest = (sign as i64 * diff + 6).rem_euclid(7) + 1;
                let days = nearest + 7 * (i64::from(n) - 1);
                let days = i32::try_from(days)
                    .map_err(|_| BizdaysError::Value(format!("ordinal {count} is too large")))?;
                step(from, sign * days)
            }
        }
    }
}

/// Pick the match at `ordinal`, counting from one.
fn select(ordinal: Ordinal, matches: &[NaiveDate]) -> Result<NaiveDate> {
    let found = match ordinal {
        Ordinal::Last => matches.last(),
        Ordinal::Nth(n) => n.checked_sub(1).and_then(|i| matches.get(i as usize)),
    };
    found.copied().ok_or_else(|| {
        BizdaysError::Value(format!(
            "{ordinal} position not found, the window has {} matches",
            matches.len()
        ))
    })
}

fn window(scope: Scope, year: Option<i32>, month: Option<u32>) -> Result<(NaiveDate, NaiveDate)> {
    let year = year.ok_or_else(|| {
        BizdaysError::Value("a year is required to resolve a date position".to_string())
    })?;
    let required_month = || {
        month.ok_or_else(|| {
            BizdaysError::Value(format!("a month is required for '{}'", scope.to_string().trim()))
        })
    };
    match scope {
        Scope::Implicit => period_window(year, month),
        Scope::Year => period_window(year, None),
        Scope::Month => period_window(year, Some(required_month()?)),
        Scope::NextMonth | Scope::PreviousMonth => {
            let m = required_month()?;
            ensure_value!((1..=12).contains(&m), "month must be in 1..=12, got {m}");
            let delta = if scope == Scope::NextMonth { 1 } else { -1 };
            let index = year
                .checked_mul(12)
                .and_then(|v| v.checked_add(m as i32 - 1 + delta))
                .ok_or_else(|| BizdaysError::Value(format!("year {year} is out of bounds")))?;
            period_window(index.div_euclid(12), Some(index.rem_euclid(12) as u32 + 1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::nd;

    #[test]
    fn test_window() {
        assert_eq!(
            window(Scope::Implicit, Some(2002), Some(2)).unwrap(),
            (nd(2002, 2, 1), nd(2002, 2, 28))
        );
        assert_eq!(
            window(Scope::Year, Some(2002), Some(2)).unwrap(),
            (nd(2002, 1, 1), nd(2002, 12, 31))
        );
        assert_eq!(
            window(Scope::NextMonth, Some(2002), Some(12)).unwrap(),
            (nd(2003, 1, 1), nd(2003, 1, 31))
        );
        assert_eq!(
            window(Scope::PreviousMonth, Some(2002), Some(1)).unwrap(),
            (nd(2001, 12, 1), nd(2001, 12, 31))
        );
        assert!(matches!(
            window(Scope::Month, Some(2002), None),
            Err(BizdaysError::Value(_))
        ));
        assert!(matches!(
            window(Scope::Implicit, None, Some(1)),
            Err(BizdaysError::Value(_))
        ));
        assert!(window(Scope::NextMonth, Some(2002), Some(13)).is_err());
        assert!(matches!(
            window(Scope::NextMonth, Some(200_000_000), Some(1)),
            Err(BizdaysError::Value(_))
        ));
        assert!(window(Scope::PreviousMonth, Some(i32::MIN), Some(1)).is_err());
    }

    #[test]
    fn test_select() {
        let matches = vec![nd(2002, 1, 4), nd(2002, 1, 11), nd(2002, 1, 18)];
        assert_eq!(select(Ordinal::Nth(1), &matches).unwrap(), nd(2002, 1, 4));
        assert_eq!(select(Ordinal::Last, &matches).unwrap(), nd(2002, 1, 18));
        assert!(matches!(
            select(Ordinal::Nth(4), &matches),
            Err(BizdaysError::Value(_))
        ));
        assert!(select(Ordinal::Last, &[]).is_err());
    }

    #[test]
    fn test_shift_weekday() {
        let cal = Calendar::try_new(vec![], vec![5, 6]).unwrap();
        // 2002-01-01 is a Tuesday
        let tue = nd(2002, 1, 1);
        let shift = |count, w, direction| cal.shift(&tue, count, Unit::Weekday(w), direction).unwrap();
        assert_eq!(shift(1, Weekday::Tue, Direction::After), nd(2002, 1, 8));
        assert_eq!(shift(1, Weekday::Tue, Direction::Before), nd(2001, 12, 25));
        assert_eq!(shift(1, Weekday::Wed, Direction::After), nd(2002, 1, 2));
        assert_eq!(shift(1, Weekday::Mon, Direction::Before), nd(2001, 12, 31));
        assert_eq!(shift(2, Weekday::Mon, Direction::After), nd(2002, 1, 14));
        assert_eq!(shift(3, Weekday::Sun, Direction::Before), nd(2001, 12, 16));
    }
}
