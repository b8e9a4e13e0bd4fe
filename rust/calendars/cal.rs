use chrono::prelude::*;
use indexmap::set::IndexSet;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use tracing::debug;

#[cfg(feature = "python")]
use pyo3::pyclass;

use crate::calendars::holidays::HolidaySource;
use crate::calendars::named::{get_canonical_name, get_holidays_by_name, get_weekmask_by_name};
use crate::calendars::weekdays::{parse_weekday, weekday_from_index};
use crate::calendars::{CalendarAdjustment, DateRoll};
use crate::error::{ensure_value, BizdaysError, Result};
use crate::options::{self, DateValue, Options};

const DEFAULT_START: (i32, u32, u32) = (1970, 1, 1);
const DEFAULT_END: (i32, u32, u32) = (2071, 1, 1);
// bound on the business day index, one entry per day
const MAX_SPAN_DAYS: i64 = 366 * 1000;

/// A business day calendar with a singular list of holidays, bounded by a valid date range.
///
/// A business day calendar is formed of 3 components:
///
/// - `week_mask`: which defines the days of the week that are not general business days. In
///   Brazil, as in most markets, these are `[5, 6]` for Saturday and Sunday.
/// - `holidays`: which defines specific dates that may be exceptions to the general working
///   week, and cannot be business days.
/// - `start` and `end`: the first and last dates for which the calendar answers queries.
///   Any query outside of this range errors, since a holiday list says nothing about dates
///   it does not cover.
///
/// The `financial` flag selects the counting convention of [`Calendar::bizdays`].
///
/// # Examples
/// ```rust
/// # use bizdays::calendars::{Calendar, nd};
/// let cal = Calendar::load("ANBIMA").unwrap();
/// assert!(!cal.isbizday(&nd(2002, 12, 25)).unwrap());
/// assert_eq!(cal.bizdays(&nd(2013, 1, 1), &nd(2014, 1, 1)).unwrap(), 252);
/// assert_eq!(cal.offset(&nd(2002, 12, 24), 1).unwrap(), nd(2002, 12, 26));
/// ```
#[cfg_attr(feature = "python", pyclass(module = "bizdays.rs"))]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CalendarDataModel")]
pub struct Calendar {
    pub(crate) name: Option<String>,
    pub(crate) holidays: IndexSet<NaiveDate>,
    pub(crate) week_mask: HashSet<Weekday>,
    pub(crate) start: NaiveDate,
    pub(crate) end: NaiveDate,
    pub(crate) financial: bool,
    pub(crate) options: Options,
    #[serde(skip)]
    pub(crate) index: BusDayIndex,
}

/// Cumulative count of business days from `start`, one entry per calendar day of the range.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct BusDayIndex {
    counts: Vec<u32>,
}

impl BusDayIndex {
    fn build(start: NaiveDate, end: NaiveDate, is_bus_day: impl Fn(&NaiveDate) -> bool) -> Self {
        let mut total = 0_u32;
        let counts = start
            .iter_days()
            .take_while(|d| *d <= end)
            .map(|d| {
                if is_bus_day(&d) {
                    total += 1;
                }
                total
            })
            .collect();
        BusDayIndex { counts }
    }

    /// Business days in `[start + lo, start + hi]`, with `lo <= hi` day offsets into the range.
    fn between(&self, lo: usize, hi: usize) -> u32 {
        let before = if lo == 0 { 0 } else { self.counts[lo - 1] };
        self.counts[hi] - before
    }
}

#[derive(Serialize, Deserialize)]
struct CalendarDataModel {
    name: Option<String>,
    holidays: Vec<NaiveDate>,
    week_mask: Vec<Weekday>,
    start: NaiveDate,
    end: NaiveDate,
    #[serde(default = "default_financial")]
    financial: bool,
    #[serde(default)]
    options: Options,
}

fn default_financial() -> bool {
    true
}

impl TryFrom<CalendarDataModel> for Calendar {
    type Error = BizdaysError;

    fn try_from(value: CalendarDataModel) -> Result<Self> {
        let mut builder = Calendar::builder()
            .with_holidays(value.holidays)
            .with_weekdays(value.week_mask)
            .with_start(value.start)
            .with_end(value.end)
            .with_financial(value.financial)
            .with_options(value.options);
        if let Some(name) = value.name {
            builder = builder.with_name(name);
        }
        builder.build()
    }
}

/// A builder for [`Calendar`], validating all parameters at [`CalendarBuilder::build`].
#[derive(Clone, Debug, Default)]
pub struct CalendarBuilder {
    name: Option<String>,
    holidays: Vec<NaiveDate>,
    week_mask: Vec<u8>,
    weekdays: Vec<Weekday>,
    weekday_names: Vec<String>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    financial: Option<bool>,
    options: Option<Options>,
}

impl CalendarBuilder {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add holidays. Repeated calls extend the list.
    pub fn with_holidays(mut self, holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.holidays.extend(holidays);
        self
    }

    /// Add non-working weekdays by index (0=Mon,.., 6=Sun).
    pub fn with_week_mask(mut self, week_mask: impl IntoIterator<Item = u8>) -> Self {
        self.week_mask.extend(week_mask);
        self
    }

    pub fn with_weekdays(mut self, weekdays: impl IntoIterator<Item = Weekday>) -> Self {
        self.weekdays.extend(weekdays);
        self
    }

    /// Add non-working weekdays by English name, e.g. `"Saturday"` or `"sun"`.
    pub fn with_weekday_names<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.weekday_names
            .extend(names.iter().map(|s| s.as_ref().to_string()));
        self
    }

    pub fn with_start(mut self, start: NaiveDate) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_end(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self
    }

    pub fn with_financial(mut self, financial: bool) -> Self {
        self.financial = Some(financial);
        self
    }

    /// Set the output options. Without this the process-wide options are copied.
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Validate the parameters and build the calendar with its business day index.
    pub fn build(self) -> Result<Calendar> {
        let mut week_mask: HashSet<Weekday> = self.weekdays.into_iter().collect();
        for v in self.week_mask {
            week_mask.insert(weekday_from_index(v)?);
        }
        for name in self.weekday_names.iter() {
            let weekday = parse_weekday(name).ok_or_else(|| {
                BizdaysError::Value(format!("unknown weekday name: '{name}'"))
            })?;
            week_mask.insert(weekday);
        }

        let given = self.holidays.len();
        let holidays: IndexSet<NaiveDate> = IndexSet::from_iter(self.holidays);
        if holidays.len() < given {
            debug!(removed = given - holidays.len(), "duplicate holidays removed");
        }

        let (lo, hi) = match holidays.iter().minmax() {
            itertools::MinMaxResult::NoElements => (ymd(DEFAULT_START), ymd(DEFAULT_END)),
            itertools::MinMaxResult::OneElement(d) => (*d, *d),
            itertools::MinMaxResult::MinMax(a, b) => (*a, *b),
        };
        let start = self.start.unwrap_or(lo);
        let end = self.end.unwrap_or(hi);
        ensure_value!(
            start <= end,
            "calendar start ({start}) must not be after its end ({end})"
        );
        ensure_value!(
            (end - start).num_days() <= MAX_SPAN_DAYS,
            "calendar range {start} to {end} spans more than {MAX_SPAN_DAYS} days"
        );
        if let Some(date) = holidays.iter().find(|d| **d < start || **d > end) {
            return Err(BizdaysError::DateOutOfRange {
                date: *date,
                start,
                end,
            });
        }

        let mut cal = Calendar {
            name: self.name,
            holidays,
            week_mask,
            start,
            end,
            financial: self.financial.unwrap_or(true),
            options: self.options.unwrap_or_else(options::current),
            index: BusDayIndex::default(),
        };
        cal.index = BusDayIndex::build(start, end, |d| cal.is_weekday(d) && !cal.is_holiday(d));
        debug!(
            name = cal.name.as_deref().unwrap_or(""),
            %start,
            %end,
            holidays = cal.holidays.len(),
            "calendar built"
        );
        Ok(cal)
    }
}

fn ymd((y, m, d): (i32, u32, u32)) -> NaiveDate {
    // statically valid constants
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

/// Return the first and last dates of a month, or of a year when `month` is `None`.
pub(crate) fn period_window(year: i32, month: Option<u32>) -> Result<(NaiveDate, NaiveDate)> {
    let invalid = || BizdaysError::Value(format!("invalid period: year {year}, month {month:?}"));
    match month {
        Some(m) => {
            ensure_value!((1..=12).contains(&m), "month must be in 1..=12, got {m}");
            let first = NaiveDate::from_ymd_opt(year, m, 1).ok_or_else(invalid)?;
            let next = if m == 12 {
                NaiveDate::from_ymd_opt(year + 1, 1, 1)
            } else {
                NaiveDate::from_ymd_opt(year, m + 1, 1)
            };
            let last = next.and_then(|d| d.pred_opt()).ok_or_else(invalid)?;
            Ok((first, last))
        }
        None => {
            let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(invalid)?;
            let last = NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(invalid)?;
            Ok((first, last))
        }
    }
}

impl Calendar {
    /// Return a [`CalendarBuilder`] for a calendar without holidays or non-working weekdays.
    pub fn builder() -> CalendarBuilder {
        CalendarBuilder::default()
    }

    /// Create a calendar.
    ///
    /// `holidays` provide a vector of dates that cannot be business days. `week_mask` is a
    /// vector of days (0=Mon,.., 6=Sun) that are excluded from the working week. The valid
    /// range spans the holidays, or 1970-01-01 to 2071-01-01 without them.
    pub fn try_new(holidays: Vec<NaiveDate>, week_mask: Vec<u8>) -> Result<Self> {
        Calendar::builder()
            .with_holidays(holidays)
            .with_week_mask(week_mask)
            .build()
    }

    /// Load a calendar from a bundled resource name, falling back to a file path.
    ///
    /// Bundled names are matched case-insensitively, see
    /// [`available_calendars`](crate::calendars::available_calendars).
    pub fn load(name_or_path: &str) -> Result<Self> {
        match Self::from_name(name_or_path) {
            Err(BizdaysError::NotFound(_)) => Self::from_file(name_or_path),
            result => result,
        }
    }

    /// Load a bundled calendar by name.
    pub fn from_name(name: &str) -> Result<Self> {
        let canonical = get_canonical_name(name)?;
        let cal = Calendar::builder()
            .with_name(canonical)
            .with_holidays(get_holidays_by_name(canonical)?)
            .with_weekdays(get_weekmask_by_name(canonical)?)
            .build()?;
        debug!(name = canonical, "bundled calendar loaded");
        Ok(cal)
    }

    /// Load a calendar from a holiday file.
    ///
    /// The file holds one ISO date per line and may declare non-working weekdays by name.
    /// Files with the `.cal` extension name the calendar after their stem.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = HolidaySource::from_path(path)?;
        let mut builder = Calendar::builder()
            .with_holidays(source.holidays)
            .with_weekdays(source.weekdays);
        let stem = path
            .extension()
            .filter(|ext| *ext == "cal")
            .and(path.file_stem())
            .and_then(|s| s.to_str());
        if let Some(stem) = stem {
            builder = builder.with_name(stem);
        }
        let cal = builder.build()?;
        debug!(path = %path.display(), "calendar file loaded");
        Ok(cal)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Return the holidays in ascending order.
    pub fn holidays(&self) -> Vec<NaiveDate> {
        self.holidays.iter().copied().sorted().collect()
    }

    /// Return the non-working weekdays, Monday first.
    pub fn weekdays(&self) -> Vec<Weekday> {
        self.week_mask
            .iter()
            .copied()
            .sorted_by_key(|w| w.num_days_from_monday())
            .collect()
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn financial(&self) -> bool {
        self.financial
    }

    pub fn set_financial(&mut self, financial: bool) {
        self.financial = financial;
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn set_options(&mut self, options: Options) {
        self.options = options;
    }

    /// Convert a date for output under the options of this calendar.
    pub fn convert(&self, date: NaiveDate) -> DateValue {
        self.options.convert(date)
    }

    /// Returns whether the date is a business day.
    pub fn isbizday(&self, date: &NaiveDate) -> Result<bool> {
        self.is_bus_day(date)
    }

    /// Count the business days between two dates.
    ///
    /// With `n` the number of business days in the closed interval between the dates, the
    /// result is `n` for a non-financial calendar. A financial calendar counts the business
    /// day boundaries crossed, `n - 1` floored at zero, except that adjacent calendar days
    /// count one day unless a non-business day is followed by a business day. The sign is
    /// negative when `from` is after `to`.
    pub fn bizdays(&self, from: &NaiveDate, to: &NaiveDate) -> Result<i32> {
        self.check_range(from)?;
        self.check_range(to)?;
        let (lo, hi, sign) = if from <= to {
            (from, to, 1)
        } else {
            (to, from, -1)
        };
        let n = self.count(lo, hi) as i32;
        let count = if !self.financial {
            n
        } else if (*hi - *lo).num_days() == 1 {
            // a non-business day then a business day accrues nothing
            if !self.is_bus_day(lo)? && self.is_bus_day(hi)? {
                0
            } else {
                1
            }
        } else {
            (n - 1).max(0)
        };
        Ok(sign * count)
    }

    /// Return the business day `n` business days away from `date`.
    ///
    /// `n = 0` rolls a non-business day forward and a non-business `date` counts its first
    /// roll as one step.
    pub fn offset(&self, date: &NaiveDate, n: i32) -> Result<NaiveDate> {
        self.lag_bus_days(date, n)
    }

    /// Return the `date`, if a business day, or the next business day.
    pub fn following(&self, date: &NaiveDate) -> Result<NaiveDate> {
        self.roll_forward_bus_day(date)
    }

    /// Return the `date`, if a business day, or the previous business day.
    pub fn preceding(&self, date: &NaiveDate) -> Result<NaiveDate> {
        self.roll_backward_bus_day(date)
    }

    /// As [`Calendar::following`] unless that crosses into the next month, then preceding.
    pub fn modified_following(&self, date: &NaiveDate) -> Result<NaiveDate> {
        self.roll_mod_forward_bus_day(date)
    }

    /// As [`Calendar::preceding`] unless that crosses into the previous month, then following.
    pub fn modified_preceding(&self, date: &NaiveDate) -> Result<NaiveDate> {
        self.roll_mod_backward_bus_day(date)
    }

    /// Count the business days of a month, or of a year when `month` is `None`.
    ///
    /// Only days inside the valid range count.
    pub fn getbizdays(&self, year: i32, month: Option<u32>) -> Result<u32> {
        let (first, last) = period_window(year, month)?;
        let lo = first.max(self.start);
        let hi = last.min(self.end);
        if lo > hi {
            return Err(BizdaysError::DateOutOfRange {
                date: first,
                start: self.start,
                end: self.end,
            });
        }
        Ok(self.count(&lo, &hi))
    }

    /// Business days in `[lo, hi]` from the index. Both dates must be in range, `lo <= hi`.
    fn count(&self, lo: &NaiveDate, hi: &NaiveDate) -> u32 {
        let i = (*lo - self.start).num_days() as usize;
        let j = (*hi - self.start).num_days() as usize;
        self.index.between(i, j)
    }
}

impl DateRoll for Calendar {
    fn is_weekday(&self, date: &NaiveDate) -> bool {
        !self.week_mask.contains(&date.weekday())
    }

    fn is_holiday(&self, date: &NaiveDate) -> bool {
        self.holidays.contains(date)
    }

    fn valid_range(&self) -> (NaiveDate, NaiveDate) {
        (self.start, self.end)
    }

    fn bus_days_in(&self, start: &NaiveDate, end: &NaiveDate) -> Result<usize> {
        self.check_range(start)?;
        self.check_range(end)?;
        if start > end {
            return Ok(0);
        }
        Ok(self.count(start, end) as usize)
    }
}

impl CalendarAdjustment for Calendar {}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Calendar: {}", self.name.as_deref().unwrap_or(""))?;
        writeln!(f, "Start: {}", self.start)?;
        writeln!(f, "End: {}", self.end)?;
        writeln!(f, "Holidays: {}", self.holidays.len())?;
        write!(f, "Financial: {}", self.financial)
    }
}
