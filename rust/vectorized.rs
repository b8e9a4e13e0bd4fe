//! Elementwise calendar operations over sequences of inputs.
//!
//! Each operation takes slices, applies the scalar operation of [`Calendar`] element by
//! element and returns an [`ndarray::Array1`] in input order. Parallel inputs must have equal
//! lengths, except that a length-1 input is repeated against the others. A failing element
//! fails the whole call.
//!
//! ```rust
//! # use bizdays::calendars::{Calendar, nd};
//! let cal = Calendar::load("ANBIMA").unwrap();
//! let dates = [nd(2002, 12, 24), nd(2002, 12, 25), nd(2002, 12, 26)];
//! let result = cal.vec().isbizday(&dates).unwrap();
//! assert_eq!(result.to_vec(), vec![true, false, true]);
//! let counts = cal.vec().bizdays(&[nd(2002, 12, 23)], &dates).unwrap();
//! assert_eq!(counts.to_vec(), vec![1, 1, 2]);
//! ```

use chrono::prelude::*;
use ndarray::Array1;

use crate::calendars::{Calendar, DateExpr};
use crate::error::{BizdaysError, Result};

/// Elementwise operations of a borrowed [`Calendar`], returned by [`Calendar::vec`].
#[derive(Clone, Copy, Debug)]
pub struct VectorizedOps<'a> {
    calendar: &'a Calendar,
}

impl Calendar {
    /// Return the elementwise operations of this calendar.
    pub fn vec(&self) -> VectorizedOps<'_> {
        VectorizedOps { calendar: self }
    }
}

/// Return the common length of parallel inputs, where a length of one broadcasts.
fn broadcast_len(lens: &[usize]) -> Result<usize> {
    let n = if lens.contains(&0) {
        0
    } else {
        lens.iter().copied().max().unwrap_or(0)
    };
    if lens.iter().any(|len| *len != n && *len != 1) {
        return Err(BizdaysError::Value(format!(
            "inputs of lengths {lens:?} cannot be matched elementwise"
        )));
    }
    Ok(n)
}

/// The `i`-th element of a broadcast input.
fn at<T: Copy>(values: &[T], i: usize) -> T {
    if values.len() == 1 {
        values[0]
    } else {
        values[i]
    }
}

impl VectorizedOps<'_> {
    fn map<T>(
        &self,
        dates: &[NaiveDate],
        f: impl Fn(&Calendar, &NaiveDate) -> Result<T>,
    ) -> Result<Array1<T>> {
        let values = dates
            .iter()
            .map(|d| f(self.calendar, d))
            .collect::<Result<Vec<T>>>()?;
        Ok(Array1::from_vec(values))
    }

    pub fn isbizday(&self, dates: &[NaiveDate]) -> Result<Array1<bool>> {
        self.map(dates, Calendar::isbizday)
    }

    pub fn bizdays(&self, from: &[NaiveDate], to: &[NaiveDate]) -> Result<Array1<i32>> {
        let n = broadcast_len(&[from.len(), to.len()])?;
        let values = (0..n)
            .map(|i| self.calendar.bizdays(&at(from, i), &at(to, i)))
            .collect::<Result<Vec<i32>>>()?;
        Ok(Array1::from_vec(values))
    }

    pub fn offset(&self, dates: &[NaiveDate], n: &[i32]) -> Result<Array1<NaiveDate>> {
        let len = broadcast_len(&[dates.len(), n.len()])?;
        let values = (0..len)
            .map(|i| self.calendar.offset(&at(dates, i), at(n, i)))
            .collect::<Result<Vec<NaiveDate>>>()?;
        Ok(Array1::from_vec(values))
    }

    pub fn following(&self, dates: &[NaiveDate]) -> Result<Array1<NaiveDate>> {
        self.map(dates, Calendar::following)
    }

    pub fn preceding(&self, dates: &[NaiveDate]) -> Result<Array1<NaiveDate>> {
        self.map(dates, Calendar::preceding)
    }

    pub fn modified_following(&self, dates: &[NaiveDate]) -> Result<Array1<NaiveDate>> {
        self.map(dates, Calendar::modified_following)
    }

    pub fn modified_preceding(&self, dates: &[NaiveDate]) -> Result<Array1<NaiveDate>> {
        self.map(dates, Calendar::modified_preceding)
    }

    pub fn getbizdays(&self, years: &[i32], months: &[Option<u32>]) -> Result<Array1<u32>> {
        let n = broadcast_len(&[years.len(), months.len()])?;
        let values = (0..n)
            .map(|i| self.calendar.getbizdays(at(years, i), at(months, i)))
            .collect::<Result<Vec<u32>>>()?;
        Ok(Array1::from_vec(values))
    }

    /// Resolve expressions elementwise. Every expression is parsed before any is resolved.
    pub fn getdate(
        &self,
        exprs: &[&str],
        years: &[Option<i32>],
        months: &[Option<u32>],
    ) -> Result<Array1<NaiveDate>> {
        let n = broadcast_len(&[exprs.len(), years.len(), months.len()])?;
        let parsed = exprs
            .iter()
            .map(|e| e.parse::<DateExpr>())
            .collect::<Result<Vec<DateExpr>>>()?;
        let values = (0..n)
            .map(|i| self.calendar.resolve(&at(&parsed, i), at(years, i), at(months, i)))
            .collect::<Result<Vec<NaiveDate>>>()?;
        Ok(Array1::from_vec(values))
    }
}
