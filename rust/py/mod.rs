//! Wrapper module to export to Python using pyo3 bindings.
//!
//! Dates are accepted as `datetime.date` objects or ISO strings, alone or in lists. Outputs
//! follow the [`Options`](crate::options::Options) of the calendar: a scalar input gives a
//! scalar output, a list input gives a list, or a numpy array in `pandas` mode.

pub(crate) mod calendar;
pub(crate) mod options;

use chrono::NaiveDate;
use ndarray::Array1;
use numpy::datetime::{units, Datetime};
use numpy::{Element, PyArray1};
use pyo3::exceptions::{PyKeyError, PyOSError, PyValueError};
use pyo3::prelude::*;
use pyo3::{create_exception, IntoPyObjectExt};

use crate::error::BizdaysError;
use crate::options::{Mode, Options};

create_exception!(
    rs,
    DateOutOfRangeError,
    PyValueError,
    "A date lies outside the valid range of the calendar."
);

impl From<BizdaysError> for PyErr {
    fn from(err: BizdaysError) -> Self {
        match err {
            BizdaysError::DateOutOfRange { .. } => DateOutOfRangeError::new_err(err.to_string()),
            BizdaysError::NotFound(_) => PyKeyError::new_err(err.to_string()),
            BizdaysError::Io(_) => PyOSError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

/// A date given from Python.
#[derive(FromPyObject)]
pub(crate) enum DateLike {
    Date(NaiveDate),
    Iso(String),
}

impl DateLike {
    fn to_date(&self) -> PyResult<NaiveDate> {
        match self {
            DateLike::Date(d) => Ok(*d),
            DateLike::Iso(s) => s
                .trim()
                .parse::<NaiveDate>()
                .map_err(|_| PyValueError::new_err(format!("invalid date: '{s}'"))),
        }
    }
}

/// A scalar or a list argument.
#[derive(FromPyObject)]
pub(crate) enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    fn is_scalar(&self) -> bool {
        matches!(self, OneOrMany::One(_))
    }

    fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::One(v) => std::slice::from_ref(v),
            OneOrMany::Many(v) => v,
        }
    }
}

impl OneOrMany<DateLike> {
    fn to_dates(&self) -> PyResult<Vec<NaiveDate>> {
        self.as_slice().iter().map(DateLike::to_date).collect()
    }
}

/// Return dates to Python under the output options.
fn dates_to_py<'py>(
    py: Python<'py>,
    options: &Options,
    dates: Array1<NaiveDate>,
    scalar: bool,
) -> PyResult<Bound<'py, PyAny>> {
    if scalar && dates.len() == 1 {
        return options.convert(dates[0]).into_bound_py_any(py);
    }
    match options.mode {
        Mode::Pandas => {
            // the default date is the unix epoch, 1970-01-01
            let epoch = NaiveDate::default();
            let days: Vec<Datetime<units::Days>> = dates
                .iter()
                .map(|d| Datetime::from((*d - epoch).num_days()))
                .collect();
            Ok(PyArray1::from_vec(py, days).into_any())
        }
        Mode::Python => dates
            .into_iter()
            .map(|d| options.convert(d))
            .collect::<Vec<_>>()
            .into_bound_py_any(py),
    }
}

/// Return numbers or flags to Python under the output options.
fn values_to_py<'py, T>(
    py: Python<'py>,
    options: &Options,
    values: Array1<T>,
    scalar: bool,
) -> PyResult<Bound<'py, PyAny>>
where
    T: Element + Clone + IntoPyObject<'py>,
{
    if scalar && values.len() == 1 {
        return values[0].clone().into_bound_py_any(py);
    }
    match options.mode {
        Mode::Pandas => Ok(PyArray1::from_owned_array(py, values).into_any()),
        Mode::Python => values.to_vec().into_bound_py_any(py),
    }
}
