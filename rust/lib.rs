//! This is the documentation for bizdays
//!
//! Business day calendars: holidays and non-working weekdays over a valid range of dates,
//! used to count business days between dates, move dates by business days, roll
//! non-business days under the rules used in financial markets, and resolve relative date
//! expressions such as `"last fri"` or `"10th bizday before 2018-02-01"`.
//!
//! ```rust
//! use bizdays::calendars::{Calendar, nd};
//!
//! let cal = Calendar::load("ANBIMA").unwrap();
//! assert_eq!(cal.bizdays(&nd(2013, 1, 1), &nd(2013, 1, 31)).unwrap(), 21);
//! assert_eq!(cal.following(&nd(2002, 12, 25)).unwrap(), nd(2002, 12, 26));
//! assert_eq!(cal.getdate("last fri", Some(2002), Some(1)).unwrap(), nd(2002, 1, 25));
//! ```

#[cfg(test)]
mod tests;

pub mod error;
pub use error::{BizdaysError, Result};

pub mod json;

pub mod calendars;
pub use calendars::{Adjuster, Calendar, CalendarBuilder};

pub mod options;
pub use options::{get_option, set_option, Options};

pub mod vectorized;
pub use vectorized::VectorizedOps;

#[cfg(feature = "python")]
mod py;

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // JSON
    m.add_function(wrap_pyfunction!(json::json_py::from_json_py, m)?)?;

    // Calendars
    m.add_class::<Calendar>()?;
    m.add(
        "DateOutOfRangeError",
        m.py().get_type::<py::DateOutOfRangeError>(),
    )?;

    // Options
    m.add_function(wrap_pyfunction!(py::options::get_option_py, m)?)?;
    m.add_function(wrap_pyfunction!(py::options::set_option_py, m)?)?;
    Ok(())
}
