use pyo3::prelude::*;
use pyo3::types::PyAny;

use crate::options::{get_option, set_option, DateValue};

impl<'py> IntoPyObject<'py> for DateValue {
    type Target = PyAny;
    type Output = Bound<'py, PyAny>;
    type Error = PyErr;

    fn into_pyobject(self, py: Python<'py>) -> Result<Self::Output, Self::Error> {
        match self {
            DateValue::Date(d) => Ok(d.into_pyobject(py)?.into_any()),
            DateValue::DateTime(dt) => Ok(dt.into_pyobject(py)?.into_any()),
            DateValue::Iso(s) => Ok(s.into_pyobject(py)?.into_any()),
        }
    }
}

/// Return a global option, ``"mode"`` or ``"mode.datetype"``.
///
/// Parameters
/// ----------
/// key: str
///     The name of the option.
///
/// Returns
/// -------
/// str
#[pyfunction]
#[pyo3(name = "get_option")]
pub(crate) fn get_option_py(key: &str) -> PyResult<String> {
    Ok(get_option(key)?)
}

/// Set a global option. Calendars created afterwards inherit it.
///
/// Parameters
/// ----------
/// key: str
///     The name of the option, ``"mode"`` or ``"mode.datetype"``.
/// value: str
///     ``"python"`` or ``"pandas"`` for the mode, ``"date"``, ``"datetime"``, ``"iso"`` or
///     ``"none"`` for the datetype.
#[pyfunction]
#[pyo3(name = "set_option")]
pub(crate) fn set_option_py(key: &str, value: &str) -> PyResult<()> {
    Ok(set_option(key, value)?)
}
