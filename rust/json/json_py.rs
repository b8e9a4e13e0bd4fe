//! Wrapper to allow de/serializable objects in Rust to be passed to/from Python using pyo3
//! bindings.
//!
//! Any pyclass that is serializable is added as a DeserializedObj and then converted to JSON.
//! Having been deserialized it is matched, unpacked and passed back to Python.

use crate::calendars::Calendar;
use crate::json::JSON;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

/// Container for the Python exposed Rust objects which are deserializable.
#[derive(Serialize, Deserialize, FromPyObject, IntoPyObject)]
pub(crate) enum DeserializedObj {
    Calendar(Calendar),
}

impl JSON for DeserializedObj {}

#[pyfunction]
#[pyo3(name = "from_json")]
pub(crate) fn from_json_py(_py: Python<'_>, json: &str) -> PyResult<DeserializedObj> {
    match DeserializedObj::from_json(json) {
        Ok(v) => Ok(v),
        Err(e) => Err(PyValueError::new_err(format!(
            "Could not create Class or Struct from given JSON.\n{}",
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::nd;

    #[test]
    fn test_serialized_object() {
        let cal = Calendar::try_new(vec![nd(2015, 9, 7)], vec![5, 6]).unwrap();
        let json = DeserializedObj::Calendar(cal.clone()).to_json().unwrap();
        assert!(json.starts_with("{\"Calendar\":{"));

        let y = DeserializedObj::from_json(&json).unwrap();
        match y {
            DeserializedObj::Calendar(c) => assert_eq!(cal, c),
        }
    }
}
