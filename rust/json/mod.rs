//! Allows serialization and deserialization to JSON, with the ``serde`` crate.

#[cfg(feature = "python")]
pub mod json_py;

use serde::{Deserialize, Serialize};
use serde_json;

use crate::calendars::{Adjuster, Calendar};
use crate::options::Options;

/// Handles the `to` and `from` JSON conversion.
pub trait JSON: Serialize + for<'de> Deserialize<'de> {
    /// Return a JSON string representing the object.
    fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Create an object from a JSON string representation.
    fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Deserialization re-validates the calendar and rebuilds its business day index.
impl JSON for Calendar {}

impl JSON for Options {}

impl JSON for Adjuster {}
