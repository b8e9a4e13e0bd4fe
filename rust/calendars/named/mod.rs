//! Static data for pre-existing named holiday calendars.
//!

pub mod actual;
pub mod anbima;
pub mod b3;
pub mod weekends;

use chrono::{NaiveDate, Weekday};
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::calendars::holidays::HolidaySource;
use crate::calendars::weekdays::weekday_from_index;
use crate::error::{BizdaysError, Result};

struct NamedData {
    name: &'static str,
    weekmask: &'static [u8],
    holidays: &'static str,
}

static NAMED: LazyLock<HashMap<String, NamedData>> = LazyLock::new(|| {
    [
        NamedData {
            name: "actual",
            weekmask: actual::WEEKMASK,
            holidays: actual::HOLIDAYS,
        },
        NamedData {
            name: "weekends",
            weekmask: weekends::WEEKMASK,
            holidays: weekends::HOLIDAYS,
        },
        NamedData {
            name: "ANBIMA",
            weekmask: anbima::WEEKMASK,
            holidays: anbima::HOLIDAYS,
        },
        NamedData {
            name: "B3",
            weekmask: b3::WEEKMASK,
            holidays: b3::HOLIDAYS,
        },
    ]
    .into_iter()
    .map(|d| (d.name.to_lowercase(), d))
    .collect()
});

fn lookup(name: &str) -> Result<&'static NamedData> {
    NAMED
        .get(&name.trim().to_lowercase())
        .ok_or_else(|| BizdaysError::NotFound(name.to_string()))
}

/// Return the names of the bundled calendars, sorted.
pub fn available_calendars() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = NAMED.values().map(|d| d.name).collect();
    names.sort_unstable();
    names
}

/// Return the canonical spelling of a bundled calendar name, e.g. `"anbima"` -> `"ANBIMA"`.
pub(crate) fn get_canonical_name(name: &str) -> Result<&'static str> {
    Ok(lookup(name)?.name)
}

pub(crate) fn get_weekmask_by_name(name: &str) -> Result<Vec<Weekday>> {
    lookup(name)?
        .weekmask
        .iter()
        .map(|v| weekday_from_index(*v))
        .collect()
}

pub(crate) fn get_holidays_by_name(name: &str) -> Result<Vec<NaiveDate>> {
    Ok(HolidaySource::parse(lookup(name)?.holidays)?.holidays)
}

// UNIT TESTS
#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::nd;

    #[test]
    fn test_get_weekmask() {
        let result = get_weekmask_by_name("weekends").unwrap();
        assert_eq!(result, vec![Weekday::Sat, Weekday::Sun]);
        let result = get_weekmask_by_name("actual").unwrap();
        assert_eq!(result, vec![]);
    }

    #[test]
    fn test_get_holidays() {
        let result = get_holidays_by_name("weekends").unwrap();
        assert_eq!(result, vec![]);

        let result = get_holidays_by_name("anbima").unwrap();
        assert_eq!(result[0], nd(2001, 1, 1));
        assert_eq!(*result.last().unwrap(), nd(2078, 12, 25));
        assert!(result.contains(&nd(2002, 12, 25)));
    }

    #[test]
    fn test_b3_extends_anbima() {
        let anbima = get_holidays_by_name("ANBIMA").unwrap();
        let b3 = get_holidays_by_name("B3").unwrap();
        assert!(anbima.iter().all(|d| b3.contains(d)));
        assert!(b3.contains(&nd(2013, 12, 24)));
        assert!(!anbima.contains(&nd(2013, 12, 24)));
    }

    #[test]
    fn test_unknown_name() {
        assert!(matches!(
            get_holidays_by_name("B1"),
            Err(BizdaysError::NotFound(_))
        ));
        assert!(get_weekmask_by_name("").is_err());
    }

    #[test]
    fn test_available_calendars() {
        assert_eq!(
            available_calendars(),
            vec!["ANBIMA", "B3", "actual", "weekends"]
        );
        assert_eq!(get_canonical_name(" b3 ").unwrap(), "B3");
    }
}
