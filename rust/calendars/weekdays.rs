use chrono::Weekday;

use crate::error::{BizdaysError, Result};

const WEEKDAY_NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Parse a weekday from its English name.
///
/// Full names and any prefix of at least three letters are accepted, case-insensitively,
/// so `"Saturday"`, `"sat"` and `"SATUR"` all give [`Weekday::Sat`].
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    let name = name.trim().to_lowercase();
    if name.len() < 3 {
        return None;
    }
    WEEKDAY_NAMES
        .iter()
        .position(|w| w.starts_with(&name))
        .and_then(|i| Weekday::try_from(i as u8).ok())
}

/// Convert a weekday index (0=Mon,.., 6=Sun) to a [`Weekday`].
pub fn weekday_from_index(index: u8) -> Result<Weekday> {
    Weekday::try_from(index).map_err(|_| {
        BizdaysError::Value(format!(
            "weekday index must be in 0..=6 (0=Monday), got {index}"
        ))
    })
}

/// The capitalised English name of a weekday, as written in calendar files.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weekday() {
        assert_eq!(parse_weekday("Saturday"), Some(Weekday::Sat));
        assert_eq!(parse_weekday("sun"), Some(Weekday::Sun));
        assert_eq!(parse_weekday("  WED "), Some(Weekday::Wed));
        assert_eq!(parse_weekday("thurs"), Some(Weekday::Thu));
        assert_eq!(parse_weekday("mo"), None);
        assert_eq!(parse_weekday("holiday"), None);
        assert_eq!(parse_weekday("mondays"), None);
    }

    #[test]
    fn test_weekday_from_index() {
        assert_eq!(weekday_from_index(0).unwrap(), Weekday::Mon);
        assert_eq!(weekday_from_index(6).unwrap(), Weekday::Sun);
        assert!(weekday_from_index(7).is_err());
    }

    #[test]
    fn test_round_trip_names() {
        for i in 0..7_u8 {
            let w = weekday_from_index(i).unwrap();
            assert_eq!(parse_weekday(weekday_name(w)), Some(w));
        }
    }
}
