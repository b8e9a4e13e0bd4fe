use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::calendars::DateRoll;
use crate::error::{BizdaysError, Result};

/// A list of rules for performing date adjustment.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Adjuster {
    /// Actual date without adjustment.
    Actual {},
    /// Following adjustment rule.
    Following {},
    /// Modified following adjustment rule.
    ModifiedFollowing {},
    /// Preceding adjustment rule.
    Preceding {},
    /// Modified preceding adjustment rule.
    ModifiedPreceding {},
    /// A set number of business days, using calendar lag rules.
    BusDaysLag { number: i32 },
    /// A set number of calendar days, with the result rolled following when adding and
    /// preceding when subtracting.
    CalDaysLag { number: i32 },
}

impl FromStr for Adjuster {
    type Err = BizdaysError;

    /// Parse the name of a rolling rule.
    ///
    /// `"next"` and `"previous"` are accepted as aliases of `"following"` and `"preceding"`.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "actual" | "none" => Ok(Adjuster::Actual {}),
            "following" | "next" => Ok(Adjuster::Following {}),
            "preceding" | "previous" => Ok(Adjuster::Preceding {}),
            "modified_following" => Ok(Adjuster::ModifiedFollowing {}),
            "modified_preceding" | "modified_previous" => Ok(Adjuster::ModifiedPreceding {}),
            _ => Err(BizdaysError::Value(format!(
                "unknown adjustment rule: '{s}', expected one of 'following', 'preceding', \
                'modified_following', 'modified_preceding' or 'actual'"
            ))),
        }
    }
}

/// Perform date adjustment according to calendar definitions, i.e. a known [`DateRoll`].
pub trait Adjustment {
    /// Adjust a date under an adjustment rule.
    fn adjust<T: DateRoll>(&self, udate: &NaiveDate, calendar: &T) -> Result<NaiveDate>;

    /// Adjust a slice of dates under an adjustment rule.
    fn adjusts<T: DateRoll>(&self, udates: &[NaiveDate], calendar: &T) -> Result<Vec<NaiveDate>>;
}

/// Perform date adjustment according to adjustment rules, i.e. a given [`Adjuster`].
pub trait CalendarAdjustment {
    /// Adjust a date under an adjustment rule.
    fn adjust(&self, udate: &NaiveDate, adjuster: &Adjuster) -> Result<NaiveDate>
    where
        Self: Sized + DateRoll,
    {
        adjuster.adjust(udate, self)
    }

    /// Adjust a slice of dates under an adjustment rule.
    fn adjusts(&self, udates: &[NaiveDate], adjuster: &Adjuster) -> Result<Vec<NaiveDate>>
    where
        Self: Sized + DateRoll,
    {
        adjuster.adjusts(udates, self)
    }
}

impl Adjustment for Adjuster {
    fn adjust<T: DateRoll>(&self, udate: &NaiveDate, calendar: &T) -> Result<NaiveDate> {
        match self {
            Adjuster::Actual {} => calendar.check_range(udate),
            Adjuster::Following {} => calendar.roll_forward_bus_day(udate),
            Adjuster::Preceding {} => calendar.roll_backward_bus_day(udate),
            Adjuster::ModifiedFollowing {} => calendar.roll_mod_forward_bus_day(udate),
            Adjuster::ModifiedPreceding {} => calendar.roll_mod_backward_bus_day(udate),
            Adjuster::BusDaysLag { number: n } => calendar.lag_bus_days(udate, *n),
            Adjuster::CalDaysLag { number: n } => {
                let adj = if *n < 0 {
                    Adjuster::Preceding {}
                } else {
                    Adjuster::Following {}
                };
                calendar.add_cal_days(udate, *n, &adj)
            }
        }
    }

    fn adjusts<T: DateRoll>(&self, udates: &[NaiveDate], calendar: &T) -> Result<Vec<NaiveDate>> {
        udates
            .iter()
            .map(|udate| self.adjust(udate, calendar))
            .collect()
    }
}
