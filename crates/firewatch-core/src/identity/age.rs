//! Age computation.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Oldest age still classified as a child (inclusive).
pub const CHILD_AGE_LIMIT: u32 = 18;

/// Age reported when a resident has no medical record.
pub const UNKNOWN_AGE: i32 = -1;

/// Child/adult split used by the alert queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeClass {
    Child,
    Adult,
}

impl AgeClass {
    /// Classify an age in whole years. 18 is still a child.
    pub fn of(age: u32) -> Self {
        if age <= CHILD_AGE_LIMIT {
            AgeClass::Child
        } else {
            AgeClass::Adult
        }
    }

    pub fn is_child(self) -> bool {
        self == AgeClass::Child
    }
}

/// Whole years elapsed between `birthdate` and `today`.
///
/// The birthday counts as reached on the day itself; a 29 February birthday
/// is reached on 1 March in non-leap years. Future birthdates yield 0.
pub fn age_on(birthdate: NaiveDate, today: NaiveDate) -> u32 {
    if today <= birthdate {
        return 0;
    }
    let mut years = today.year() - birthdate.year();
    if (today.month(), today.day()) < (birthdate.month(), birthdate.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

/// Age as of the local calendar date.
pub fn age_today(birthdate: NaiveDate) -> u32 {
    age_on(birthdate, today())
}

/// The local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
