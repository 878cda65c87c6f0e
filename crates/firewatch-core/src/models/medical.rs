//! Medical record models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::identity::{self, PersonIdentity};

/// Birthdate format used on disk and at the FFI boundary.
pub const BIRTHDATE_FORMAT: &str = "%m/%d/%Y";

/// Medical details for one resident, keyed by name.
///
/// A resident has zero or one record; a missing record is a valid state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    pub first_name: String,
    pub last_name: String,
    #[serde(with = "birthdate_format")]
    pub birthdate: NaiveDate,
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
}

impl MedicalRecord {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birthdate: NaiveDate,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            birthdate,
            medications: Vec::new(),
            allergies: Vec::new(),
        }
    }

    /// Age in whole years on the given day.
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        identity::age_on(self.birthdate, today)
    }
}

impl PersonIdentity for MedicalRecord {
    fn first_name(&self) -> &str {
        &self.first_name
    }

    fn last_name(&self) -> &str {
        &self.last_name
    }
}

/// Parse a `MM/dd/yyyy` birthdate.
pub fn parse_birthdate(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value.trim(), BIRTHDATE_FORMAT)
}

/// Format a birthdate as `MM/dd/yyyy`.
pub fn format_birthdate(date: NaiveDate) -> String {
    date.format(BIRTHDATE_FORMAT).to_string()
}

mod birthdate_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_birthdate(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_birthdate(&raw).map_err(serde::de::Error::custom)
    }
}
