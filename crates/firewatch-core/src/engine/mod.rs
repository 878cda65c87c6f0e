//! Dispatch queries joining residents, coverage and medical records.
//!
//! Pipeline per query: read one consistent [`Roster`] snapshot → filter →
//! join medical records → classify / deduplicate → result record.
//!
//! Residents without a medical record are handled two ways, and both are
//! intentional:
//! - dropped entirely by person info, children and station coverage counts
//! - kept with age [`UNKNOWN_AGE`] and empty lists by the fire and flood views

mod community;
mod stations;

use chrono::NaiveDate;
use log::warn;
use thiserror::Error;

use crate::identity::{self, normalize, UNKNOWN_AGE};
use crate::models::{FireResident, Resident, Roster};
use crate::store::{Store, StoreError};

/// Engine errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Stateless query engine over a [`Store`].
pub struct Engine<'a> {
    store: &'a Store,
    today: Option<NaiveDate>,
}

impl<'a> Engine<'a> {
    /// Engine computing ages against the local date.
    pub fn new(store: &'a Store) -> Self {
        Self { store, today: None }
    }

    /// Engine computing ages against a fixed date.
    pub fn with_today(store: &'a Store, today: NaiveDate) -> Self {
        Self {
            store,
            today: Some(today),
        }
    }

    /// Reference date for age computation.
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(identity::today)
    }

    /// Fire-view entry: medical details if a record exists, else the
    /// unknown-age sentinel with empty lists.
    fn fire_resident(&self, roster: &Roster, resident: &Resident, today: NaiveDate) -> FireResident {
        let (age, medications, allergies) =
            match roster.medical_record_for(&resident.first_name, &resident.last_name) {
                Some(record) => (
                    record.age_on(today) as i32,
                    record.medications.clone(),
                    record.allergies.clone(),
                ),
                None => {
                    warn!(
                        "No medical record found for {} {}",
                        resident.first_name,
                        resident.last_name
                    );
                    (UNKNOWN_AGE, Vec::new(), Vec::new())
                }
            };

        FireResident {
            first_name: resident.first_name.clone(),
            last_name: resident.last_name.clone(),
            phone: resident.phone.clone(),
            age,
            medications,
            allergies,
        }
    }
}

/// Keep the first occurrence of each value, compared under [`normalize`].
fn dedup_normalized<'s, I>(values: I) -> Vec<&'s str>
where
    I: IntoIterator<Item = &'s str>,
{
    let mut seen = std::collections::HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(normalize(value)))
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_normalized_keeps_first_spelling() {
        let values = ["A St", "a  st", "B St", "A St"];
        assert_eq!(dedup_normalized(values), vec!["A St", "B St"]);
    }

    #[test]
    fn test_fixed_today() {
        let store = Store::open(crate::persistence::MemoryGateway::new(Roster::default())).unwrap();
        let engine = Engine::with_today(&store, fixtures::today());
        assert_eq!(engine.today(), fixtures::today());
    }
}
