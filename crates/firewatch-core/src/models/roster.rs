//! The full data set: all three collections in one document.

use serde::{Deserialize, Serialize};

use super::{CoverageMapping, MedicalRecord, Resident};

/// Residents, coverage mappings and medical records.
///
/// This is both the in-memory state owned by [`crate::store::Store`] and the
/// shape of the document written by the persistence gateway.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Roster {
    #[serde(rename = "persons", default)]
    pub residents: Vec<Resident>,
    #[serde(rename = "firestations", default)]
    pub coverage: Vec<CoverageMapping>,
    #[serde(rename = "medicalrecords", default)]
    pub medical_records: Vec<MedicalRecord>,
}

impl Roster {
    pub fn new(
        residents: Vec<Resident>,
        coverage: Vec<CoverageMapping>,
        medical_records: Vec<MedicalRecord>,
    ) -> Self {
        Self {
            residents,
            coverage,
            medical_records,
        }
    }

    /// Record counts as (residents, coverage mappings, medical records).
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.residents.len(),
            self.coverage.len(),
            self.medical_records.len(),
        )
    }
}
