//! Query result types produced by the dispatch engine.

use serde::{Deserialize, Serialize};

use super::StationNumber;

/// Resident details joined with their medical record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonInfo {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub email: String,
    pub age: u32,
    pub medications: Vec<String>,
    pub allergies: Vec<String>,
}

/// Another resident of a child's household, by name only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HouseholdMember {
    pub first_name: String,
    pub last_name: String,
}

/// A child (age 18 or under) living at an address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChildAlert {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    /// Everyone else at the address.
    pub household_members: Vec<HouseholdMember>,
}

/// A resident counted by a station coverage query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoveredPerson {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone: String,
}

/// Residents covered by one station, with the child/adult split.
///
/// Residents without a medical record appear in neither the list nor the
/// counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StationCoverage {
    pub covered_persons: Vec<CoveredPerson>,
    pub adult_count: u32,
    pub child_count: u32,
}

/// Resident entry of the fire and flood views.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FireResident {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    /// [`crate::identity::UNKNOWN_AGE`] when there is no medical record.
    pub age: i32,
    pub medications: Vec<String>,
    pub allergies: Vec<String>,
}

/// Residents at an address and the station covering it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddressReport {
    pub station: StationNumber,
    pub residents: Vec<FireResident>,
}

/// One household in the flood view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Household {
    pub address: String,
    pub residents: Vec<FireResident>,
}
