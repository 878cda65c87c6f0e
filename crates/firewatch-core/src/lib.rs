//! Firewatch Core Library
//!
//! Resident roster, fire-station coverage and medical records for emergency
//! dispatch, kept in memory and written through to a JSON file.
//!
//! # Architecture
//!
//! ```text
//!         FFI facade (FirewatchCore)
//!            │                │
//!     Record services     Dispatch engine
//!     (pre-checks)        (joins, counts)
//!            │                │
//!            └──────┬─────────┘
//!                   ▼
//!        Store: RwLock<Roster> ── write lock ──► Gateway::save
//!                   ▲                           (full rewrite)
//!                   │
//!           Gateway::load (working file, else bundled default)
//! ```
//!
//! # Modules
//!
//! - [`identity`]: Name/address normalization and age classification
//! - [`models`]: Domain types (Resident, CoverageMapping, MedicalRecord, reports)
//! - [`persistence`]: JSON file and in-memory gateways
//! - [`store`]: In-memory collections with write-through persistence
//! - [`service`]: Identity pre-checks for create/update/delete
//! - [`engine`]: Cross-referencing dispatch queries
//! - [`config`]: Working file location

pub mod config;
pub mod engine;
pub mod identity;
pub mod models;
pub mod persistence;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use config::StoreConfig;
pub use engine::{Engine, EngineError};
pub use models::{
    AddressReport, ChildAlert, CoverageMapping, CoveredPerson, FireResident, Household,
    HouseholdMember, MedicalRecord, PersonInfo, Resident, Roster, StationCoverage, StationNumber,
};
pub use persistence::{Gateway, JsonFileGateway, MemoryGateway};
pub use service::{CoverageService, MedicalRecordService, ResidentService, ServiceError};
pub use store::{Store, StoreError};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Arc;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FirewatchError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<persistence::PersistenceError> for FirewatchError {
    fn from(e: persistence::PersistenceError) -> Self {
        FirewatchError::PersistenceFailure(e.to_string())
    }
}

impl From<StoreError> for FirewatchError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Persistence(inner) => inner.into(),
            StoreError::LockPoisoned(msg) => FirewatchError::Internal(msg),
        }
    }
}

impl From<ServiceError> for FirewatchError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(msg) => FirewatchError::NotFound(msg),
            ServiceError::AlreadyExists(msg) => FirewatchError::AlreadyExists(msg),
            ServiceError::Store(inner) => inner.into(),
        }
    }
}

impl From<EngineError> for FirewatchError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::NotFound(msg) => FirewatchError::NotFound(msg),
            EngineError::Store(inner) => inner.into(),
        }
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open the store on a working JSON file, creating it from the bundled
/// default if missing.
#[uniffi::export]
pub fn open_store(path: String) -> Result<Arc<FirewatchCore>, FirewatchError> {
    let store = Store::open_file(&StoreConfig::new(path))?;
    Ok(Arc::new(FirewatchCore::new(store)))
}

/// Open the store on the file named by `FIREWATCH_DATA_FILE` (or the default path).
#[uniffi::export]
pub fn open_store_from_env() -> Result<Arc<FirewatchCore>, FirewatchError> {
    let store = Store::open_file(&StoreConfig::from_env())?;
    Ok(Arc::new(FirewatchCore::new(store)))
}

/// Open an in-memory store seeded with the bundled default (for testing).
#[uniffi::export]
pub fn open_store_in_memory() -> Result<Arc<FirewatchCore>, FirewatchError> {
    let store = Store::open_in_memory()?;
    Ok(Arc::new(FirewatchCore::new(store)))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe store handle for FFI.
#[derive(uniffi::Object)]
pub struct FirewatchCore {
    store: Arc<Store>,
}

impl FirewatchCore {
    pub fn new(store: Store) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Shared handle on the underlying store.
    pub fn store(&self) -> Arc<Store> {
        Arc::clone(&self.store)
    }

    fn engine(&self) -> Engine<'_> {
        Engine::new(&self.store)
    }
}

#[uniffi::export]
impl FirewatchCore {
    // =========================================================================
    // Resident Operations
    // =========================================================================

    pub fn list_residents(&self) -> Result<Vec<FfiResident>, FirewatchError> {
        let residents = ResidentService::new(&self.store).list()?;
        Ok(residents.into_iter().map(Into::into).collect())
    }

    pub fn get_resident(
        &self,
        first_name: String,
        last_name: String,
    ) -> Result<FfiResident, FirewatchError> {
        let resident = ResidentService::new(&self.store).get(&first_name, &last_name)?;
        Ok(resident.into())
    }

    pub fn create_resident(&self, resident: FfiResident) -> Result<FfiResident, FirewatchError> {
        let created = ResidentService::new(&self.store).create(resident.into())?;
        Ok(created.into())
    }

    pub fn update_resident(&self, resident: FfiResident) -> Result<FfiResident, FirewatchError> {
        let updated = ResidentService::new(&self.store).update(resident.into())?;
        Ok(updated.into())
    }

    /// Delete every resident with this name.
    pub fn delete_resident(&self, first_name: String, last_name: String) -> Result<(), FirewatchError> {
        Ok(ResidentService::new(&self.store).delete(&first_name, &last_name)?)
    }

    /// Delete only the first resident with this name.
    pub fn delete_first_resident(
        &self,
        first_name: String,
        last_name: String,
    ) -> Result<(), FirewatchError> {
        Ok(ResidentService::new(&self.store).delete_first(&first_name, &last_name)?)
    }

    // =========================================================================
    // Coverage Operations
    // =========================================================================

    pub fn list_coverage(&self) -> Result<Vec<FfiCoverageMapping>, FirewatchError> {
        let mappings = CoverageService::new(&self.store).list()?;
        Ok(mappings.into_iter().map(Into::into).collect())
    }

    pub fn get_coverage(&self, address: String) -> Result<FfiCoverageMapping, FirewatchError> {
        Ok(CoverageService::new(&self.store).get(&address)?.into())
    }

    pub fn create_coverage(
        &self,
        mapping: FfiCoverageMapping,
    ) -> Result<FfiCoverageMapping, FirewatchError> {
        Ok(CoverageService::new(&self.store).create(mapping.into())?.into())
    }

    pub fn update_coverage(
        &self,
        mapping: FfiCoverageMapping,
    ) -> Result<FfiCoverageMapping, FirewatchError> {
        Ok(CoverageService::new(&self.store).update(mapping.into())?.into())
    }

    /// Delete every mapping at the address.
    pub fn delete_coverage(&self, address: String) -> Result<(), FirewatchError> {
        Ok(CoverageService::new(&self.store).delete(&address)?)
    }

    /// Delete the first mapping at the address.
    pub fn delete_first_coverage(&self, address: String) -> Result<(), FirewatchError> {
        Ok(CoverageService::new(&self.store).delete_first(&address)?)
    }

    /// Delete every mapping of a station.
    pub fn delete_station(&self, station: u32) -> Result<(), FirewatchError> {
        Ok(CoverageService::new(&self.store).delete_station(station)?)
    }

    // =========================================================================
    // Medical Record Operations
    // =========================================================================

    pub fn list_medical_records(&self) -> Result<Vec<FfiMedicalRecord>, FirewatchError> {
        let records = MedicalRecordService::new(&self.store).list()?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    pub fn get_medical_record(
        &self,
        first_name: String,
        last_name: String,
    ) -> Result<FfiMedicalRecord, FirewatchError> {
        let record = MedicalRecordService::new(&self.store).get(&first_name, &last_name)?;
        Ok(record.into())
    }

    pub fn create_medical_record(
        &self,
        record: FfiMedicalRecord,
    ) -> Result<FfiMedicalRecord, FirewatchError> {
        let created = MedicalRecordService::new(&self.store).create(record.try_into()?)?;
        Ok(created.into())
    }

    pub fn update_medical_record(
        &self,
        record: FfiMedicalRecord,
    ) -> Result<FfiMedicalRecord, FirewatchError> {
        let updated = MedicalRecordService::new(&self.store).update(record.try_into()?)?;
        Ok(updated.into())
    }

    /// Delete every medical record for this name.
    pub fn delete_medical_record(
        &self,
        first_name: String,
        last_name: String,
    ) -> Result<(), FirewatchError> {
        Ok(MedicalRecordService::new(&self.store).delete(&first_name, &last_name)?)
    }

    /// Delete only the first medical record for this name.
    pub fn delete_first_medical_record(
        &self,
        first_name: String,
        last_name: String,
    ) -> Result<(), FirewatchError> {
        Ok(MedicalRecordService::new(&self.store).delete_first(&first_name, &last_name)?)
    }

    // =========================================================================
    // Dispatch Queries
    // =========================================================================

    /// Distinct emails of a city's residents.
    pub fn emails_by_city(&self, city: String) -> Result<Vec<String>, FirewatchError> {
        Ok(self.engine().emails_by_city(&city)?)
    }

    /// Residents of a family joined with their medical records.
    pub fn person_info_by_last_name(
        &self,
        last_name: String,
    ) -> Result<Vec<FfiPersonInfo>, FirewatchError> {
        let infos = self.engine().person_info_by_last_name(&last_name)?;
        Ok(infos.into_iter().map(Into::into).collect())
    }

    /// Children at an address with their household.
    pub fn children_at_address(
        &self,
        address: String,
    ) -> Result<Vec<FfiChildAlert>, FirewatchError> {
        let children = self.engine().children_at_address(&address)?;
        Ok(children.into_iter().map(Into::into).collect())
    }

    /// Distinct phone numbers of everyone a station covers.
    pub fn phone_numbers_by_station(&self, station: u32) -> Result<Vec<String>, FirewatchError> {
        Ok(self.engine().phone_numbers_by_station(station)?)
    }

    /// Residents a station covers with child/adult counts.
    pub fn persons_covered_by_station(
        &self,
        station: u32,
    ) -> Result<FfiStationCoverage, FirewatchError> {
        Ok(self.engine().persons_covered_by_station(station)?.into())
    }

    /// Fire view for one address.
    pub fn residents_by_address(&self, address: String) -> Result<FfiAddressReport, FirewatchError> {
        Ok(self.engine().residents_by_address(&address)?.into())
    }

    /// Flood view for a set of stations.
    pub fn households_by_stations(
        &self,
        stations: Vec<u32>,
    ) -> Result<Vec<FfiHousehold>, FirewatchError> {
        let households = self.engine().households_by_stations(&stations)?;
        Ok(households.into_iter().map(Into::into).collect())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe resident.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct FfiResident {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub zip: String,
    pub phone: String,
    pub email: String,
}

impl From<Resident> for FfiResident {
    fn from(r: Resident) -> Self {
        Self {
            first_name: r.first_name,
            last_name: r.last_name,
            address: r.address,
            city: r.city,
            zip: r.zip,
            phone: r.phone,
            email: r.email,
        }
    }
}

impl From<FfiResident> for Resident {
    fn from(r: FfiResident) -> Self {
        Resident {
            first_name: r.first_name,
            last_name: r.last_name,
            address: r.address,
            city: r.city,
            zip: r.zip,
            phone: r.phone,
            email: r.email,
        }
    }
}

/// FFI-safe coverage mapping.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct FfiCoverageMapping {
    pub address: String,
    pub station: u32,
}

impl From<CoverageMapping> for FfiCoverageMapping {
    fn from(c: CoverageMapping) -> Self {
        Self {
            address: c.address,
            station: c.station,
        }
    }
}

impl From<FfiCoverageMapping> for CoverageMapping {
    fn from(c: FfiCoverageMapping) -> Self {
        CoverageMapping::new(c.address, c.station)
    }
}

/// FFI-safe medical record. Birthdate is `MM/dd/yyyy`.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct FfiMedicalRecord {
    pub first_name: String,
    pub last_name: String,
    pub birthdate: String,
    pub medications: Vec<String>,
    pub allergies: Vec<String>,
}

impl From<MedicalRecord> for FfiMedicalRecord {
    fn from(m: MedicalRecord) -> Self {
        Self {
            first_name: m.first_name,
            last_name: m.last_name,
            birthdate: models::format_birthdate(m.birthdate),
            medications: m.medications,
            allergies: m.allergies,
        }
    }
}

impl TryFrom<FfiMedicalRecord> for MedicalRecord {
    type Error = FirewatchError;

    fn try_from(m: FfiMedicalRecord) -> Result<Self, Self::Error> {
        let birthdate = models::parse_birthdate(&m.birthdate).map_err(|e| {
            FirewatchError::InvalidInput(format!(
                "birthdate {:?} is not MM/dd/yyyy: {}",
                m.birthdate, e
            ))
        })?;
        Ok(MedicalRecord {
            first_name: m.first_name,
            last_name: m.last_name,
            birthdate,
            medications: m.medications,
            allergies: m.allergies,
        })
    }
}

/// FFI-safe person info.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPersonInfo {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub email: String,
    pub age: u32,
    pub medications: Vec<String>,
    pub allergies: Vec<String>,
}

impl From<PersonInfo> for FfiPersonInfo {
    fn from(p: PersonInfo) -> Self {
        Self {
            first_name: p.first_name,
            last_name: p.last_name,
            address: p.address,
            email: p.email,
            age: p.age,
            medications: p.medications,
            allergies: p.allergies,
        }
    }
}

/// FFI-safe household member.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiHouseholdMember {
    pub first_name: String,
    pub last_name: String,
}

impl From<HouseholdMember> for FfiHouseholdMember {
    fn from(m: HouseholdMember) -> Self {
        Self {
            first_name: m.first_name,
            last_name: m.last_name,
        }
    }
}

/// FFI-safe child alert.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiChildAlert {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub household_members: Vec<FfiHouseholdMember>,
}

impl From<ChildAlert> for FfiChildAlert {
    fn from(c: ChildAlert) -> Self {
        Self {
            first_name: c.first_name,
            last_name: c.last_name,
            age: c.age,
            household_members: c.household_members.into_iter().map(Into::into).collect(),
        }
    }
}

/// FFI-safe covered person.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCoveredPerson {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone: String,
}

impl From<CoveredPerson> for FfiCoveredPerson {
    fn from(p: CoveredPerson) -> Self {
        Self {
            first_name: p.first_name,
            last_name: p.last_name,
            address: p.address,
            phone: p.phone,
        }
    }
}

/// FFI-safe station coverage.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiStationCoverage {
    pub covered_persons: Vec<FfiCoveredPerson>,
    pub adult_count: u32,
    pub child_count: u32,
}

impl From<StationCoverage> for FfiStationCoverage {
    fn from(s: StationCoverage) -> Self {
        Self {
            covered_persons: s.covered_persons.into_iter().map(Into::into).collect(),
            adult_count: s.adult_count,
            child_count: s.child_count,
        }
    }
}

/// FFI-safe fire-view resident. `age` is -1 without a medical record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFireResident {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub age: i32,
    pub medications: Vec<String>,
    pub allergies: Vec<String>,
}

impl From<FireResident> for FfiFireResident {
    fn from(r: FireResident) -> Self {
        Self {
            first_name: r.first_name,
            last_name: r.last_name,
            phone: r.phone,
            age: r.age,
            medications: r.medications,
            allergies: r.allergies,
        }
    }
}

/// FFI-safe fire view.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAddressReport {
    pub station: u32,
    pub residents: Vec<FfiFireResident>,
}

impl From<AddressReport> for FfiAddressReport {
    fn from(r: AddressReport) -> Self {
        Self {
            station: r.station,
            residents: r.residents.into_iter().map(Into::into).collect(),
        }
    }
}

/// FFI-safe household.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiHousehold {
    pub address: String,
    pub residents: Vec<FfiFireResident>,
}

impl From<Household> for FfiHousehold {
    fn from(h: Household) -> Self {
        Self {
            address: h.address,
            residents: h.residents.into_iter().map(Into::into).collect(),
        }
    }
}
