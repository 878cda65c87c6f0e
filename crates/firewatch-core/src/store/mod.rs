//! In-memory entity store with write-through persistence.
//!
//! The [`Store`] owns the [`Roster`] behind one lock. Queries share read
//! access; every mutation runs under the write lock and, when it changed
//! something, rewrites the whole document through the gateway before the
//! lock is released.

mod coverage;
mod medical;
mod residents;

use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use log::debug;
use thiserror::Error;

use crate::config::StoreConfig;
use crate::models::Roster;
use crate::persistence::{Gateway, JsonFileGateway, MemoryGateway, PersistenceError};

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

impl<T> From<PoisonError<T>> for StoreError {
    fn from(e: PoisonError<T>) -> Self {
        StoreError::LockPoisoned(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Residents, coverage mappings and medical records, loaded once and kept
/// in sync with the backing document.
pub struct Store {
    roster: RwLock<Roster>,
    gateway: Box<dyn Gateway>,
}

impl Store {
    /// Load the data set through `gateway`.
    pub fn open<G: Gateway + 'static>(gateway: G) -> StoreResult<Self> {
        let roster = gateway.load()?;
        let (residents, coverage, records) = roster.counts();
        debug!(
            "Store opened: {} resident(s), {} coverage mapping(s), {} medical record(s)",
            residents, coverage, records
        );
        Ok(Self {
            roster: RwLock::new(roster),
            gateway: Box::new(gateway),
        })
    }

    /// Open on the JSON working file named by `config`.
    pub fn open_file(config: &StoreConfig) -> StoreResult<Self> {
        Self::open(JsonFileGateway::from_config(config))
    }

    /// Open on the bundled default document without touching disk.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::open(MemoryGateway::with_default_document()?)
    }

    /// Shared read access to the collections.
    ///
    /// Hold the guard for the duration of one query so it sees a single
    /// consistent state.
    pub fn read(&self) -> StoreResult<RwLockReadGuard<'_, Roster>> {
        Ok(self.roster.read()?)
    }

    /// Owned copy of the whole data set.
    pub fn snapshot(&self) -> StoreResult<Roster> {
        Ok(self.read()?.clone())
    }

    /// Run `op` under the write lock; persist if it reports a change.
    ///
    /// A failed save leaves the in-memory change in place and returns the
    /// persistence error.
    fn write<T, F>(&self, op: F) -> StoreResult<T>
    where
        F: FnOnce(&mut Roster) -> (T, bool),
    {
        let mut roster = self.roster.write()?;
        let (output, changed) = op(&mut roster);
        if changed {
            self.gateway.save(&roster)?;
        }
        Ok(output)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::store_with;
    use super::*;
    use crate::models::Resident;

    #[test]
    fn test_open_in_memory() {
        let store = Store::open_in_memory().unwrap();
        let (residents, coverage, records) = store.read().unwrap().counts();
        assert!(residents > 0 && coverage > 0 && records > 0);
    }

    #[test]
    fn test_open_file_bootstraps() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::new(dir.path().join("data.json"));
        let store = Store::open_file(&config).unwrap();
        assert!(config.data_file.exists());
        assert!(!store.snapshot().unwrap().residents.is_empty());
    }

    #[test]
    fn test_unchanged_write_does_not_persist() {
        let (store, gateway) = store_with(Roster::default());
        let out = store.write(|_| (42, false)).unwrap();
        assert_eq!(out, 42);
        assert_eq!(gateway.save_count(), 0);
    }

    #[test]
    fn test_failed_save_keeps_memory_change() {
        let (store, gateway) = store_with(Roster::default());
        gateway.set_fail_writes(true);

        let result = store.add_resident(Resident::new("Jane", "Doe"));
        assert!(matches!(result, Err(StoreError::Persistence(_))));

        // The mutation already happened in memory
        assert!(store.resident("Jane", "Doe").unwrap().is_some());
        assert!(gateway.saved().is_none());
    }
}
