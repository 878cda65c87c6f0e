//! Coverage mapping service.

use log::{error, info};

use super::{ServiceError, ServiceResult};
use crate::models::{CoverageMapping, StationNumber};
use crate::store::Store;

/// Station coverage management on top of a [`Store`].
pub struct CoverageService<'a> {
    store: &'a Store,
}

impl<'a> CoverageService<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    pub fn list(&self) -> ServiceResult<Vec<CoverageMapping>> {
        let mappings = self.store.coverage()?;
        info!("{} coverage mapping(s) found", mappings.len());
        Ok(mappings)
    }

    /// The mapping for an address.
    pub fn get(&self, address: &str) -> ServiceResult<CoverageMapping> {
        self.store.coverage_at(address)?.ok_or_else(|| {
            error!("No coverage found at address '{}'", address);
            ServiceError::NotFound(format!("No coverage found at address: {}", address))
        })
    }

    /// Add a mapping for an address that is not yet covered.
    pub fn create(&self, mapping: CoverageMapping) -> ServiceResult<CoverageMapping> {
        if !self.store.add_coverage_unique(mapping.clone())? {
            error!("Coverage already exists at address '{}'", mapping.address);
            return Err(ServiceError::AlreadyExists(format!(
                "Coverage already exists at address: {}",
                mapping.address
            )));
        }
        info!(
            "Coverage saved at address '{}' with station number {}",
            mapping.address, mapping.station
        );
        Ok(mapping)
    }

    /// Reassign a covered address to another station.
    pub fn update(&self, mapping: CoverageMapping) -> ServiceResult<CoverageMapping> {
        let address = mapping.address.clone();
        let updated = self.store.update_coverage(mapping)?.ok_or_else(|| {
            error!("No coverage found at address '{}', cannot update", address);
            ServiceError::NotFound(format!("No coverage found at address: {}", address))
        })?;
        info!(
            "Coverage at address '{}' updated to station number {}",
            updated.address, updated.station
        );
        Ok(updated)
    }

    /// Delete the first mapping at an address.
    pub fn delete_first(&self, address: &str) -> ServiceResult<()> {
        if !self.store.delete_first_coverage_at(address)? {
            error!("No coverage found at address '{}', cannot delete", address);
            return Err(ServiceError::NotFound(format!(
                "No coverage found at address: {}",
                address
            )));
        }
        info!("Coverage at address '{}' deleted", address);
        Ok(())
    }

    /// Delete every mapping at an address.
    pub fn delete(&self, address: &str) -> ServiceResult<()> {
        if !self.store.delete_coverage_at(address)? {
            error!("No coverage found at address '{}', cannot delete", address);
            return Err(ServiceError::NotFound(format!(
                "No coverage found at address: {}",
                address
            )));
        }
        info!("All coverage at address '{}' deleted", address);
        Ok(())
    }

    /// Delete every mapping of a station.
    pub fn delete_station(&self, station: StationNumber) -> ServiceResult<()> {
        if !self.store.delete_station(station)? {
            error!("No coverage found for station number {}, nothing deleted", station);
            return Err(ServiceError::NotFound(format!(
                "No coverage found for station number: {}",
                station
            )));
        }
        info!("All coverage of station number {} deleted", station);
        Ok(())
    }
}
