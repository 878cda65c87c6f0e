//! Resident service.

use log::{error, info};

use super::{ServiceError, ServiceResult};
use crate::identity::PersonIdentity;
use crate::models::Resident;
use crate::store::Store;

/// Resident management on top of a [`Store`].
pub struct ResidentService<'a> {
    store: &'a Store,
}

impl<'a> ResidentService<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    pub fn list(&self) -> ServiceResult<Vec<Resident>> {
        let residents = self.store.residents()?;
        info!("{} resident(s) found", residents.len());
        Ok(residents)
    }

    pub fn get(&self, first_name: &str, last_name: &str) -> ServiceResult<Resident> {
        self.store
            .resident(first_name, last_name)?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Resident not found: {} {}", first_name, last_name))
            })
    }

    /// Add a resident whose identity is not yet taken.
    pub fn create(&self, resident: Resident) -> ServiceResult<Resident> {
        let name = resident.full_name();
        if !self.store.add_resident_unique(resident.clone())? {
            error!("Resident {} already exists", name);
            return Err(ServiceError::AlreadyExists(format!(
                "Resident {} already exists",
                name
            )));
        }
        info!("Resident {} created", name);
        Ok(resident)
    }

    pub fn update(&self, resident: Resident) -> ServiceResult<Resident> {
        let name = resident.full_name();
        self.store.update_resident(resident)?.ok_or_else(|| {
            error!("Cannot update, resident not found: {}", name);
            ServiceError::NotFound(format!("Cannot update, resident not found: {}", name))
        })
    }

    /// Delete every resident with the identity.
    pub fn delete(&self, first_name: &str, last_name: &str) -> ServiceResult<()> {
        if !self.store.delete_residents(first_name, last_name)? {
            error!("Cannot delete, resident not found: {} {}", first_name, last_name);
            return Err(ServiceError::NotFound(format!(
                "Cannot delete, resident not found: {} {}",
                first_name, last_name
            )));
        }
        info!("Resident(s) {} {} deleted", first_name, last_name);
        Ok(())
    }

    /// Delete only the first resident with the identity.
    pub fn delete_first(&self, first_name: &str, last_name: &str) -> ServiceResult<()> {
        if !self.store.delete_first_resident(first_name, last_name)? {
            error!("Cannot delete, resident not found: {} {}", first_name, last_name);
            return Err(ServiceError::NotFound(format!(
                "Cannot delete, resident not found: {} {}",
                first_name, last_name
            )));
        }
        info!("First resident {} {} deleted", first_name, last_name);
        Ok(())
    }
}
