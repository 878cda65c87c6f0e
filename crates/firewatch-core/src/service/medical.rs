//! Medical record service.

use log::{error, info};

use super::{ServiceError, ServiceResult};
use crate::identity::PersonIdentity;
use crate::models::MedicalRecord;
use crate::store::Store;

/// Medical record management on top of a [`Store`].
pub struct MedicalRecordService<'a> {
    store: &'a Store,
}

impl<'a> MedicalRecordService<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    pub fn list(&self) -> ServiceResult<Vec<MedicalRecord>> {
        let records = self.store.medical_records()?;
        info!("Retrieved {} medical record(s)", records.len());
        Ok(records)
    }

    pub fn get(&self, first_name: &str, last_name: &str) -> ServiceResult<MedicalRecord> {
        self.store
            .medical_record(first_name, last_name)?
            .ok_or_else(|| {
                error!("No medical record found for {} {}", first_name, last_name);
                ServiceError::NotFound(format!(
                    "No medical record found for: {} {}",
                    first_name, last_name
                ))
            })
    }

    /// Add a record for someone who has none yet.
    pub fn create(&self, record: MedicalRecord) -> ServiceResult<MedicalRecord> {
        let name = record.full_name();
        if !self.store.add_medical_record_unique(record.clone())? {
            error!("Medical record already exists for {}", name);
            return Err(ServiceError::AlreadyExists(format!(
                "Medical record already exists for {}",
                name
            )));
        }
        info!("Medical record saved for {}", name);
        Ok(record)
    }

    /// Replace birthdate, medications and allergies.
    pub fn update(&self, record: MedicalRecord) -> ServiceResult<MedicalRecord> {
        let name = record.full_name();
        let updated = self.store.update_medical_record(record)?.ok_or_else(|| {
            error!("No medical record found for {}, cannot update", name);
            ServiceError::NotFound(format!("No medical record found for: {}", name))
        })?;
        info!("Medical record for {} updated", name);
        Ok(updated)
    }

    /// Delete every record for a person.
    pub fn delete(&self, first_name: &str, last_name: &str) -> ServiceResult<()> {
        if !self.store.delete_medical_records(first_name, last_name)? {
            error!("No medical record found for {} {}, cannot delete", first_name, last_name);
            return Err(ServiceError::NotFound(format!(
                "No medical record found for: {} {}",
                first_name, last_name
            )));
        }
        info!("Medical record for {} {} deleted", first_name, last_name);
        Ok(())
    }

    /// Delete only the first record for a person.
    pub fn delete_first(&self, first_name: &str, last_name: &str) -> ServiceResult<()> {
        if !self.store.delete_first_medical_record(first_name, last_name)? {
            error!("No medical record found for {} {}, cannot delete", first_name, last_name);
            return Err(ServiceError::NotFound(format!(
                "No medical record found for: {} {}",
                first_name, last_name
            )));
        }
        info!("First medical record for {} {} deleted", first_name, last_name);
        Ok(())
    }
}
