//! Medical record operations.

use log::debug;

use super::{Store, StoreResult};
use crate::identity::PersonIdentity;
use crate::models::{MedicalRecord, Roster};

impl Roster {
    /// First medical record for a person.
    pub fn medical_record_for(&self, first_name: &str, last_name: &str) -> Option<&MedicalRecord> {
        self.medical_records
            .iter()
            .find(|m| m.is_person(first_name, last_name))
    }

    /// Overwrite birthdate, medications and allergies of the first record
    /// with `record`'s identity. Stored names are kept.
    pub fn replace_medical_details(&mut self, record: MedicalRecord) -> Option<MedicalRecord> {
        let slot = self
            .medical_records
            .iter_mut()
            .find(|m| m.is_person(&record.first_name, &record.last_name))?;
        slot.birthdate = record.birthdate;
        slot.medications = record.medications;
        slot.allergies = record.allergies;
        Some(slot.clone())
    }

    /// Remove every record for a person. Returns how many went.
    pub fn remove_medical_records(&mut self, first_name: &str, last_name: &str) -> usize {
        let before = self.medical_records.len();
        self.medical_records
            .retain(|m| !m.is_person(first_name, last_name));
        before - self.medical_records.len()
    }

    /// Remove the first record for a person.
    pub fn remove_first_medical_record(
        &mut self,
        first_name: &str,
        last_name: &str,
    ) -> Option<MedicalRecord> {
        let index = self
            .medical_records
            .iter()
            .position(|m| m.is_person(first_name, last_name))?;
        Some(self.medical_records.remove(index))
    }
}

impl Store {
    /// All medical records.
    pub fn medical_records(&self) -> StoreResult<Vec<MedicalRecord>> {
        let roster = self.read()?;
        debug!(
            "Fetching all medical records. Total: {}",
            roster.medical_records.len()
        );
        Ok(roster.medical_records.clone())
    }

    /// Look up a person's medical record.
    pub fn medical_record(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> StoreResult<Option<MedicalRecord>> {
        let found = self.read()?.medical_record_for(first_name, last_name).cloned();
        debug!(
            "Medical record for {} {} was {}",
            first_name,
            last_name,
            if found.is_some() { "found" } else { "not found" }
        );
        Ok(found)
    }

    /// Append a record and persist. Duplicates are not rejected here.
    pub fn add_medical_record(&self, record: MedicalRecord) -> StoreResult<()> {
        self.write(|roster| {
            debug!(
                "Medical record for {} saved with birthdate {}, medications {:?}, allergies {:?}",
                record.full_name(),
                record.birthdate,
                record.medications,
                record.allergies
            );
            roster.medical_records.push(record);
            ((), true)
        })
    }

    /// Append a record unless the person already has one, checked under the
    /// same write lock. Returns whether it was added.
    pub fn add_medical_record_unique(&self, record: MedicalRecord) -> StoreResult<bool> {
        self.write(|roster| {
            if roster
                .medical_record_for(&record.first_name, &record.last_name)
                .is_some()
            {
                debug!("Medical record for {} already present", record.full_name());
                return (false, false);
            }
            debug!("Medical record for {} saved", record.full_name());
            roster.medical_records.push(record);
            (true, true)
        })
    }

    /// Replace a person's medical details. `None` when they have no record.
    pub fn update_medical_record(&self, record: MedicalRecord) -> StoreResult<Option<MedicalRecord>> {
        self.write(|roster| {
            let name = record.full_name();
            match roster.replace_medical_details(record) {
                Some(updated) => {
                    debug!(
                        "Medical record for {} updated: birthdate={}, medications={:?}, allergies={:?}",
                        name, updated.birthdate, updated.medications, updated.allergies
                    );
                    (Some(updated), true)
                }
                None => {
                    debug!("No medical record for {}, update skipped", name);
                    (None, false)
                }
            }
        })
    }

    /// Remove every record for a person.
    pub fn delete_medical_records(&self, first_name: &str, last_name: &str) -> StoreResult<bool> {
        self.write(|roster| {
            let removed = roster.remove_medical_records(first_name, last_name);
            debug!(
                "{} medical record(s) for {} {} deleted",
                removed, first_name, last_name
            );
            (removed > 0, removed > 0)
        })
    }

    /// Remove the first record for a person.
    pub fn delete_first_medical_record(&self, first_name: &str, last_name: &str) -> StoreResult<bool> {
        self.write(|roster| {
            let removed = roster
                .remove_first_medical_record(first_name, last_name)
                .is_some();
            debug!(
                "First medical record for {} {} {}",
                first_name,
                last_name,
                if removed { "deleted" } else { "not found" }
            );
            (removed, removed)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_birthdate;
    use crate::store::test_support::store_with;

    fn record(first: &str, last: &str, birthdate: &str) -> MedicalRecord {
        MedicalRecord::new(first, last, parse_birthdate(birthdate).unwrap())
    }

    fn records() -> Roster {
        let mut john = record("John", "Boyd", "03/06/1984");
        john.medications = vec!["aznol:350mg".into()];
        john.allergies = vec!["nillacilan".into()];
        Roster::new(vec![], vec![], vec![john, record("Tenley", "Boyd", "02/18/2012")])
    }

    #[test]
    fn test_lookup_normalizes_names() {
        let (store, _) = store_with(records());
        let found = store.medical_record("  john ", "BOYD").unwrap().unwrap();
        assert_eq!(found.medications, vec!["aznol:350mg".to_string()]);
        assert!(store.medical_record("Roger", "Boyd").unwrap().is_none());
    }

    #[test]
    fn test_update_keeps_stored_names() {
        let (store, gateway) = store_with(records());
        let mut change = record("JOHN", "boyd", "03/06/1985");
        change.allergies = vec![];

        let updated = store.update_medical_record(change).unwrap().unwrap();
        assert_eq!(updated.first_name, "John");
        assert_eq!(updated.birthdate, parse_birthdate("03/06/1985").unwrap());
        assert!(updated.medications.is_empty());
        assert!(updated.allergies.is_empty());
        assert_eq!(gateway.save_count(), 1);
    }

    #[test]
    fn test_update_miss() {
        let (store, gateway) = store_with(records());
        let missing = record("Roger", "Boyd", "09/06/2017");
        assert!(store.update_medical_record(missing).unwrap().is_none());
        assert_eq!(gateway.save_count(), 0);
    }

    #[test]
    fn test_add_unique() {
        let (store, _) = store_with(records());
        assert!(!store
            .add_medical_record_unique(record("John", "Boyd", "01/01/2000"))
            .unwrap());
        assert!(store
            .add_medical_record_unique(record("Roger", "Boyd", "09/06/2017"))
            .unwrap());
        assert_eq!(store.medical_records().unwrap().len(), 3);
    }

    #[test]
    fn test_delete_variants() {
        let (store, gateway) = store_with(records());
        store
            .add_medical_record(record("John", "Boyd", "01/01/2000"))
            .unwrap();

        assert!(store.delete_first_medical_record("John", "Boyd").unwrap());
        let left = store.medical_record("John", "Boyd").unwrap().unwrap();
        assert_eq!(left.birthdate, parse_birthdate("01/01/2000").unwrap());

        assert!(store.delete_medical_records("John", "Boyd").unwrap());
        assert!(!store.delete_medical_records("John", "Boyd").unwrap());
        assert!(!store.delete_first_medical_record("John", "Boyd").unwrap());
        assert_eq!(gateway.save_count(), 3);
    }
}
