//! Resident operations.

use log::debug;

use super::{Store, StoreResult};
use crate::identity::{same_address, same_text, PersonIdentity};
use crate::models::{Resident, Roster};

impl Roster {
    /// Residents whose city matches.
    pub fn residents_in_city(&self, city: &str) -> Vec<&Resident> {
        self.residents
            .iter()
            .filter(|r| same_text(&r.city, city))
            .collect()
    }

    /// Residents whose last name matches.
    pub fn residents_with_last_name(&self, last_name: &str) -> Vec<&Resident> {
        self.residents
            .iter()
            .filter(|r| same_text(&r.last_name, last_name))
            .collect()
    }

    /// Residents living at an address.
    pub fn residents_at(&self, address: &str) -> Vec<&Resident> {
        self.residents
            .iter()
            .filter(|r| same_address(&r.address, address))
            .collect()
    }

    /// First resident with the given identity.
    pub fn find_resident(&self, first_name: &str, last_name: &str) -> Option<&Resident> {
        self.residents
            .iter()
            .find(|r| r.is_person(first_name, last_name))
    }

    /// Replace the first resident sharing `resident`'s identity.
    pub fn replace_resident(&mut self, resident: Resident) -> Option<Resident> {
        let slot = self
            .residents
            .iter_mut()
            .find(|r| r.is_person(&resident.first_name, &resident.last_name))?;
        *slot = resident;
        Some(slot.clone())
    }

    /// Remove every resident with the identity. Returns how many went.
    pub fn remove_residents(&mut self, first_name: &str, last_name: &str) -> usize {
        let before = self.residents.len();
        self.residents.retain(|r| !r.is_person(first_name, last_name));
        before - self.residents.len()
    }

    /// Remove the first resident with the identity.
    pub fn remove_first_resident(&mut self, first_name: &str, last_name: &str) -> Option<Resident> {
        let index = self
            .residents
            .iter()
            .position(|r| r.is_person(first_name, last_name))?;
        Some(self.residents.remove(index))
    }
}

impl Store {
    /// All residents.
    pub fn residents(&self) -> StoreResult<Vec<Resident>> {
        let roster = self.read()?;
        debug!("Fetching all residents. Total: {}", roster.residents.len());
        Ok(roster.residents.clone())
    }

    /// Residents living in a city.
    pub fn residents_in_city(&self, city: &str) -> StoreResult<Vec<Resident>> {
        Ok(self
            .read()?
            .residents_in_city(city)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Residents sharing a last name.
    pub fn residents_with_last_name(&self, last_name: &str) -> StoreResult<Vec<Resident>> {
        Ok(self
            .read()?
            .residents_with_last_name(last_name)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Residents living at an address.
    pub fn residents_at(&self, address: &str) -> StoreResult<Vec<Resident>> {
        Ok(self
            .read()?
            .residents_at(address)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Look up a resident by identity.
    pub fn resident(&self, first_name: &str, last_name: &str) -> StoreResult<Option<Resident>> {
        let found = self.read()?.find_resident(first_name, last_name).cloned();
        debug!(
            "Resident {} {} was {}",
            first_name,
            last_name,
            if found.is_some() { "found" } else { "not found" }
        );
        Ok(found)
    }

    /// Append a resident and persist. Duplicates are not rejected here.
    pub fn add_resident(&self, resident: Resident) -> StoreResult<()> {
        self.write(|roster| {
            debug!("Resident {} saved", resident.full_name());
            roster.residents.push(resident);
            ((), true)
        })
    }

    /// Append a resident unless one with the same identity exists, checked
    /// under the same write lock. Returns whether it was added.
    pub fn add_resident_unique(&self, resident: Resident) -> StoreResult<bool> {
        self.write(|roster| {
            if roster
                .find_resident(&resident.first_name, &resident.last_name)
                .is_some()
            {
                debug!("Resident {} already present, not added", resident.full_name());
                return (false, false);
            }
            debug!("Resident {} saved", resident.full_name());
            roster.residents.push(resident);
            (true, true)
        })
    }

    /// Replace the resident with the same identity. `None` when absent.
    pub fn update_resident(&self, resident: Resident) -> StoreResult<Option<Resident>> {
        self.write(|roster| {
            let name = resident.full_name();
            match roster.replace_resident(resident) {
                Some(updated) => {
                    debug!("Resident {} updated", name);
                    (Some(updated), true)
                }
                None => {
                    debug!("No resident {}, update skipped", name);
                    (None, false)
                }
            }
        })
    }

    /// Remove every resident with the identity.
    pub fn delete_residents(&self, first_name: &str, last_name: &str) -> StoreResult<bool> {
        self.write(|roster| {
            let removed = roster.remove_residents(first_name, last_name);
            debug!("{} resident(s) {} {} deleted", removed, first_name, last_name);
            (removed > 0, removed > 0)
        })
    }

    /// Remove the first resident with the identity.
    pub fn delete_first_resident(&self, first_name: &str, last_name: &str) -> StoreResult<bool> {
        self.write(|roster| {
            let removed = roster.remove_first_resident(first_name, last_name).is_some();
            if removed {
                debug!("First occurrence of resident {} {} deleted", first_name, last_name);
            } else {
                debug!("No resident {} {}, nothing deleted", first_name, last_name);
            }
            (removed, removed)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::store_with;

    fn boyd_household() -> Roster {
        Roster::new(
            vec![
                Resident::new("John", "Boyd")
                    .at("1509 Culver St", "Culver")
                    .with_contact("841-874-6512", "jaboyd@email.com"),
                Resident::new("Jacob", "Boyd")
                    .at("1509 Culver St", "Culver")
                    .with_contact("841-874-6513", "drk@email.com"),
                Resident::new("Tessa", "Carman")
                    .at("834 Binoc Ave", "Culver")
                    .with_contact("841-874-6512", "tenz@email.com"),
            ],
            vec![],
            vec![],
        )
    }

    #[test]
    fn test_filters_are_case_insensitive() {
        let (store, _) = store_with(boyd_household());

        assert_eq!(store.residents_at("1509  CULVER st").unwrap().len(), 2);
        assert_eq!(store.residents_in_city("culver").unwrap().len(), 3);
        assert_eq!(store.residents_with_last_name(" boyd").unwrap().len(), 2);
        assert!(store.residents_in_city("WrongCity").unwrap().is_empty());
    }

    #[test]
    fn test_lookup_miss_is_none() {
        let (store, _) = store_with(boyd_household());
        assert!(store.resident("john", "BOYD").unwrap().is_some());
        assert!(store.resident("Nobody", "Here").unwrap().is_none());
    }

    #[test]
    fn test_add_persists_once() {
        let (store, gateway) = store_with(Roster::default());
        store.add_resident(Resident::new("Jane", "Doe")).unwrap();

        assert_eq!(gateway.save_count(), 1);
        assert_eq!(gateway.saved().unwrap().residents.len(), 1);
    }

    #[test]
    fn test_add_does_not_reject_duplicates() {
        let (store, _) = store_with(boyd_household());
        store.add_resident(Resident::new("John", "Boyd")).unwrap();
        assert_eq!(store.residents_with_last_name("Boyd").unwrap().len(), 3);
    }

    #[test]
    fn test_add_unique() {
        let (store, gateway) = store_with(boyd_household());
        assert!(!store.add_resident_unique(Resident::new("JOHN", "boyd")).unwrap());
        assert_eq!(gateway.save_count(), 0);

        assert!(store.add_resident_unique(Resident::new("Jane", "Doe")).unwrap());
        assert_eq!(gateway.save_count(), 1);
    }

    #[test]
    fn test_update_replaces_record() {
        let (store, gateway) = store_with(boyd_household());
        let moved = Resident::new("John", "Boyd")
            .at("29 15th St", "Culver")
            .with_contact("000", "new@email.com");

        let updated = store.update_resident(moved.clone()).unwrap();
        assert_eq!(updated, Some(moved.clone()));
        assert_eq!(store.resident("John", "Boyd").unwrap(), Some(moved));
        assert_eq!(gateway.save_count(), 1);
    }

    #[test]
    fn test_update_miss_does_not_persist() {
        let (store, gateway) = store_with(boyd_household());
        let updated = store.update_resident(Resident::new("Ghost", "Writer")).unwrap();
        assert!(updated.is_none());
        assert_eq!(gateway.save_count(), 0);
    }

    #[test]
    fn test_delete_all_after_add_leaves_none() {
        let (store, _) = store_with(boyd_household());
        store.add_resident(Resident::new("John", "Boyd")).unwrap();

        assert!(store.delete_residents("john", "boyd").unwrap());
        assert!(store.resident("John", "Boyd").unwrap().is_none());
        assert_eq!(store.residents().unwrap().len(), 2);
    }

    #[test]
    fn test_delete_first_leaves_one_of_two() {
        let (store, gateway) = store_with(boyd_household());
        store
            .add_resident(Resident::new("John", "Boyd").at("elsewhere", "Culver"))
            .unwrap();

        assert!(store.delete_first_resident("John", "Boyd").unwrap());
        let remaining: Vec<_> = store
            .residents()
            .unwrap()
            .into_iter()
            .filter(|r| r.is_person("John", "Boyd"))
            .collect();
        assert_eq!(remaining.len(), 1);
        // Insertion order: the first record added is the one removed
        assert_eq!(remaining[0].address, "elsewhere");
        assert_eq!(gateway.save_count(), 2);
    }

    #[test]
    fn test_delete_miss_does_not_persist() {
        let (store, gateway) = store_with(boyd_household());
        assert!(!store.delete_residents("Ghost", "Writer").unwrap());
        assert!(!store.delete_first_resident("Ghost", "Writer").unwrap());
        assert_eq!(gateway.save_count(), 0);
    }
}
