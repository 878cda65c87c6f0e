//! City, family and household queries.
//!
//! None of these fail on a miss; an unknown city, name or address simply
//! yields an empty result.

use log::{debug, warn};

use super::{dedup_normalized, Engine, EngineResult};
use crate::identity::{AgeClass, PersonIdentity};
use crate::models::{ChildAlert, HouseholdMember, PersonInfo};

impl<'a> Engine<'a> {
    /// Distinct email addresses of everyone living in `city`.
    pub fn emails_by_city(&self, city: &str) -> EngineResult<Vec<String>> {
        let roster = self.store.read()?;
        let residents = roster.residents_in_city(city);
        let emails: Vec<String> = dedup_normalized(residents.iter().map(|r| r.email.as_str()))
            .into_iter()
            .map(str::to_string)
            .collect();
        debug!("{} distinct email(s) for city '{}'", emails.len(), city);
        Ok(emails)
    }

    /// Residents with `last_name`, joined with their medical record.
    ///
    /// Residents without a record are left out.
    pub fn person_info_by_last_name(&self, last_name: &str) -> EngineResult<Vec<PersonInfo>> {
        let today = self.today();
        let roster = self.store.read()?;

        let infos: Vec<PersonInfo> = roster
            .residents_with_last_name(last_name)
            .into_iter()
            .filter_map(|resident| {
                let record =
                    roster.medical_record_for(&resident.first_name, &resident.last_name)?;
                Some(PersonInfo {
                    first_name: resident.first_name.clone(),
                    last_name: resident.last_name.clone(),
                    address: resident.address.clone(),
                    email: resident.email.clone(),
                    age: record.age_on(today),
                    medications: record.medications.clone(),
                    allergies: record.allergies.clone(),
                })
            })
            .collect();

        debug!("{} person(s) with last name '{}'", infos.len(), last_name);
        Ok(infos)
    }

    /// Children (18 or under) at an address, each with the other members of
    /// the household.
    ///
    /// Residents without a medical record cannot be classified and are
    /// skipped, though they still show up as household members.
    pub fn children_at_address(&self, address: &str) -> EngineResult<Vec<ChildAlert>> {
        let today = self.today();
        let roster = self.store.read()?;
        let household = roster.residents_at(address);

        if household.is_empty() {
            warn!("No residents found at address {}", address);
            return Ok(Vec::new());
        }

        let mut children = Vec::new();
        for resident in &household {
            let Some(record) = roster.medical_record_for(&resident.first_name, &resident.last_name)
            else {
                warn!("No medical record found for {}", resident.full_name());
                continue;
            };

            let age = record.age_on(today);
            if !AgeClass::of(age).is_child() {
                continue;
            }

            let household_members = household
                .iter()
                .filter(|other| !other.is_person(&resident.first_name, &resident.last_name))
                .map(|other| HouseholdMember {
                    first_name: other.first_name.clone(),
                    last_name: other.last_name.clone(),
                })
                .collect();

            children.push(ChildAlert {
                first_name: resident.first_name.clone(),
                last_name: resident.last_name.clone(),
                age,
                household_members,
            });
        }

        debug!("{} child(ren) at address {}", children.len(), address);
        Ok(children)
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{self, record, resident};
    use super::*;
    use crate::store::test_support::store_with;

    #[test]
    fn test_emails_by_city_dedups() {
        let (store, _) = store_with(fixtures::roster());
        let engine = Engine::with_today(&store, fixtures::today());

        let emails = engine.emails_by_city("culver").unwrap();
        assert_eq!(
            emails,
            vec!["jaboyd@email.com", "tenz@email.com", "drk@email.com", "gramps@email.com"]
        );
    }

    #[test]
    fn test_emails_unknown_city_is_empty() {
        let (store, _) = store_with(fixtures::roster());
        let engine = Engine::with_today(&store, fixtures::today());
        assert!(engine.emails_by_city("WrongCity").unwrap().is_empty());
    }

    #[test]
    fn test_person_info_drops_residents_without_record() {
        let (store, _) = store_with(fixtures::roster());
        let engine = Engine::with_today(&store, fixtures::today());

        let infos = engine.person_info_by_last_name("BOYD").unwrap();
        let names: Vec<_> = infos.iter().map(|i| i.first_name.as_str()).collect();
        assert_eq!(names, vec!["John", "Tenley"]);

        let john = &infos[0];
        assert_eq!(john.age, 41);
        assert_eq!(john.address, "1509 Culver St");
        assert_eq!(john.medications, vec!["aznol:350mg".to_string()]);
    }

    #[test]
    fn test_person_info_unknown_name_is_empty() {
        let (store, _) = store_with(fixtures::roster());
        let engine = Engine::with_today(&store, fixtures::today());
        assert!(engine.person_info_by_last_name("Nobody").unwrap().is_empty());
    }

    #[test]
    fn test_children_with_household_members() {
        let (store, _) = store_with(fixtures::roster());
        let engine = Engine::with_today(&store, fixtures::today());

        let children = engine.children_at_address("1509 culver st").unwrap();
        assert_eq!(children.len(), 1);

        let tenley = &children[0];
        assert_eq!(tenley.first_name, "Tenley");
        assert_eq!(tenley.age, 13);
        let members: Vec<_> = tenley
            .household_members
            .iter()
            .map(|m| m.first_name.as_str())
            .collect();
        // Roger has no record, so he is not a child candidate but still lives here
        assert_eq!(members, vec!["John", "Roger"]);
    }

    #[test]
    fn test_eighteen_is_still_a_child() {
        let (store, _) = store_with(fixtures::roster());
        let engine = Engine::with_today(&store, fixtures::today());

        let children = engine.children_at_address("834 Binoc Ave").unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].age, 18);
        assert!(children[0].household_members.is_empty());
    }

    #[test]
    fn test_children_empty_cases() {
        let (store, _) = store_with(fixtures::roster());
        let engine = Engine::with_today(&store, fixtures::today());

        // Nobody lives there
        assert!(engine.children_at_address("1 Nowhere Rd").unwrap().is_empty());
        // Only adults
        assert!(engine.children_at_address("29 15th St").unwrap().is_empty());
    }

    #[test]
    fn test_children_skip_missing_record() {
        let mut roster = fixtures::roster();
        roster
            .residents
            .push(resident("Kid", "Unknown", "29 15th St", "000", "kid@email.com"));
        let (store, _) = store_with(roster);
        let engine = Engine::with_today(&store, fixtures::today());
        assert!(engine.children_at_address("29 15th St").unwrap().is_empty());

        store
            .add_medical_record(record("Kid", "Unknown", "01/01/2020", &[]))
            .unwrap();
        let children = engine.children_at_address("29 15th St").unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].age, 5);
    }
}
