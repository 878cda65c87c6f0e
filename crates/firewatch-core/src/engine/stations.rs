//! Station-keyed queries: phone alerts, coverage counts, fire and flood views.

use log::{debug, info, warn};

use super::{dedup_normalized, Engine, EngineError, EngineResult};
use crate::identity::AgeClass;
use crate::models::{
    AddressReport, CoveredPerson, Household, Resident, Roster, StationCoverage, StationNumber,
};

/// Distinct addresses of a station, or `NotFound` if it covers nothing.
fn covered_addresses(roster: &Roster, station: StationNumber) -> EngineResult<Vec<&str>> {
    let addresses = dedup_normalized(roster.addresses_for_station(station));
    if addresses.is_empty() {
        warn!("No addresses found for station number {}", station);
        return Err(EngineError::NotFound(format!(
            "No addresses found for station number: {}",
            station
        )));
    }
    info!("Station number {} covers {} address(es)", station, addresses.len());
    Ok(addresses)
}

/// Residents at each address, in address order.
fn residents_at_all<'r>(roster: &'r Roster, addresses: &[&str]) -> Vec<&'r Resident> {
    addresses
        .iter()
        .flat_map(|address| roster.residents_at(address))
        .collect()
}

impl<'a> Engine<'a> {
    /// Distinct phone numbers of everyone covered by a station.
    pub fn phone_numbers_by_station(&self, station: StationNumber) -> EngineResult<Vec<String>> {
        let roster = self.store.read()?;
        let addresses = covered_addresses(&roster, station)?;
        let residents = residents_at_all(&roster, &addresses);
        debug!("Found {} person(s) covered by station {}", residents.len(), station);

        let phones: Vec<String> = dedup_normalized(residents.iter().map(|r| r.phone.as_str()))
            .into_iter()
            .map(str::to_string)
            .collect();
        debug!("Returning {} unique phone number(s)", phones.len());
        Ok(phones)
    }

    /// Residents covered by a station with their child/adult counts.
    ///
    /// Residents without a medical record are left out of both the list and
    /// the counts.
    pub fn persons_covered_by_station(&self, station: StationNumber) -> EngineResult<StationCoverage> {
        let today = self.today();
        let roster = self.store.read()?;
        let addresses = covered_addresses(&roster, station)?;
        let residents = residents_at_all(&roster, &addresses);
        debug!("Found {} person(s) covered by station {}", residents.len(), station);

        let mut coverage = StationCoverage::default();
        for resident in residents {
            let Some(record) = roster.medical_record_for(&resident.first_name, &resident.last_name)
            else {
                warn!(
                    "No medical record found for {} {}",
                    resident.first_name, resident.last_name
                );
                continue;
            };

            match AgeClass::of(record.age_on(today)) {
                AgeClass::Child => coverage.child_count += 1,
                AgeClass::Adult => coverage.adult_count += 1,
            }

            coverage.covered_persons.push(CoveredPerson {
                first_name: resident.first_name.clone(),
                last_name: resident.last_name.clone(),
                address: resident.address.clone(),
                phone: resident.phone.clone(),
            });
        }

        Ok(coverage)
    }

    /// Fire view: the station covering an address and everyone living there
    /// with their medical details.
    pub fn residents_by_address(&self, address: &str) -> EngineResult<AddressReport> {
        let today = self.today();
        let roster = self.store.read()?;

        let mapping = roster.coverage_at(address).ok_or_else(|| {
            warn!("No fire station found for address {}", address);
            EngineError::NotFound(format!("No fire station found for address: {}", address))
        })?;

        let residents: Vec<_> = roster
            .residents_at(address)
            .into_iter()
            .map(|resident| self.fire_resident(&roster, resident, today))
            .collect();
        info!("{} resident(s) found at address {}", residents.len(), address);

        Ok(AddressReport {
            station: mapping.station,
            residents,
        })
    }

    /// Flood view: every household covered by any of `stations`.
    ///
    /// Addresses are deduplicated across all requested stations. Unknown
    /// station numbers contribute nothing.
    pub fn households_by_stations(&self, stations: &[StationNumber]) -> EngineResult<Vec<Household>> {
        let today = self.today();
        let roster = self.store.read()?;

        let addresses = dedup_normalized(
            stations
                .iter()
                .flat_map(|&station| roster.addresses_for_station(station)),
        );
        debug!(
            "{} distinct address(es) for stations {:?}",
            addresses.len(),
            stations
        );

        let households = addresses
            .into_iter()
            .map(|address| Household {
                address: address.to_string(),
                residents: roster
                    .residents_at(address)
                    .into_iter()
                    .map(|resident| self.fire_resident(&roster, resident, today))
                    .collect(),
            })
            .collect();

        Ok(households)
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{self, resident};
    use super::*;
    use crate::identity::UNKNOWN_AGE;
    use crate::models::CoverageMapping;
    use crate::store::test_support::store_with;

    #[test]
    fn test_phone_numbers_dedup() {
        let (store, _) = store_with(fixtures::roster());
        let engine = Engine::with_today(&store, fixtures::today());

        // Four residents on station 3 share one phone number
        assert_eq!(
            engine.phone_numbers_by_station(3).unwrap(),
            vec!["841-874-6512".to_string()]
        );
        assert_eq!(
            engine.phone_numbers_by_station(2).unwrap(),
            vec!["841-874-6513".to_string()]
        );
    }

    #[test]
    fn test_phone_numbers_unknown_station_not_found() {
        let (store, _) = store_with(fixtures::roster());
        let engine = Engine::with_today(&store, fixtures::today());
        assert!(matches!(
            engine.phone_numbers_by_station(999),
            Err(EngineError::NotFound(_))
        ));
    }

    #[test]
    fn test_phone_numbers_station_without_residents() {
        let (store, _) = store_with(fixtures::roster());
        let engine = Engine::with_today(&store, fixtures::today());
        assert!(engine.phone_numbers_by_station(4).unwrap().is_empty());
    }

    #[test]
    fn test_persons_covered_counts_skip_missing_records() {
        let (store, _) = store_with(fixtures::roster());
        let engine = Engine::with_today(&store, fixtures::today());

        let coverage = engine.persons_covered_by_station(3).unwrap();
        // John adult; Tenley and Tessa (18 today) children; Roger has no record
        assert_eq!(coverage.adult_count, 1);
        assert_eq!(coverage.child_count, 2);
        assert_eq!(coverage.covered_persons.len(), 3);
        assert!(coverage
            .covered_persons
            .iter()
            .all(|p| p.first_name != "Roger"));

        let at_addresses = store.residents_at("1509 Culver St").unwrap().len()
            + store.residents_at("834 Binoc Ave").unwrap().len();
        let skipped = 1;
        assert_eq!(
            (coverage.adult_count + coverage.child_count) as usize + skipped,
            at_addresses
        );
    }

    #[test]
    fn test_persons_covered_empty_and_missing() {
        let (store, _) = store_with(fixtures::roster());
        let engine = Engine::with_today(&store, fixtures::today());

        let empty = engine.persons_covered_by_station(4).unwrap();
        assert_eq!(empty, StationCoverage::default());

        assert!(matches!(
            engine.persons_covered_by_station(999),
            Err(EngineError::NotFound(_))
        ));
    }

    #[test]
    fn test_residents_by_address_with_sentinel() {
        let (store, _) = store_with(fixtures::roster());
        let engine = Engine::with_today(&store, fixtures::today());

        let report = engine.residents_by_address("1509 Culver St").unwrap();
        assert_eq!(report.station, 3);
        assert_eq!(report.residents.len(), 3);

        let john = &report.residents[0];
        assert_eq!((john.first_name.as_str(), john.last_name.as_str()), ("John", "Boyd"));
        assert_eq!(john.age, 41);
        assert_eq!(john.medications, vec!["aznol:350mg".to_string()]);

        let roger = &report.residents[2];
        assert_eq!(roger.first_name, "Roger");
        assert_eq!(roger.age, UNKNOWN_AGE);
        assert!(roger.medications.is_empty());
        assert!(roger.allergies.is_empty());
    }

    #[test]
    fn test_residents_by_address_edges() {
        let (store, _) = store_with(fixtures::roster());
        let engine = Engine::with_today(&store, fixtures::today());

        // Covered, nobody lives there
        let report = engine.residents_by_address("112 Steppes Pl").unwrap();
        assert_eq!(report.station, 4);
        assert!(report.residents.is_empty());

        // Residents, but no coverage mapping
        assert!(matches!(
            engine.residents_by_address("951 LoneTree Rd"),
            Err(EngineError::NotFound(_))
        ));
    }

    #[test]
    fn test_households_dedup_across_stations() {
        let roster = Roster::new(
            vec![
                resident("Ann", "A", "A", "1", "a@email.com"),
                resident("Bob", "B", "B", "2", "b@email.com"),
                resident("Cid", "C", "C", "3", "c@email.com"),
            ],
            vec![
                CoverageMapping::new("A", 1),
                CoverageMapping::new("B", 1),
                CoverageMapping::new("B", 2),
                CoverageMapping::new("C", 2),
            ],
            vec![],
        );
        let (store, _) = store_with(roster);
        let engine = Engine::with_today(&store, fixtures::today());

        let households = engine.households_by_stations(&[1, 2]).unwrap();
        let addresses: Vec<_> = households.iter().map(|h| h.address.as_str()).collect();
        assert_eq!(addresses.len(), 3);
        assert_eq!(addresses.iter().filter(|a| **a == "B").count(), 1);
        assert!(households
            .iter()
            .flat_map(|h| &h.residents)
            .all(|r| r.age == UNKNOWN_AGE));
    }

    #[test]
    fn test_households_unknown_stations_contribute_nothing() {
        let (store, _) = store_with(fixtures::roster());
        let engine = Engine::with_today(&store, fixtures::today());

        assert!(engine.households_by_stations(&[999]).unwrap().is_empty());
        assert!(engine.households_by_stations(&[]).unwrap().is_empty());

        let households = engine.households_by_stations(&[2, 999]).unwrap();
        assert_eq!(households.len(), 1);
        assert_eq!(households[0].address, "29 15th St");
        assert_eq!(households[0].residents[0].age, 36);
    }
}
