//! Coverage mapping operations.

use log::debug;

use super::{Store, StoreResult};
use crate::identity::same_address;
use crate::models::{CoverageMapping, Roster, StationNumber};

impl Roster {
    /// Mappings belonging to a station.
    pub fn coverage_for_station(&self, station: StationNumber) -> Vec<&CoverageMapping> {
        self.coverage
            .iter()
            .filter(|c| c.station == station)
            .collect()
    }

    /// Addresses covered by a station, in mapping order.
    pub fn addresses_for_station(&self, station: StationNumber) -> Vec<&str> {
        self.coverage_for_station(station)
            .into_iter()
            .map(|c| c.address.as_str())
            .collect()
    }

    /// The mapping for an address (first one if several).
    pub fn coverage_at(&self, address: &str) -> Option<&CoverageMapping> {
        self.coverage
            .iter()
            .find(|c| same_address(&c.address, address))
    }

    /// Change the station of the first mapping at `mapping.address`.
    pub fn set_station(&mut self, mapping: &CoverageMapping) -> Option<CoverageMapping> {
        let slot = self
            .coverage
            .iter_mut()
            .find(|c| same_address(&c.address, &mapping.address))?;
        slot.station = mapping.station;
        Some(slot.clone())
    }

    /// Remove every mapping at an address. Returns how many went.
    pub fn remove_coverage_at(&mut self, address: &str) -> usize {
        let before = self.coverage.len();
        self.coverage.retain(|c| !same_address(&c.address, address));
        before - self.coverage.len()
    }

    /// Remove the first mapping at an address.
    pub fn remove_first_coverage_at(&mut self, address: &str) -> Option<CoverageMapping> {
        let index = self
            .coverage
            .iter()
            .position(|c| same_address(&c.address, address))?;
        Some(self.coverage.remove(index))
    }

    /// Remove every mapping of a station. Returns how many went.
    pub fn remove_station(&mut self, station: StationNumber) -> usize {
        let before = self.coverage.len();
        self.coverage.retain(|c| c.station != station);
        before - self.coverage.len()
    }
}

impl Store {
    /// All coverage mappings.
    pub fn coverage(&self) -> StoreResult<Vec<CoverageMapping>> {
        let roster = self.read()?;
        debug!("Fetching all coverage mappings. Total: {}", roster.coverage.len());
        Ok(roster.coverage.clone())
    }

    /// Mappings belonging to a station.
    pub fn coverage_for_station(&self, station: StationNumber) -> StoreResult<Vec<CoverageMapping>> {
        let found: Vec<_> = self
            .read()?
            .coverage_for_station(station)
            .into_iter()
            .cloned()
            .collect();
        debug!("Found {} mapping(s) for station {}", found.len(), station);
        Ok(found)
    }

    /// Addresses covered by a station.
    pub fn addresses_for_station(&self, station: StationNumber) -> StoreResult<Vec<String>> {
        Ok(self
            .read()?
            .addresses_for_station(station)
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    /// The mapping for an address.
    pub fn coverage_at(&self, address: &str) -> StoreResult<Option<CoverageMapping>> {
        let found = self.read()?.coverage_at(address).cloned();
        debug!(
            "Coverage for address '{}' was {}",
            address,
            if found.is_some() { "found" } else { "not found" }
        );
        Ok(found)
    }

    /// Append a mapping and persist. Duplicates are not rejected here.
    pub fn add_coverage(&self, mapping: CoverageMapping) -> StoreResult<()> {
        self.write(|roster| {
            debug!(
                "Coverage for '{}' by station {} saved",
                mapping.address, mapping.station
            );
            roster.coverage.push(mapping);
            ((), true)
        })
    }

    /// Append a mapping unless its address is already covered, checked
    /// under the same write lock. Returns whether it was added.
    pub fn add_coverage_unique(&self, mapping: CoverageMapping) -> StoreResult<bool> {
        self.write(|roster| {
            if roster.coverage_at(&mapping.address).is_some() {
                debug!("Address '{}' already covered, not added", mapping.address);
                return (false, false);
            }
            debug!(
                "Coverage for '{}' by station {} saved",
                mapping.address, mapping.station
            );
            roster.coverage.push(mapping);
            (true, true)
        })
    }

    /// Reassign an address to another station. `None` when not covered.
    pub fn update_coverage(&self, mapping: CoverageMapping) -> StoreResult<Option<CoverageMapping>> {
        self.write(|roster| match roster.set_station(&mapping) {
            Some(updated) => {
                debug!(
                    "Coverage at '{}' updated to station {}",
                    updated.address, updated.station
                );
                (Some(updated), true)
            }
            None => {
                debug!("No coverage at '{}', update skipped", mapping.address);
                (None, false)
            }
        })
    }

    /// Remove every mapping at an address.
    pub fn delete_coverage_at(&self, address: &str) -> StoreResult<bool> {
        self.write(|roster| {
            let removed = roster.remove_coverage_at(address);
            debug!("{} mapping(s) at '{}' deleted", removed, address);
            (removed > 0, removed > 0)
        })
    }

    /// Remove the first mapping at an address.
    pub fn delete_first_coverage_at(&self, address: &str) -> StoreResult<bool> {
        self.write(|roster| {
            let removed = roster.remove_first_coverage_at(address).is_some();
            if removed {
                debug!("First mapping at '{}' deleted", address);
            } else {
                debug!("No mapping at '{}', nothing deleted", address);
            }
            (removed, removed)
        })
    }

    /// Remove every mapping of a station.
    pub fn delete_station(&self, station: StationNumber) -> StoreResult<bool> {
        self.write(|roster| {
            let removed = roster.remove_station(station);
            debug!("{} mapping(s) of station {} deleted", removed, station);
            (removed > 0, removed > 0)
        })
    }
}
