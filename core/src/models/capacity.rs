//! Region capacity table
//!
//! Static mapping from region to total dock capacity, derived once per
//! simulation run by summing station-level capacities grouped by region.
//! Read-only after construction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::trip::StationRecord;

/// Errors that can occur while building the capacity table
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CapacityError {
    #[error("Station reference table has no rows")]
    EmptyTable,
}

/// Total dock capacity per region.
///
/// Backed by a `BTreeMap`, so iteration is always ascending by region
/// identifier; downstream consumers see a deterministic column order.
///
/// # Example
/// ```
/// use dock_occupancy_core_rs::{RegionCapacityTable, StationRecord};
///
/// let stations = vec![
///     StationRecord {
///         station_id: "S1".to_string(),
///         region_id: "N1".to_string(),
///         docks_in_service: 10,
///     },
///     StationRecord {
///         station_id: "S2".to_string(),
///         region_id: "N1".to_string(),
///         docks_in_service: 5,
///     },
/// ];
///
/// let capacity = RegionCapacityTable::from_stations(&stations).unwrap();
/// assert_eq!(capacity.capacity("N1"), Some(15));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionCapacityTable {
    capacities: BTreeMap<String, i64>,
}

impl RegionCapacityTable {
    /// Build the table from the station reference table.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError::EmptyTable`] when `stations` has no rows.
    pub fn from_stations(stations: &[StationRecord]) -> Result<Self, CapacityError> {
        if stations.is_empty() {
            return Err(CapacityError::EmptyTable);
        }

        let mut capacities: BTreeMap<String, i64> = BTreeMap::new();
        for station in stations {
            *capacities.entry(station.region_id.clone()).or_insert(0) +=
                station.docks_in_service;
        }

        Ok(Self { capacities })
    }

    /// Total dock capacity of a region, or `None` for an unknown region.
    pub fn capacity(&self, region_id: &str) -> Option<i64> {
        self.capacities.get(region_id).copied()
    }

    /// Region identifiers in ascending order.
    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.capacities.keys().map(String::as_str)
    }

    /// The full region → capacity mapping.
    pub fn as_map(&self) -> &BTreeMap<String, i64> {
        &self.capacities
    }

    /// Number of distinct regions.
    pub fn num_regions(&self) -> usize {
        self.capacities.len()
    }
}
