//! Series output
//!
//! Turns the simulator's snapshot history into the time-indexed matrix
//! handed to the external analysis layer: one timestamp per row, one column
//! per region, values either raw counters or capacity ratios.
//!
//! Zero-capacity policy: dividing by a region's capacity is an explicit
//! error when that capacity is zero. The normalizer never emits an
//! infinity/NaN sentinel.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::capacity::RegionCapacityTable;
use crate::models::state::OccupancyLedger;

/// Errors that can occur while normalizing the series
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesError {
    #[error("Region {region} has zero recorded capacity")]
    ZeroCapacity { region: String },

    #[error("Region {region} not present in the capacity table")]
    UnknownRegion { region: String },
}

/// Time-indexed occupancy matrix.
///
/// Row *i* pairs `timestamps()[i]` with per-region values: raw available-dock
/// counters from [`DockSeries::raw`], or occupancy ratios from
/// [`DockSeries::normalized`]. Serializable for downstream tabular analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockSeries {
    timestamps: Vec<NaiveDateTime>,
    rows: Vec<BTreeMap<String, f64>>,
}

impl DockSeries {
    /// The raw counter matrix with time-book timestamps attached.
    pub fn raw(ledger: &OccupancyLedger) -> Self {
        let rows = ledger
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|(region, count)| (region.clone(), *count as f64))
                    .collect()
            })
            .collect();

        Self {
            timestamps: ledger.time_book().to_vec(),
            rows,
        }
    }

    /// Each counter divided by its region's total capacity.
    ///
    /// # Errors
    ///
    /// * [`SeriesError::ZeroCapacity`] - a region in the history has zero
    ///   recorded capacity
    /// * [`SeriesError::UnknownRegion`] - a region in the history is absent
    ///   from the capacity table
    pub fn normalized(
        ledger: &OccupancyLedger,
        capacity: &RegionCapacityTable,
    ) -> Result<Self, SeriesError> {
        let mut rows = Vec::with_capacity(ledger.len());

        for counters in ledger.rows() {
            let mut row = BTreeMap::new();
            for (region, count) in counters {
                let total = capacity
                    .capacity(region)
                    .ok_or_else(|| SeriesError::UnknownRegion {
                        region: region.clone(),
                    })?;
                if total == 0 {
                    return Err(SeriesError::ZeroCapacity {
                        region: region.clone(),
                    });
                }
                row.insert(region.clone(), *count as f64 / total as f64);
            }
            rows.push(row);
        }

        Ok(Self {
            timestamps: ledger.time_book().to_vec(),
            rows,
        })
    }

    /// Row timestamps, oldest first.
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    /// Per-region value rows, in lockstep with [`timestamps`](Self::timestamps).
    pub fn rows(&self) -> &[BTreeMap<String, f64>] {
        &self.rows
    }

    /// Timestamp and values of row `index`.
    pub fn get(&self, index: usize) -> Option<(NaiveDateTime, &BTreeMap<String, f64>)> {
        Some((*self.timestamps.get(index)?, self.rows.get(index)?))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the series holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
