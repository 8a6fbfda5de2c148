//! Input record contracts
//!
//! Raw rows handed over by the external loading layer. The core never reads
//! trip or station data from disk or a database itself; collaborators
//! materialize these records and pass them in.
//!
//! Timestamps arrive as raw strings in the fixed `YYYY-MM-DD HH:MM:SS`
//! format; parsing them is the timeline builder's job, so a malformed row
//! surfaces there and not here.

use serde::{Deserialize, Serialize};

/// One trip from the travel history: a vehicle leaving one station and
/// arriving at another.
///
/// Station identifiers are joinable against [`StationRecord::station_id`];
/// trips referencing stations absent from the reference table are dropped
/// during timeline construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRecord {
    /// Station where the trip began
    pub start_station_id: String,

    /// Station where the trip ended
    pub end_station_id: String,

    /// Departure time, `YYYY-MM-DD HH:MM:SS`
    pub started_at: String,

    /// Arrival time, `YYYY-MM-DD HH:MM:SS`
    pub ended_at: String,
}

/// One row of the station reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationRecord {
    /// Unique station identifier
    pub station_id: String,

    /// Region (station cluster) this station belongs to
    pub region_id: String,

    /// Number of docks in service at this station (non-negative)
    pub docks_in_service: i64,
}
