//! Station events
//!
//! A trip endpoint projected onto the region where it happens. Every trip
//! contributes exactly two events: a [`Direction::Leaving`] event at its
//! start and a [`Direction::Arriving`] event at its end.
//!
//! # Sign convention
//!
//! Counters track *available* docks, not occupied ones:
//! - a vehicle **leaving** frees a dock, so Leaving contributes `+1`;
//! - a vehicle **arriving** occupies a dock, so Arriving contributes `-1`.
//!
//! Downstream normalization (capacity ratios) depends on this sign and it
//! must not be flipped.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Which end of a trip an event represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Vehicle departed; one dock became available
    Leaving,

    /// Vehicle docked; one dock became occupied
    Arriving,
}

impl Direction {
    /// Contribution of one event to its region's available-dock counter.
    ///
    /// # Example
    /// ```
    /// use dock_occupancy_core_rs::Direction;
    ///
    /// assert_eq!(Direction::Leaving.delta(), 1);
    /// assert_eq!(Direction::Arriving.delta(), -1);
    /// ```
    pub fn delta(&self) -> i64 {
        match self {
            Direction::Leaving => 1,
            Direction::Arriving => -1,
        }
    }
}

/// One endpoint of a trip, pinned to an instant and a region.
///
/// Immutable once constructed; the timeline hands out shared references
/// only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationEvent {
    timestamp: NaiveDateTime,
    region_id: String,
    direction: Direction,
}

impl StationEvent {
    /// Create a new event.
    pub fn new(timestamp: NaiveDateTime, region_id: String, direction: Direction) -> Self {
        Self {
            timestamp,
            region_id,
            direction,
        }
    }

    /// Instant at which the event occurs.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Region where the event occurs.
    pub fn region_id(&self) -> &str {
        &self.region_id
    }

    /// Whether the vehicle left or arrived.
    pub fn direction(&self) -> Direction {
        self.direction
    }
}
