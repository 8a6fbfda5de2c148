//! Dock Occupancy Core - Rust Engine
//!
//! Converts one calendar day of travel history into a discretized time
//! series of per-region dock occupancy by replaying station events against
//! running availability counters.
//!
//! # Architecture
//!
//! - **core**: Timestamp parsing and day boundaries
//! - **models**: Domain types (TripRecord, StationEvent, RegionCapacityTable, OccupancyLedger)
//! - **timeline**: Event timeline construction (join, parse, sort, truncate)
//! - **simulator**: Window-driven replay engine
//! - **series**: Raw and capacity-normalized series output
//!
//! # Critical Invariants
//!
//! 1. Events are totally ordered by timestamp (stable on ties) and each is
//!    applied exactly once
//! 2. Leaving is +1 and Arriving is -1: counters track *available* docks
//! 3. End of stream is an explicit signal (`SimulationError::EndOfStream`),
//!    never an index panic
//!
//! # Data Flow
//!
//! ```text
//! trips + stations
//!     └─> EventTimeline          (ordered event sequence)
//!           └─> OccupancySimulator   (seeded by RegionCapacityTable)
//!                 └─> OccupancyLedger    (snapshot matrix + time book)
//!                       └─> DockSeries       (raw or normalized, time-indexed)
//! ```

// Module declarations
pub mod core;
pub mod models;
pub mod series;
pub mod simulator;
pub mod timeline;

// Re-exports for convenience
pub use crate::core::time::TIMESTAMP_FORMAT;
pub use models::{
    capacity::{CapacityError, RegionCapacityTable},
    event::{Direction, StationEvent},
    state::{OccupancyLedger, RegionCounters},
    trip::{StationRecord, TripRecord},
};
pub use series::{DockSeries, SeriesError};
pub use simulator::{OccupancySimulator, SeedMode, SimulationError, WindowResult};
pub use timeline::{EventTimeline, TimelineError};
