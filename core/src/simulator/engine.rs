//! Occupancy Simulator Engine
//!
//! Main simulation loop: replays the chronologically sorted event timeline
//! against a running per-region counter table, recording a snapshot after
//! each fixed-length window.
//!
//! # Architecture
//!
//! For each window:
//!
//! ```text
//! 1. Read the event at the cursor; its timestamp is the window start
//!    (end of stream here is the terminal EndOfStream signal)
//! 2. window_end = window start + window length
//! 3. Copy the latest ledger row as the live working counters
//! 4. While the cursor event's timestamp < window_end:
//!    apply direction delta to that event's region, advance the cursor
//! 5. Append the working counters as a new ledger row at window_end
//! ```
//!
//! # Critical Invariants
//!
//! 1. Each event is applied exactly once, in timestamp order, regardless of
//!    how `advance_window` calls are interleaved with queries
//! 2. The cursor is monotonic; it never rewinds
//! 3. Regions untouched during a window keep their prior counter value
//! 4. The simulator is left in a valid, resumable state after every call,
//!    including the call that hits end of stream
//!
//! # Example
//!
//! ```rust,ignore
//! let timeline = EventTimeline::from_trips(&trips, &stations, date)?;
//! let capacity = RegionCapacityTable::from_stations(&stations)?;
//!
//! let mut simulator =
//!     OccupancySimulator::new(timeline, capacity, SeedMode::DeltaFromZero)?;
//! simulator.run_to_completion(Duration::minutes(10))?;
//!
//! let series = simulator.normalized_series()?;
//! ```

use std::fmt;

use chrono::{Duration, NaiveDateTime};
use thiserror::Error;

use crate::models::capacity::RegionCapacityTable;
use crate::models::state::{OccupancyLedger, RegionCounters};
use crate::series::{DockSeries, SeriesError};
use crate::timeline::EventTimeline;

/// How the seed row of the snapshot history is initialized.
///
/// The replay mechanics are identical in both modes; only the seed values
/// and therefore the interpretation of every counter differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedMode {
    /// Seed every region at zero: counters read as the change in available
    /// docks since the start of the day.
    DeltaFromZero,

    /// Seed every region at its total dock capacity: counters read as the
    /// absolute number of available docks.
    AbsoluteCount,
}

/// Simulation error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimulationError {
    /// The event timeline has no events; there is nothing to replay and no
    /// first timestamp to seed the time book with.
    #[error("Event timeline is empty")]
    EmptyTimeline,

    /// Window length must be strictly positive.
    #[error("Window length must be positive, got {0} minute(s)")]
    InvalidWindow(i64),

    /// The cursor has consumed the entire timeline. Expected terminal
    /// signal, not a fault: the driving loop catches it and converts it
    /// into normal completion.
    #[error("Event timeline exhausted")]
    EndOfStream,
}

/// Result of a single `advance_window` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowResult {
    /// Index of the ledger row this window appended
    pub snapshot_index: usize,

    /// Timestamp of the event the window started at
    pub window_start: NaiveDateTime,

    /// Exclusive end of the window; also the row's time-book entry
    pub window_end: NaiveDateTime,

    /// Number of events applied during this window
    pub events_applied: usize,
}

/// The event-replay engine.
///
/// Owns one immutable event timeline, one read-only capacity table, and the
/// exclusively owned mutable state: the cursor and the append-only
/// [`OccupancyLedger`]. No external mutation path is exposed; callers that
/// need incremental results query the simulator mid-stream through
/// [`ledger`](Self::ledger) and keep calling
/// [`advance_window`](Self::advance_window).
pub struct OccupancySimulator {
    /// Sorted event sequence (read-only)
    timeline: EventTimeline,

    /// Region → total dock capacity (read-only)
    capacity: RegionCapacityTable,

    /// Index of the next event not yet applied; monotonic
    cursor: usize,

    /// Snapshot history plus time book (append-only)
    ledger: OccupancyLedger,
}

impl OccupancySimulator {
    /// Create a simulator over `timeline`, seeded according to `mode`.
    ///
    /// The seed row covers every region in the capacity table, so regions
    /// no event ever touches still appear in every snapshot. The time
    /// book's first entry is the timeline's first event timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::EmptyTimeline`] when `timeline` holds no
    /// events.
    pub fn new(
        timeline: EventTimeline,
        capacity: RegionCapacityTable,
        mode: SeedMode,
    ) -> Result<Self, SimulationError> {
        let seed_time = timeline
            .first_timestamp()
            .ok_or(SimulationError::EmptyTimeline)?;

        let seed_row: RegionCounters = match mode {
            SeedMode::DeltaFromZero => capacity
                .regions()
                .map(|region| (region.to_string(), 0))
                .collect(),
            SeedMode::AbsoluteCount => capacity.as_map().clone(),
        };

        Ok(Self {
            timeline,
            capacity,
            cursor: 0,
            ledger: OccupancyLedger::seeded(seed_row, seed_time),
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current cursor position: the index of the next unapplied event.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The snapshot history recorded so far.
    pub fn ledger(&self) -> &OccupancyLedger {
        &self.ledger
    }

    /// The capacity table the simulator was seeded with.
    pub fn capacity(&self) -> &RegionCapacityTable {
        &self.capacity
    }

    /// The event timeline under replay.
    pub fn timeline(&self) -> &EventTimeline {
        &self.timeline
    }

    // ========================================================================
    // Window Loop
    // ========================================================================

    /// Advance the simulation by one window and record a snapshot.
    ///
    /// The window starts at the timestamp of the event currently at the
    /// cursor and covers `[window_start, window_start + window_length)`.
    /// Every event inside the window is applied to a working copy of the
    /// latest counters; the copy is then appended to the ledger with the
    /// window end as its time-book entry.
    ///
    /// A window cut short because the timeline ran out mid-window still
    /// records its row; the end of stream surfaces on the *next* call, so
    /// no event is ever lost or double-counted.
    ///
    /// # Errors
    ///
    /// * [`SimulationError::InvalidWindow`] - `window_length` is zero or
    ///   negative
    /// * [`SimulationError::EndOfStream`] - the cursor has already consumed
    ///   the entire timeline
    pub fn advance_window(
        &mut self,
        window_length: Duration,
    ) -> Result<WindowResult, SimulationError> {
        if window_length <= Duration::zero() {
            return Err(SimulationError::InvalidWindow(window_length.num_minutes()));
        }

        let window_start = self
            .timeline
            .get(self.cursor)
            .ok_or(SimulationError::EndOfStream)?
            .timestamp();
        let window_end = window_start + window_length;

        let mut working = self.ledger.latest().clone();
        let mut events_applied = 0;

        while let Some(event) = self.timeline.get(self.cursor) {
            if event.timestamp() >= window_end {
                break;
            }
            *working.entry(event.region_id().to_string()).or_insert(0) +=
                event.direction().delta();
            self.cursor += 1;
            events_applied += 1;
        }

        let snapshot_index = self.ledger.append(working, window_end);

        Ok(WindowResult {
            snapshot_index,
            window_start,
            window_end,
            events_applied,
        })
    }

    /// Keep advancing windows until the timeline is exhausted.
    ///
    /// This is the normal driving loop for producing a full-day series:
    /// [`SimulationError::EndOfStream`] is caught and converted into normal
    /// completion; any other error propagates. Returns the number of
    /// windows recorded.
    pub fn run_to_completion(
        &mut self,
        window_length: Duration,
    ) -> Result<usize, SimulationError> {
        let mut windows = 0;
        loop {
            match self.advance_window(window_length) {
                Ok(_) => windows += 1,
                Err(SimulationError::EndOfStream) => return Ok(windows),
                Err(err) => return Err(err),
            }
        }
    }

    // ========================================================================
    // Series Output
    // ========================================================================

    /// The recorded history as a raw counter series.
    pub fn raw_series(&self) -> DockSeries {
        DockSeries::raw(&self.ledger)
    }

    /// The recorded history normalized by each region's total capacity.
    ///
    /// # Errors
    ///
    /// See [`DockSeries::normalized`].
    pub fn normalized_series(&self) -> Result<DockSeries, SeriesError> {
        DockSeries::normalized(&self.ledger, &self.capacity)
    }
}

impl fmt::Display for OccupancySimulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OccupancySimulator|{} regions x {} snapshots, cursor {}/{}",
            self.capacity.num_regions(),
            self.ledger.len(),
            self.cursor,
            self.timeline.len()
        )
    }
}
