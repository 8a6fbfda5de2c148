//! Occupancy state
//!
//! The snapshot history produced by the simulator: one counter row per
//! recorded window, paired with the time book that says which wall-clock
//! instant each row represents.
//!
//! # Critical Invariants
//!
//! 1. **Lockstep**: row *i* of the history corresponds to entry *i* of the
//!    time book; both always have the same length.
//! 2. **Append-only**: rows are never mutated in place once recorded; each
//!    appended row is a new, frozen snapshot.
//! 3. **Exclusive mutation**: only the simulator appends (the mutating
//!    methods are crate-internal); external callers get read access only.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

/// One signed available-dock counter per region, ascending by region id.
///
/// Depending on the simulator's seed mode the values are either absolute
/// dock counts or deltas from the day's starting aggregate.
pub type RegionCounters = BTreeMap<String, i64>;

/// Append-only snapshot history plus its companion time book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccupancyLedger {
    rows: Vec<RegionCounters>,
    time_book: Vec<NaiveDateTime>,
}

impl OccupancyLedger {
    /// Create a ledger holding the seed row.
    pub(crate) fn seeded(seed_row: RegionCounters, seed_time: NaiveDateTime) -> Self {
        Self {
            rows: vec![seed_row],
            time_book: vec![seed_time],
        }
    }

    /// Record one window's counters. Returns the new row index.
    pub(crate) fn append(&mut self, row: RegionCounters, window_end: NaiveDateTime) -> usize {
        self.rows.push(row);
        self.time_book.push(window_end);
        self.rows.len() - 1
    }

    /// All recorded counter rows, oldest first. Row 0 is the seed row.
    pub fn rows(&self) -> &[RegionCounters] {
        &self.rows
    }

    /// Wall-clock instant each row represents. Entry 0 is the timeline's
    /// first event timestamp; every later entry is a window end.
    pub fn time_book(&self) -> &[NaiveDateTime] {
        &self.time_book
    }

    /// The most recently recorded row.
    pub fn latest(&self) -> &RegionCounters {
        self.rows.last().expect("ledger always holds the seed row")
    }

    /// Number of recorded rows (seed row included).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// A ledger is never empty; this exists to pair with [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
