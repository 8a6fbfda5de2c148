//! Simulator - the event-replay engine
//!
//! Implements the window loop that replays the event timeline against the
//! running per-region counters.
//!
//! See `engine.rs` for full implementation.

pub mod engine;

// Re-export main types for convenience
pub use engine::{OccupancySimulator, SeedMode, SimulationError, WindowResult};
