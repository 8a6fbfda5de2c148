//! Event timeline construction
//!
//! Turns raw trip records into the single chronologically ordered event
//! sequence the simulator replays. Each trip that joins against the station
//! reference table contributes exactly two events: a Leaving event at its
//! start and an Arriving event at its end.
//!
//! # Join semantics
//!
//! The join against the station table is an inner join on both endpoints:
//! a trip referencing any station absent from the reference table is
//! dropped silently (logged at debug level), never surfaced as an error.
//! Ignoring unseen stations is normal operational practice; malformed
//! timestamps, by contrast, are a fatal input defect and fail immediately.
//!
//! # Ordering
//!
//! Events are sorted ascending by timestamp with a stable sort; on equal
//! timestamps the original input order wins, with every Leaving endpoint
//! generated before every Arriving endpoint. The resulting positional
//! index is dense and 0-based, and it is exactly the cursor addressing
//! scheme the simulator uses.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::core::time::{day_end, parse_timestamp};
use crate::models::event::{Direction, StationEvent};
use crate::models::trip::{StationRecord, TripRecord};

/// Errors that can occur while building the timeline
#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("Malformed timestamp '{value}': {source}")]
    Parse {
        value: String,
        source: chrono::ParseError,
    },
}

/// The chronologically sorted, densely indexed event sequence for one day.
///
/// Immutable once built; the simulator only reads it.
///
/// # Example
/// ```rust,ignore
/// let timeline = EventTimeline::from_trips(&trips, &stations, date)?;
/// println!("{} events on {}", timeline.len(), date);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTimeline {
    events: Vec<StationEvent>,
}

impl EventTimeline {
    /// Build the timeline for `date` from raw trips and the station table.
    ///
    /// Events timestamped at or after midnight of the following day are
    /// excluded; this truncates trips whose endpoint lands past the
    /// simulated day while keeping their in-day endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::Parse`] on the first malformed timestamp.
    /// Timestamps are parsed before the station join is consulted, so a
    /// malformed trip fails even when the join would have dropped it.
    pub fn from_trips(
        trips: &[TripRecord],
        stations: &[StationRecord],
        date: NaiveDate,
    ) -> Result<Self, TimelineError> {
        let station_index: HashMap<&str, &StationRecord> = stations
            .iter()
            .map(|station| (station.station_id.as_str(), station))
            .collect();
        let cutoff = day_end(date);

        // Leaving endpoints are collected before Arriving endpoints so that
        // the stable sort below breaks timestamp ties the same way on every
        // run: departures first, then arrivals, each in input order.
        let mut leaving = Vec::with_capacity(trips.len());
        let mut arriving = Vec::with_capacity(trips.len());

        for trip in trips {
            let started_at = parse_trip_timestamp(&trip.started_at)?;
            let ended_at = parse_trip_timestamp(&trip.ended_at)?;

            let (start_station, end_station) = match (
                station_index.get(trip.start_station_id.as_str()),
                station_index.get(trip.end_station_id.as_str()),
            ) {
                (Some(start), Some(end)) => (*start, *end),
                _ => {
                    tracing::debug!(
                        start_station = %trip.start_station_id,
                        end_station = %trip.end_station_id,
                        "dropping trip referencing unknown station"
                    );
                    continue;
                }
            };

            leaving.push(StationEvent::new(
                started_at,
                start_station.region_id.clone(),
                Direction::Leaving,
            ));
            arriving.push(StationEvent::new(
                ended_at,
                end_station.region_id.clone(),
                Direction::Arriving,
            ));
        }

        let mut events: Vec<StationEvent> = leaving
            .into_iter()
            .chain(arriving)
            .filter(|event| event.timestamp() < cutoff)
            .collect();
        events.sort_by_key(StationEvent::timestamp);

        Ok(Self { events })
    }

    /// All events in cursor order.
    pub fn events(&self) -> &[StationEvent] {
        &self.events
    }

    /// Event at a cursor position, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<&StationEvent> {
        self.events.get(index)
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the timeline holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Timestamp of the first event, if any.
    pub fn first_timestamp(&self) -> Option<NaiveDateTime> {
        self.events.first().map(StationEvent::timestamp)
    }
}

fn parse_trip_timestamp(raw: &str) -> Result<NaiveDateTime, TimelineError> {
    parse_timestamp(raw).map_err(|source| TimelineError::Parse {
        value: raw.to_string(),
        source,
    })
}
