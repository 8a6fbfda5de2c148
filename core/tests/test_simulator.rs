//! Integration tests for the window-driven replay engine
//!
//! Includes the two-trip reference scenario derived event by event from the
//! engine's window rules, plus cursor and time-book guarantees.

use chrono::{Duration, NaiveDate};
use dock_occupancy_core_rs::{
    Direction, EventTimeline, OccupancySimulator, RegionCapacityTable, SeedMode, SimulationError,
    StationRecord, TripRecord,
};

fn station(id: &str, region: &str, docks: i64) -> StationRecord {
    StationRecord {
        station_id: id.to_string(),
        region_id: region.to_string(),
        docks_in_service: docks,
    }
}

fn trip(start: &str, end: &str, started_at: &str, ended_at: &str) -> TripRecord {
    TripRecord {
        start_station_id: start.to_string(),
        end_station_id: end.to_string(),
        started_at: started_at.to_string(),
        ended_at: ended_at.to_string(),
    }
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 1, 1).unwrap()
}

/// Two crossing trips, 10-minute windows, zero-seeded counters.
///
/// Events: 08:00 N1 Leaving, 08:05 N2 Leaving, 08:15 N2 Arriving,
/// 08:20 N1 Arriving.
///
/// Window 1 starts at the cursor event (08:00) and ends 08:10: both
/// departures apply, so N1 = +1 and N2 = +1. Window 2 starts at the next
/// unapplied event (08:15) and ends 08:25: both arrivals apply, returning
/// both regions to 0.
#[test]
fn test_two_trip_reference_scenario() {
    let stations = vec![station("S1", "N1", 10), station("S2", "N2", 10)];
    let trips = vec![
        trip("S1", "S2", "2022-01-01 08:00:00", "2022-01-01 08:15:00"),
        trip("S2", "S1", "2022-01-01 08:05:00", "2022-01-01 08:20:00"),
    ];

    let timeline = EventTimeline::from_trips(&trips, &stations, date()).unwrap();
    let capacity = RegionCapacityTable::from_stations(&stations).unwrap();
    let mut sim = OccupancySimulator::new(timeline, capacity, SeedMode::DeltaFromZero).unwrap();

    let first = sim.advance_window(Duration::minutes(10)).unwrap();
    assert_eq!(first.window_end.to_string(), "2022-01-01 08:10:00");
    assert_eq!(first.events_applied, 2);

    let after_first = sim.ledger().latest();
    assert_eq!(after_first.get("N1"), Some(&1));
    assert_eq!(after_first.get("N2"), Some(&1));

    let second = sim.advance_window(Duration::minutes(10)).unwrap();
    assert_eq!(second.window_start.to_string(), "2022-01-01 08:15:00");
    assert_eq!(second.window_end.to_string(), "2022-01-01 08:25:00");
    assert_eq!(second.events_applied, 2);

    let after_second = sim.ledger().latest();
    assert_eq!(after_second.get("N1"), Some(&0));
    assert_eq!(after_second.get("N2"), Some(&0));

    assert_eq!(
        sim.advance_window(Duration::minutes(10)),
        Err(SimulationError::EndOfStream)
    );

    let times: Vec<String> = sim
        .ledger()
        .time_book()
        .iter()
        .map(|t| t.to_string())
        .collect();
    assert_eq!(
        times,
        vec![
            "2022-01-01 08:00:00",
            "2022-01-01 08:10:00",
            "2022-01-01 08:25:00",
        ]
    );
}

/// Twelve departures at 5-minute spacing: a stream dense enough that every
/// window contains the next event, so consecutive time-book entries are
/// spaced by exactly the window length.
#[test]
fn test_time_book_spacing_on_dense_stream() {
    let stations = vec![station("S1", "N1", 10), station("S2", "N2", 10)];
    let trips: Vec<TripRecord> = (0..12)
        .map(|i| {
            trip(
                "S1",
                "S2",
                &format!("2022-01-01 08:{:02}:00", 5 * i),
                // Ends past midnight; the arrival endpoint is truncated away.
                "2022-01-02 01:00:00",
            )
        })
        .collect();

    let timeline = EventTimeline::from_trips(&trips, &stations, date()).unwrap();
    assert_eq!(timeline.len(), 12);

    let capacity = RegionCapacityTable::from_stations(&stations).unwrap();
    let mut sim = OccupancySimulator::new(timeline, capacity, SeedMode::DeltaFromZero).unwrap();

    let windows = sim.run_to_completion(Duration::minutes(10)).unwrap();
    assert_eq!(windows, 6);

    let time_book = sim.ledger().time_book();
    for pair in time_book.windows(2) {
        assert_eq!(pair[1] - pair[0], Duration::minutes(10));
    }
    assert!(time_book.windows(2).all(|pair| pair[0] < pair[1]));
}

/// The cursor never decreases and every event is applied exactly once no
/// matter how window lengths vary between calls.
#[test]
fn test_cursor_monotonic_and_events_applied_once() {
    let stations = vec![station("S1", "N1", 10), station("S2", "N2", 10)];
    let trips: Vec<TripRecord> = (0..10)
        .map(|i| {
            trip(
                "S1",
                "S2",
                &format!("2022-01-01 {:02}:00:00", 6 + i),
                &format!("2022-01-01 {:02}:30:00", 6 + i),
            )
        })
        .collect();

    let timeline = EventTimeline::from_trips(&trips, &stations, date()).unwrap();
    let total_events = timeline.len();
    let capacity = RegionCapacityTable::from_stations(&stations).unwrap();
    let mut sim = OccupancySimulator::new(timeline, capacity, SeedMode::DeltaFromZero).unwrap();

    let mut last_cursor = sim.cursor();
    let mut applied = 0;
    for window_minutes in [7, 45, 3, 200, 13].iter().cycle() {
        match sim.advance_window(Duration::minutes(*window_minutes)) {
            Ok(result) => {
                assert!(sim.cursor() >= last_cursor);
                last_cursor = sim.cursor();
                applied += result.events_applied;
            }
            Err(SimulationError::EndOfStream) => break,
            Err(err) => panic!("unexpected error: {err}"),
        }
    }

    assert_eq!(applied, total_events);
    assert_eq!(sim.cursor(), total_events);
}

/// Seed + net flow per region equals the final recorded row.
#[test]
fn test_event_conservation() {
    let stations = vec![
        station("S1", "N1", 10),
        station("S2", "N2", 10),
        station("S3", "N1", 5),
    ];
    let trips = vec![
        trip("S1", "S2", "2022-01-01 07:00:00", "2022-01-01 07:20:00"),
        trip("S3", "S2", "2022-01-01 07:05:00", "2022-01-01 07:45:00"),
        trip("S2", "S1", "2022-01-01 08:00:00", "2022-01-01 08:30:00"),
        trip("S2", "S3", "2022-01-01 09:00:00", "2022-01-02 00:10:00"),
    ];

    let timeline = EventTimeline::from_trips(&trips, &stations, date()).unwrap();
    let capacity = RegionCapacityTable::from_stations(&stations).unwrap();

    let mut net_flow: std::collections::BTreeMap<String, i64> = std::collections::BTreeMap::new();
    for event in timeline.events() {
        *net_flow.entry(event.region_id().to_string()).or_insert(0) +=
            event.direction().delta();
    }

    let mut sim =
        OccupancySimulator::new(timeline, capacity, SeedMode::AbsoluteCount).unwrap();
    sim.run_to_completion(Duration::minutes(15)).unwrap();

    let seed = &sim.ledger().rows()[0];
    let last = sim.ledger().latest();
    for (region, seed_value) in seed {
        let flow = net_flow.get(region).copied().unwrap_or(0);
        assert_eq!(last.get(region), Some(&(seed_value + flow)), "region {region}");
    }
}

/// Regions with no events in a window keep their prior value; regions
/// outside the event stream keep their seed value all day.
#[test]
fn test_untouched_regions_retain_value() {
    let stations = vec![
        station("S1", "N1", 10),
        station("S2", "N2", 10),
        station("S3", "N3", 8),
    ];
    // N3 never appears in any trip.
    let trips = vec![trip(
        "S1",
        "S2",
        "2022-01-01 08:00:00",
        "2022-01-01 08:40:00",
    )];

    let timeline = EventTimeline::from_trips(&trips, &stations, date()).unwrap();
    let capacity = RegionCapacityTable::from_stations(&stations).unwrap();
    let mut sim = OccupancySimulator::new(timeline, capacity, SeedMode::AbsoluteCount).unwrap();
    sim.run_to_completion(Duration::minutes(10)).unwrap();

    for row in sim.ledger().rows() {
        assert_eq!(row.get("N3"), Some(&8));
    }

    // N1 saw only the departure: 10 -> 11.
    assert_eq!(sim.ledger().latest().get("N1"), Some(&11));
}

/// Leaving frees a dock, Arriving occupies one.
#[test]
fn test_sign_convention() {
    let stations = vec![station("S1", "N1", 10), station("S2", "N2", 10)];
    let trips = vec![trip(
        "S1",
        "S2",
        "2022-01-01 08:00:00",
        "2022-01-01 08:05:00",
    )];

    let timeline = EventTimeline::from_trips(&trips, &stations, date()).unwrap();
    assert_eq!(timeline.events()[0].direction(), Direction::Leaving);

    let capacity = RegionCapacityTable::from_stations(&stations).unwrap();
    let mut sim = OccupancySimulator::new(timeline, capacity, SeedMode::AbsoluteCount).unwrap();
    sim.advance_window(Duration::minutes(10)).unwrap();

    let row = sim.ledger().latest();
    assert_eq!(row.get("N1"), Some(&11), "departure frees a dock");
    assert_eq!(row.get("N2"), Some(&9), "arrival occupies a dock");
}
