//! Integration tests for dataset loading
//!
//! These tests load datasets written in the original exporter's column
//! naming and verify lenient handling of malformed payloads end to end.

use porto_taxi_replay::store::load_store;
use porto_taxi_replay::{CallType, DriverId, ReplayConfig, TripId};
use std::fs::File;
use std::io::Write;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    let mut file = File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path.display().to_string()
}

fn config_for(dir: &TempDir, trips: &str, drivers: &str) -> ReplayConfig {
    ReplayConfig {
        trips_path: write_file(dir, "trips.jsonl", trips),
        drivers_path: write_file(dir, "drivers.jsonl", drivers),
        ..Default::default()
    }
}

/// Test loading a record written with the original uppercase column names
#[test]
fn test_original_column_names_are_accepted() {
    let dir = TempDir::new().unwrap();
    let trips = r#"{"TAXI_ID": 20000589, "TRIP_ID": 1372636858620000589, "TIMESTAMP": 1372636858, "POLYLINE": [[-8.618643, 41.141412], [-8.618499, 41.141376]], "CALL_TYPE": "C"}"#;
    let config = config_for(&dir, trips, "");

    let store = load_store(&config).unwrap();
    assert_eq!(store.trip_count(), 1);

    let trip = store
        .get_trip_for_driver(DriverId::new(20000589), TripId::new(1372636858620000589))
        .unwrap();
    assert_eq!(trip.start_timestamp, 1372636858);
    assert_eq!(trip.call_type, Some(CallType::StreetHail));
    assert_eq!(trip.path.len(), 2);
    assert_eq!(trip.path[0].lon, -8.618643);
    assert_eq!(trip.path[0].lat, 41.141412);
}

/// Test that malformed payload fields degrade instead of failing the load
#[test]
fn test_malformed_fields_degrade_gracefully() {
    let dir = TempDir::new().unwrap();
    let trips = concat!(
        r#"{"driver_id": 1, "trip_id": 10, "start_timestamp": 0, "duration_seconds": 60, "path": "[[-8.6,"}"#,
        "\n",
        r#"{"driver_id": 1, "trip_id": 11, "start_timestamp": 0, "duration_seconds": 60, "path": [[-8.6, 41.1]], "call_type": "Z"}"#,
        "\n",
        r#"{"driver_id": 1, "trip_id": 12, "start_timestamp": 0, "duration_seconds": 60, "path": [[-8.6, 41.1]], "fare_amount": null}"#,
        "\n",
    );
    let config = config_for(&dir, trips, "");

    let store = load_store(&config).unwrap();
    assert_eq!(store.trip_count(), 3);

    // Truncated polyline string degrades to an empty path
    assert!(store.get_trip(TripId::new(10)).unwrap().path.is_empty());
    // Unknown call-type code degrades to absent
    assert_eq!(store.get_trip(TripId::new(11)).unwrap().call_type, None);
    // Null fare sentinel stays absent
    assert_eq!(store.get_trip(TripId::new(12)).unwrap().fare_amount, None);
}

/// Test that duplicate identifiers keep the first record
#[test]
fn test_duplicates_keep_first_occurrence() {
    let dir = TempDir::new().unwrap();
    let trips = concat!(
        r#"{"driver_id": 1, "trip_id": 10, "start_timestamp": 100, "duration_seconds": 60, "path": []}"#,
        "\n",
        r#"{"driver_id": 2, "trip_id": 10, "start_timestamp": 999, "duration_seconds": 30, "path": []}"#,
        "\n",
    );
    let config = config_for(&dir, trips, "");

    let store = load_store(&config).unwrap();
    assert_eq!(store.trip_count(), 1);
    let trip = store.get_trip(TripId::new(10)).unwrap();
    assert_eq!(trip.start_timestamp, 100);
    assert_eq!(trip.driver_id, DriverId::new(1));
}

/// Test loading driver reference records alongside trips
#[test]
fn test_driver_records_join_the_store() {
    let dir = TempDir::new().unwrap();
    let trips = r#"{"driver_id": 7, "trip_id": 70, "start_timestamp": 0, "duration_seconds": 60, "path": []}"#;
    let drivers = concat!(
        r#"{"driver_id": 7, "license_plate": "13-AB-42", "vehicle_model": "Mercedes Vito", "fuel_type": "diesel", "rating": 4.6}"#,
        "\n",
        r#"{"driver_id": 8}"#,
        "\n",
    );
    let config = config_for(&dir, trips, drivers);

    let store = load_store(&config).unwrap();
    assert_eq!(store.driver_count(), 2);

    let driver = store.get_driver(DriverId::new(7)).unwrap();
    assert_eq!(driver.license_plate.as_deref(), Some("13-AB-42"));
    assert_eq!(driver.rating, Some(4.6));

    // Driver on record with no recorded trips
    assert!(store.get_driver(DriverId::new(8)).is_some());
    assert!(!store.driver_has_trips(DriverId::new(8)));
}

/// Test that a loaded store answers queries end to end
#[test]
fn test_loaded_store_serves_queries() {
    use chrono::{TimeZone, Utc};
    use porto_taxi_replay::ReplayEngine;

    let dir = TempDir::new().unwrap();
    let trips = r#"{"driver_id": 5, "trip_id": 50, "start_timestamp": 3000000, "POLYLINE": [[-8.6, 41.1], [-8.601, 41.101], [-8.602, 41.102]]}"#;
    let mut config = config_for(&dir, trips, "");
    config.reference_epoch = 3_000_000;

    let store = load_store(&config).unwrap();
    let engine = ReplayEngine::new(&store, &config);

    // 20 s into a cycle: duration was derived as 3 * 15 = 45 s, so active
    let now = Utc.with_ymd_and_hms(2024, 7, 10, 9, 0, 20).unwrap();
    let snapshot = engine.active_trips(now);
    assert_eq!(snapshot.active_trip_count, 1);
    assert_eq!(snapshot.trips[0].gps_history.len(), 2);

    // 50 s into a cycle: past the derived duration, nothing active
    let now = Utc.with_ymd_and_hms(2024, 7, 10, 9, 0, 50).unwrap();
    assert_eq!(engine.active_trips(now).active_trip_count, 0);
}
