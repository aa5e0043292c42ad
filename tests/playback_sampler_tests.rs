//! Integration tests for playback sampling
//!
//! These tests verify the progressive path reveal, the progress
//! calculation, and the interaction between recorded duration and
//! recorded path length.

use porto_taxi_replay::replay::sample_playback;
use porto_taxi_replay::{DriverId, GpsPoint, Trip, TripId};

/// Build a trip with evenly spread coordinates
fn trip(start: i64, duration: u32, points: usize) -> Trip {
    Trip {
        driver_id: DriverId::new(20000589),
        trip_id: TripId::new(1372636858620000589),
        start_timestamp: start,
        duration_seconds: Some(duration),
        path: (0..points)
            .map(|i| GpsPoint::new(-8.618643 + i as f64 * 0.0005, 41.141412 + i as f64 * 0.0003))
            .collect(),
        call_type: None,
        passenger_count: None,
        fare_amount: None,
        payment_method: None,
        trip_purpose: None,
        fuel_type: None,
    }
}

/// Test the full reveal sequence of a short trip at 15-second cadence
#[test]
fn test_reveal_sequence_at_recorded_cadence() {
    let trip = trip(1000, 135, 9);

    // (elapsed, expected visible points)
    let expectations = [
        (0, 1),
        (1, 1),
        (14, 1),
        (15, 2),
        (29, 2),
        (30, 3),
        (44, 3),
        (119, 8),
        (120, 9),
        (134, 9),
    ];

    for (elapsed, expected) in expectations {
        let playback = sample_playback(&trip, 1000 + elapsed, 15);
        assert_eq!(
            playback.points_to_show, expected,
            "elapsed {} should reveal {} points",
            elapsed, expected
        );
        assert_eq!(playback.visible_path, &trip.path[..expected]);
        assert_eq!(playback.current_position.as_ref(), trip.path[..expected].last());
    }
}

/// Test that the reveal never exceeds the recorded path length
#[test]
fn test_reveal_capped_when_duration_outlasts_path() {
    // 300 seconds of duration but only 5 recorded points
    let trip = trip(1000, 300, 5);

    let playback = sample_playback(&trip, 1000 + 299, 15);
    assert_eq!(playback.points_to_show, 5);
    assert_eq!(playback.current_position, Some(trip.path[4]));
    // Progress keeps advancing even though the path is exhausted
    assert_eq!(playback.progress_pct, 99.67);
}

/// Test progress percentages at known fractions
#[test]
fn test_progress_percentages() {
    let trip = trip(1000, 200, 20);

    assert_eq!(sample_playback(&trip, 1000, 15).progress_pct, 0.0);
    assert_eq!(sample_playback(&trip, 1050, 15).progress_pct, 25.0);
    assert_eq!(sample_playback(&trip, 1100, 15).progress_pct, 50.0);
    assert_eq!(sample_playback(&trip, 1199, 15).progress_pct, 99.5);
}

/// Test rounding to exactly two decimal places
#[test]
fn test_progress_rounding() {
    let trip = trip(0, 7, 2);
    // 1/7 * 100 = 14.2857... rounds to 14.29
    assert_eq!(sample_playback(&trip, 1, 15).progress_pct, 14.29);
    // 2/7 * 100 = 28.5714... rounds to 28.57
    assert_eq!(sample_playback(&trip, 2, 15).progress_pct, 28.57);
}

/// Test a trip whose path failed to parse and degraded to empty
#[test]
fn test_empty_path_has_no_position_but_valid_progress() {
    let trip = trip(1000, 120, 0);
    let playback = sample_playback(&trip, 1030, 15);

    assert_eq!(playback.points_to_show, 0);
    assert!(playback.visible_path.is_empty());
    assert_eq!(playback.current_position, None);
    assert_eq!(playback.progress_pct, 25.0);
}

/// Test a custom sampling cadence
#[test]
fn test_custom_cadence() {
    let trip = trip(1000, 100, 20);

    // 5-second cadence: elapsed 12 reveals floor(12/5) + 1 = 3 points
    let playback = sample_playback(&trip, 1012, 5);
    assert_eq!(playback.points_to_show, 3);

    // 60-second cadence: elapsed 59 still shows only the first point
    let playback = sample_playback(&trip, 1059, 60);
    assert_eq!(playback.points_to_show, 1);
}

/// Test that repeated sampling at the same instant is identical
#[test]
fn test_sampling_is_deterministic() {
    let trip = trip(1000, 135, 9);

    let samples: Vec<_> = (0..10).map(|_| sample_playback(&trip, 1073, 15)).collect();
    for sample in &samples[1..] {
        assert_eq!(*sample, samples[0]);
    }
}
