//! Playback sampling
//!
//! Reconstructs the visible state of an active trip at a simulated instant:
//! the prefix of its recorded GPS path that has "happened" so far, the
//! current position, and the progress percentage. Everything is re-derived
//! from the elapsed time on every call — there is no playback cursor — so
//! concurrent requests at the same second observe identical state.

use crate::store::{GpsPoint, Trip};

/// The reconstructed playback state of one active trip
#[derive(Debug, Clone, PartialEq)]
pub struct Playback<'a> {
    /// Seconds elapsed since the trip started, at the sampled instant
    pub elapsed_seconds: i64,
    /// Number of recorded samples visible so far
    pub points_to_show: usize,
    /// Prefix of the recorded path visible so far
    pub visible_path: &'a [GpsPoint],
    /// Most recent visible sample; absent when the path is empty
    pub current_position: Option<GpsPoint>,
    /// Completion percentage, rounded to 2 decimal places
    pub progress_pct: f64,
}

/// Sample a trip's playback state at a simulated instant
///
/// Precondition: the trip is active at `sim_ts` (the activity resolver
/// guarantees `elapsed >= 0` and `duration > 0`). Path samples are spaced
/// `cadence_seconds` apart starting at the trip start, so
/// `points_to_show = min(elapsed / cadence + 1, path_len)`: at least one
/// sample once the trip has started, never more than were recorded. The
/// duration and the path length are not guaranteed to agree; the shorter
/// bound wins.
pub fn sample_playback<'a>(trip: &'a Trip, sim_ts: i64, cadence_seconds: u32) -> Playback<'a> {
    let elapsed_seconds = sim_ts - trip.start_timestamp;
    debug_assert!(elapsed_seconds >= 0, "playback requires an active trip");

    let cadence = i64::from(cadence_seconds.max(1));
    let points_to_show =
        usize::try_from(elapsed_seconds.max(0) / cadence + 1).unwrap_or(usize::MAX);
    let points_to_show = points_to_show.min(trip.path.len());

    let visible_path = &trip.path[..points_to_show];
    let current_position = visible_path.last().copied();

    // A zero-duration trip can never be active, so this division is only
    // guarded to keep the output finite on misuse.
    let duration = trip.duration();
    let progress_pct = if duration == 0 {
        0.0
    } else {
        round2(elapsed_seconds as f64 / f64::from(duration) * 100.0)
    };

    Playback { elapsed_seconds, points_to_show, visible_path, current_position, progress_pct }
}

/// Round to 2 decimal places
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
