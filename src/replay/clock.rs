//! Simulation clock
//!
//! Maps the current real time onto a simulated instant inside the fixed
//! replayed window. The mapping repeats a cycle anchored to odd-numbered
//! UTC clock hours (01:00, 03:00, ... 23:00) and re-anchors the elapsed
//! time to the configured historical reference epoch.
//!
//! The mapping is a pure function of the wall clock: no simulation state is
//! ever stored, so two calls within the same second observe the same
//! simulated instant regardless of how many callers are running.

use crate::types::ReplayConfig;
use chrono::{DateTime, Utc};
use serde::Serialize;

const SECONDS_PER_HOUR: i64 = 3600;

/// A source of the current UTC instant
///
/// Production code uses [`SystemTimeSource`]; tests inject a
/// [`FixedTimeSource`] so cycle-boundary arithmetic can be exercised
/// without waiting on the wall clock.
pub trait TimeSource {
    /// The current UTC instant
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A frozen clock returning one fixed instant
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource(pub DateTime<Utc>);

impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// The simulated instant derived from a real-time instant
///
/// Derived value only; recomputed from the wall clock on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SimulatedInstant {
    /// The wall-clock instant the mapping was computed from (epoch seconds)
    pub wall_time: i64,
    /// Start of the current cycle (epoch seconds, an odd UTC clock hour)
    pub cycle_start: i64,
    /// Seconds elapsed since the cycle started, in `[0, cycle_seconds)`
    pub elapsed_in_cycle: i64,
    /// The historical timestamp being replayed right now (epoch seconds)
    pub simulation_time: i64,
}

/// Pure mapping from real time to the replayed historical window
#[derive(Debug, Clone)]
pub struct SimulationClock {
    cycle_seconds: i64,
    reference_epoch: i64,
}

impl SimulationClock {
    /// Create a clock from the replay configuration
    pub fn new(config: &ReplayConfig) -> Self {
        Self {
            cycle_seconds: i64::from(config.cycle_seconds),
            reference_epoch: config.reference_epoch,
        }
    }

    /// Map a real-time instant to its simulated instant
    ///
    /// The cycle start is the most recent odd-numbered UTC clock hour with
    /// minutes and seconds zeroed. Parity is computed on whole hours since
    /// the Unix epoch (which began on an even hour), so stepping back
    /// across midnight, month or year boundaries needs no calendar
    /// arithmetic at all.
    pub fn simulated_instant(&self, now: DateTime<Utc>) -> SimulatedInstant {
        let wall_time = now.timestamp();

        let hour_start = wall_time - wall_time.rem_euclid(SECONDS_PER_HOUR);
        let hours_since_epoch = hour_start.div_euclid(SECONDS_PER_HOUR);
        let cycle_start = if hours_since_epoch.rem_euclid(2) == 1 {
            hour_start
        } else {
            hour_start - SECONDS_PER_HOUR
        };

        // With a 2-hour cycle the subtraction is already in range; the
        // clamp keeps the invariant for shorter configured cycles.
        let elapsed_in_cycle = (wall_time - cycle_start).clamp(0, self.cycle_seconds - 1);

        SimulatedInstant {
            wall_time,
            cycle_start,
            elapsed_in_cycle,
            simulation_time: self.reference_epoch + elapsed_in_cycle,
        }
    }

    /// Map the current instant of a time source
    pub fn simulated_now<T: TimeSource>(&self, time_source: &T) -> SimulatedInstant {
        self.simulated_instant(time_source.now())
    }

    /// The configured cycle length in seconds
    pub fn cycle_seconds(&self) -> i64 {
        self.cycle_seconds
    }

    /// The configured reference epoch
    pub fn reference_epoch(&self) -> i64 {
        self.reference_epoch
    }
}
