//! Query facade
//!
//! Composes the simulation clock, activity resolver and playback sampler
//! into the three observable operations: the all-active snapshot
//! (optionally scoped to one driver), the reduced-payload latest-position
//! variant for high-frequency polling, and the specific-trip query with its
//! three distinguishable outcomes.
//!
//! All results are plain serializable records. Empty active sets and
//! inactive trips are normal result values; the only error surfaced here is
//! the store-not-loaded precondition.

use crate::replay::activity::{find_active, find_active_for_driver, find_trip};
use crate::replay::clock::{SimulatedInstant, SimulationClock, TimeSource};
use crate::replay::error::{ReplayError, ReplayResult};
use crate::replay::playback::sample_playback;
use crate::store::{GpsPoint, Trip, TripStore};
use crate::types::{CallType, DriverId, FuelType, PaymentMethod, ReplayConfig, TripId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

/// Playback state of one active trip, full variant
#[derive(Debug, Clone, Serialize)]
pub struct ActiveTripStatus {
    /// Owning driver
    pub driver_id: DriverId,
    /// Trip identifier
    pub trip_id: TripId,
    /// Seconds elapsed since the trip started
    pub elapsed_seconds: i64,
    /// Total recorded duration in seconds
    pub total_duration: u32,
    /// Completion percentage, rounded to 2 decimal places
    pub progress_pct: f64,
    /// How the trip was requested (passthrough, null when absent)
    pub call_type: Option<CallType>,
    /// Number of passengers (passthrough, null when absent)
    pub passenger_count: Option<u8>,
    /// Fare amount (passthrough, null when absent)
    pub fare_amount: Option<f64>,
    /// How the trip was paid for (passthrough, null when absent)
    pub payment_method: Option<PaymentMethod>,
    /// Free-text purpose (passthrough, null when absent)
    pub trip_purpose: Option<String>,
    /// Vehicle fuel type (passthrough, null when absent)
    pub fuel_type: Option<FuelType>,
    /// Visible prefix of the recorded GPS path
    pub gps_history: Vec<GpsPoint>,
    /// Most recent visible sample; null when the path is empty
    pub current_position: Option<GpsPoint>,
}

/// Snapshot of all trips active at one simulated instant
#[derive(Debug, Clone, Serialize)]
pub struct ActiveTripsSnapshot {
    /// The historical timestamp being replayed
    pub simulation_time: i64,
    /// Seconds elapsed in the current replay cycle
    pub cycle_elapsed_seconds: i64,
    /// Number of active trips in this snapshot
    pub active_trip_count: usize,
    /// Playback state of every active trip, in store order
    pub trips: Vec<ActiveTripStatus>,
}

/// Playback state of one active trip, reduced variant (no path history)
#[derive(Debug, Clone, Serialize)]
pub struct DriverLatestStatus {
    /// Trip identifier
    pub trip_id: TripId,
    /// Seconds elapsed since the trip started
    pub elapsed_seconds: i64,
    /// Total recorded duration in seconds
    pub total_duration: u32,
    /// Completion percentage, rounded to 2 decimal places
    pub progress_pct: f64,
    /// Most recent visible sample; null when the path is empty
    pub current_position: Option<GpsPoint>,
}

/// Reduced-payload snapshot for one driver
///
/// Omits the full visible-path history so high-frequency pollers only pay
/// for the current position.
#[derive(Debug, Clone, Serialize)]
pub struct DriverLatestSnapshot {
    /// The historical timestamp being replayed
    pub simulation_time: i64,
    /// The queried driver
    pub driver_id: DriverId,
    /// Number of active trips for this driver
    pub active_trip_count: usize,
    /// Reduced playback state of every active trip, in store order
    pub trips: Vec<DriverLatestStatus>,
}

/// Full detail of one trip, returned by the specific-trip query
#[derive(Debug, Clone, Serialize)]
pub struct TripDetail {
    /// Owning driver
    pub driver_id: DriverId,
    /// Trip identifier
    pub trip_id: TripId,
    /// The historical timestamp being replayed
    pub simulation_time: i64,
    /// Recorded trip start, Unix epoch seconds
    pub start_timestamp: i64,
    /// Seconds elapsed since the trip started
    pub elapsed_seconds: i64,
    /// Total recorded duration in seconds
    pub total_duration: u32,
    /// Completion percentage, rounded to 2 decimal places
    pub progress_pct: f64,
    /// How the trip was requested (passthrough, null when absent)
    pub call_type: Option<CallType>,
    /// Number of passengers (passthrough, null when absent)
    pub passenger_count: Option<u8>,
    /// Fare amount (passthrough, null when absent)
    pub fare_amount: Option<f64>,
    /// How the trip was paid for (passthrough, null when absent)
    pub payment_method: Option<PaymentMethod>,
    /// Free-text purpose (passthrough, null when absent)
    pub trip_purpose: Option<String>,
    /// Vehicle fuel type (passthrough, null when absent)
    pub fuel_type: Option<FuelType>,
    /// Visible prefix of the recorded GPS path
    pub gps_history: Vec<GpsPoint>,
    /// Most recent visible sample; null when the path is empty
    pub current_position: Option<GpsPoint>,
}

/// Outcome of the specific-trip query
///
/// "Present but not active" is deliberately distinct from "absent": the
/// `NotActive` variant carries the trip's recorded window so callers can
/// see when it would replay.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TripQueryOutcome {
    /// No such trip exists for this driver
    NotFound {
        /// The queried driver
        driver_id: DriverId,
        /// The queried trip
        trip_id: TripId,
    },
    /// The trip exists but its interval excludes the simulated instant
    NotActive {
        /// The queried driver
        driver_id: DriverId,
        /// The queried trip
        trip_id: TripId,
        /// The historical timestamp being replayed
        simulation_time: i64,
        /// Recorded start of the trip's interval
        starts_at: i64,
        /// Recorded end of the trip's interval (exclusive)
        ends_at: i64,
    },
    /// The trip exists and is active right now
    Active {
        /// Full playback detail
        #[serde(flatten)]
        detail: Box<TripDetail>,
    },
}

/// Health of the replay service
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// `"healthy"` when the store is loaded, `"unhealthy"` otherwise
    pub status: &'static str,
    /// Whether the trip store is loaded
    pub data_loaded: bool,
}

/// The replay query engine over a loaded trip store
///
/// Borrows the store; every operation is a pure read, so the engine is
/// freely shareable across threads.
#[derive(Debug, Clone)]
pub struct ReplayEngine<'a> {
    store: &'a TripStore,
    clock: SimulationClock,
    sample_cadence_seconds: u32,
}

impl<'a> ReplayEngine<'a> {
    /// Create an engine over a loaded store
    pub fn new(store: &'a TripStore, config: &ReplayConfig) -> Self {
        Self {
            store,
            clock: SimulationClock::new(config),
            sample_cadence_seconds: config.sample_cadence_seconds,
        }
    }

    /// The simulated instant corresponding to a wall-clock instant
    pub fn simulated_instant(&self, now: DateTime<Utc>) -> SimulatedInstant {
        self.clock.simulated_instant(now)
    }

    /// Snapshot of all trips active at the given wall-clock instant
    ///
    /// An empty active set is a normal snapshot with zero trips.
    pub fn active_trips(&self, now: DateTime<Utc>) -> ActiveTripsSnapshot {
        let instant = self.clock.simulated_instant(now);
        let active = find_active(self.store, instant.simulation_time);
        debug!(
            simulation_time = instant.simulation_time,
            active = active.len(),
            "Resolved all-active snapshot"
        );
        self.snapshot_from(instant, active)
    }

    /// Snapshot of one driver's active trips at the given wall-clock instant
    pub fn active_trips_for_driver(
        &self,
        driver_id: DriverId,
        now: DateTime<Utc>,
    ) -> ActiveTripsSnapshot {
        let instant = self.clock.simulated_instant(now);
        let active = find_active_for_driver(self.store, driver_id, instant.simulation_time);
        self.snapshot_from(instant, active)
    }

    /// Reduced-payload latest-position snapshot for one driver
    pub fn driver_latest(&self, driver_id: DriverId, now: DateTime<Utc>) -> DriverLatestSnapshot {
        let instant = self.clock.simulated_instant(now);
        let active = find_active_for_driver(self.store, driver_id, instant.simulation_time);

        let trips = active
            .iter()
            .map(|trip| {
                let playback =
                    sample_playback(trip, instant.simulation_time, self.sample_cadence_seconds);
                DriverLatestStatus {
                    trip_id: trip.trip_id,
                    elapsed_seconds: playback.elapsed_seconds,
                    total_duration: trip.duration(),
                    progress_pct: playback.progress_pct,
                    current_position: playback.current_position,
                }
            })
            .collect::<Vec<_>>();

        DriverLatestSnapshot {
            simulation_time: instant.simulation_time,
            driver_id,
            active_trip_count: trips.len(),
            trips,
        }
    }

    /// Look up one trip and report whether it is replaying right now
    pub fn trip_detail(
        &self,
        driver_id: DriverId,
        trip_id: TripId,
        now: DateTime<Utc>,
    ) -> TripQueryOutcome {
        let instant = self.clock.simulated_instant(now);

        let trip = match find_trip(self.store, driver_id, trip_id) {
            Some(trip) => trip,
            None => return TripQueryOutcome::NotFound { driver_id, trip_id },
        };

        if !trip.is_active_at(instant.simulation_time) {
            return TripQueryOutcome::NotActive {
                driver_id,
                trip_id,
                simulation_time: instant.simulation_time,
                starts_at: trip.start_timestamp,
                ends_at: trip.end_timestamp(),
            };
        }

        let playback = sample_playback(trip, instant.simulation_time, self.sample_cadence_seconds);
        TripQueryOutcome::Active {
            detail: Box::new(TripDetail {
                driver_id: trip.driver_id,
                trip_id: trip.trip_id,
                simulation_time: instant.simulation_time,
                start_timestamp: trip.start_timestamp,
                elapsed_seconds: playback.elapsed_seconds,
                total_duration: trip.duration(),
                progress_pct: playback.progress_pct,
                call_type: trip.call_type,
                passenger_count: trip.passenger_count,
                fare_amount: trip.fare_amount,
                payment_method: trip.payment_method,
                trip_purpose: trip.trip_purpose.clone(),
                fuel_type: trip.fuel_type,
                gps_history: playback.visible_path.to_vec(),
                current_position: playback.current_position,
            }),
        }
    }

    fn snapshot_from(&self, instant: SimulatedInstant, active: Vec<&Trip>) -> ActiveTripsSnapshot {
        let trips = active
            .iter()
            .map(|trip| {
                let playback =
                    sample_playback(trip, instant.simulation_time, self.sample_cadence_seconds);
                ActiveTripStatus {
                    driver_id: trip.driver_id,
                    trip_id: trip.trip_id,
                    elapsed_seconds: playback.elapsed_seconds,
                    total_duration: trip.duration(),
                    progress_pct: playback.progress_pct,
                    call_type: trip.call_type,
                    passenger_count: trip.passenger_count,
                    fare_amount: trip.fare_amount,
                    payment_method: trip.payment_method,
                    trip_purpose: trip.trip_purpose.clone(),
                    fuel_type: trip.fuel_type,
                    gps_history: playback.visible_path.to_vec(),
                    current_position: playback.current_position,
                }
            })
            .collect::<Vec<_>>();

        ActiveTripsSnapshot {
            simulation_time: instant.simulation_time,
            cycle_elapsed_seconds: instant.elapsed_in_cycle,
            active_trip_count: trips.len(),
            trips,
        }
    }
}

/// The replay service: optional store plus configuration
///
/// Mirrors the process lifecycle: the service exists from startup, the
/// store appears once loading succeeds. Requesting an engine before that
/// yields [`ReplayError::StoreNotLoaded`], which callers must keep distinct
/// from an empty query result.
#[derive(Debug, Default)]
pub struct ReplayService {
    store: Option<TripStore>,
    config: ReplayConfig,
}

impl ReplayService {
    /// Create a service with no store loaded yet
    pub fn new(config: ReplayConfig) -> Self {
        Self { store: None, config }
    }

    /// Create a service over an already-loaded store
    pub fn with_store(config: ReplayConfig, store: TripStore) -> Self {
        Self { store: Some(store), config }
    }

    /// Attach the loaded store
    pub fn attach_store(&mut self, store: TripStore) {
        self.store = Some(store);
    }

    /// Whether the trip store is loaded
    pub fn is_loaded(&self) -> bool {
        self.store.is_some()
    }

    /// Service health, for liveness checks
    pub fn health(&self) -> HealthStatus {
        let data_loaded = self.is_loaded();
        HealthStatus {
            status: if data_loaded { "healthy" } else { "unhealthy" },
            data_loaded,
        }
    }

    /// The loaded store, if any
    pub fn store(&self) -> Option<&TripStore> {
        self.store.as_ref()
    }

    /// The replay configuration
    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    /// Borrow a query engine over the loaded store
    pub fn engine(&self) -> ReplayResult<ReplayEngine<'_>> {
        let store = self.store.as_ref().ok_or(ReplayError::StoreNotLoaded)?;
        Ok(ReplayEngine::new(store, &self.config))
    }

    /// Convenience: all-active snapshot at the current instant of a source
    pub fn active_trips_now<T: TimeSource>(
        &self,
        time_source: &T,
    ) -> ReplayResult<ActiveTripsSnapshot> {
        Ok(self.engine()?.active_trips(time_source.now()))
    }
}
