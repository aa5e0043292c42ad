//! Trip store and lookup system
//!
//! This module contains the [`TripStore`]: the immutable, indexed
//! collection of historical trips and driver reference records loaded once
//! at startup. It is the only shared state in the process; every query
//! component holds read-only access to it and never mutates it after
//! construction.

use crate::store::driver::Driver;
use crate::store::trip::Trip;
use crate::types::{DriverId, TripId};
use serde::Serialize;
use std::collections::HashMap;

/// An immutable, indexed collection of trips and drivers
///
/// Trips are kept in load order; scans iterate in that order, which keeps
/// repeated query results stable. Index maps provide O(1) lookup by trip id
/// and by driver.
#[derive(Debug, Clone, Default)]
pub struct TripStore {
    /// All trips, in load order
    trips: Vec<Trip>,
    /// Quick lookup map from trip id to index
    trip_index: HashMap<TripId, usize>,
    /// Quick lookup map from driver id to trip indices, in load order
    driver_index: HashMap<DriverId, Vec<usize>>,
    /// Driver reference records
    drivers: HashMap<DriverId, Driver>,
    /// Driver ids in load order, for stable listing
    driver_order: Vec<DriverId>,
}

impl TripStore {
    /// Create a new empty trip store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a trip to the store
    ///
    /// Duplicate trip ids keep the first record; the duplicate is dropped
    /// and reported to the caller via the `false` return.
    pub fn add_trip(&mut self, trip: Trip) -> bool {
        if self.trip_index.contains_key(&trip.trip_id) {
            return false;
        }

        let idx = self.trips.len();
        self.trip_index.insert(trip.trip_id, idx);
        self.driver_index.entry(trip.driver_id).or_default().push(idx);
        self.trips.push(trip);
        true
    }

    /// Add a driver reference record to the store
    pub fn add_driver(&mut self, driver: Driver) -> bool {
        if self.drivers.contains_key(&driver.driver_id) {
            return false;
        }

        self.driver_order.push(driver.driver_id);
        self.drivers.insert(driver.driver_id, driver);
        true
    }

    /// All trips, in load order
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// Trips owned by one driver, in load order
    ///
    /// Unknown drivers yield an empty slice of indices, never an error.
    pub fn trips_for_driver(&self, driver_id: DriverId) -> Vec<&Trip> {
        self.driver_index
            .get(&driver_id)
            .map(|indices| indices.iter().map(|&idx| &self.trips[idx]).collect())
            .unwrap_or_default()
    }

    /// Look up a trip by id
    pub fn get_trip(&self, trip_id: TripId) -> Option<&Trip> {
        self.trip_index.get(&trip_id).and_then(|&idx| self.trips.get(idx))
    }

    /// Look up a trip scoped to its owning driver
    ///
    /// A trip id that exists under a different driver is "not found" for
    /// this scope.
    pub fn get_trip_for_driver(&self, driver_id: DriverId, trip_id: TripId) -> Option<&Trip> {
        self.get_trip(trip_id).filter(|trip| trip.driver_id == driver_id)
    }

    /// Look up a driver reference record
    pub fn get_driver(&self, driver_id: DriverId) -> Option<&Driver> {
        self.drivers.get(&driver_id)
    }

    /// All driver reference records, in load order
    pub fn drivers(&self) -> Vec<&Driver> {
        self.driver_order.iter().filter_map(|id| self.drivers.get(id)).collect()
    }

    /// Number of trips in the store
    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }

    /// Number of driver reference records in the store
    pub fn driver_count(&self) -> usize {
        self.drivers.len()
    }

    /// Whether the store holds any trips
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Check if a trip exists in the store
    pub fn trip_exists(&self, trip_id: TripId) -> bool {
        self.trip_index.contains_key(&trip_id)
    }

    /// Check if a driver has any trips in the store
    pub fn driver_has_trips(&self, driver_id: DriverId) -> bool {
        self.driver_index.contains_key(&driver_id)
    }

    /// Compute summary statistics over the loaded dataset
    pub fn statistics(&self) -> StoreStatistics {
        let mut earliest_start = None;
        let mut latest_end = None;
        let mut total_path_points = 0;
        let mut trips_without_path = 0;

        for trip in &self.trips {
            earliest_start = Some(match earliest_start {
                Some(current) => trip.start_timestamp.min(current),
                None => trip.start_timestamp,
            });
            latest_end = Some(match latest_end {
                Some(current) => trip.end_timestamp().max(current),
                None => trip.end_timestamp(),
            });
            total_path_points += trip.path.len();
            if trip.path.is_empty() {
                trips_without_path += 1;
            }
        }

        StoreStatistics {
            trip_count: self.trips.len(),
            driver_count: self.drivers.len(),
            distinct_trip_drivers: self.driver_index.len(),
            earliest_start,
            latest_end,
            total_path_points,
            trips_without_path,
        }
    }
}

/// Summary statistics over the loaded dataset
#[derive(Debug, Clone, Serialize)]
pub struct StoreStatistics {
    /// Total number of trips
    pub trip_count: usize,
    /// Number of driver reference records
    pub driver_count: usize,
    /// Number of distinct drivers appearing in the trip table
    pub distinct_trip_drivers: usize,
    /// Earliest trip start timestamp, if any trips are loaded
    pub earliest_start: Option<i64>,
    /// Latest trip end timestamp, if any trips are loaded
    pub latest_end: Option<i64>,
    /// Total number of GPS samples across all trips
    pub total_path_points: usize,
    /// Number of trips with an empty (or degraded) path
    pub trips_without_path: usize,
}

impl StoreStatistics {
    /// Average number of GPS samples per trip
    pub fn average_path_points(&self) -> f64 {
        if self.trip_count == 0 {
            0.0
        } else {
            self.total_path_points as f64 / self.trip_count as f64
        }
    }

    /// Span of the recorded history in seconds, if any trips are loaded
    pub fn recorded_span_seconds(&self) -> Option<i64> {
        match (self.earliest_start, self.latest_end) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}
