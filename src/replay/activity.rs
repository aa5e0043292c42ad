//! Activity resolution
//!
//! Given a simulated instant, determines which recorded trips are active:
//! those whose half-open interval `[start, start + duration)` contains the
//! instant. Lookups never fail for valid-but-absent identifiers; absence is
//! an empty result, and "found but not active" stays observable because the
//! activity check is separate from the lookup.

use crate::store::{Trip, TripStore};
use crate::types::{DriverId, TripId};

/// All trips active at the simulated instant, in store order
///
/// Store order makes repeated scans over the same inputs return results in
/// the same order.
pub fn find_active(store: &TripStore, sim_ts: i64) -> Vec<&Trip> {
    store.trips().iter().filter(|trip| trip.is_active_at(sim_ts)).collect()
}

/// Trips of one driver active at the simulated instant, in store order
///
/// An unknown driver yields an empty result, never an error. Well-formed
/// data has at most one active trip per driver, but that is not assumed
/// here.
pub fn find_active_for_driver(
    store: &TripStore,
    driver_id: DriverId,
    sim_ts: i64,
) -> Vec<&Trip> {
    store
        .trips_for_driver(driver_id)
        .into_iter()
        .filter(|trip| trip.is_active_at(sim_ts))
        .collect()
}

/// Exact `(driver, trip)` lookup, independent of activity
///
/// Callers check activity separately via [`Trip::is_active_at`] so that
/// "present but not active" and "absent" remain distinct outcomes.
pub fn find_trip(store: &TripStore, driver_id: DriverId, trip_id: TripId) -> Option<&Trip> {
    store.get_trip_for_driver(driver_id, trip_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::GpsPoint;

    fn trip(driver: u64, id: u64, start: i64, duration: u32) -> Trip {
        Trip {
            driver_id: DriverId::new(driver),
            trip_id: TripId::new(id),
            start_timestamp: start,
            duration_seconds: Some(duration),
            path: vec![GpsPoint::new(-8.6, 41.1)],
            call_type: None,
            passenger_count: None,
            fare_amount: None,
            payment_method: None,
            trip_purpose: None,
            fuel_type: None,
        }
    }

    fn store() -> TripStore {
        let mut store = TripStore::new();
        store.add_trip(trip(1, 100, 1000, 120));
        store.add_trip(trip(2, 200, 1050, 60));
        store.add_trip(trip(1, 101, 5000, 120));
        store
    }

    #[test]
    fn test_find_active_at_boundaries() {
        let store = store();

        // Trip 100 is active on [1000, 1120)
        assert!(find_active(&store, 999).is_empty());
        assert_eq!(find_active(&store, 1000).len(), 1);
        assert_eq!(find_active(&store, 1119).len(), 2);
        assert_eq!(find_active(&store, 1120).len(), 0);
    }

    #[test]
    fn test_concurrent_trips_from_different_drivers() {
        let store = store();
        let active = find_active(&store, 1060);
        assert_eq!(active.len(), 2);
        // Store order is preserved
        assert_eq!(active[0].trip_id, TripId::new(100));
        assert_eq!(active[1].trip_id, TripId::new(200));
    }

    #[test]
    fn test_find_active_for_driver() {
        let store = store();

        let active = find_active_for_driver(&store, DriverId::new(1), 1060);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].trip_id, TripId::new(100));

        // Known driver, nothing active right now
        assert!(find_active_for_driver(&store, DriverId::new(1), 3000).is_empty());

        // Unknown driver is an empty result, not an error
        assert!(find_active_for_driver(&store, DriverId::new(99), 1060).is_empty());
    }

    #[test]
    fn test_find_trip_is_scoped_to_driver() {
        let store = store();

        assert!(find_trip(&store, DriverId::new(1), TripId::new(100)).is_some());
        // Existing trip id under the wrong driver is not found
        assert!(find_trip(&store, DriverId::new(2), TripId::new(100)).is_none());
        assert!(find_trip(&store, DriverId::new(1), TripId::new(999)).is_none());
    }

    #[test]
    fn test_found_but_inactive_is_distinct_from_absent() {
        let store = store();

        let found = find_trip(&store, DriverId::new(1), TripId::new(101));
        let trip = found.expect("trip exists regardless of activity");
        assert!(!trip.is_active_at(1060));

        assert!(find_trip(&store, DriverId::new(1), TripId::new(404)).is_none());
    }
}
