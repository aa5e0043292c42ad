//! Unique identifier types for the trip replay engine
//!
//! This module contains the integer-backed identifier types for drivers and
//! trips. Both come straight from the historical dataset (`TAXI_ID` and
//! `TRIP_ID` in the original export), so they are plain integers rather
//! than generated values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a taxi driver
///
/// A driver owns many trips; the id is not unique across the trip table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverId(pub u64);

impl DriverId {
    /// Create a driver id from its raw dataset value
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw dataset value
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for DriverId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Unique identifier for a recorded trip
///
/// Unique within the trip store; lookups are always scoped to
/// `(DriverId, TripId)` because well-formedness of the dataset is not
/// assumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripId(pub u64);

impl TripId {
    /// Create a trip id from its raw dataset value
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw dataset value
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TripId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_is_plain_number() {
        assert_eq!(DriverId::new(20000589).to_string(), "20000589");
        assert_eq!(TripId::new(1372636858620000589).to_string(), "1372636858620000589");
    }

    #[test]
    fn test_id_serialization_is_transparent() {
        let driver_id = DriverId::new(42);
        let json = serde_json::to_string(&driver_id).unwrap();
        assert_eq!(json, "42");

        let trip_id: TripId = serde_json::from_str("1372636858620000589").unwrap();
        assert_eq!(trip_id, TripId::new(1372636858620000589));
    }

    #[test]
    fn test_id_equality_and_ordering() {
        assert_eq!(DriverId::new(1), DriverId::from(1));
        assert_ne!(TripId::new(1), TripId::new(2));
        assert!(TripId::new(1) < TripId::new(2));
    }
}
