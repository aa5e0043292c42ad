//! Historical trip records
//!
//! This module contains the immutable [`Trip`] record and its GPS path
//! representation. Records are deserialized once at the load boundary; all
//! dataset quirks (original Porto column names, JSON-encoded polylines,
//! NaN-laden numeric fields) are normalized here so the rest of the engine
//! only ever sees clean optional values.

use crate::types::{CallType, DriverId, FuelType, PaymentMethod, TripId};
use serde::{Deserialize, Deserializer, Serialize};

/// A single recorded GPS coordinate, serialized as a `[lon, lat]` pair
///
/// The pair ordering follows the original dataset's polyline format
/// (longitude first).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct GpsPoint {
    /// Longitude in decimal degrees
    pub lon: f64,
    /// Latitude in decimal degrees
    pub lat: f64,
}

impl GpsPoint {
    /// Create a point from longitude and latitude
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl From<[f64; 2]> for GpsPoint {
    fn from(pair: [f64; 2]) -> Self {
        Self { lon: pair[0], lat: pair[1] }
    }
}

impl From<GpsPoint> for [f64; 2] {
    fn from(point: GpsPoint) -> Self {
        [point.lon, point.lat]
    }
}

/// An immutable historical trip record
///
/// A trip is "active" at simulated instant `t` iff
/// `start_timestamp <= t < start_timestamp + duration_seconds`. The GPS
/// path was recorded at a fixed cadence starting at `start_timestamp`; its
/// length and the duration are not guaranteed to agree exactly.
///
/// Field aliases accept the original dataset's column names (`TAXI_ID`,
/// `TIMESTAMP`, `POLYLINE`, ...), so both the raw export and the normalized
/// form load with the same code path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    /// Owning driver (not unique across trips)
    #[serde(alias = "TAXI_ID")]
    pub driver_id: DriverId,

    /// Unique trip identifier
    #[serde(alias = "TRIP_ID")]
    pub trip_id: TripId,

    /// Trip start, Unix epoch seconds (UTC, historical)
    #[serde(alias = "TIMESTAMP")]
    pub start_timestamp: i64,

    /// Total recorded duration in seconds
    ///
    /// Absent in the raw export; the loader derives it from the path length
    /// and the sample cadence when missing.
    #[serde(default, alias = "DURATION")]
    pub duration_seconds: Option<u32>,

    /// Ordered GPS samples; an unparsable or null polyline degrades to empty
    #[serde(default, alias = "POLYLINE", deserialize_with = "deserialize_lenient_path")]
    pub path: Vec<GpsPoint>,

    /// How the trip was requested
    #[serde(default, alias = "CALL_TYPE", deserialize_with = "deserialize_call_type")]
    pub call_type: Option<CallType>,

    /// Number of passengers
    #[serde(default, alias = "PASSENGER_COUNT")]
    pub passenger_count: Option<u8>,

    /// Fare amount; non-finite values are dropped at the load boundary
    #[serde(default, alias = "FARE_AMOUNT", deserialize_with = "deserialize_finite_f64")]
    pub fare_amount: Option<f64>,

    /// How the trip was paid for
    #[serde(default, alias = "PAYMENT_METHOD")]
    pub payment_method: Option<PaymentMethod>,

    /// Free-text trip purpose
    #[serde(default, alias = "TRIP_PURPOSE")]
    pub trip_purpose: Option<String>,

    /// Fuel type of the recording vehicle
    #[serde(default, alias = "FUEL_TYPE")]
    pub fuel_type: Option<FuelType>,
}

impl Trip {
    /// Resolved trip duration in seconds (0 when the record carried none)
    pub fn duration(&self) -> u32 {
        self.duration_seconds.unwrap_or(0)
    }

    /// End of the recorded interval (exclusive), Unix epoch seconds
    pub fn end_timestamp(&self) -> i64 {
        self.start_timestamp + i64::from(self.duration())
    }

    /// Whether the recorded interval contains the simulated instant
    ///
    /// The interval is half-open, so a zero-duration trip is never active.
    pub fn is_active_at(&self, sim_ts: i64) -> bool {
        sim_ts >= self.start_timestamp && sim_ts < self.end_timestamp()
    }
}

/// Deserialize a GPS path leniently
///
/// Accepts a JSON array of `[lon, lat]` pairs, a string containing such an
/// array (the raw export stores polylines as JSON text), or `null`.
/// Anything unparsable degrades to an empty path rather than failing the
/// whole record.
fn deserialize_lenient_path<'de, D>(deserializer: D) -> Result<Vec<GpsPoint>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(parse_path_value(&value))
}

fn parse_path_value(value: &serde_json::Value) -> Vec<GpsPoint> {
    match value {
        serde_json::Value::Array(_) => {
            serde_json::from_value(value.clone()).unwrap_or_default()
        }
        serde_json::Value::String(text) => serde_json::from_str(text).unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Deserialize a call type leniently
///
/// Accepts the single-letter dataset code (`"A"`, `"B"`, `"C"`), the
/// snake_case enum name, or `null`. Unknown codes degrade to `None`, the
/// same treatment the loader gives other malformed descriptive fields.
fn deserialize_call_type<'de, D>(deserializer: D) -> Result<Option<CallType>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(text) => Ok(CallType::from_code(&text)
            .or_else(|| serde_json::from_value(serde_json::Value::String(text)).ok())),
        _ => Ok(None),
    }
}

/// Deserialize an optional float, dropping NaN and infinities
///
/// The raw export carries NaN sentinels for missing fares; those must
/// become explicit absence once, here, rather than leaking non-finite
/// values into query output.
fn deserialize_finite_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.filter(|v| v.is_finite()))
}
