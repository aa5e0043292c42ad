//! Dataset loading
//!
//! Conventional glue at the store boundary: reads the trips and drivers
//! datasets from disk once at startup and builds the immutable
//! [`TripStore`]. Supports JSONL (one record per line, the exporter's
//! format) and plain JSON array files. Loading is the only process-fatal
//! failure mode in the system; everything downstream works off the
//! in-memory store.

use crate::store::driver::Driver;
use crate::store::registry::TripStore;
use crate::store::trip::Trip;
use crate::types::ReplayConfig;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Errors raised while loading the dataset
#[derive(Debug, Error)]
pub enum StoreError {
    /// Dataset file not found
    #[error("Dataset file not found: {0}")]
    FileNotFound(String),

    /// Dataset file could not be read
    #[error("Failed to read dataset file {path}: {source}")]
    ReadError {
        /// Path of the offending file
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A dataset record could not be parsed
    #[error("Failed to parse record at {path}:{line}: {source}")]
    ParseError {
        /// Path of the offending file
        path: String,
        /// 1-based line number of the offending record
        line: usize,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The trips dataset contained no records
    #[error("Trips dataset {0} contained no records")]
    EmptyDataset(String),
}

impl StoreError {
    fn read_error(path: &Path, source: std::io::Error) -> Self {
        Self::ReadError { path: path.display().to_string(), source }
    }

    fn parse_error(path: &Path, line: usize, source: serde_json::Error) -> Self {
        Self::ParseError { path: path.display().to_string(), line, source }
    }
}

/// Load the trip store described by the configuration
///
/// Reads trips first, then driver reference records; missing trip durations
/// are derived from the path length and the configured sample cadence, the
/// same derivation the original exporter used.
pub fn load_store(config: &ReplayConfig) -> Result<TripStore, StoreError> {
    let mut store = TripStore::new();

    let trips: Vec<Trip> = load_records(Path::new(&config.trips_path))?;
    if trips.is_empty() {
        return Err(StoreError::EmptyDataset(config.trips_path.clone()));
    }

    let mut duplicate_trips = 0;
    for mut trip in trips {
        if trip.duration_seconds.is_none() {
            let derived = trip.path.len() as u32 * config.sample_cadence_seconds;
            trip.duration_seconds = Some(derived);
        }
        if !store.add_trip(trip) {
            duplicate_trips += 1;
        }
    }
    if duplicate_trips > 0 {
        warn!(duplicate_trips, "Dropped trips with duplicate ids, keeping first occurrence");
    }

    let drivers: Vec<Driver> = load_records(Path::new(&config.drivers_path))?;
    let mut duplicate_drivers = 0;
    for driver in drivers {
        if !store.add_driver(driver) {
            duplicate_drivers += 1;
        }
    }
    if duplicate_drivers > 0 {
        warn!(duplicate_drivers, "Dropped duplicate driver records");
    }

    info!(
        trips = store.trip_count(),
        drivers = store.driver_count(),
        "Trip store loaded"
    );
    Ok(store)
}

/// Load a dataset file as a vector of records
///
/// `.json` files are read as a single JSON array; anything else is treated
/// as JSONL with one record per non-empty line.
fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    if !path.exists() {
        return Err(StoreError::FileNotFound(path.display().to_string()));
    }

    let file = File::open(path).map_err(|e| StoreError::read_error(path, e))?;

    if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
        let mut content = String::new();
        BufReader::new(file)
            .read_to_string(&mut content)
            .map_err(|e| StoreError::read_error(path, e))?;
        return serde_json::from_str(&content).map_err(|e| StoreError::parse_error(path, 1, e));
    }

    let mut records = Vec::new();
    for (line_idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| StoreError::read_error(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let record =
            serde_json::from_str(&line).map_err(|e| StoreError::parse_error(path, line_idx + 1, e))?;
        records.push(record);
    }
    Ok(records)
}
