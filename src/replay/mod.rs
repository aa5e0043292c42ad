//! Replay orchestration and queries
//!
//! This module contains the simulation clock, activity resolution, playback
//! sampling, the query facade, logging setup and error handling.
//!
//! # Overview
//!
//! The replay module turns the static trip store into a live-looking fleet:
//!
//! - **SimulationClock**: maps wall-clock time onto the repeating replayed window
//! - **Activity resolution**: which recorded trips are active at a simulated instant
//! - **Playback sampling**: visible path prefix, current position and progress
//! - **ReplayService / ReplayEngine**: the query facade over all of the above
//! - **LoggingConfig**: centralized tracing configuration
//! - **ReplayError**: error handling for replay operations
//!
//! # Usage Example
//!
//! ```rust
//! use porto_taxi_replay::replay::{ReplayEngine, SystemTimeSource, TimeSource};
//! use porto_taxi_replay::store::TripStore;
//! use porto_taxi_replay::types::ReplayConfig;
//!
//! let config = ReplayConfig::default();
//! let store = TripStore::new();
//!
//! let engine = ReplayEngine::new(&store, &config);
//! let snapshot = engine.active_trips(SystemTimeSource.now());
//! assert_eq!(snapshot.active_trip_count, snapshot.trips.len());
//! ```

pub mod activity;
pub mod clock;
pub mod error;
pub mod logging;
pub mod playback;
pub mod query;

// Re-export all public types for convenience
pub use activity::*;
pub use clock::*;
pub use error::*;
pub use logging::*;
pub use playback::*;
pub use query::*;
