//! Porto Taxi Replay
//!
//! A fleet telemetry replay engine that presents the historical Porto taxi
//! dataset as a fleet that appears to be driving around right now.
//!
//! # Overview
//!
//! The dataset covers a fixed two-hour historical window. This library maps
//! the current wall-clock time onto that window on a repeating cycle, so
//! the same recorded trips replay forever without any background process:
//! every query derives its answer from the wall clock and the immutable
//! trip store at the moment it is asked.
//!
//! ## Key Features
//!
//! - **Simulation Clock**: pure mapping from wall time onto the repeating
//!   two-hour replayed window, anchored at odd UTC clock hours
//! - **Activity Resolution**: which recorded trips overlap the simulated instant
//! - **Playback Sampling**: progressive reveal of each trip's GPS path at the
//!   recorded 15-second cadence, with progress percentage
//! - **Query Facade**: all-active snapshots, per-driver views, a reduced
//!   latest-position payload, and specific-trip lookup with distinct
//!   not-found / not-active outcomes
//! - **Lenient Loading**: malformed paths and unknown enum codes degrade to
//!   empty/absent values instead of failing the load
//!
//! ## Quick Start
//!
//! ```rust
//! use porto_taxi_replay::{ReplayConfig, ReplayEngine, SystemTimeSource, TimeSource};
//! use porto_taxi_replay::store::TripStore;
//!
//! let config = ReplayConfig::default();
//! let store = TripStore::new();
//!
//! let engine = ReplayEngine::new(&store, &config);
//! let snapshot = engine.active_trips(SystemTimeSource.now());
//! println!("{} trips active right now", snapshot.active_trip_count);
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Core types, identifiers, and configuration
//! - [`store`]: The immutable trip store and dataset loading
//! - [`replay`]: Clock, activity, playback, and the query facade
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod replay;
pub mod store;
pub mod types;

// Re-export all public types for backward compatibility

// Core types and identifiers
pub use types::{
    CallType,
    CliArgs,
    ConfigValidationError,
    // Identifiers
    DriverId,
    FuelType,
    PaymentMethod,
    // Configuration
    ReplayConfig,
    TripId,
};

// Store types and functionality
pub use store::{Driver, GpsPoint, StoreError, StoreStatistics, Trip, TripStore};

// Replay types and functionality
pub use replay::{
    ActiveTripsSnapshot, DriverLatestSnapshot, FixedTimeSource, LoggingConfig, ReplayEngine,
    ReplayError, ReplayService, SimulatedInstant, SimulationClock, SystemTimeSource, TimeSource,
    TripQueryOutcome,
};
