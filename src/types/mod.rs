//! Core types and identifiers for the trip replay engine
//!
//! This module contains the fundamental types shared by the rest of the
//! crate:
//!
//! - **Identifiers**: integer-backed ids taken from the historical dataset
//! - **Enums**: type-safe descriptive attributes (call type, payment, fuel)
//! - **Configuration**: replay configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use porto_taxi_replay::types::*;
//!
//! let driver_id = DriverId::new(20000589);
//! let trip_id = TripId::new(1372636858620000589);
//!
//! let config = ReplayConfig {
//!     cycle_seconds: 7200,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
