//! Historical dataset storage
//!
//! This module contains the immutable trip store and its load-time glue:
//!
//! - **Trip / GpsPoint**: the historical trip record and its GPS path
//! - **Driver**: static driver reference records
//! - **TripStore**: indexed, read-only collection shared by all queries
//! - **Loader**: JSONL/JSON dataset loading with lenient payload handling
//!
//! The store is built once at startup and never mutated afterwards; the
//! replay components in [`crate::replay`] hold only borrowed access to it.

pub mod driver;
pub mod loader;
pub mod registry;
pub mod trip;

// Re-export all public types for convenience
pub use driver::*;
pub use loader::*;
pub use registry::*;
pub use trip::*;
