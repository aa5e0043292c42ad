//! Driver reference records
//!
//! Drivers are static passthrough data: an identifier plus descriptive
//! attributes. They carry no behavior; the replay engine only needs them
//! for listing and for scoping trip queries by driver.

use crate::types::{DriverId, FuelType};
use serde::{Deserialize, Serialize};

/// A static driver reference record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    /// Unique driver identifier (`TAXI_ID` in the original export)
    #[serde(alias = "TAXI_ID")]
    pub driver_id: DriverId,

    /// License plate of the assigned vehicle
    #[serde(default, alias = "LICENSE_PLATE")]
    pub license_plate: Option<String>,

    /// Vehicle make and model
    #[serde(default, alias = "VEHICLE_MODEL")]
    pub vehicle_model: Option<String>,

    /// Fuel type of the assigned vehicle
    #[serde(default, alias = "FUEL_TYPE")]
    pub fuel_type: Option<FuelType>,

    /// Average passenger rating
    #[serde(default, alias = "RATING")]
    pub rating: Option<f64>,
}
