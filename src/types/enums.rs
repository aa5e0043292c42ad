//! Descriptive enumerations for trip records
//!
//! These are passthrough attributes of the historical dataset: the engine
//! never branches on them, it only carries them through to query output.
//! They are typed (rather than raw strings) so malformed dataset values are
//! rejected once at the load boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a trip was requested
///
/// Maps to the single-letter `CALL_TYPE` column of the original dataset:
/// `A` = dispatched from the central, `B` = demanded at a taxi stand,
/// `C` = hailed on the street.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallType {
    /// Trip dispatched by the central operator (`A`)
    CentralDispatch,
    /// Trip demanded directly at a taxi stand (`B`)
    StandHail,
    /// Trip hailed on the street (`C`)
    StreetHail,
}

impl CallType {
    /// Parse the single-letter dataset code, if recognized
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "A" | "a" => Some(Self::CentralDispatch),
            "B" | "b" => Some(Self::StandHail),
            "C" | "c" => Some(Self::StreetHail),
            _ => None,
        }
    }
}

impl fmt::Display for CallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::CentralDispatch => "central_dispatch",
            Self::StandHail => "stand_hail",
            Self::StreetHail => "street_hail",
        };
        write!(f, "{}", label)
    }
}

/// How a trip was paid for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash payment
    Cash,
    /// Card payment
    Card,
    /// Company voucher
    Voucher,
    /// Mobile app payment
    MobileApp,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::Voucher => "voucher",
            Self::MobileApp => "mobile_app",
        };
        write!(f, "{}", label)
    }
}

/// Fuel type of the vehicle that recorded the trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    /// Gasoline engine
    Gasoline,
    /// Diesel engine
    Diesel,
    /// LPG conversion
    Lpg,
    /// Hybrid drivetrain
    Hybrid,
    /// Battery electric
    Electric,
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Gasoline => "gasoline",
            Self::Diesel => "diesel",
            Self::Lpg => "lpg",
            Self::Hybrid => "hybrid",
            Self::Electric => "electric",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_type_from_dataset_code() {
        assert_eq!(CallType::from_code("A"), Some(CallType::CentralDispatch));
        assert_eq!(CallType::from_code("b"), Some(CallType::StandHail));
        assert_eq!(CallType::from_code("C"), Some(CallType::StreetHail));
        assert_eq!(CallType::from_code("X"), None);
        assert_eq!(CallType::from_code(""), None);
    }

    #[test]
    fn test_enum_display_labels() {
        let call_types = [CallType::CentralDispatch, CallType::StandHail, CallType::StreetHail];
        for call_type in &call_types {
            assert!(!call_type.to_string().is_empty());
        }

        let payments = [
            PaymentMethod::Cash,
            PaymentMethod::Card,
            PaymentMethod::Voucher,
            PaymentMethod::MobileApp,
        ];
        for payment in &payments {
            assert!(!payment.to_string().is_empty());
        }

        let fuels = [
            FuelType::Gasoline,
            FuelType::Diesel,
            FuelType::Lpg,
            FuelType::Hybrid,
            FuelType::Electric,
        ];
        for fuel in &fuels {
            assert!(!fuel.to_string().is_empty());
        }
    }

    #[test]
    fn test_enum_serialization_roundtrip() {
        let call_type = CallType::StreetHail;
        let json = serde_json::to_string(&call_type).unwrap();
        assert_eq!(json, "\"street_hail\"");
        let deserialized: CallType = serde_json::from_str(&json).unwrap();
        assert_eq!(call_type, deserialized);

        let fuel: FuelType = serde_json::from_str("\"diesel\"").unwrap();
        assert_eq!(fuel, FuelType::Diesel);
    }
}
