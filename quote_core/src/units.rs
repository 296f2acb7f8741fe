//! # Unit Types
//!
//! Type-safe wrappers for the metric quantities used in a building takeoff.
//! They stay lightweight (plain f64 newtypes) and serialize as bare numbers.
//!
//! ## Metric Units
//!
//! - Length: meters (m), centimeters (cm)
//! - Area: square meters (m²)
//! - Volume: cubic meters (m³)
//! - Mass: kilograms (kg), linear weight in kilograms per meter (kg/m)
//!
//! Multiplying compatible units yields the derived unit, so the takeoff
//! reads like the formula it implements:
//!
//! ```rust
//! use quote_core::units::{Centimeters, KgPerMeter, Meters};
//!
//! let floor = Meters(20.0) * Meters(30.0);
//! let slab: Meters = Centimeters(15.0).into();
//! assert!(((floor * slab).0 - 90.0).abs() < 1e-9);
//!
//! let steel = Meters(70.0) * KgPerMeter(15.0);
//! assert_eq!(steel.0, 1050.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

impl From<Centimeters> for Meters {
    fn from(cm: Centimeters) -> Self {
        Meters(cm.0 / 100.0)
    }
}

impl From<Meters> for Centimeters {
    fn from(m: Meters) -> Self {
        Centimeters(m.0 * 100.0)
    }
}

// ============================================================================
// Area and Volume Units
// ============================================================================

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

/// Volume in cubic meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMeters(pub f64);

impl Mul for Meters {
    type Output = SquareMeters;
    fn mul(self, rhs: Meters) -> SquareMeters {
        SquareMeters(self.0 * rhs.0)
    }
}

impl Mul<Meters> for SquareMeters {
    type Output = CubicMeters;
    fn mul(self, rhs: Meters) -> CubicMeters {
        CubicMeters(self.0 * rhs.0)
    }
}

impl SquareMeters {
    /// Subtract an opening, never going below zero
    pub fn saturating_sub(self, rhs: SquareMeters) -> SquareMeters {
        SquareMeters((self.0 - rhs.0).max(0.0))
    }
}

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Linear weight of a steel member in kilograms per meter
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KgPerMeter(pub f64);

impl Mul<KgPerMeter> for Meters {
    type Output = Kilograms;
    fn mul(self, rhs: KgPerMeter) -> Kilograms {
        Kilograms(self.0 * rhs.0)
    }
}

// ============================================================================
// Rounding
// ============================================================================

/// Round to two decimals, half away from zero.
///
/// Every monetary amount and quantity leaving the engine goes through here.
///
/// ```rust
/// use quote_core::units::round2;
///
/// assert_eq!(round2(8693.2771), 8693.28);
/// assert_eq!(round2(-1.005_000_1), -1.01);
/// ```
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(Centimeters);
impl_arithmetic!(SquareMeters);
impl_arithmetic!(CubicMeters);
impl_arithmetic!(Kilograms);
impl_arithmetic!(KgPerMeter);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centimeters_to_meters() {
        let m: Meters = Centimeters(18.0).into();
        assert!((m.0 - 0.18).abs() < 1e-12);
        let cm: Centimeters = Meters(0.2).into();
        assert!((cm.0 - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_derived_units() {
        let area = Meters(4.0) * Meters(2.5);
        assert_eq!(area, SquareMeters(10.0));
        assert_eq!(area * Meters(0.5), CubicMeters(5.0));
        assert_eq!(Meters(10.0) * KgPerMeter(5.0), Kilograms(50.0));
    }

    #[test]
    fn test_saturating_sub_clamps_at_zero() {
        assert_eq!(SquareMeters(10.0).saturating_sub(SquareMeters(4.0)), SquareMeters(6.0));
        assert_eq!(SquareMeters(10.0).saturating_sub(SquareMeters(40.0)), SquareMeters(0.0));
    }

    #[test]
    fn test_arithmetic() {
        let a = Kilograms(10.0);
        let b = Kilograms(5.0);
        assert_eq!((a + b).0, 15.0);
        assert_eq!((a - b).0, 5.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).0, 5.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(0.0), 0.0);
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.235_000_1), 1.24);
        assert_eq!(round2(2550.0), 2550.0);
    }

    #[test]
    fn test_serialization() {
        let m = Meters(12.5);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "12.5");

        let roundtrip: Meters = serde_json::from_str(&json).unwrap();
        assert_eq!(m, roundtrip);
    }
}
