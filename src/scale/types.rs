//! Wire types for the scale server API
//!
//! The server reports every weight as an ounces/grams pair so clients never
//! convert; `Measurement` mirrors that JSON shape exactly.

use serde::{Deserialize, Serialize};

use crate::dashboard::units::DisplayUnit;

/// One reading from `GET /api/measurements`
///
/// All values are weights at the moment of the poll. Fluid weight is the net
/// weight (total minus container tare) and can go negative when the container
/// override exceeds what sits on the scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Net fluid weight in fluid ounces
    pub fluid_weight_oz: f64,
    /// Net fluid weight in grams
    pub fluid_weight_g: f64,
    /// Total weight on the platform in fluid ounces
    pub measured_weight_oz: f64,
    /// Total weight on the platform in grams
    pub measured_weight_g: f64,
    /// Configured container weight in fluid ounces
    pub container_weight_oz: f64,
    /// Configured container weight in grams
    pub container_weight_g: f64,
}

/// Conversion factor used by the scale firmware (fluid ounces per gram)
pub const FL_OZ_PER_GRAM: f64 = 0.03527396;

impl Measurement {
    /// Net fluid weight in the given display unit
    pub fn fluid(&self, unit: DisplayUnit) -> f64 {
        match unit {
            DisplayUnit::Oz => self.fluid_weight_oz,
            DisplayUnit::G => self.fluid_weight_g,
        }
    }

    /// Total platform weight in the given display unit
    pub fn total(&self, unit: DisplayUnit) -> f64 {
        match unit {
            DisplayUnit::Oz => self.measured_weight_oz,
            DisplayUnit::G => self.measured_weight_g,
        }
    }

    /// Container tare weight in the given display unit
    pub fn container(&self, unit: DisplayUnit) -> f64 {
        match unit {
            DisplayUnit::Oz => self.container_weight_oz,
            DisplayUnit::G => self.container_weight_g,
        }
    }
}
