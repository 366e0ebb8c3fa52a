//! Ambient, road and atmospheric conditions for a mission.

use serde::{Deserialize, Serialize};

use crate::constants::{CELSIUS_TO_KELVIN, R_SPECIFIC_DRY_AIR, STANDARD_PRESSURE_PA};
use crate::error::{Error, Result};

/// Environmental conditions consumed by the estimation engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentState {
    /// Slope ratio (0.02 = 2% incline, negative for descent).
    pub road_gradient: f64,
    /// Rolling-resistance scale factor.
    pub surface_roughness: f64,
    pub ambient_temp_c: f64,
    pub pressure_pa: f64,
}

impl Default for EnvironmentState {
    fn default() -> Self {
        Self {
            road_gradient: 0.0,
            surface_roughness: 0.012,
            ambient_temp_c: 15.0,
            pressure_pa: STANDARD_PRESSURE_PA,
        }
    }
}

impl EnvironmentState {
    /// Build a manually entered environment at standard atmospheric pressure.
    pub fn raw(road_gradient: f64, surface_roughness: f64, ambient_temp_c: f64) -> Self {
        Self {
            road_gradient,
            surface_roughness,
            ambient_temp_c,
            pressure_pa: STANDARD_PRESSURE_PA,
        }
    }

    /// Overwrite gradient, roughness and temperature, resetting pressure to
    /// the standard atmosphere.
    pub fn set_raw(&mut self, road_gradient: f64, surface_roughness: f64, ambient_temp_c: f64) {
        *self = Self::raw(road_gradient, surface_roughness, ambient_temp_c);
    }

    /// Dry-air density in kg/m³ from the ideal gas law.
    ///
    /// Not clamped: temperatures approaching absolute zero produce unbounded
    /// densities, so callers should run [`EnvironmentState::validate`] on
    /// user input first.
    pub fn air_density(&self) -> f64 {
        self.pressure_pa / (R_SPECIFIC_DRY_AIR * (self.ambient_temp_c + CELSIUS_TO_KELVIN))
    }

    /// Reject non-finite fields and temperatures at or below absolute zero.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            (self.road_gradient, "road_gradient"),
            (self.surface_roughness, "surface_roughness"),
            (self.ambient_temp_c, "ambient_temp_c"),
            (self.pressure_pa, "pressure_pa"),
        ];
        for (value, field) in fields {
            if !value.is_finite() {
                return Err(Error::invalid(format!("{field} must be finite")));
            }
        }

        if self.ambient_temp_c <= -CELSIUS_TO_KELVIN {
            return Err(Error::invalid(format!(
                "ambient_temp_c must be above absolute zero, got {}",
                self.ambient_temp_c
            )));
        }

        if self.pressure_pa <= 0.0 {
            return Err(Error::invalid(format!(
                "pressure_pa must be positive, got {}",
                self.pressure_pa
            )));
        }

        Ok(())
    }
}
