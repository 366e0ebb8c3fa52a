//! Vehicle physical attributes and their persisted form.
//!
//! [`VehicleProfile`] is the plain value record read by the estimation engine;
//! [`StoredVehicle`] wraps it with the identifier and model name used by the
//! store.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_TIRE_PRESSURE_BAR;
use crate::error::{Error, Result};

/// Physical and mechanical attributes of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleProfile {
    pub mass_kg: f64,
    pub drag_coef: f64,
    pub frontal_area_m2: f64,
    pub tire_pressure_bar: f64,
    pub rated_power_kw: f64,
    pub has_ac: bool,
    /// Nominal km/L figure kept for reporting; the engine does not read it.
    pub baseline_efficiency_km_per_l: f64,
}

impl VehicleProfile {
    /// Create a profile with the default tire pressure, no AC and no
    /// baseline efficiency figure.
    pub fn new(mass_kg: f64, drag_coef: f64, frontal_area_m2: f64, rated_power_kw: f64) -> Self {
        Self {
            mass_kg,
            drag_coef,
            frontal_area_m2,
            tire_pressure_bar: DEFAULT_TIRE_PRESSURE_BAR,
            rated_power_kw,
            has_ac: false,
            baseline_efficiency_km_per_l: 0.0,
        }
    }

    pub fn with_tire_pressure(mut self, bar: f64) -> Self {
        self.tire_pressure_bar = bar;
        self
    }

    pub fn with_ac(mut self, has_ac: bool) -> Self {
        self.has_ac = has_ac;
        self
    }

    pub fn with_baseline_efficiency(mut self, km_per_l: f64) -> Self {
        self.baseline_efficiency_km_per_l = km_per_l;
        self
    }

    /// Validate vehicle attributes for correctness.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            (self.mass_kg, "mass_kg"),
            (self.tire_pressure_bar, "tire_pressure_bar"),
            (self.rated_power_kw, "rated_power_kw"),
        ];
        for (value, field) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::invalid(format!(
                    "{field} must be a finite positive number"
                )));
            }
        }

        let non_negative = [
            (self.drag_coef, "drag_coef"),
            (self.frontal_area_m2, "frontal_area_m2"),
            (
                self.baseline_efficiency_km_per_l,
                "baseline_efficiency_km_per_l",
            ),
        ];
        for (value, field) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::invalid(format!(
                    "{field} must be a finite non-negative number"
                )));
            }
        }

        Ok(())
    }
}

/// A vehicle registered in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredVehicle {
    pub id: String,
    pub model_name: String,
    #[serde(flatten)]
    pub profile: VehicleProfile,
}

impl StoredVehicle {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::invalid("vehicle id must not be empty"));
        }
        self.profile.validate()
    }
}
