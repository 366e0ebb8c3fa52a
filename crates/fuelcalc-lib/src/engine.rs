//! Physics-based fuel estimation.
//!
//! The engine balances rolling resistance, aerodynamic drag and grade force
//! against the vehicle speed to obtain the power demanded at the wheels, adds
//! the auxiliary electrical load, and converts the energy required over the
//! mission into a fuel volume through a load-dependent thermal efficiency.
//!
//! ```text
//! v          = speed_kmh / 3.6
//! C_rr       = roughness * tire_bar^-0.477
//! F_total    = C_rr*m*g*cos(θ) + ½ρ·Cd·A·v² + m*g*sin(θ)      θ = atan(gradient)
//! P_required = max(0, F_total*v) / 0.85 + P_aux
//! load       = clamp(P_required / rated_W, 0.2, 1.0)
//! eff        = clamp(0.5968x − 0.1666x² + 2.4968x³ − 1.7128, 0.30, 0.45)
//! liters     = P_required * duration / (43e6 * eff) / 0.832
//! ```
//!
//! Note that the efficiency polynomial is strongly negative near the lower
//! load bound, so the 0.30 floor governs almost every cruising scenario.

use serde::Serialize;
use tracing::debug;

use crate::constants::{
    AC_POWER_W, AC_THRESHOLD_C, BASE_AUX_POWER_W, DRIVETRAIN_EFFICIENCY,
    FUEL_CALORIFIC_VALUE_J_PER_KG, FUEL_DENSITY_KG_PER_L, GRAVITY, MAX_LOAD_FACTOR,
    MAX_THERMAL_EFFICIENCY, MIN_LOAD_FACTOR, MIN_THERMAL_EFFICIENCY, TIRE_PRESSURE_EXPONENT,
};
use crate::environment::EnvironmentState;
use crate::error::{Error, Result};
use crate::vehicle::VehicleProfile;

/// Intermediate and final values of a single estimation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FuelEstimate {
    pub speed_ms: f64,
    pub duration_s: f64,
    pub air_density: f64,
    pub rolling_coefficient: f64,
    pub rolling_force_n: f64,
    pub aero_force_n: f64,
    pub grade_force_n: f64,
    pub wheel_power_w: f64,
    pub aux_power_w: f64,
    pub required_power_w: f64,
    /// Load factor before clamping, for diagnostics.
    pub raw_load_factor: f64,
    pub load_factor: f64,
    pub thermal_efficiency: f64,
    pub energy_j: f64,
    pub fuel_mass_kg: f64,
    pub fuel_liters: f64,
}

/// Estimate the fuel volume in liters consumed over a mission.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] when `avg_speed_kmh` is not a finite
/// positive number, `distance_km` is negative or non-finite, the vehicle or
/// environment fails validation, or the inputs are so extreme that the fuel
/// volume is not finite.
pub fn calculate(
    vehicle: &VehicleProfile,
    environment: &EnvironmentState,
    distance_km: f64,
    avg_speed_kmh: f64,
) -> Result<f64> {
    estimate(vehicle, environment, distance_km, avg_speed_kmh).map(|e| e.fuel_liters)
}

/// Same as [`calculate`] but returns every intermediate quantity.
pub fn estimate(
    vehicle: &VehicleProfile,
    environment: &EnvironmentState,
    distance_km: f64,
    avg_speed_kmh: f64,
) -> Result<FuelEstimate> {
    check_preconditions(vehicle, distance_km, avg_speed_kmh)?;
    vehicle.validate()?;
    environment.validate()?;

    let v = avg_speed_kmh / 3.6;
    let duration_s = (distance_km * 1000.0) / v;
    let rho = environment.air_density();

    let incline = environment.road_gradient.atan();
    let c_rr = environment.surface_roughness * vehicle.tire_pressure_bar.powf(TIRE_PRESSURE_EXPONENT);
    let f_roll = c_rr * vehicle.mass_kg * GRAVITY * incline.cos();
    let f_aero = 0.5 * rho * vehicle.drag_coef * vehicle.frontal_area_m2 * v.powi(2);
    let f_grade = vehicle.mass_kg * GRAVITY * incline.sin();
    let f_total = f_roll + f_aero + f_grade;

    // No credit for descent: negative tractive power floors at zero.
    let p_wheels = (f_total * v).max(0.0);
    let p_aux = auxiliary_power(vehicle, environment);
    let p_required = p_wheels / DRIVETRAIN_EFFICIENCY + p_aux;

    let raw_load = p_required / (vehicle.rated_power_kw * 1000.0);
    let load = clamp_load_factor(raw_load);
    let efficiency = thermal_efficiency(load);

    let energy_j = p_required * duration_s;
    let fuel_mass_kg = energy_j / (FUEL_CALORIFIC_VALUE_J_PER_KG * efficiency);
    let fuel_liters = fuel_mass_kg / FUEL_DENSITY_KG_PER_L;
    if !fuel_liters.is_finite() {
        return Err(Error::invalid(format!(
            "fuel estimate is not finite (duration {duration_s} s, required power {p_required} W)"
        )));
    }

    debug!(
        speed_ms = v,
        rho,
        f_total,
        p_required,
        raw_load,
        load,
        efficiency,
        fuel_liters,
        "estimated mission fuel"
    );

    Ok(FuelEstimate {
        speed_ms: v,
        duration_s,
        air_density: rho,
        rolling_coefficient: c_rr,
        rolling_force_n: f_roll,
        aero_force_n: f_aero,
        grade_force_n: f_grade,
        wheel_power_w: p_wheels,
        aux_power_w: p_aux,
        required_power_w: p_required,
        raw_load_factor: raw_load,
        load_factor: load,
        thermal_efficiency: efficiency,
        energy_j,
        fuel_mass_kg,
        fuel_liters,
    })
}

fn check_preconditions(vehicle: &VehicleProfile, distance_km: f64, avg_speed_kmh: f64) -> Result<()> {
    if !avg_speed_kmh.is_finite() || avg_speed_kmh <= 0.0 {
        return Err(Error::invalid(format!(
            "average speed must be finite and positive, got {avg_speed_kmh}"
        )));
    }
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(Error::invalid(format!(
            "distance must be finite and non-negative, got {distance_km}"
        )));
    }
    if !vehicle.rated_power_kw.is_finite() || vehicle.rated_power_kw <= 0.0 {
        return Err(Error::invalid(format!(
            "rated power must be finite and positive, got {}",
            vehicle.rated_power_kw
        )));
    }
    Ok(())
}

/// Electrical load on the engine: baseline plus AC above the engage threshold.
pub fn auxiliary_power(vehicle: &VehicleProfile, environment: &EnvironmentState) -> f64 {
    if vehicle.has_ac && environment.ambient_temp_c > AC_THRESHOLD_C {
        BASE_AUX_POWER_W + AC_POWER_W
    } else {
        BASE_AUX_POWER_W
    }
}

pub fn clamp_load_factor(raw: f64) -> f64 {
    raw.clamp(MIN_LOAD_FACTOR, MAX_LOAD_FACTOR)
}

/// Thermal efficiency for a load factor already clamped to `[0.2, 1.0]`.
pub fn thermal_efficiency(load: f64) -> f64 {
    let x = load;
    let curve = 0.5968 * x - 0.1666 * x.powi(2) + 2.4968 * x.powi(3) - 2.1128 + 0.4;
    curve.clamp(MIN_THERMAL_EFFICIENCY, MAX_THERMAL_EFFICIENCY)
}
