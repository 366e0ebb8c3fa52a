//! Physical and model constants shared by the environment, engine and cost model.

/// Specific gas constant for dry air, J/(kg·K).
pub const R_SPECIFIC_DRY_AIR: f64 = 287.058;

/// Offset between Celsius and Kelvin.
pub const CELSIUS_TO_KELVIN: f64 = 273.15;

/// Sea-level standard atmospheric pressure, Pa.
pub const STANDARD_PRESSURE_PA: f64 = 101_325.0;

/// Gravitational acceleration used by the force balance, m/s².
pub const GRAVITY: f64 = 9.81;

/// Exponent of the tire-pressure power law for the rolling-resistance coefficient.
pub const TIRE_PRESSURE_EXPONENT: f64 = -0.477;

/// Baseline auxiliary electrical load, W.
pub const BASE_AUX_POWER_W: f64 = 300.0;

/// Additional load drawn by air conditioning when engaged, W.
pub const AC_POWER_W: f64 = 4000.0;

/// Air conditioning only engages above this ambient temperature, °C.
pub const AC_THRESHOLD_C: f64 = 20.0;

/// Fixed drivetrain transmission efficiency divisor.
pub const DRIVETRAIN_EFFICIENCY: f64 = 0.85;

/// Engine load factor bounds fed into the efficiency curve.
pub const MIN_LOAD_FACTOR: f64 = 0.2;
pub const MAX_LOAD_FACTOR: f64 = 1.0;

/// Engine thermal efficiency bounds.
pub const MIN_THERMAL_EFFICIENCY: f64 = 0.30;
pub const MAX_THERMAL_EFFICIENCY: f64 = 0.45;

/// Lower calorific value of the fuel, J/kg.
pub const FUEL_CALORIFIC_VALUE_J_PER_KG: f64 = 43_000_000.0;

/// Fuel density, kg/L.
pub const FUEL_DENSITY_KG_PER_L: f64 = 0.832;

/// Default tire pressure for manually entered vehicles, bar.
pub const DEFAULT_TIRE_PRESSURE_BAR: f64 = 2.4;

/// Default fuel price per liter (RM) when nothing has been persisted.
pub const DEFAULT_FUEL_PRICE: f64 = 2.0;

/// Fixed markup applied on top of the raw fuel cost per kilometer.
pub const DEFAULT_OVERHEAD_FACTOR: f64 = 1.10;

/// Upper bound for the reported cost per kilometer.
pub const MAX_COST_PER_KM: f64 = 100.0;
