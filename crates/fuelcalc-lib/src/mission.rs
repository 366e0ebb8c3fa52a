//! Mission-level reporting that combines the engine and the cost model.

use serde::Serialize;

use crate::cost::CostModel;
use crate::engine::{estimate, FuelEstimate};
use crate::environment::EnvironmentState;
use crate::error::Result;
use crate::vehicle::VehicleProfile;

/// Distance and average speed of a mission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MissionParameters {
    pub distance_km: f64,
    pub avg_speed_kmh: f64,
}

/// Everything shown to the user or persisted after one estimation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MissionReport {
    pub mission: MissionParameters,
    pub fuel_liters: f64,
    /// Achieved efficiency (`distance / fuel`), zero when no fuel was burned.
    pub km_per_liter: f64,
    pub cost_per_km: f64,
    pub total_cost: f64,
    pub fuel_price: f64,
    pub estimate: FuelEstimate,
}

impl MissionReport {
    /// Run the engine for a mission and price the result.
    pub fn run(
        vehicle: &VehicleProfile,
        environment: &EnvironmentState,
        mission: MissionParameters,
        cost: &CostModel,
    ) -> Result<Self> {
        let estimate = estimate(vehicle, environment, mission.distance_km, mission.avg_speed_kmh)?;
        let fuel_liters = estimate.fuel_liters;
        let km_per_liter = if fuel_liters > 0.0 {
            mission.distance_km / fuel_liters
        } else {
            0.0
        };

        Ok(Self {
            mission,
            fuel_liters,
            km_per_liter,
            cost_per_km: cost.calculate(km_per_liter),
            total_cost: cost.calculate_total_cost(fuel_liters),
            fuel_price: cost.price().get(),
            estimate,
        })
    }
}
