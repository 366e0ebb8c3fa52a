//! Common test utilities and fixture helpers.
//!
//! Shared vehicles, environments and scratch databases for integration tests.

use fuelcalc_lib::{
    EnvironmentState, NewCalculation, Store, StoredVehicle, VehicleProfile,
};
use tempfile::TempDir;

/// Reference sedan: 1500 kg, Cd 0.32, 2.2 m², 90 kW, no AC.
#[allow(dead_code)]
pub fn reference_sedan() -> VehicleProfile {
    VehicleProfile::new(1500.0, 0.32, 2.2, 90.0).with_baseline_efficiency(16.0)
}

/// Flat road at 15 °C and standard pressure with the default roughness.
#[allow(dead_code)]
pub fn reference_environment() -> EnvironmentState {
    EnvironmentState::raw(0.0, 0.012, 15.0)
}

#[allow(dead_code)]
pub fn stored_vehicle(id: &str) -> StoredVehicle {
    StoredVehicle {
        id: id.to_string(),
        model_name: format!("Model {id}"),
        profile: reference_sedan(),
    }
}

#[allow(dead_code)]
pub fn calculation(user: &str, vehicle_id: &str, fuel_liters: f64) -> NewCalculation {
    NewCalculation {
        username: user.to_string(),
        vehicle_id: vehicle_id.to_string(),
        mission_name: format!("{user}-{vehicle_id}"),
        vehicle: reference_sedan(),
        environment: reference_environment(),
        distance_km: 100.0,
        avg_speed_kmh: 100.0,
        fuel_consumed_liters: fuel_liters,
        cost_per_km: 0.11,
    }
}

/// A store backed by a file inside a temporary directory.
#[allow(dead_code)]
pub struct TestStore {
    _temp_dir: TempDir,
    pub store: Store,
}

#[allow(dead_code)]
impl TestStore {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let store = Store::open(&temp_dir.path().join("fuelcalc.db")).expect("open store");
        Self {
            _temp_dir: temp_dir,
            store,
        }
    }
}
