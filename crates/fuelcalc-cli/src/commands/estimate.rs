//! Estimate command handler: runs the engine and cost model for one mission.

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use fuelcalc_cli::output::{print_json, render_report, ConditionContext, EstimateOutput};
use fuelcalc_lib::{
    ClimateModifier, EnvironmentState, MissionParameters, MissionReport, NewCalculation,
    StoreTerrainSource, TerrainModifier, VehicleProfile,
};

use super::Session;

/// Vehicle id recorded for manually entered vehicles.
const MANUAL_VEHICLE_ID: &str = "manual";

#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// Registered vehicle id (alternative to the manual vehicle flags).
    #[arg(
        long,
        conflicts_with_all = ["mass", "drag", "area", "power", "tire_pressure", "ac"]
    )]
    pub vehicle: Option<String>,

    /// Vehicle mass in kilograms.
    #[arg(long, required_unless_present = "vehicle")]
    pub mass: Option<f64>,
    /// Aerodynamic drag coefficient.
    #[arg(long, required_unless_present = "vehicle")]
    pub drag: Option<f64>,
    /// Frontal area in square meters.
    #[arg(long, required_unless_present = "vehicle")]
    pub area: Option<f64>,
    /// Rated engine power in kilowatts.
    #[arg(long, required_unless_present = "vehicle")]
    pub power: Option<f64>,
    /// Tire pressure in bar.
    #[arg(long, default_value_t = 2.4)]
    pub tire_pressure: f64,
    /// Vehicle has air conditioning.
    #[arg(long)]
    pub ac: bool,

    /// Stored preset name (alternative to the manual environment flags).
    #[arg(long, conflicts_with_all = ["gradient", "roughness", "temp", "pressure"])]
    pub preset: Option<String>,
    /// Road gradient as a slope ratio (0.02 = 2% incline).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub gradient: f64,
    /// Surface roughness (1.0 smooth, 1.5 gravel, 2.5 mud).
    #[arg(long, default_value_t = 0.012)]
    pub roughness: f64,
    /// Ambient temperature in °C.
    #[arg(long, default_value_t = 15.0, allow_negative_numbers = true)]
    pub temp: f64,
    /// Atmospheric pressure in Pa (standard atmosphere when omitted).
    #[arg(long)]
    pub pressure: Option<f64>,

    /// Mission distance in kilometers.
    #[arg(long)]
    pub distance: f64,
    /// Average speed in km/h.
    #[arg(long)]
    pub speed: f64,
    /// Mission name recorded in history.
    #[arg(long, default_value = "unnamed")]
    pub mission: String,
    /// Save the result to the calculation history.
    #[arg(long)]
    pub save: bool,
}

/// Handle the estimate subcommand.
pub fn handle_estimate(session: &Session, args: &EstimateArgs) -> Result<()> {
    let (vehicle_id, vehicle) = resolve_vehicle(session, args)?;
    vehicle.validate().context("invalid vehicle")?;

    let (environment, conditions) = resolve_environment(session, args)?;
    environment.validate().context("invalid environment")?;

    let cost = session.cost_model()?;
    let mission = MissionParameters {
        distance_km: args.distance,
        avg_speed_kmh: args.speed,
    };
    let report = MissionReport::run(&vehicle, &environment, mission, &cost)
        .context("fuel estimation failed")?;
    debug!(fuel = report.fuel_liters, cost = report.cost_per_km, "mission estimated");

    let saved_id = if args.save {
        let record = NewCalculation::from_report(
            &session.user,
            &vehicle_id,
            &args.mission,
            &vehicle,
            &environment,
            &report,
        );
        Some(
            session
                .store
                .save_calculation(&record)
                .context("failed to save calculation")?,
        )
    } else {
        None
    };

    let output = EstimateOutput {
        vehicle_id: &vehicle_id,
        mission_name: &args.mission,
        environment: &environment,
        conditions: conditions.as_ref(),
        report: &report,
        saved_id,
    };
    if session.json() {
        print_json(&output)
    } else {
        render_report(&output);
        Ok(())
    }
}

fn resolve_vehicle(session: &Session, args: &EstimateArgs) -> Result<(String, VehicleProfile)> {
    if let Some(id) = &args.vehicle {
        let stored = session.store.load_vehicle(id)?;
        return Ok((stored.id, stored.profile));
    }

    // clap enforces presence when --vehicle is absent
    let required = |value: Option<f64>, flag: &str| {
        value.with_context(|| format!("--{flag} is required without --vehicle"))
    };
    let profile = VehicleProfile::new(
        required(args.mass, "mass")?,
        required(args.drag, "drag")?,
        required(args.area, "area")?,
        required(args.power, "power")?,
    )
    .with_tire_pressure(args.tire_pressure)
    .with_ac(args.ac);
    Ok((MANUAL_VEHICLE_ID.to_string(), profile))
}

fn resolve_environment(
    session: &Session,
    args: &EstimateArgs,
) -> Result<(EnvironmentState, Option<ConditionContext>)> {
    if let Some(name) = &args.preset {
        let preset = session.store.load_preset(name)?;
        let terrain = TerrainModifier::with_override(StoreTerrainSource::new(&session.store));
        let climate = ClimateModifier::new();
        let conditions = ConditionContext {
            terrain_modifier: terrain.modifier(&preset.terrain),
            climate_modifier: climate.modifier(&preset.climate),
            terrain: preset.terrain,
            climate: preset.climate,
        };
        return Ok((preset.environment, Some(conditions)));
    }

    let mut environment = EnvironmentState::default();
    environment.set_raw(args.gradient, args.roughness, args.temp);
    if let Some(pressure) = args.pressure {
        environment.pressure_pa = pressure;
    }
    Ok((environment, None))
}
