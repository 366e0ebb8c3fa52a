//! Vehicle command handlers.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use fuelcalc_cli::output::{print_json, render_vehicle, render_vehicles};
use fuelcalc_lib::{StoredVehicle, VehicleProfile};

use super::Session;

#[derive(Subcommand, Debug)]
pub enum VehicleCommand {
    /// Register a new vehicle.
    Add(VehicleAddArgs),
    /// Change attributes of a registered vehicle; omitted flags keep their value.
    Update(VehicleUpdateArgs),
    /// Remove a registered vehicle.
    Delete {
        /// Vehicle id.
        id: String,
    },
    /// List registered vehicles.
    List,
    /// Show one vehicle.
    Show {
        /// Vehicle id.
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct VehicleAddArgs {
    /// Vehicle id.
    pub id: String,
    /// Model name.
    #[arg(long)]
    pub model: String,
    /// Mass in kilograms.
    #[arg(long)]
    pub mass: f64,
    /// Drag coefficient.
    #[arg(long)]
    pub drag: f64,
    /// Frontal area in square meters.
    #[arg(long)]
    pub area: f64,
    /// Rated engine power in kilowatts.
    #[arg(long)]
    pub power: f64,
    /// Tire pressure in bar.
    #[arg(long, default_value_t = 2.4)]
    pub tire_pressure: f64,
    /// Vehicle has air conditioning.
    #[arg(long)]
    pub ac: bool,
    /// Nominal efficiency in km/L.
    #[arg(long, default_value_t = 0.0)]
    pub efficiency: f64,
}

#[derive(Args, Debug)]
pub struct VehicleUpdateArgs {
    /// Vehicle id.
    pub id: String,
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long)]
    pub mass: Option<f64>,
    #[arg(long)]
    pub drag: Option<f64>,
    #[arg(long)]
    pub area: Option<f64>,
    #[arg(long)]
    pub power: Option<f64>,
    #[arg(long)]
    pub tire_pressure: Option<f64>,
    /// Set air conditioning on or off.
    #[arg(long)]
    pub ac: Option<bool>,
    #[arg(long)]
    pub efficiency: Option<f64>,
}

/// Handle the vehicle subcommands.
pub fn handle_vehicle(session: &Session, command: VehicleCommand) -> Result<()> {
    match command {
        VehicleCommand::Add(args) => {
            let vehicle = StoredVehicle {
                id: args.id,
                model_name: args.model,
                profile: VehicleProfile::new(args.mass, args.drag, args.area, args.power)
                    .with_tire_pressure(args.tire_pressure)
                    .with_ac(args.ac)
                    .with_baseline_efficiency(args.efficiency),
            };
            session
                .store
                .add_vehicle(&vehicle)
                .with_context(|| format!("failed to add vehicle {}", vehicle.id))?;
            println!("Vehicle [{}] added successfully.", vehicle.id);
            Ok(())
        }
        VehicleCommand::Update(args) => {
            let mut vehicle = session.store.load_vehicle(&args.id)?;
            apply_update(&mut vehicle, args);
            session
                .store
                .update_vehicle(&vehicle)
                .with_context(|| format!("failed to update vehicle {}", vehicle.id))?;
            println!("Vehicle [{}] updated successfully.", vehicle.id);
            Ok(())
        }
        VehicleCommand::Delete { id } => {
            session.store.delete_vehicle(&id)?;
            println!("Vehicle [{}] deleted.", id);
            Ok(())
        }
        VehicleCommand::List => {
            let vehicles = session.store.list_vehicles()?;
            if session.json() {
                return print_json(&vehicles);
            }
            render_vehicles(&vehicles);
            Ok(())
        }
        VehicleCommand::Show { id } => {
            let vehicle = session.store.load_vehicle(&id)?;
            if session.json() {
                return print_json(&vehicle);
            }
            render_vehicle(&vehicle);
            Ok(())
        }
    }
}

fn apply_update(vehicle: &mut StoredVehicle, args: VehicleUpdateArgs) {
    let profile = &mut vehicle.profile;
    if let Some(model) = args.model {
        vehicle.model_name = model;
    }
    if let Some(mass) = args.mass {
        profile.mass_kg = mass;
    }
    if let Some(drag) = args.drag {
        profile.drag_coef = drag;
    }
    if let Some(area) = args.area {
        profile.frontal_area_m2 = area;
    }
    if let Some(power) = args.power {
        profile.rated_power_kw = power;
    }
    if let Some(bar) = args.tire_pressure {
        profile.tire_pressure_bar = bar;
    }
    if let Some(ac) = args.ac {
        profile.has_ac = ac;
    }
    if let Some(km_per_l) = args.efficiency {
        profile.baseline_efficiency_km_per_l = km_per_l;
    }
}
