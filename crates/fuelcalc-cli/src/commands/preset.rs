//! Mission preset command handlers.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use fuelcalc_cli::output::{print_json, render_presets};
use fuelcalc_lib::{EnvironmentState, MissionPreset};

use super::Session;

#[derive(Subcommand, Debug)]
pub enum PresetCommand {
    /// Save (or replace) a named preset.
    Save(PresetSaveArgs),
    /// List saved presets.
    List,
    /// Show one preset.
    Show {
        /// Preset name.
        name: String,
    },
    /// Delete a preset.
    Delete {
        /// Preset name.
        name: String,
    },
}

#[derive(Args, Debug)]
pub struct PresetSaveArgs {
    /// Preset name.
    pub name: String,
    /// Terrain category (plain, mountain, desert, urban, forest, swamp, mud).
    #[arg(long, default_value = "plain")]
    pub terrain: String,
    /// Climate category (clear, rainy, hot, cold, snowy, sandstorm).
    #[arg(long, default_value = "clear")]
    pub climate: String,
    /// Road gradient as a slope ratio.
    #[arg(long, allow_negative_numbers = true)]
    pub gradient: f64,
    /// Surface roughness.
    #[arg(long)]
    pub roughness: f64,
    /// Ambient temperature in °C.
    #[arg(long, allow_negative_numbers = true)]
    pub temp: f64,
    /// Atmospheric pressure in Pa.
    #[arg(long)]
    pub pressure: Option<f64>,
}

/// Handle the preset subcommands.
pub fn handle_preset(session: &Session, command: PresetCommand) -> Result<()> {
    match command {
        PresetCommand::Save(args) => {
            let mut environment = EnvironmentState::raw(args.gradient, args.roughness, args.temp);
            if let Some(pressure) = args.pressure {
                environment.pressure_pa = pressure;
            }
            let preset = MissionPreset {
                name: args.name,
                terrain: args.terrain,
                climate: args.climate,
                environment,
            };
            session
                .store
                .save_preset(&preset)
                .with_context(|| format!("failed to save preset {}", preset.name))?;
            println!("Preset {} saved successfully.", preset.name);
            Ok(())
        }
        PresetCommand::List => {
            let presets = session.store.list_presets()?;
            if session.json() {
                return print_json(&presets);
            }
            render_presets(&presets);
            Ok(())
        }
        PresetCommand::Show { name } => {
            let preset = session.store.load_preset(&name)?;
            if session.json() {
                return print_json(&preset);
            }
            render_presets(std::slice::from_ref(&preset));
            Ok(())
        }
        PresetCommand::Delete { name } => {
            session.store.delete_preset(&name)?;
            println!("Preset {} deleted.", name);
            Ok(())
        }
    }
}
