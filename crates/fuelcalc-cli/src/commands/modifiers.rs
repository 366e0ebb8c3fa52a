//! Terrain and climate modifier command handlers.

use anyhow::{Context, Result};
use clap::Subcommand;
use serde::Serialize;

use fuelcalc_cli::output::{print_json, render_modifier_tables};
use fuelcalc_lib::{ClimateModifier, StoreTerrainSource, TerrainModifier};

use super::Session;

#[derive(Subcommand, Debug)]
pub enum ModifiersCommand {
    /// Show the multiplier for a terrain and/or climate, or the full tables.
    Show {
        #[arg(long)]
        terrain: Option<String>,
        #[arg(long)]
        climate: Option<String>,
    },
    /// Store a terrain multiplier that overrides the built-in table.
    SetTerrain {
        /// Terrain category.
        name: String,
        /// Multiplier (must be positive).
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
}

#[derive(Serialize)]
struct ModifierLookup {
    #[serde(skip_serializing_if = "Option::is_none")]
    terrain: Option<(String, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    climate: Option<(String, f64)>,
}

/// Handle the modifiers subcommands.
pub fn handle_modifiers(session: &Session, command: ModifiersCommand) -> Result<()> {
    match command {
        ModifiersCommand::Show { terrain, climate } => {
            if terrain.is_none() && climate.is_none() {
                let overrides = session.store.terrain_overrides()?;
                if session.json() {
                    return print_json(&overrides);
                }
                render_modifier_tables(&overrides);
                return Ok(());
            }

            let terrain_lookup =
                TerrainModifier::with_override(StoreTerrainSource::new(&session.store));
            let climate_lookup = ClimateModifier::new();
            let lookup = ModifierLookup {
                terrain: terrain.map(|t| {
                    let value = terrain_lookup.modifier(&t);
                    (t, value)
                }),
                climate: climate.map(|c| {
                    let value = climate_lookup.modifier(&c);
                    (c, value)
                }),
            };

            if session.json() {
                return print_json(&lookup);
            }
            if let Some((name, value)) = &lookup.terrain {
                println!("Terrain {}: {:.2}", name, value);
            }
            if let Some((name, value)) = &lookup.climate {
                println!("Climate {}: {:.2}", name, value);
            }
            Ok(())
        }
        ModifiersCommand::SetTerrain { name, value } => {
            session
                .store
                .set_terrain_modifier(&name, value)
                .with_context(|| format!("failed to store terrain modifier for {name}"))?;
            println!("Terrain {} modifier set to {:.2}.", name, value);
            Ok(())
        }
    }
}
