//! Fuel price command handlers.

use anyhow::{Context, Result};
use clap::Subcommand;
use serde::Serialize;

use fuelcalc_cli::output::print_json;

use super::Session;

#[derive(Subcommand, Debug)]
pub enum PriceCommand {
    /// Show the current fuel price.
    Show,
    /// Set a new fuel price per liter (must be positive).
    Set {
        /// Price per liter in RM.
        #[arg(allow_negative_numbers = true)]
        price: f64,
    },
}

#[derive(Serialize)]
struct PriceOutput {
    price_per_liter: f64,
    overhead_factor: f64,
}

/// Handle the price subcommands.
pub fn handle_price(session: &Session, command: PriceCommand) -> Result<()> {
    match command {
        PriceCommand::Show => {
            let cost = session.cost_model()?;
            if session.json() {
                return print_json(&PriceOutput {
                    price_per_liter: cost.price().get(),
                    overhead_factor: cost.overhead_factor(),
                });
            }
            println!("Current Fuel Price: {}", cost.formatted_price());
            Ok(())
        }
        PriceCommand::Set { price } => {
            let mut current = session.fuel_price()?;
            current
                .set(price)
                .context("fuel price was not changed")?;
            session
                .store
                .save_fuel_price(current)
                .context("failed to save the fuel price")?;
            println!("Fuel price updated to {}.", current);
            Ok(())
        }
    }
}
