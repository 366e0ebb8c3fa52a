// Module exports for CLI subcommands
//
// Each module handles a specific CLI subcommand. main.rs parses arguments,
// opens the store and dispatches to these handlers.

pub mod estimate;
pub mod history;
pub mod modifiers;
pub mod preset;
pub mod price;
pub mod vehicle;

use anyhow::{Context, Result};

use fuelcalc_cli::output::OutputFormat;
use fuelcalc_lib::{CostModel, FuelPrice, Store};

/// State shared by every subcommand for one invocation.
pub struct Session {
    pub store: Store,
    pub user: String,
    pub format: OutputFormat,
}

impl Session {
    pub fn json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Persisted fuel price, or the default when none has been saved.
    pub fn fuel_price(&self) -> Result<FuelPrice> {
        let price = self
            .store
            .load_fuel_price()
            .context("failed to load the fuel price")?;
        Ok(price.unwrap_or_default())
    }

    /// Cost model over a snapshot of the current fuel price.
    pub fn cost_model(&self) -> Result<CostModel> {
        Ok(CostModel::new(self.fuel_price()?))
    }
}
