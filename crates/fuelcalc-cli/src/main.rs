use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use fuelcalc_cli::output::OutputFormat;
use fuelcalc_lib::{resolve_database_path, Store};

mod commands;

use commands::estimate::EstimateArgs;
use commands::history::HistoryCommand;
use commands::modifiers::ModifiersCommand;
use commands::preset::PresetCommand;
use commands::price::PriceCommand;
use commands::vehicle::VehicleCommand;
use commands::Session;

#[derive(Parser, Debug)]
#[command(author, version, about = "Vehicle mission fuel estimator")]
struct Cli {
    /// Database file or directory (defaults to the platform data directory).
    #[arg(long, global = true, env = "FUELCALC_DB")]
    db: Option<PathBuf>,

    /// User name recorded on saved calculations.
    #[arg(long, global = true, env = "FUELCALC_USER", default_value = "local")]
    user: String,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate fuel and cost for a mission.
    Estimate(EstimateArgs),
    /// Manage registered vehicles.
    #[command(subcommand)]
    Vehicle(VehicleCommand),
    /// Manage mission environment presets.
    #[command(subcommand)]
    Preset(PresetCommand),
    /// Show or update the fuel price.
    #[command(subcommand)]
    Price(PriceCommand),
    /// Inspect terrain and climate modifiers.
    #[command(subcommand)]
    Modifiers(ModifiersCommand),
    /// Browse, export and prune calculation history.
    #[command(subcommand)]
    History(HistoryCommand),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let session = open_session(cli.db.as_deref(), cli.user, cli.format)?;

    match cli.command {
        Command::Estimate(args) => commands::estimate::handle_estimate(&session, &args),
        Command::Vehicle(cmd) => commands::vehicle::handle_vehicle(&session, cmd),
        Command::Preset(cmd) => commands::preset::handle_preset(&session, cmd),
        Command::Price(cmd) => commands::price::handle_price(&session, cmd),
        Command::Modifiers(cmd) => commands::modifiers::handle_modifiers(&session, cmd),
        Command::History(cmd) => commands::history::handle_history(&session, cmd),
    }
}

fn open_session(db: Option<&Path>, user: String, format: OutputFormat) -> Result<Session> {
    let path = resolve_database_path(db).context("failed to resolve the database location")?;
    let store = Store::open(&path)
        .with_context(|| format!("failed to open database at {}", path.display()))?;
    Ok(Session {
        store,
        user,
        format,
    })
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
