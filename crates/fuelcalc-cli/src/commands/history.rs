//! Calculation history command handlers.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Subcommand;
use serde::Serialize;

use fuelcalc_cli::output::{print_json, render_history, render_record, render_stats};
use fuelcalc_lib::{export_to_path, HistoryFilter};

use super::Session;

#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    /// List the current user's calculations, newest first.
    List {
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },
    /// List the most recent calculations across all users.
    Recent {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// List calculations recorded for one vehicle.
    Vehicle {
        /// Vehicle id.
        id: String,
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },
    /// Show one calculation in detail.
    Show {
        /// Calculation id.
        id: i64,
    },
    /// Delete one of the current user's calculations.
    Delete {
        /// Calculation id.
        id: i64,
    },
    /// Delete every calculation owned by the current user.
    Clear,
    /// Show aggregate fuel figures.
    Stats {
        /// Aggregate over all users instead of the current one.
        #[arg(long)]
        all: bool,
    },
    /// Export the current user's calculations to a CSV file.
    Export {
        /// Destination file.
        path: PathBuf,
    },
    /// Search calculations by vehicle and date range (dates as YYYY-MM-DD).
    Search {
        #[arg(long)]
        vehicle: Option<String>,
        #[arg(long, value_parser = parse_date)]
        from: Option<NaiveDate>,
        #[arg(long, value_parser = parse_date)]
        to: Option<NaiveDate>,
        /// Search across all users.
        #[arg(long)]
        all: bool,
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[derive(Serialize)]
struct StatsOutput<'a> {
    scope: &'a str,
    #[serde(flatten)]
    stats: fuelcalc_lib::HistoryStats,
}

fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected a date like 2024-01-31: {e}"))
}

/// Handle the history subcommands.
pub fn handle_history(session: &Session, command: HistoryCommand) -> Result<()> {
    match command {
        HistoryCommand::List { limit } => {
            let records = session.store.user_calculations(&session.user, limit)?;
            list(session, &records)
        }
        HistoryCommand::Recent { limit } => {
            let records = session.store.recent_calculations(limit)?;
            list(session, &records)
        }
        HistoryCommand::Vehicle { id, limit } => {
            let records = session.store.vehicle_calculations(&id, limit)?;
            list(session, &records)
        }
        HistoryCommand::Show { id } => {
            let record = session.store.calculation(id)?;
            if session.json() {
                return print_json(&record);
            }
            render_record(&record, session.fuel_price()?.get());
            Ok(())
        }
        HistoryCommand::Delete { id } => {
            session.store.delete_calculation(id, &session.user)?;
            println!("Calculation {} deleted.", id);
            Ok(())
        }
        HistoryCommand::Clear => {
            let removed = session.store.delete_user_calculations(&session.user)?;
            println!("Removed {} calculation(s) for {}.", removed, session.user);
            Ok(())
        }
        HistoryCommand::Stats { all } => {
            let scope = if all { "all users" } else { session.user.as_str() };
            let stats = session
                .store
                .history_stats((!all).then_some(session.user.as_str()))?;
            if session.json() {
                return print_json(&StatsOutput { scope, stats });
            }
            render_stats(scope, &stats);
            Ok(())
        }
        HistoryCommand::Export { path } => {
            let records = session.store.search_calculations(&HistoryFilter {
                username: Some(session.user.clone()),
                ..HistoryFilter::default()
            })?;
            export_to_path(&records, &path)
                .with_context(|| format!("failed to export history to {}", path.display()))?;
            println!(
                "Exported {} calculation(s) to {}.",
                records.len(),
                path.display()
            );
            Ok(())
        }
        HistoryCommand::Search {
            vehicle,
            from,
            to,
            all,
            limit,
        } => {
            let filter = HistoryFilter {
                username: (!all).then(|| session.user.clone()),
                vehicle_id: vehicle,
                start_date: from,
                end_date: to,
                limit,
            };
            let records = session.store.search_calculations(&filter)?;
            list(session, &records)
        }
    }
}

fn list(session: &Session, records: &[fuelcalc_lib::CalculationRecord]) -> Result<()> {
    if session.json() {
        return print_json(records);
    }
    render_history(records);
    Ok(())
}
