//! Fuel mission estimator library entry points.
//!
//! This crate exposes the physics-based fuel estimation engine, the cost
//! model, terrain/climate modifier lookups, and the SQLite store used to
//! persist vehicles, presets, the fuel price and calculation history.
//! Higher-level consumers (the CLI) should only depend on the items exported
//! here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod constants;
pub mod cost;
pub mod engine;
pub mod environment;
pub mod error;
pub mod export;
pub mod history;
pub mod mission;
pub mod modifiers;
pub mod paths;
pub mod store;
pub mod vehicle;

pub use cost::{CostModel, FuelPrice};
pub use engine::{calculate, estimate, FuelEstimate};
pub use environment::EnvironmentState;
pub use error::{Error, Result};
pub use export::{export_to_path, write_csv};
pub use history::{CalculationRecord, HistoryFilter, HistoryStats, NewCalculation};
pub use mission::{MissionParameters, MissionReport};
pub use modifiers::{ClimateModifier, ModifierChain, ModifierSource, StaticTable, TerrainModifier};
pub use paths::{default_database_path, resolve_database_path};
pub use store::{MissionPreset, Store, StoreTerrainSource};
pub use vehicle::{StoredVehicle, VehicleProfile};
