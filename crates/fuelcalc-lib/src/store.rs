//! SQLite persistence for vehicles, presets, terrain overrides, the fuel price
//! and calculation history.
//!
//! Tables are created on open with `CREATE TABLE IF NOT EXISTS`, so opening an
//! existing database is a no-op for the schema.

use std::path::Path;

use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cost::FuelPrice;
use crate::environment::EnvironmentState;
use crate::error::{Error, Result};
use crate::history::{
    CalculationRecord, HistoryFilter, HistoryStats, NewCalculation, TIMESTAMP_FORMAT,
};
use crate::modifiers::ModifierSource;
use crate::vehicle::{StoredVehicle, VehicleProfile};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS vehicles (
    id TEXT PRIMARY KEY,
    model TEXT NOT NULL,
    efficiency REAL NOT NULL DEFAULT 0,
    mass_kg REAL NOT NULL,
    drag_coef REAL NOT NULL,
    frontal_area REAL NOT NULL,
    engine_power_kw REAL NOT NULL,
    tire_pressure REAL NOT NULL DEFAULT 2.4,
    has_ac INTEGER NOT NULL DEFAULT 0
);
CREATE TABLE IF NOT EXISTS presets (
    name TEXT PRIMARY KEY,
    terrain TEXT NOT NULL,
    climate TEXT NOT NULL,
    road_gradient REAL NOT NULL,
    surface_roughness REAL NOT NULL,
    ambient_temp REAL NOT NULL,
    pressure REAL
);
CREATE TABLE IF NOT EXISTS terrain_data (
    terrain_name TEXT PRIMARY KEY,
    terrain_mod REAL NOT NULL
);
CREATE TABLE IF NOT EXISTS fuel_prices (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    price REAL NOT NULL,
    update_time TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);
CREATE TABLE IF NOT EXISTS calculation_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL,
    vehicle_id TEXT NOT NULL,
    mission_name TEXT NOT NULL,
    vehicle_mass REAL NOT NULL,
    vehicle_drag_coef REAL NOT NULL,
    vehicle_frontal_area REAL NOT NULL,
    vehicle_tire_pressure REAL NOT NULL,
    vehicle_engine_power REAL NOT NULL,
    vehicle_has_ac INTEGER NOT NULL,
    vehicle_efficiency REAL NOT NULL,
    road_gradient REAL NOT NULL,
    surface_roughness REAL NOT NULL,
    ambient_temp REAL NOT NULL,
    pressure REAL NOT NULL,
    distance_km REAL NOT NULL,
    avg_speed_kmh REAL NOT NULL,
    fuel_consumed_liters REAL NOT NULL,
    cost_per_km REAL NOT NULL,
    calculated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_history_user ON calculation_history (username);
CREATE INDEX IF NOT EXISTS idx_history_vehicle ON calculation_history (vehicle_id);
";

const VEHICLE_COLUMNS: &str =
    "id, model, efficiency, mass_kg, drag_coef, frontal_area, engine_power_kw, tire_pressure, has_ac";

const PRESET_COLUMNS: &str =
    "name, terrain, climate, road_gradient, surface_roughness, ambient_temp, pressure";

const HISTORY_COLUMNS: &str = "id, username, vehicle_id, mission_name, vehicle_mass, \
     vehicle_drag_coef, vehicle_frontal_area, vehicle_tire_pressure, vehicle_engine_power, \
     vehicle_has_ac, vehicle_efficiency, road_gradient, surface_roughness, ambient_temp, \
     pressure, distance_km, avg_speed_kmh, fuel_consumed_liters, cost_per_km, calculated_at";

const HISTORY_ORDER: &str = "ORDER BY calculated_at DESC, id DESC";

/// Number of fuzzy suggestions attached to unknown-name errors.
const MAX_SUGGESTIONS: usize = 3;

/// Minimum Jaro-Winkler similarity for a name to be suggested.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// A named environment preset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissionPreset {
    pub name: String,
    pub terrain: String,
    pub climate: String,
    pub environment: EnvironmentState,
}

/// Handle to the application database.
#[derive(Debug)]
pub struct Store {
    connection: Connection,
}

impl Store {
    /// Open (or create) the database at `path` and ensure the schema exists.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let connection = Connection::open(path)?;
        debug!(path = %path.display(), "opened database");
        Self::with_connection(connection)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(connection: Connection) -> Result<Self> {
        connection.execute_batch(SCHEMA)?;
        Ok(Self { connection })
    }

    // ----- vehicles -------------------------------------------------------

    /// Register a new vehicle. Fails with [`Error::DuplicateVehicle`] if the id is taken.
    pub fn add_vehicle(&self, vehicle: &StoredVehicle) -> Result<()> {
        vehicle.validate()?;
        if self.vehicle_exists(&vehicle.id)? {
            return Err(Error::DuplicateVehicle {
                id: vehicle.id.clone(),
            });
        }

        let p = &vehicle.profile;
        self.connection.execute(
            &format!("INSERT INTO vehicles ({VEHICLE_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"),
            params![
                vehicle.id,
                vehicle.model_name,
                p.baseline_efficiency_km_per_l,
                p.mass_kg,
                p.drag_coef,
                p.frontal_area_m2,
                p.rated_power_kw,
                p.tire_pressure_bar,
                p.has_ac,
            ],
        )?;
        info!(id = %vehicle.id, model = %vehicle.model_name, "vehicle added");
        Ok(())
    }

    /// Replace every attribute of an existing vehicle.
    pub fn update_vehicle(&self, vehicle: &StoredVehicle) -> Result<()> {
        vehicle.validate()?;
        let p = &vehicle.profile;
        let changed = self.connection.execute(
            "UPDATE vehicles SET model = ?2, efficiency = ?3, mass_kg = ?4, drag_coef = ?5, \
             frontal_area = ?6, engine_power_kw = ?7, tire_pressure = ?8, has_ac = ?9 WHERE id = ?1",
            params![
                vehicle.id,
                vehicle.model_name,
                p.baseline_efficiency_km_per_l,
                p.mass_kg,
                p.drag_coef,
                p.frontal_area_m2,
                p.rated_power_kw,
                p.tire_pressure_bar,
                p.has_ac,
            ],
        )?;
        if changed == 0 {
            return Err(self.unknown_vehicle(&vehicle.id)?);
        }
        info!(id = %vehicle.id, "vehicle updated");
        Ok(())
    }

    pub fn delete_vehicle(&self, id: &str) -> Result<()> {
        let changed = self
            .connection
            .execute("DELETE FROM vehicles WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(self.unknown_vehicle(id)?);
        }
        info!(id, "vehicle deleted");
        Ok(())
    }

    pub fn vehicle_exists(&self, id: &str) -> Result<bool> {
        let found = self
            .connection
            .query_row("SELECT 1 FROM vehicles WHERE id = ?1", params![id], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }

    pub fn load_vehicle(&self, id: &str) -> Result<StoredVehicle> {
        let vehicle = self
            .connection
            .query_row(
                &format!("SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE id = ?1"),
                params![id],
                row_to_vehicle,
            )
            .optional()?;
        match vehicle {
            Some(vehicle) => Ok(vehicle),
            None => Err(self.unknown_vehicle(id)?),
        }
    }

    pub fn list_vehicles(&self) -> Result<Vec<StoredVehicle>> {
        let mut stmt = self
            .connection
            .prepare(&format!("SELECT {VEHICLE_COLUMNS} FROM vehicles ORDER BY id"))?;
        let vehicles = stmt
            .query_map([], row_to_vehicle)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(vehicles)
    }

    fn unknown_vehicle(&self, id: &str) -> Result<Error> {
        let ids = self.string_column("SELECT id FROM vehicles")?;
        Ok(Error::UnknownVehicle {
            id: id.to_string(),
            suggestions: fuzzy_matches(&ids, id),
        })
    }

    // ----- presets --------------------------------------------------------

    /// Insert or replace a preset by name.
    pub fn save_preset(&self, preset: &MissionPreset) -> Result<()> {
        if preset.name.trim().is_empty() {
            return Err(Error::invalid("preset name must not be empty"));
        }
        preset.environment.validate()?;

        let env = &preset.environment;
        self.connection.execute(
            &format!(
                "INSERT OR REPLACE INTO presets ({PRESET_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
            ),
            params![
                preset.name,
                preset.terrain,
                preset.climate,
                env.road_gradient,
                env.surface_roughness,
                env.ambient_temp_c,
                env.pressure_pa,
            ],
        )?;
        info!(name = %preset.name, "preset saved");
        Ok(())
    }

    pub fn load_preset(&self, name: &str) -> Result<MissionPreset> {
        let preset = self
            .connection
            .query_row(
                &format!("SELECT {PRESET_COLUMNS} FROM presets WHERE name = ?1"),
                params![name],
                row_to_preset,
            )
            .optional()?;
        match preset {
            Some(preset) => Ok(preset),
            None => Err(self.unknown_preset(name)?),
        }
    }

    pub fn list_presets(&self) -> Result<Vec<MissionPreset>> {
        let mut stmt = self
            .connection
            .prepare(&format!("SELECT {PRESET_COLUMNS} FROM presets ORDER BY name"))?;
        let presets = stmt
            .query_map([], row_to_preset)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(presets)
    }

    pub fn delete_preset(&self, name: &str) -> Result<()> {
        let changed = self
            .connection
            .execute("DELETE FROM presets WHERE name = ?1", params![name])?;
        if changed == 0 {
            return Err(self.unknown_preset(name)?);
        }
        info!(name, "preset deleted");
        Ok(())
    }

    fn unknown_preset(&self, name: &str) -> Result<Error> {
        let names = self.string_column("SELECT name FROM presets")?;
        Ok(Error::UnknownPreset {
            name: name.to_string(),
            suggestions: fuzzy_matches(&names, name),
        })
    }

    // ----- terrain overrides ----------------------------------------------

    pub fn set_terrain_modifier(&self, terrain: &str, modifier: f64) -> Result<()> {
        if !modifier.is_finite() || modifier <= 0.0 {
            return Err(Error::invalid(format!(
                "terrain modifier must be a finite positive number, got {modifier}"
            )));
        }
        self.connection.execute(
            "INSERT OR REPLACE INTO terrain_data (terrain_name, terrain_mod) VALUES (?1, ?2)",
            params![terrain, modifier],
        )?;
        info!(terrain, modifier, "terrain modifier stored");
        Ok(())
    }

    pub fn terrain_modifier(&self, terrain: &str) -> Result<Option<f64>> {
        let value = self
            .connection
            .query_row(
                "SELECT terrain_mod FROM terrain_data WHERE terrain_name = ?1",
                params![terrain],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn terrain_overrides(&self) -> Result<Vec<(String, f64)>> {
        let mut stmt = self
            .connection
            .prepare("SELECT terrain_name, terrain_mod FROM terrain_data ORDER BY terrain_name")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    // ----- fuel price -----------------------------------------------------

    /// Most recently saved fuel price, if any.
    pub fn load_fuel_price(&self) -> Result<Option<FuelPrice>> {
        let price: Option<f64> = self
            .connection
            .query_row(
                "SELECT price FROM fuel_prices ORDER BY id DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;
        price.map(FuelPrice::new).transpose()
    }

    /// Append a new price row; earlier rows are kept as history.
    pub fn save_fuel_price(&self, price: FuelPrice) -> Result<()> {
        self.connection.execute(
            "INSERT INTO fuel_prices (price) VALUES (?1)",
            params![price.get()],
        )?;
        info!(price = price.get(), "fuel price saved");
        Ok(())
    }

    // ----- calculation history --------------------------------------------

    /// Store a calculation stamped with the current UTC time.
    pub fn save_calculation(&self, calculation: &NewCalculation) -> Result<i64> {
        self.save_calculation_at(calculation, Utc::now().naive_utc())
    }

    /// Store a calculation with an explicit timestamp.
    pub fn save_calculation_at(
        &self,
        calculation: &NewCalculation,
        calculated_at: NaiveDateTime,
    ) -> Result<i64> {
        let v = &calculation.vehicle;
        let e = &calculation.environment;
        self.connection.execute(
            "INSERT INTO calculation_history (username, vehicle_id, mission_name, vehicle_mass, \
             vehicle_drag_coef, vehicle_frontal_area, vehicle_tire_pressure, vehicle_engine_power, \
             vehicle_has_ac, vehicle_efficiency, road_gradient, surface_roughness, ambient_temp, \
             pressure, distance_km, avg_speed_kmh, fuel_consumed_liters, cost_per_km, calculated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)",
            params![
                calculation.username,
                calculation.vehicle_id,
                calculation.mission_name,
                v.mass_kg,
                v.drag_coef,
                v.frontal_area_m2,
                v.tire_pressure_bar,
                v.rated_power_kw,
                v.has_ac,
                v.baseline_efficiency_km_per_l,
                e.road_gradient,
                e.surface_roughness,
                e.ambient_temp_c,
                e.pressure_pa,
                calculation.distance_km,
                calculation.avg_speed_kmh,
                calculation.fuel_consumed_liters,
                calculation.cost_per_km,
                calculated_at.format(TIMESTAMP_FORMAT).to_string(),
            ],
        )?;
        let id = self.connection.last_insert_rowid();
        info!(id, user = %calculation.username, "calculation saved to history");
        Ok(id)
    }

    pub fn user_calculations(&self, username: &str, limit: usize) -> Result<Vec<CalculationRecord>> {
        self.search_calculations(&HistoryFilter {
            username: Some(username.to_string()),
            limit: Some(limit),
            ..HistoryFilter::default()
        })
    }

    pub fn recent_calculations(&self, limit: usize) -> Result<Vec<CalculationRecord>> {
        self.search_calculations(&HistoryFilter {
            limit: Some(limit),
            ..HistoryFilter::default()
        })
    }

    pub fn vehicle_calculations(
        &self,
        vehicle_id: &str,
        limit: usize,
    ) -> Result<Vec<CalculationRecord>> {
        self.search_calculations(&HistoryFilter {
            vehicle_id: Some(vehicle_id.to_string()),
            limit: Some(limit),
            ..HistoryFilter::default()
        })
    }

    pub fn calculation(&self, id: i64) -> Result<CalculationRecord> {
        self.connection
            .query_row(
                &format!("SELECT {HISTORY_COLUMNS} FROM calculation_history WHERE id = ?1"),
                params![id],
                row_to_record,
            )
            .optional()?
            .ok_or(Error::CalculationNotFound { id })
    }

    /// Delete one calculation; only its owner may do so.
    pub fn delete_calculation(&self, id: i64, requesting_user: &str) -> Result<()> {
        let record = self.calculation(id)?;
        if record.calculation.username != requesting_user {
            warn!(id, user = requesting_user, "refused to delete foreign calculation");
            return Err(Error::NotOwner {
                id,
                user: requesting_user.to_string(),
            });
        }
        self.connection
            .execute("DELETE FROM calculation_history WHERE id = ?1", params![id])?;
        info!(id, "calculation deleted");
        Ok(())
    }

    /// Delete every calculation belonging to `username`, returning how many were removed.
    pub fn delete_user_calculations(&self, username: &str) -> Result<usize> {
        let removed = self.connection.execute(
            "DELETE FROM calculation_history WHERE username = ?1",
            params![username],
        )?;
        info!(user = username, removed, "calculations cleared");
        Ok(removed)
    }

    /// Count, total and average fuel, optionally restricted to one user.
    pub fn history_stats(&self, username: Option<&str>) -> Result<HistoryStats> {
        let (count, total, average): (i64, Option<f64>, Option<f64>) = match username {
            Some(user) => self.connection.query_row(
                "SELECT COUNT(*), SUM(fuel_consumed_liters), AVG(fuel_consumed_liters) \
                 FROM calculation_history WHERE username = ?1",
                params![user],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )?,
            None => self.connection.query_row(
                "SELECT COUNT(*), SUM(fuel_consumed_liters), AVG(fuel_consumed_liters) \
                 FROM calculation_history",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )?,
        };
        Ok(HistoryStats {
            count: u64::try_from(count).unwrap_or_default(),
            total_fuel_liters: total.unwrap_or(0.0),
            average_fuel_liters: average.unwrap_or(0.0),
        })
    }

    /// Filtered history, newest first.
    pub fn search_calculations(&self, filter: &HistoryFilter) -> Result<Vec<CalculationRecord>> {
        let mut clauses = Vec::new();
        let mut values: Vec<String> = Vec::new();

        if let Some(user) = &filter.username {
            values.push(user.clone());
            clauses.push(format!("username = ?{}", values.len()));
        }
        if let Some(vehicle) = filter.vehicle_id.as_ref().filter(|v| !v.is_empty()) {
            values.push(vehicle.clone());
            clauses.push(format!("vehicle_id = ?{}", values.len()));
        }
        if let Some(start) = filter.start_date {
            values.push(start.format("%Y-%m-%d").to_string());
            clauses.push(format!("date(calculated_at) >= ?{}", values.len()));
        }
        if let Some(end) = filter.end_date {
            values.push(end.format("%Y-%m-%d").to_string());
            clauses.push(format!("date(calculated_at) <= ?{}", values.len()));
        }

        let mut sql = format!("SELECT {HISTORY_COLUMNS} FROM calculation_history");
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push(' ');
        sql.push_str(HISTORY_ORDER);
        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        debug!(%sql, "searching calculation history");

        let mut stmt = self.connection.prepare(&sql)?;
        let records = stmt
            .query_map(rusqlite::params_from_iter(values.iter()), row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    fn string_column(&self, sql: &str) -> Result<Vec<String>> {
        let mut stmt = self.connection.prepare(sql)?;
        let values = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(values)
    }
}

/// Terrain overrides read from the store, usable as the first link of a
/// [`crate::TerrainModifier`] chain. Store errors are logged and treated as
/// a miss so the chain falls through to the built-in table.
#[derive(Debug, Clone, Copy)]
pub struct StoreTerrainSource<'a> {
    store: &'a Store,
}

impl<'a> StoreTerrainSource<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }
}

impl ModifierSource for StoreTerrainSource<'_> {
    fn lookup(&self, name: &str) -> Option<f64> {
        match self.store.terrain_modifier(name) {
            Ok(value) => value,
            Err(err) => {
                warn!(terrain = name, error = %err, "terrain override lookup failed");
                None
            }
        }
    }
}

fn row_to_vehicle(row: &Row<'_>) -> rusqlite::Result<StoredVehicle> {
    Ok(StoredVehicle {
        id: row.get(0)?,
        model_name: row.get(1)?,
        profile: VehicleProfile {
            baseline_efficiency_km_per_l: row.get(2)?,
            mass_kg: row.get(3)?,
            drag_coef: row.get(4)?,
            frontal_area_m2: row.get(5)?,
            rated_power_kw: row.get(6)?,
            tire_pressure_bar: row.get(7)?,
            has_ac: row.get(8)?,
        },
    })
}

fn row_to_preset(row: &Row<'_>) -> rusqlite::Result<MissionPreset> {
    let mut environment = EnvironmentState::raw(row.get(3)?, row.get(4)?, row.get(5)?);
    if let Some(pressure) = row.get::<_, Option<f64>>(6)? {
        environment.pressure_pa = pressure;
    }
    Ok(MissionPreset {
        name: row.get(0)?,
        terrain: row.get(1)?,
        climate: row.get(2)?,
        environment,
    })
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<CalculationRecord> {
    Ok(CalculationRecord {
        id: row.get(0)?,
        calculation: NewCalculation {
            username: row.get(1)?,
            vehicle_id: row.get(2)?,
            mission_name: row.get(3)?,
            vehicle: VehicleProfile {
                mass_kg: row.get(4)?,
                drag_coef: row.get(5)?,
                frontal_area_m2: row.get(6)?,
                tire_pressure_bar: row.get(7)?,
                rated_power_kw: row.get(8)?,
                has_ac: row.get(9)?,
                baseline_efficiency_km_per_l: row.get(10)?,
            },
            environment: EnvironmentState {
                road_gradient: row.get(11)?,
                surface_roughness: row.get(12)?,
                ambient_temp_c: row.get(13)?,
                pressure_pa: row.get(14)?,
            },
            distance_km: row.get(15)?,
            avg_speed_kmh: row.get(16)?,
            fuel_consumed_liters: row.get(17)?,
            cost_per_km: row.get(18)?,
        },
        calculated_at: row.get(19)?,
    })
}

/// Candidates most similar to `name`, best first.
fn fuzzy_matches(candidates: &[String], name: &str) -> Vec<String> {
    let needle = name.to_ascii_lowercase();
    let mut scored: Vec<(f64, &String)> = candidates
        .iter()
        .map(|c| (strsim::jaro_winkler(&c.to_ascii_lowercase(), &needle), c))
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, c)| c.clone())
        .collect()
}
