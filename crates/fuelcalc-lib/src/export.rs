//! CSV export of calculation history.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::{QuoteStyle, WriterBuilder};
use tracing::info;

use crate::error::{Error, Result};
use crate::history::CalculationRecord;

/// Column headers written as the first CSV row.
pub const CSV_HEADERS: [&str; 19] = [
    "ID",
    "Username",
    "VehicleID",
    "MissionName",
    "Date",
    "Distance(km)",
    "AvgSpeed(km/h)",
    "FuelConsumed(L)",
    "CostPerKm",
    "RoadGradient",
    "SurfaceRoughness",
    "AmbientTemp(C)",
    "VehicleMass(kg)",
    "DragCoefficient",
    "FrontalArea(m2)",
    "EnginePower(kW)",
    "TirePressure(bar)",
    "HasAC",
    "VehicleEfficiency(km/L)",
];

/// Write `records` as CSV to any writer.
pub fn write_csv<W: Write>(records: &[CalculationRecord], writer: W) -> Result<()> {
    if records.is_empty() {
        return Err(Error::NothingToExport);
    }

    let mut csv = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(writer);
    csv.write_record(CSV_HEADERS)?;

    for record in records {
        let c = &record.calculation;
        csv.write_record([
            record.id.to_string(),
            c.username.clone(),
            c.vehicle_id.clone(),
            c.mission_name.clone(),
            record.formatted_date(),
            c.distance_km.to_string(),
            c.avg_speed_kmh.to_string(),
            c.fuel_consumed_liters.to_string(),
            c.cost_per_km.to_string(),
            c.environment.road_gradient.to_string(),
            c.environment.surface_roughness.to_string(),
            c.environment.ambient_temp_c.to_string(),
            c.vehicle.mass_kg.to_string(),
            c.vehicle.drag_coef.to_string(),
            c.vehicle.frontal_area_m2.to_string(),
            c.vehicle.rated_power_kw.to_string(),
            c.vehicle.tire_pressure_bar.to_string(),
            if c.vehicle.has_ac { "Yes" } else { "No" }.to_string(),
            c.vehicle.baseline_efficiency_km_per_l.to_string(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Write `records` to a CSV file at `path`, replacing any existing file.
pub fn export_to_path(records: &[CalculationRecord], path: &Path) -> Result<()> {
    if records.is_empty() {
        return Err(Error::NothingToExport);
    }
    let file = File::create(path)?;
    write_csv(records, file)?;
    info!(count = records.len(), path = %path.display(), "exported calculation history");
    Ok(())
}
