//! Output formatting for estimation reports and stored records.
//!
//! Every renderer has a plain-text table form; [`print_json`] covers the
//! `--format json` path for any serializable value.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use fuelcalc_lib::modifiers::{DEFAULT_CLIMATE_MODIFIERS, DEFAULT_TERRAIN_MODIFIERS};
use fuelcalc_lib::{
    CalculationRecord, EnvironmentState, HistoryStats, MissionPreset, MissionReport,
    StoredVehicle,
};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Terrain and climate context shown alongside a report when a preset was used.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionContext {
    pub terrain: String,
    pub terrain_modifier: f64,
    pub climate: String,
    pub climate_modifier: f64,
}

/// JSON envelope for an estimation.
#[derive(Debug, Serialize)]
pub struct EstimateOutput<'a> {
    pub vehicle_id: &'a str,
    pub mission_name: &'a str,
    pub environment: &'a EnvironmentState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<&'a ConditionContext>,
    pub report: &'a MissionReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_id: Option<i64>,
}

/// Serialize `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Render a mission report.
pub fn render_report(output: &EstimateOutput<'_>) {
    let report = output.report;
    let env = output.environment;
    let est = &report.estimate;

    println!("--- Mission Report: {} ---", output.mission_name);
    println!("Vehicle: {}", output.vehicle_id);
    println!(
        "Environment: gradient {:.3}, roughness {:.3}, {:.1} °C, {:.0} Pa (air density {:.3} kg/m³)",
        env.road_gradient, env.surface_roughness, env.ambient_temp_c, env.pressure_pa, est.air_density
    );
    if let Some(ctx) = output.conditions {
        println!(
            "Conditions: terrain {} (x{:.2}), climate {} (x{:.2})",
            ctx.terrain, ctx.terrain_modifier, ctx.climate, ctx.climate_modifier
        );
    }
    println!(
        "Total Distance: {:.1} km at {:.1} km/h",
        report.mission.distance_km, report.mission.avg_speed_kmh
    );
    println!(
        "Required Power: {:.0} W (wheels {:.0} W, auxiliary {:.0} W)",
        est.required_power_w, est.wheel_power_w, est.aux_power_w
    );
    println!(
        "Engine Load: {:.3} (raw {:.3}), thermal efficiency {:.3}",
        est.load_factor, est.raw_load_factor, est.thermal_efficiency
    );
    println!("Fuel Consumed: {:.3} L", report.fuel_liters);
    println!("Efficiency: {:.2} km/L", report.km_per_liter);
    println!(
        "Cost: RM {:.4}/km, RM {:.2} total at RM {:.2}/L",
        report.cost_per_km, report.total_cost, report.fuel_price
    );
    if let Some(id) = output.saved_id {
        println!("Calculation saved to history (id {}).", id);
    }
}

/// Print registered vehicles in a table.
pub fn render_vehicles(vehicles: &[StoredVehicle]) {
    if vehicles.is_empty() {
        println!("No vehicles registered.");
        return;
    }

    println!("Registered vehicles ({}):", vehicles.len());
    println!(
        "{:<12} {:<20} {:>10} {:>6} {:>8} {:>8} {:>6} {:>4} {:>8}",
        "ID", "Model", "Mass (kg)", "Cd", "Area m²", "Power kW", "Tire", "AC", "km/L"
    );
    for v in vehicles {
        let p = &v.profile;
        println!(
            "{:<12} {:<20} {:>10.0} {:>6.3} {:>8.2} {:>8.1} {:>6.2} {:>4} {:>8.2}",
            v.id,
            v.model_name,
            p.mass_kg,
            p.drag_coef,
            p.frontal_area_m2,
            p.rated_power_kw,
            p.tire_pressure_bar,
            yes_no(p.has_ac),
            p.baseline_efficiency_km_per_l
        );
    }
}

/// Print a single vehicle's attributes.
pub fn render_vehicle(vehicle: &StoredVehicle) {
    let p = &vehicle.profile;
    println!("Vehicle {} ({})", vehicle.id, vehicle.model_name);
    println!("  Mass:               {:.0} kg", p.mass_kg);
    println!("  Drag coefficient:   {:.3}", p.drag_coef);
    println!("  Frontal area:       {:.2} m²", p.frontal_area_m2);
    println!("  Rated power:        {:.1} kW", p.rated_power_kw);
    println!("  Tire pressure:      {:.2} bar", p.tire_pressure_bar);
    println!("  Air conditioning:   {}", yes_no(p.has_ac));
    println!(
        "  Baseline efficiency: {:.2} km/L",
        p.baseline_efficiency_km_per_l
    );
}

/// Print mission presets in a table.
pub fn render_presets(presets: &[MissionPreset]) {
    if presets.is_empty() {
        println!("No presets saved.");
        return;
    }

    println!("Mission presets ({}):", presets.len());
    println!(
        "{:<20} {:<10} {:<10} {:>9} {:>9} {:>8} {:>10}",
        "Name", "Terrain", "Climate", "Gradient", "Rough", "Temp °C", "Pressure"
    );
    for p in presets {
        let env = &p.environment;
        println!(
            "{:<20} {:<10} {:<10} {:>9.3} {:>9.3} {:>8.1} {:>10.0}",
            p.name,
            p.terrain,
            p.climate,
            env.road_gradient,
            env.surface_roughness,
            env.ambient_temp_c,
            env.pressure_pa
        );
    }
}

/// Print history entries in a table.
pub fn render_history(records: &[CalculationRecord]) {
    if records.is_empty() {
        println!("No calculations found.");
        return;
    }

    println!("Calculations ({}):", records.len());
    println!(
        "{:>5} {:<16} {:<10} {:<12} {:<20} {:>9} {:>8} {:>10} {:>9}",
        "ID", "Date", "User", "Vehicle", "Mission", "Dist km", "km/h", "Fuel L", "RM/km"
    );
    for r in records {
        let c = &r.calculation;
        println!(
            "{:>5} {:<16} {:<10} {:<12} {:<20} {:>9.1} {:>8.1} {:>10.3} {:>9.4}",
            r.id,
            r.formatted_date(),
            c.username,
            c.vehicle_id,
            c.mission_name,
            c.distance_km,
            c.avg_speed_kmh,
            c.fuel_consumed_liters,
            c.cost_per_km
        );
    }
}

/// Print one history entry in full.
pub fn render_record(record: &CalculationRecord, price_per_liter: f64) {
    let c = &record.calculation;
    let v = &c.vehicle;
    let e = &c.environment;
    println!("Calculation {} by {} on {}", record.id, c.username, record.formatted_date());
    println!("  Mission:   {}", c.mission_name);
    println!(
        "  Vehicle:   {} ({:.0} kg, Cd {:.3}, {:.2} m², {:.1} kW, {:.2} bar, AC {})",
        c.vehicle_id,
        v.mass_kg,
        v.drag_coef,
        v.frontal_area_m2,
        v.rated_power_kw,
        v.tire_pressure_bar,
        yes_no(v.has_ac)
    );
    println!(
        "  Road:      gradient {:.3}, roughness {:.3}, {:.1} °C, {:.0} Pa",
        e.road_gradient, e.surface_roughness, e.ambient_temp_c, e.pressure_pa
    );
    println!(
        "  Trip:      {:.1} km at {:.1} km/h",
        c.distance_km, c.avg_speed_kmh
    );
    println!("  Fuel:      {:.3} L", c.fuel_consumed_liters);
    println!("  Cost:      RM {:.4}/km", c.cost_per_km);
    println!(
        "  Fuel cost: RM {:.2} at RM {:.2}/L",
        record.total_fuel_cost(price_per_liter),
        price_per_liter
    );
}

/// Print aggregate statistics.
pub fn render_stats(scope: &str, stats: &HistoryStats) {
    println!("Statistics for {}:", scope);
    println!("  Calculations:       {}", stats.count);
    println!("  Total fuel:         {:.3} L", stats.total_fuel_liters);
    println!("  Average per trip:   {:.3} L", stats.average_fuel_liters);
}

/// Print the built-in modifier tables plus any stored terrain overrides.
pub fn render_modifier_tables(overrides: &[(String, f64)]) {
    println!("Terrain modifiers:");
    for (name, value) in DEFAULT_TERRAIN_MODIFIERS {
        println!("  {:<12} {:.2}", name, value);
    }
    println!("Climate modifiers:");
    for (name, value) in DEFAULT_CLIMATE_MODIFIERS {
        println!("  {:<12} {:.2}", name, value);
    }
    if !overrides.is_empty() {
        println!("Stored terrain overrides:");
        for (name, value) in overrides {
            println!("  {:<12} {:.2}", name, value);
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}
