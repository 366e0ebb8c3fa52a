//! Calculation history records and query types.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::environment::EnvironmentState;
use crate::mission::MissionReport;
use crate::vehicle::VehicleProfile;

/// Timestamp layout used for the `calculated_at` column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Layout used when displaying or exporting a timestamp.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A calculation ready to be stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCalculation {
    pub username: String,
    pub vehicle_id: String,
    pub mission_name: String,
    pub vehicle: VehicleProfile,
    pub environment: EnvironmentState,
    pub distance_km: f64,
    pub avg_speed_kmh: f64,
    pub fuel_consumed_liters: f64,
    pub cost_per_km: f64,
}

impl NewCalculation {
    /// Snapshot the inputs and results of a mission report.
    pub fn from_report(
        username: &str,
        vehicle_id: &str,
        mission_name: &str,
        vehicle: &VehicleProfile,
        environment: &EnvironmentState,
        report: &MissionReport,
    ) -> Self {
        Self {
            username: username.to_string(),
            vehicle_id: vehicle_id.to_string(),
            mission_name: mission_name.to_string(),
            vehicle: *vehicle,
            environment: *environment,
            distance_km: report.mission.distance_km,
            avg_speed_kmh: report.mission.avg_speed_kmh,
            fuel_consumed_liters: report.fuel_liters,
            cost_per_km: report.cost_per_km,
        }
    }
}

/// A stored calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationRecord {
    pub id: i64,
    #[serde(flatten)]
    pub calculation: NewCalculation,
    pub calculated_at: String,
}

impl CalculationRecord {
    /// `calculated_at` trimmed to minutes; unparseable values are returned as-is.
    pub fn formatted_date(&self) -> String {
        if self.calculated_at.is_empty() {
            return "Unknown".to_string();
        }
        match NaiveDateTime::parse_from_str(&self.calculated_at, TIMESTAMP_FORMAT) {
            Ok(ts) => ts.format(DISPLAY_FORMAT).to_string(),
            Err(_) => self.calculated_at.clone(),
        }
    }

    /// Fuel spend at the given price per liter.
    pub fn total_fuel_cost(&self, price_per_liter: f64) -> f64 {
        self.calculation.fuel_consumed_liters * price_per_liter
    }
}

/// Criteria for [`crate::Store::search_calculations`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryFilter {
    pub username: Option<String>,
    pub vehicle_id: Option<String>,
    /// Inclusive lower bound on the calculation date.
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on the calculation date.
    pub end_date: Option<NaiveDate>,
    pub limit: Option<usize>,
}

/// Aggregate figures over a set of calculations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HistoryStats {
    pub count: u64,
    pub total_fuel_liters: f64,
    pub average_fuel_liters: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(calculated_at: &str) -> CalculationRecord {
        CalculationRecord {
            id: 1,
            calculation: NewCalculation {
                username: "ana".to_string(),
                vehicle_id: "V1".to_string(),
                mission_name: "run".to_string(),
                vehicle: VehicleProfile::new(1500.0, 0.32, 2.2, 90.0),
                environment: EnvironmentState::default(),
                distance_km: 100.0,
                avg_speed_kmh: 100.0,
                fuel_consumed_liters: 5.0,
                cost_per_km: 0.11,
            },
            calculated_at: calculated_at.to_string(),
        }
    }

    #[test]
    fn formats_date_to_minutes() {
        assert_eq!(record("2025-03-14 09:26:53").formatted_date(), "2025-03-14 09:26");
    }

    #[test]
    fn keeps_unparseable_dates() {
        assert_eq!(record("yesterday").formatted_date(), "yesterday");
        assert_eq!(record("").formatted_date(), "Unknown");
    }

    #[test]
    fn total_cost_uses_given_price() {
        assert_eq!(record("").total_fuel_cost(2.5), 12.5);
    }
}
