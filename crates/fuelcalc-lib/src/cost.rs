//! Fuel price configuration and the cost-per-kilometer model.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_FUEL_PRICE, DEFAULT_OVERHEAD_FACTOR, MAX_COST_PER_KM};
use crate::error::{Error, Result};

/// Price of one liter of fuel (RM). Always finite and positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct FuelPrice(f64);

impl FuelPrice {
    pub fn new(price: f64) -> Result<Self> {
        Self::check(price)?;
        Ok(Self(price))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// Replace the price. A non-positive value is rejected and the previous
    /// price is kept.
    pub fn set(&mut self, price: f64) -> Result<()> {
        Self::check(price)?;
        self.0 = price;
        Ok(())
    }

    fn check(price: f64) -> Result<()> {
        if !price.is_finite() || price <= 0.0 {
            return Err(Error::Configuration {
                message: format!("fuel price must be a finite positive number, got {price}"),
            });
        }
        Ok(())
    }
}

impl Default for FuelPrice {
    fn default() -> Self {
        Self(DEFAULT_FUEL_PRICE)
    }
}

impl TryFrom<f64> for FuelPrice {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<FuelPrice> for f64 {
    fn from(price: FuelPrice) -> Self {
        price.0
    }
}

impl fmt::Display for FuelPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RM {:.2}/L", self.0)
    }
}

/// Converts fuel efficiency into money, using a price snapshot taken at
/// construction time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    price: FuelPrice,
    overhead_factor: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self::new(FuelPrice::default())
    }
}

impl CostModel {
    pub fn new(price: FuelPrice) -> Self {
        Self {
            price,
            overhead_factor: DEFAULT_OVERHEAD_FACTOR,
        }
    }

    /// Replace the overhead multiplier. Negative or non-finite factors are
    /// rejected with [`Error::Configuration`].
    pub fn with_overhead(mut self, overhead_factor: f64) -> Result<Self> {
        if !overhead_factor.is_finite() || overhead_factor < 0.0 {
            return Err(Error::Configuration {
                message: format!(
                    "overhead factor must be a finite non-negative number, got {overhead_factor}"
                ),
            });
        }
        self.overhead_factor = overhead_factor;
        Ok(self)
    }

    pub fn price(&self) -> FuelPrice {
        self.price
    }

    pub fn overhead_factor(&self) -> f64 {
        self.overhead_factor
    }

    /// Cost per kilometer for a given efficiency, clamped to `[0, 100]`.
    /// Degenerate efficiencies (zero, negative or non-finite) cost nothing.
    pub fn calculate(&self, km_per_liter: f64) -> f64 {
        if !km_per_liter.is_finite() || km_per_liter <= 0.0 {
            return 0.0;
        }
        let cost = (1.0 / km_per_liter) * self.price.get() * self.overhead_factor;
        if cost.is_nan() {
            return 0.0;
        }
        cost.clamp(0.0, MAX_COST_PER_KM)
    }

    /// Total fuel spend for a volume, without overhead or clamping.
    pub fn calculate_total_cost(&self, fuel_liters: f64) -> f64 {
        fuel_liters * self.price.get()
    }

    /// Price label such as `RM 2.00/L`.
    pub fn formatted_price(&self) -> String {
        self.price.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_cost_per_km() {
        let model = CostModel::new(FuelPrice::new(2.0).unwrap());
        let cost = model.calculate(19.907);
        assert!((cost - 0.1105).abs() < 1e-4, "cost={cost}");
    }

    #[test]
    fn degenerate_efficiency_costs_nothing() {
        let model = CostModel::default();
        assert_eq!(model.calculate(0.0), 0.0);
        assert_eq!(model.calculate(-3.0), 0.0);
        assert_eq!(model.calculate(f64::NAN), 0.0);
    }

    #[test]
    fn cost_is_clamped_to_upper_bound() {
        let model = CostModel::new(FuelPrice::new(50.0).unwrap());
        assert_eq!(model.calculate(0.001), 100.0);
    }

    #[test]
    fn invalid_overhead_is_rejected() {
        for factor in [f64::NAN, f64::INFINITY, -0.5] {
            let err = CostModel::default()
                .with_overhead(factor)
                .expect_err("bad overhead");
            assert!(matches!(err, Error::Configuration { .. }));
        }

        let model = CostModel::new(FuelPrice::new(2.0).unwrap())
            .with_overhead(1.0)
            .expect("valid overhead");
        assert_eq!(model.overhead_factor(), 1.0);
        assert!((model.calculate(10.0) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn cost_stays_in_range_for_extreme_efficiency() {
        let model = CostModel::default();
        for km_per_l in [f64::MIN_POSITIVE, 1e-300, 1e300, f64::MAX] {
            let cost = model.calculate(km_per_l);
            assert!((0.0..=100.0).contains(&cost), "km/L {km_per_l}: {cost}");
        }
    }

    #[test]
    fn total_cost_is_unclamped() {
        let model = CostModel::new(FuelPrice::new(3.5).unwrap());
        assert_eq!(model.calculate_total_cost(1000.0), 3500.0);
    }

    #[test]
    fn rejected_price_keeps_previous_value() {
        let mut price = FuelPrice::default();
        price.set(2.35).expect("valid price");
        assert_eq!(price.get(), 2.35);

        let err = price.set(0.0).expect_err("zero price");
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(price.set(-1.0).is_err());
        assert_eq!(price.get(), 2.35);
    }

    #[test]
    fn formats_price_label() {
        let model = CostModel::new(FuelPrice::new(2.05).unwrap());
        assert_eq!(model.formatted_price(), "RM 2.05/L");
    }
}
