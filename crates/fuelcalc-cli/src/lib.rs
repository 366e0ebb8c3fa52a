//! Fuel mission estimator CLI library.
//!
//! This crate provides the output formatting shared by the `fuelcalc`
//! subcommands.

pub mod output;
