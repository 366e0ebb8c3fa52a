//! Vehicle, preset, price and modifier management through the CLI.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::{tempdir, TempDir};

fn cli(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("fuelcalc");
    cmd.env("RUST_LOG", "error")
        .env_remove("FUELCALC_USER")
        .arg("--db")
        .arg(dir.path().join("records.db"));
    cmd
}

fn add_vehicle(dir: &TempDir, id: &str) {
    cli(dir)
        .args(["vehicle", "add", id, "--model", "Hilux", "--mass", "2100"])
        .args(["--drag", "0.4", "--area", "2.9", "--power", "110", "--ac"])
        .assert()
        .success()
        .stdout(contains(format!("Vehicle [{id}] added successfully.")));
}

#[test]
fn vehicle_lifecycle() {
    let dir = tempdir().expect("create temp dir");
    cli(&dir)
        .args(["vehicle", "list"])
        .assert()
        .success()
        .stdout(contains("No vehicles registered."));

    add_vehicle(&dir, "HILUX-01");
    cli(&dir)
        .args(["vehicle", "list"])
        .assert()
        .success()
        .stdout(contains("Registered vehicles (1):"))
        .stdout(contains("HILUX-01"));

    cli(&dir)
        .args(["vehicle", "update", "HILUX-01", "--mass", "2300", "--ac", "false"])
        .assert()
        .success()
        .stdout(contains("Vehicle [HILUX-01] updated successfully."));
    cli(&dir)
        .args(["vehicle", "show", "HILUX-01"])
        .assert()
        .success()
        .stdout(contains("Vehicle HILUX-01 (Hilux)"))
        .stdout(contains("2300 kg"))
        .stdout(contains("Air conditioning:   No"));

    cli(&dir)
        .args(["vehicle", "delete", "HILUX-01"])
        .assert()
        .success();
    cli(&dir)
        .args(["vehicle", "show", "HILUX-01"])
        .assert()
        .failure()
        .stderr(contains("unknown vehicle id"));
}

#[test]
fn duplicate_vehicle_is_rejected() {
    let dir = tempdir().expect("create temp dir");
    add_vehicle(&dir, "V1");
    cli(&dir)
        .args(["vehicle", "add", "V1", "--model", "Other", "--mass", "900"])
        .args(["--drag", "0.3", "--area", "2.0", "--power", "60"])
        .assert()
        .failure()
        .stderr(contains("vehicle V1 already exists"));
}

#[test]
fn invalid_vehicle_attributes_are_rejected() {
    let dir = tempdir().expect("create temp dir");
    cli(&dir)
        .args(["vehicle", "add", "BAD", "--model", "Broken", "--mass", "0"])
        .args(["--drag", "0.3", "--area", "2.0", "--power", "60"])
        .assert()
        .failure()
        .stderr(contains("mass"));
}

#[test]
fn preset_lifecycle() {
    let dir = tempdir().expect("create temp dir");
    cli(&dir)
        .args(["preset", "save", "Mud Run", "--terrain", "mud", "--climate", "rainy"])
        .args(["--gradient", "0.01", "--roughness", "2.5", "--temp", "24"])
        .assert()
        .success()
        .stdout(contains("Preset Mud Run saved successfully."));

    cli(&dir)
        .args(["preset", "list"])
        .assert()
        .success()
        .stdout(contains("Mission presets (1):"))
        .stdout(contains("Mud Run"));

    cli(&dir)
        .args(["preset", "delete", "Mud Run"])
        .assert()
        .success();
    cli(&dir)
        .args(["preset", "list"])
        .assert()
        .success()
        .stdout(contains("No presets saved."));
}

#[test]
fn price_defaults_and_persists() {
    let dir = tempdir().expect("create temp dir");
    cli(&dir)
        .args(["price", "show"])
        .assert()
        .success()
        .stdout(contains("Current Fuel Price: RM 2.00/L"));

    cli(&dir).args(["price", "set", "2.05"]).assert().success();
    cli(&dir)
        .args(["price", "show"])
        .assert()
        .success()
        .stdout(contains("RM 2.05/L"));
}

#[test]
fn rejected_price_keeps_previous_value() {
    let dir = tempdir().expect("create temp dir");
    cli(&dir).args(["price", "set", "1.80"]).assert().success();
    cli(&dir)
        .args(["price", "set", "-1"])
        .assert()
        .failure()
        .stderr(contains("fuel price was not changed"));
    cli(&dir)
        .args(["price", "show"])
        .assert()
        .success()
        .stdout(contains("RM 1.80/L"));
}

#[test]
fn modifier_lookups_fall_back_for_unknown_categories() {
    let dir = tempdir().expect("create temp dir");
    cli(&dir)
        .args(["modifiers", "show", "--terrain", "glacier", "--climate", "rainy"])
        .assert()
        .success()
        .stdout(contains("Terrain glacier: 0.90"))
        .stdout(contains("Climate rainy: 0.90"));
}

#[test]
fn stored_terrain_modifier_overrides_table() {
    let dir = tempdir().expect("create temp dir");
    cli(&dir)
        .args(["modifiers", "set-terrain", "desert", "0.6"])
        .assert()
        .success();
    cli(&dir)
        .args(["modifiers", "show", "--terrain", "desert"])
        .assert()
        .success()
        .stdout(contains("Terrain desert: 0.60"));
    cli(&dir)
        .args(["modifiers", "show"])
        .assert()
        .success()
        .stdout(contains("Stored terrain overrides:"))
        .stdout(contains("Climate modifiers:"));

    cli(&dir)
        .args(["modifiers", "set-terrain", "desert", "0"])
        .assert()
        .failure();
    cli(&dir)
        .args(["modifiers", "show", "--terrain", "desert"])
        .assert()
        .success()
        .stdout(contains("0.60").and(contains("0.00").not()));
}
