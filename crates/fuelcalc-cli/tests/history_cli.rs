use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::str::contains;
use tempfile::{tempdir, TempDir};

fn cli(dir: &TempDir, user: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("fuelcalc");
    cmd.env("RUST_LOG", "error")
        .arg("--db")
        .arg(dir.path())
        .arg("--user")
        .arg(user);
    cmd
}

fn save_estimate(dir: &TempDir, user: &str, mission: &str, distance: &str) {
    cli(dir, user)
        .args(["estimate", "--mass", "1500", "--drag", "0.32", "--area", "2.2"])
        .args(["--power", "90", "--speed", "100", "--save"])
        .args(["--distance", distance, "--mission", mission])
        .assert()
        .success();
}

#[test]
fn lists_only_own_calculations() {
    let dir = tempdir().expect("create temp dir");
    save_estimate(&dir, "aina", "Commute", "100");
    save_estimate(&dir, "badrul", "Delivery", "50");

    cli(&dir, "aina")
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(contains("Calculations (1):"))
        .stdout(contains("Commute"));

    cli(&dir, "aina")
        .args(["history", "recent"])
        .assert()
        .success()
        .stdout(contains("Calculations (2):"))
        .stdout(contains("Delivery"));

    cli(&dir, "aina")
        .args(["history", "vehicle", "manual"])
        .assert()
        .success()
        .stdout(contains("Calculations (2):"));
}

#[test]
fn shows_calculation_detail() {
    let dir = tempdir().expect("create temp dir");
    save_estimate(&dir, "aina", "Commute", "100");

    cli(&dir, "aina")
        .args(["history", "show", "1"])
        .assert()
        .success()
        .stdout(contains("Calculation 1 by aina"))
        .stdout(contains("Fuel:      5.022 L"))
        .stdout(contains("Fuel cost: RM 10.04 at RM 2.00/L"));

    cli(&dir, "aina")
        .args(["history", "show", "42"])
        .assert()
        .failure()
        .stderr(contains("calculation 42 not found"));
}

#[test]
fn delete_requires_ownership() {
    let dir = tempdir().expect("create temp dir");
    save_estimate(&dir, "aina", "Commute", "100");

    cli(&dir, "badrul")
        .args(["history", "delete", "1"])
        .assert()
        .failure()
        .stderr(contains("does not belong to badrul"));

    cli(&dir, "aina")
        .args(["history", "delete", "1"])
        .assert()
        .success()
        .stdout(contains("Calculation 1 deleted."));
    cli(&dir, "aina")
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(contains("No calculations found."));
}

#[test]
fn clear_and_stats_are_scoped_to_user() {
    let dir = tempdir().expect("create temp dir");
    save_estimate(&dir, "aina", "A", "100");
    save_estimate(&dir, "aina", "B", "100");
    save_estimate(&dir, "badrul", "C", "100");

    cli(&dir, "aina")
        .args(["history", "stats"])
        .assert()
        .success()
        .stdout(contains("Statistics for aina:"))
        .stdout(contains("Calculations:       2"));

    cli(&dir, "aina")
        .args(["history", "clear"])
        .assert()
        .success()
        .stdout(contains("Removed 2 calculation(s) for aina."));

    cli(&dir, "aina")
        .args(["history", "stats", "--all"])
        .assert()
        .success()
        .stdout(contains("Statistics for all users:"))
        .stdout(contains("Calculations:       1"));
}

#[test]
fn exports_history_to_csv() {
    let dir = tempdir().expect("create temp dir");
    let target = dir.path().join("history.csv");

    cli(&dir, "aina")
        .args(["history", "export"])
        .arg(&target)
        .assert()
        .failure()
        .stderr(contains("no calculations to export"));

    save_estimate(&dir, "aina", "Commute, north", "100");
    cli(&dir, "aina")
        .args(["history", "export"])
        .arg(&target)
        .assert()
        .success()
        .stdout(contains("Exported 1 calculation(s)"));

    let csv = fs::read_to_string(&target).expect("read export");
    let mut lines = csv.lines();
    assert!(lines.next().expect("header").starts_with("ID,"));
    assert!(lines.next().expect("row").contains("\"Commute, north\""));
}

#[test]
fn search_filters_by_vehicle_and_rejects_bad_dates() {
    let dir = tempdir().expect("create temp dir");
    save_estimate(&dir, "aina", "Commute", "100");

    cli(&dir, "aina")
        .args(["history", "search", "--vehicle", "manual", "--from", "2000-01-01"])
        .assert()
        .success()
        .stdout(contains("Calculations (1):"));
    cli(&dir, "aina")
        .args(["history", "search", "--to", "2000-01-01"])
        .assert()
        .success()
        .stdout(contains("No calculations found."));
    cli(&dir, "aina")
        .args(["history", "search", "--from", "31/01/2024"])
        .assert()
        .failure()
        .stderr(contains("expected a date"));
}

#[test]
fn json_listing_is_machine_readable() {
    let dir = tempdir().expect("create temp dir");
    save_estimate(&dir, "aina", "Commute", "100");

    let output = cli(&dir, "aina")
        .args(["--format", "json", "history", "list"])
        .output()
        .expect("run history list");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let rows = value.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["username"], "aina");
    assert_eq!(rows[0]["mission_name"], "Commute");
}
