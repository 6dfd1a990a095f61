//! Corruption recovery tests for munch.
//!
//! These tests verify the system can handle:
//! - Corrupted day log files
//! - Corrupted settings files
//! - Day logs with missing meal slots
//! - Day logs with a single unreadable entry

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cli(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("munch"));
    cmd.env("XDG_CONFIG_HOME", dir.join("config"))
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(dir.join("data"));
    cmd
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn write_data(dir: &Path, file: &str, contents: &str) {
    fs::create_dir_all(dir.join("data")).unwrap();
    fs::write(dir.join("data").join(file), contents).expect("Failed to write data file");
}

#[test]
fn test_corrupted_day_logs_read_as_empty() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();
    write_data(dir, "munch-the-rainbow.json", "{ invalid json }}}}");

    cli(dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Your mosaic is empty"));

    cli(dir).arg("week").assert().success();
}

#[test]
fn test_add_replaces_corrupted_day_logs() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();
    write_data(dir, "munch-the-rainbow.json", "[1, 2, ");

    cli(dir)
        .args(["add", "--meal", "breakfast", "-c", "fruits", "--name", "Banana"])
        .args(["--date", "2024-05-05"])
        .assert()
        .success();

    let raw = fs::read_to_string(dir.join("data/munch-the-rainbow.json")).unwrap();
    let logs: serde_json::Value = serde_json::from_str(&raw).expect("Day logs should be valid again");
    assert_eq!(logs["2024-05-05"]["meals"][0]["entries"][0]["name"], "Banana");
}

#[test]
fn test_corrupted_settings_fall_back_to_defaults() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();
    write_data(dir, "munch-the-rainbow-settings.json", "showMacroDetails=yes");

    cli(dir)
        .arg("settings")
        .assert()
        .success()
        .stdout(predicate::str::contains("show_macro_details = false"))
        .stdout(predicate::str::contains("onboarded          = false"));
}

#[test]
fn test_missing_slots_are_restored() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();
    write_data(
        dir,
        "munch-the-rainbow.json",
        r#"{"2024-06-01":{"date":"2024-06-01","meals":[
            {"type":"dinner","entries":[{"id":"x1","name":"Curry","categories":["veggies"],"timestamp":1}]}
        ]}}"#,
    );

    cli(dir)
        .args(["add", "--meal", "breakfast", "-c", "carbs", "--name", "Porridge"])
        .args(["--date", "2024-06-01"])
        .assert()
        .success();

    let raw = fs::read_to_string(dir.join("data/munch-the-rainbow.json")).unwrap();
    let logs: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let meals = logs["2024-06-01"]["meals"].as_array().unwrap();
    let types: Vec<_> = meals.iter().map(|m| m["type"].as_str().unwrap()).collect();
    assert_eq!(types, vec!["breakfast", "lunch", "dinner", "snack"]);
    assert_eq!(meals[0]["entries"][0]["name"], "Porridge");
    assert_eq!(meals[2]["entries"][0]["name"], "Curry");
}

#[test]
fn test_empty_day_log_file() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();
    write_data(dir, "munch-the-rainbow.json", "");

    cli(dir)
        .args(["day", "--date", "2024-06-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Your mosaic is empty"));
}

#[test]
fn test_unknown_category_keeps_other_days() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();
    write_data(
        dir,
        "munch-the-rainbow.json",
        r#"{"2024-03-01":{"date":"2024-03-01","meals":[
              {"type":"lunch","entries":[{"id":"a1","name":"Rice","categories":["carbs"],"timestamp":1}]}]},
            "2024-03-02":{"date":"2024-03-02","meals":[
              {"type":"snack","entries":[{"id":"b1","name":"Candy","categories":["sweets"],"timestamp":2}]}]}}"#,
    );

    cli(dir)
        .args(["add", "--meal", "dinner", "-c", "veggies", "--name", "Stew"])
        .args(["--date", "2024-03-03"])
        .assert()
        .success();

    let raw = fs::read_to_string(dir.join("data/munch-the-rainbow.json")).unwrap();
    let logs: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(logs["2024-03-01"]["meals"][1]["entries"][0]["name"], "Rice");
    assert_eq!(logs["2024-03-03"]["meals"][2]["entries"][0]["name"], "Stew");
    assert!(!raw.contains("Candy"));
}
