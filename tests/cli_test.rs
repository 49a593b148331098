//! Tests for the tile-migrate binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const INPUT: &str = r#"{
  "properties": {
    ".properties.splunk_host": { "value": "https://splunk.example.com:8088" },
    ".forms.{advanced}.properties.{add_app_info}": { "value": "true" }
  }
}"#;

fn tile_migrate() -> Command {
    Command::cargo_bin("tile-migrate").unwrap()
}

#[test]
fn test_list_shows_migration() {
    tile_migrate()
        .args(["list", "--catalog", "tile-product"])
        .assert()
        .success()
        .stdout(predicate::str::contains("202007281325_splunk-nozzle"))
        .stdout(predicate::str::contains("tile/product/migrations/v1"));
}

#[test]
fn test_apply_from_stdin() {
    let output = tile_migrate()
        .args(["apply", "202007281325_splunk-nozzle"])
        .write_stdin(INPUT)
        .output()
        .unwrap();

    assert!(output.status.success());
    let migrated: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        migrated["properties"][".forms.{advanced}.properties.{add_app_info}"]["value"],
        "AppName,OrgName,OrgGuid,SpaceName,SpaceGuid"
    );
    assert_eq!(
        migrated["properties"][".properties.splunk_host"]["value"],
        "https://splunk.example.com:8088"
    );
}

#[test]
fn test_apply_yaml_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("properties.yml");
    let output = temp_dir.path().join("migrated.yml");

    fs::write(
        &input,
        "properties:\n  \".forms.{advanced}.properties.{add_app_info}\":\n    value: \"false\"\n",
    )
    .unwrap();

    tile_migrate()
        .args(["apply", "202007281325_splunk-nozzle", "--catalog", "standalone"])
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let migrated: serde_yaml::Value =
        serde_yaml::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        migrated["properties"][".forms.{advanced}.properties.{add_app_info}"]["value"],
        serde_yaml::Value::String(String::new())
    );
}

#[test]
fn test_apply_missing_property_fails() {
    tile_migrate()
        .args(["apply", "202007281325_splunk-nozzle"])
        .write_stdin(r#"{"properties": {}}"#)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("202007281325_splunk-nozzle"));
}

#[test]
fn test_apply_unknown_migration_fails() {
    tile_migrate()
        .args(["apply", "209901010000_splunk-nozzle"])
        .write_stdin(INPUT)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown migration"));
}

#[test]
fn test_validate() {
    tile_migrate()
        .args(["validate", "--catalog", "standalone"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1/1 migrations valid"));
}
