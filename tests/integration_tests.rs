//! Integration tests for the atelier CLI
//!
//! These tests exercise the non-interactive commands end-to-end using
//! assert_cmd. The interactive `run` command needs a terminal and is
//! covered by the unit tests of its step logic instead.

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to get an atelier command
fn atelier() -> Command {
    Command::cargo_bin("atelier").unwrap()
}

#[test]
fn test_help() {
    atelier()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("workshops"))
        .stdout(predicate::str::contains("scales"))
        .stdout(predicate::str::contains("demo"));
}

#[test]
fn test_version() {
    atelier().arg("--version").assert().success();
}

#[test]
fn test_workshops_lists_all_five() {
    atelier()
        .arg("workshops")
        .assert()
        .success()
        .stdout(predicate::str::contains("Atelier 1: Socle de sécurité"))
        .stdout(predicate::str::contains("Atelier 5: Traitement du risque"));
}

#[test]
fn test_workshops_json_catalog_shape() {
    let output = atelier()
        .args(["workshops", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let catalog: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = catalog.as_array().unwrap();
    assert_eq!(entries.len(), 5);

    let step_counts: Vec<usize> = entries
        .iter()
        .map(|e| e["steps"].as_array().unwrap().len())
        .collect();
    assert_eq!(step_counts, vec![5, 4, 4, 4, 5]);
    assert_eq!(entries[0]["id"], 1);
}

#[test]
fn test_workshops_md_format() {
    atelier()
        .args(["workshops", "--format", "md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Atelier 2: Sources de risque"));
}

#[test]
fn test_scales_shows_labels_and_bands() {
    atelier()
        .arg("scales")
        .assert()
        .success()
        .stdout(predicate::str::contains("Très élevée"))
        .stdout(predicate::str::contains("Négligeable"))
        .stdout(predicate::str::contains("Critique"));
}

#[test]
fn test_scales_json_thresholds() {
    let output = atelier()
        .args(["scales", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let scales: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(scales["probability"].as_array().unwrap().len(), 5);
    assert_eq!(scales["likelihood"].as_array().unwrap().len(), 4);

    // 25-scale banding: low tops out at 6, critical starts at 19
    let bands = scales["bands_25"].as_array().unwrap();
    assert_eq!(bands[0]["max"], 6);
    assert_eq!(bands[3]["min"], 19);

    // 16-scale banding: critical starts at 12
    let bands16 = scales["bands_16"].as_array().unwrap();
    assert_eq!(bands16[3]["min"], 12);
}

#[test]
fn test_demo_prints_report_sections() {
    atelier()
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rapport d'analyse de risques"))
        .stdout(predicate::str::contains("Socle de sécurité"))
        .stdout(predicate::str::contains("valeur métier:"))
        .stdout(predicate::str::contains("bien support:"))
        .stdout(predicate::str::contains("menace:"))
        .stdout(predicate::str::contains("Répartition des risques"))
        .stdout(predicate::str::contains("Risques majeurs"))
        .stdout(predicate::str::contains("Tendance (simulée)"));
}

#[test]
fn test_demo_json_report_shape() {
    let output = atelier()
        .args(["demo", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["heatmap"].as_array().unwrap().len(), 5);
    assert_eq!(report["pie"].as_array().unwrap().len(), 4);
    assert_eq!(report["counts"]["risks"], 3);
    assert_eq!(report["business_values"].as_array().unwrap().len(), 3);
    assert_eq!(report["assets"].as_array().unwrap().len(), 2);
    assert_eq!(report["threats"].as_array().unwrap().len(), 2);
    assert_eq!(report["distribution"]["critical"], 1);
    assert_eq!(report["percentages"]["critical"], 33);

    // heatmap rows run impact 5 down to 1
    assert_eq!(report["heatmap"][0]["id"], "5");
    assert_eq!(report["heatmap"][4]["id"], "1");
}

#[test]
fn test_demo_yaml_report_parses() {
    let output = atelier()
        .args(["demo", "--format", "yaml"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_yml::Value = serde_yml::from_slice(&output.stdout).unwrap();
    assert!(report["scope"]["description"].as_str().is_some());
    assert_eq!(report["radar"].as_sequence().unwrap().len(), 3);
}

#[test]
fn test_demo_md_report() {
    atelier()
        .args(["demo", "--format", "md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Rapport d'analyse de risques"))
        .stdout(predicate::str::contains("| Niveau | Nombre | Part |"));
}

#[test]
fn test_demo_quiet_suppresses_banner() {
    atelier()
        .args(["demo", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Session d'exemple").not());
}

#[test]
fn test_unknown_command_fails() {
    atelier()
        .arg("nonexistent")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nonexistent"));
}
