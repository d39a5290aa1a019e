//! End-to-end tests for building and reading catalogs

use chrono::{TimeZone, Utc};
use sandbox_core::catalog::{
    CatalogKind, CatalogStore, Inventory, MessageSummary, build_mt_catalog, build_mx_catalog,
    build_summary, write_catalogs,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_json(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn create_scenarios() -> TempDir {
    let dir = TempDir::new().unwrap();
    let mt = dir.path().join("mt");
    let mx = dir.path().join("mx");

    write_json(
        &mt.join("mt103/index.json"),
        r#"{"description": "Single Customer Credit Transfer"}"#,
    );
    write_json(&mt.join("mt103/standard.json"), "{}");
    write_json(&mt.join("mt103/cbpr_stp_compliant.json"), "{}");
    write_json(&mt.join("mt202/fi_transfer.json"), "{}");
    write_json(&mt.join("mt202/notes.txt"), "ignored");
    write_json(&mt.join("README.json"), "{}");
    fs::create_dir_all(mt.join("common")).unwrap();

    write_json(
        &mx.join("pacs008/index.json"),
        r#"{"description": "FI to FI Customer Credit Transfer"}"#,
    );
    write_json(&mx.join("pacs008/uetr_tracking.json"), "{}");
    write_json(&mx.join("camt025/receipt.json"), "{}");
    write_json(&mx.join("admi002/rejected.json"), "{}");

    dir
}

#[test]
fn test_build_mt_catalog() {
    let scenarios = create_scenarios();
    let mt = build_mt_catalog(&scenarios.path().join("mt")).unwrap();

    let types: Vec<&str> = mt
        .dropdown
        .message_types
        .iter()
        .map(|t| t.value.as_str())
        .collect();
    assert_eq!(types, vec!["MT103", "MT202"]);
    assert_eq!(mt.dropdown.total_types, 2);
    assert_eq!(mt.dropdown.total_scenarios, 3);

    let mt103 = &mt.dropdown.scenarios_by_type["MT103"];
    assert_eq!(mt103[0].value, "cbpr_stp_compliant");
    assert_eq!(mt103[0].label, "CBPR+ STP Compliant");
    assert_eq!(mt103[1].value, "standard");

    assert_eq!(
        mt.dropdown.message_types[0].description.as_deref(),
        Some("Single Customer Credit Transfer")
    );
    assert_eq!(mt.dropdown.message_types[1].description.as_deref(), Some(""));

    let inventory = &mt.inventory.message_types["MT202"];
    assert_eq!(inventory.scenario_count, 1);
    assert_eq!(inventory.scenarios[0].file, "fi_transfer.json");
    assert_eq!(inventory.scenarios[0].display_name, "FI Transfer");
}

#[test]
fn test_build_mx_catalog_renames_types() {
    let scenarios = create_scenarios();
    let mx = build_mx_catalog(&scenarios.path().join("mx")).unwrap();

    let types: Vec<&str> = mx
        .dropdown
        .message_types
        .iter()
        .map(|t| t.value.as_str())
        .collect();
    assert_eq!(types, vec!["camt.025", "pacs.008"]);
    assert_eq!(mx.inventory.total_scenarios, 2);
    assert_eq!(
        mx.inventory.description,
        "ISO 20022 MX Message Test Scenarios Inventory"
    );
}

#[test]
fn test_write_and_read_back() {
    let scenarios = create_scenarios();
    let out = TempDir::new().unwrap();

    let mt = build_mt_catalog(&scenarios.path().join("mt")).unwrap();
    let mx = build_mx_catalog(&scenarios.path().join("mx")).unwrap();
    let generated_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let summary = build_summary(&mt, &mx, generated_at);

    let written = write_catalogs(out.path(), &mt, &mx, &summary).unwrap();
    assert_eq!(written.len(), 5);

    let store = CatalogStore::new(out.path());
    assert_eq!(store.message_types(CatalogKind::SwiftMt).len(), 2);
    assert_eq!(
        store
            .first_scenario(CatalogKind::Mx, "pacs.008")
            .map(|s| s.label),
        Some("UETR Tracking".to_string())
    );
    assert_eq!(
        store.description(CatalogKind::Mx, "pacs.008").as_deref(),
        Some("FI to FI Customer Credit Transfer")
    );

    let inventory: Inventory =
        serde_json::from_str(&fs::read_to_string(out.path().join("swift_mt_inventory.json")).unwrap())
            .unwrap();
    assert!(inventory.iso20022_mx_messages.is_none());
    assert_eq!(inventory.family().unwrap().total_message_types, 2);

    let summary: MessageSummary =
        serde_json::from_str(&fs::read_to_string(out.path().join("message_summary.json")).unwrap())
            .unwrap();
    assert_eq!(summary.generated_at, "2024-05-01T12:00:00+00:00");
    assert_eq!(summary.statistics.total_message_types, 4);
    assert_eq!(summary.statistics.total_scenarios, 5);
    assert_eq!(summary.message_types.iso20022_mx, vec!["camt.025", "pacs.008"]);
}

#[test]
fn test_dropdown_file_layout() {
    let scenarios = create_scenarios();
    let out = TempDir::new().unwrap();
    let mt = build_mt_catalog(&scenarios.path().join("mt")).unwrap();
    let mx = build_mx_catalog(&scenarios.path().join("mx")).unwrap();
    let summary = build_summary(&mt, &mx, Utc::now());
    write_catalogs(out.path(), &mt, &mx, &summary).unwrap();

    let raw = fs::read_to_string(out.path().join("swift_mt_dropdown.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(
        keys,
        vec!["messageTypes", "scenariosByType", "totalTypes", "totalScenarios"]
    );
    assert!(raw.contains("\n  \"messageTypes\": ["));
}
