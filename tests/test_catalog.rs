//! Catalog loading tests against on-disk catalog files.

mod common;

use std::fs;

use stay_feasibility::calculator::audit_scenario;
use stay_feasibility::controls::DEFAULT_FEE_RATE;
use stay_feasibility::{Catalog, FeasibilityError};

#[test]
fn directory_load_collects_nested_files() {
    let tmp = common::setup_catalog_dir();
    let catalog = Catalog::load(tmp.path()).unwrap();

    assert_eq!(catalog.len(), 2);
    assert!(catalog.get("study_madinah").is_some());
    assert!(catalog.get("study_riyadh").is_some());
}

#[test]
fn directory_load_is_ordered_by_path() {
    let tmp = common::setup_catalog_dir();
    let catalog = Catalog::load(tmp.path()).unwrap();

    // madinah.json sorts before riyadh/lease.json
    assert_eq!(catalog.active(None).unwrap().id, "study_madinah");
}

#[test]
fn single_object_file_loads() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("one.json");
    fs::write(&path, common::long_term_json().to_string()).unwrap();

    let catalog = Catalog::load(&path).unwrap();
    let scenario = catalog.active(None).unwrap();
    assert_eq!(scenario.id, "study_riyadh");
    assert_eq!(scenario.category, "long_term");
    assert_eq!(scenario.total_units(), 4);
}

#[test]
fn duplicate_across_files_is_rejected() {
    let tmp = common::setup_catalog_dir();
    fs::write(
        tmp.path().join("copy.json"),
        common::long_term_json().to_string(),
    )
    .unwrap();

    let err = Catalog::load(tmp.path()).unwrap_err();
    assert!(matches!(err, FeasibilityError::DuplicateScenario(id) if id == "study_riyadh"));
}

#[test]
fn malformed_json_reports_its_path() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("broken.json");
    fs::write(&path, "{ \"id\": ").unwrap();

    match Catalog::load(&path).unwrap_err() {
        FeasibilityError::Json { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected Json error, got {:?}", other),
    }
}

#[test]
fn schema_error_names_the_missing_field() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("nameless.json");
    let mut scenario = common::long_term_json();
    scenario.as_object_mut().unwrap().remove("name");
    fs::write(&path, scenario.to_string()).unwrap();

    let err = Catalog::load(&path).unwrap_err();
    let message = err.to_string();
    assert!(matches!(err, FeasibilityError::Json { .. }));
    assert!(message.contains("missing field `name`"), "{}", message);
    assert!(!message.contains("untagged"), "{}", message);
}

#[test]
fn missing_file_is_io_error() {
    let tmp = tempfile::tempdir().unwrap();
    let err = Catalog::load(&tmp.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, FeasibilityError::Io(_)));
}

#[test]
fn empty_directory_is_empty_catalog() {
    let tmp = tempfile::tempdir().unwrap();
    let err = Catalog::load(tmp.path()).unwrap_err();
    assert!(matches!(err, FeasibilityError::EmptyCatalog));
}

#[test]
fn fixture_seed_values_audit_clean() {
    let warnings = audit_scenario(&common::long_term(), DEFAULT_FEE_RATE).unwrap();
    assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);
}

#[test]
fn audit_reports_unit_mix_revenue_drift() {
    let mut scenario = common::long_term();
    scenario.unit_mix[1].average_price = 40000.0;

    let warnings = audit_scenario(&scenario, DEFAULT_FEE_RATE).unwrap();
    assert_eq!(warnings.len(), 3);
    assert!(warnings.iter().all(|w| w.to_string().contains("unit mix total")));
    assert!(warnings[1].to_string().contains("164000"));
}
