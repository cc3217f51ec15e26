//! Integration tests for the wrec CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get a wrec command isolated from the user's environment
fn wrec(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("wrec").unwrap();
    cmd.current_dir(tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join(".xdg"))
        .env_remove("WREC_DATA_DIR")
        .env_remove("WREC_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper to create a test project in a temp directory
fn setup_test_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    wrec(&tmp).arg("init").assert().success();
    tmp
}

fn waste_file(tmp: &TempDir) -> PathBuf {
    tmp.path().join("data/waste_data.json")
}

/// Helper to create a waste entry, returning its ID
fn create_waste(tmp: &TempDir, city: &str, categories: &str) -> String {
    let output = wrec(tmp)
        .args([
            "-f",
            "id",
            "waste",
            "new",
            "--city",
            city,
            "--category",
            categories,
            "--quantity",
            "12",
        ])
        .output()
        .unwrap();
    assert!(output.status.success(), "waste new failed: {:?}", output);
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn read_json(path: &std::path::Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    let tmp = TempDir::new().unwrap();
    wrec(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("waste"))
        .stdout(predicate::str::contains("facility"))
        .stdout(predicate::str::contains("catalog"));
}

#[test]
fn test_version_displays() {
    let tmp = TempDir::new().unwrap();
    wrec(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wrec"));
}

#[test]
fn test_init_creates_project() {
    let tmp = setup_test_project();
    assert!(tmp.path().join(".wrec/config.yaml").is_file());
    assert!(tmp.path().join("data").is_dir());
}

#[test]
fn test_init_twice_reports_existing_project() {
    let tmp = setup_test_project();
    wrec(&tmp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn test_commands_require_project() {
    let tmp = TempDir::new().unwrap();
    wrec(&tmp)
        .args(["waste", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a waste records project"));
}

// ============================================================================
// Record Lifecycle Tests
// ============================================================================

#[test]
fn test_waste_new_writes_collection_file() {
    let tmp = setup_test_project();
    let id = create_waste(&tmp, "Metro", "Recyclables,Organic Waste");
    assert_eq!(id.len(), 10);

    let content = fs::read_to_string(waste_file(&tmp)).unwrap();
    assert!(content.starts_with("[\n    {\n        \"ID\": "));

    let data = read_json(&waste_file(&tmp));
    let records = data.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["ID"], id.as_str());
    assert_eq!(records[0]["City"], "Metro");
    assert_eq!(
        records[0]["Category"],
        serde_json::json!(["Recyclables", "Organic Waste"])
    );
    assert_eq!(records[0]["Quantity"], "12");
    assert_eq!(records[0]["Notes"], "");
}

#[test]
fn test_waste_new_missing_required_field_fails() {
    let tmp = setup_test_project();
    wrec(&tmp)
        .args(["waste", "new", "--category", "Recyclables", "--quantity", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("City"));

    assert!(!waste_file(&tmp).exists());
}

#[test]
fn test_list_assigns_short_ids() {
    let tmp = setup_test_project();
    let first = create_waste(&tmp, "Metro", "Recyclables");
    create_waste(&tmp, "Harbor", "Glass Waste");

    wrec(&tmp)
        .args(["waste", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("@1"))
        .stdout(predicate::str::contains("@2"))
        .stdout(predicate::str::contains("Harbor"));

    wrec(&tmp)
        .args(["-f", "id", "waste", "show", "@1"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", first)));
}

#[test]
fn test_list_search_and_count() {
    let tmp = setup_test_project();
    create_waste(&tmp, "Metro", "Recyclables");
    create_waste(&tmp, "Harbor", "Glass Waste");

    wrec(&tmp)
        .args(["waste", "list", "--search", "glass", "--count"])
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn test_list_empty_collection_as_json() {
    let tmp = setup_test_project();
    wrec(&tmp)
        .args(["-f", "json", "protocol", "list"])
        .assert()
        .success()
        .stdout("[]\n");
}

#[test]
fn test_show_displays_flattened_lists() {
    let tmp = setup_test_project();
    let id = create_waste(&tmp, "Metro", "Recyclables,Organic Waste");

    wrec(&tmp)
        .args(["waste", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recyclables, Organic Waste"))
        .stdout(predicate::str::contains("City/Town/Barangay"));
}

#[test]
fn test_edit_merges_fields() {
    let tmp = setup_test_project();
    let id = create_waste(&tmp, "Metro", "Recyclables");

    wrec(&tmp)
        .args(["waste", "edit", &id, "--quantity", "30", "--notes", "weekly"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated"));

    let data = read_json(&waste_file(&tmp));
    assert_eq!(data[0]["ID"], id.as_str());
    assert_eq!(data[0]["City"], "Metro");
    assert_eq!(data[0]["Quantity"], "30");
    assert_eq!(data[0]["Notes"], "weekly");
}

#[test]
fn test_edit_cannot_blank_required_field() {
    let tmp = setup_test_project();
    let id = create_waste(&tmp, "Metro", "Recyclables");
    let before = fs::read_to_string(waste_file(&tmp)).unwrap();

    wrec(&tmp)
        .args(["waste", "edit", &id, "--city", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("City"));

    assert_eq!(fs::read_to_string(waste_file(&tmp)).unwrap(), before);
}

#[test]
fn test_edit_unknown_id_fails_without_write() {
    let tmp = setup_test_project();
    create_waste(&tmp, "Metro", "Recyclables");
    let before = fs::read_to_string(waste_file(&tmp)).unwrap();

    wrec(&tmp)
        .args(["waste", "edit", "nosuchid", "--quantity", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nosuchid"));

    assert_eq!(fs::read_to_string(waste_file(&tmp)).unwrap(), before);
}

#[test]
fn test_edit_without_changes_fails() {
    let tmp = setup_test_project();
    let id = create_waste(&tmp, "Metro", "Recyclables");

    wrec(&tmp)
        .args(["waste", "edit", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to change"));
}

#[test]
fn test_delete_removes_record() {
    let tmp = setup_test_project();
    let keep = create_waste(&tmp, "Metro", "Recyclables");
    let gone = create_waste(&tmp, "Harbor", "Glass Waste");

    wrec(&tmp)
        .args(["waste", "delete", &gone, "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 1"));

    let data = read_json(&waste_file(&tmp));
    assert_eq!(data.as_array().unwrap().len(), 1);
    assert_eq!(data[0]["ID"], keep.as_str());
}

#[test]
fn test_delete_unknown_id_is_noop() {
    let tmp = setup_test_project();
    wrec(&tmp)
        .args(["waste", "delete", "nosuchid", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing deleted"));

    assert!(!waste_file(&tmp).exists());
}

#[test]
fn test_delete_skips_prompt_when_config_disables_it() {
    let tmp = setup_test_project();
    fs::write(tmp.path().join(".wrec/config.yaml"), "confirm_delete: false\n").unwrap();
    let id = create_waste(&tmp, "Metro", "Recyclables");

    wrec(&tmp)
        .args(["waste", "delete", &id])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(waste_file(&tmp)).unwrap(), "[]");
}

// ============================================================================
// Legacy File Tests
// ============================================================================

#[test]
fn test_legacy_single_object_file() {
    let tmp = setup_test_project();
    fs::write(
        waste_file(&tmp),
        r#"{"ID": 4821, "City": "Metro", "Category": "Recyclables, Glass Waste", "Quantity": "7"}"#,
    )
    .unwrap();

    wrec(&tmp)
        .args(["-f", "id", "waste", "list"])
        .assert()
        .success()
        .stdout("4821\n");

    wrec(&tmp)
        .args(["waste", "delete", "4821", "--yes"])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(waste_file(&tmp)).unwrap(), "[]");
}

#[test]
fn test_legacy_file_is_normalized_on_save() {
    let tmp = setup_test_project();
    fs::write(
        waste_file(&tmp),
        r#"[{"ID": "9f86d081", "City": "Metro", "Category": "Recyclables, Glass Waste", "Quantity": "7"}]"#,
    )
    .unwrap();

    wrec(&tmp)
        .args(["waste", "edit", "9f86d081", "--quantity", "8"])
        .assert()
        .success();

    let data = read_json(&waste_file(&tmp));
    assert_eq!(
        data[0]["Category"],
        serde_json::json!(["Recyclables", "Glass Waste"])
    );
    assert_eq!(data[0]["Quantity"], "8");
}

#[test]
fn test_malformed_file_is_left_untouched() {
    let tmp = setup_test_project();
    fs::write(waste_file(&tmp), "[{\"ID\": ").unwrap();

    wrec(&tmp)
        .args(["waste", "new", "--city", "Metro", "--category", "Recyclables", "--quantity", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid JSON"));

    assert_eq!(fs::read_to_string(waste_file(&tmp)).unwrap(), "[{\"ID\": ");
}

// ============================================================================
// Other Kinds
// ============================================================================

#[test]
fn test_facility_type_defaults_to_landfills() {
    let tmp = setup_test_project();
    wrec(&tmp)
        .args([
            "facility",
            "new",
            "--name",
            "North Site",
            "--area",
            "5000",
            "--hours",
            "6am-6pm",
            "--address",
            "1 Dump Rd",
            "--disposal",
            "Landfilling,Composting",
        ])
        .assert()
        .success();

    let data = read_json(&tmp.path().join("data/facility_data.json"));
    assert_eq!(data[0]["FacilityName"], "North Site");
    assert_eq!(data[0]["FacilityType"], "Landfills");
    assert_eq!(
        data[0]["DisposalMethods"],
        serde_json::json!(["Landfilling", "Composting"])
    );
}

#[test]
fn test_protocol_and_taxonomy_use_their_own_files() {
    let tmp = setup_test_project();
    wrec(&tmp)
        .args([
            "ct",
            "new",
            "--city",
            "Metro",
            "--area",
            "North",
            "--frequency",
            "Weekly",
            "--method",
            "Curbside Pickup",
            "--transportation",
            "Garbage Trucks",
        ])
        .assert()
        .success();

    wrec(&tmp)
        .args([
            "taxonomy",
            "new",
            "--city",
            "Metro",
            "--area",
            "North",
            "--frequency",
            "Daily",
            "--method",
            "Drop-off Centers,Source Separation",
            "--transportation",
            "Rail Transport",
        ])
        .assert()
        .success();

    let protocols = read_json(&tmp.path().join("data/c_t_data.json"));
    assert_eq!(protocols[0]["Methods"], serde_json::json!(["Curbside Pickup"]));

    let taxonomy = read_json(&tmp.path().join("data/waste_cat.json"));
    assert_eq!(
        taxonomy[0]["Method"],
        serde_json::json!(["Drop-off Centers", "Source Separation"])
    );
    assert_eq!(taxonomy[0]["Notes"], "");
}

// ============================================================================
// Import / Export
// ============================================================================

#[test]
fn test_export_import_unbind() {
    let tmp = setup_test_project();
    create_waste(&tmp, "Metro", "Recyclables");

    let exported = tmp.path().join("backup/waste.json");
    wrec(&tmp)
        .args(["waste", "export", exported.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1"));
    assert_eq!(
        fs::read_to_string(&exported).unwrap(),
        fs::read_to_string(waste_file(&tmp)).unwrap()
    );

    let other = tmp.path().join("other.json");
    fs::write(&other, "[]").unwrap();
    wrec(&tmp)
        .args(["waste", "import", other.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 0"));

    // New records now go to the imported file
    create_waste(&tmp, "Harbor", "Glass Waste");
    assert_eq!(read_json(&other).as_array().unwrap().len(), 1);
    assert_eq!(read_json(&waste_file(&tmp)).as_array().unwrap().len(), 1);

    wrec(&tmp)
        .args(["waste", "unbind"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unbound"));

    wrec(&tmp)
        .args(["-f", "json", "waste", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Metro"))
        .stdout(predicate::str::contains("Harbor").not());
}

#[test]
fn test_import_missing_file_fails() {
    let tmp = setup_test_project();
    wrec(&tmp)
        .args(["waste", "import", "absent.json"])
        .assert()
        .failure();

    assert!(!tmp.path().join(".wrec/bindings.json").exists());
}

// ============================================================================
// Catalog, Report, Config
// ============================================================================

#[test]
fn test_catalog_lists_entries() {
    let tmp = TempDir::new().unwrap();
    wrec(&tmp)
        .args(["catalog", "facility-types"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Landfills"))
        .stdout(predicate::str::contains("Biogas Plants"));
}

#[test]
fn test_report_json_reindents_file() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("in.json");
    let output = tmp.path().join("report.txt");
    fs::write(&input, r#"{"b":1,"a":[2,3]}"#).unwrap();

    wrec(&tmp)
        .args(["report", "json", "in.json", "report.txt"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "{\n    \"b\": 1,\n    \"a\": [\n        2,\n        3\n    ]\n}"
    );
}

#[test]
fn test_report_table_writes_plain_text() {
    let tmp = setup_test_project();
    create_waste(&tmp, "Metro", "Recyclables,Organic Waste");

    wrec(&tmp)
        .args(["report", "table", "waste", "waste.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Report written"));

    let text = fs::read_to_string(tmp.path().join("waste.txt")).unwrap();
    assert!(text.contains("Records: 1"));
    assert!(text.contains("Recyclables, Organic Waste"));
    assert!(!text.contains('\u{1b}'));
}

#[test]
fn test_config_show_reads_project_config() {
    let tmp = setup_test_project();
    fs::write(tmp.path().join(".wrec/config.yaml"), "data_dir: records\n").unwrap();

    wrec(&tmp)
        .args(["config", "show", "data_dir"])
        .assert()
        .success()
        .stdout("records\n");

    create_waste(&tmp, "Metro", "Recyclables");
    assert!(tmp.path().join("records/waste_data.json").is_file());
}

#[test]
fn test_env_overrides_data_dir() {
    let tmp = setup_test_project();
    wrec(&tmp)
        .env("WREC_DATA_DIR", "elsewhere")
        .args(["waste", "new", "--city", "Metro", "--category", "Recyclables", "--quantity", "1"])
        .assert()
        .success();

    assert!(tmp.path().join("elsewhere/waste_data.json").is_file());
}

#[test]
fn test_completions_generate() {
    let tmp = TempDir::new().unwrap();
    wrec(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wrec"));
}
