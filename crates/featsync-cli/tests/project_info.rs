use std::fs;
use std::process::Command;

use serde_json::Value;
use tempfile::TempDir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_project-info"))
}

fn parse_report(stdout: &[u8]) -> Value {
    let text = String::from_utf8_lossy(stdout);
    let json = text
        .strip_prefix("📊 Project Information:\n")
        .expect("report header");
    serde_json::from_str(json).expect("report json")
}

#[test]
fn reports_manifest_fields_for_workspace_flag() {
    let temp = TempDir::new().expect("tempdir");
    fs::create_dir_all(temp.path().join(".git")).expect("git marker");
    fs::write(
        temp.path().join("package.json"),
        r#"{"name":"widget","version":"2.0.1"}"#,
    )
    .expect("package.json");

    let output = bin()
        .arg("--workspace")
        .arg(temp.path())
        .output()
        .expect("project-info");
    assert!(output.status.success());

    let report = parse_report(&output.stdout);
    assert_eq!(report["workspace"], temp.path().display().to_string());
    assert_eq!(report["gitStatus"], "Git repository detected");
    assert_eq!(report["projectName"], "widget");
    assert_eq!(report["projectVersion"], "2.0.1");
    assert_eq!(report["files"], serde_json::json!([".git", "package.json"]));
    assert!(report.get("error").is_none());
    assert!(report["timestamp"].as_str().unwrap_or_default().ends_with('Z'));
}

#[test]
fn workspace_env_var_is_honored() {
    let temp = TempDir::new().expect("tempdir");
    fs::write(temp.path().join("notes.md"), "# notes\n").expect("file");

    let output = bin()
        .env("WORKSPACE", temp.path())
        .output()
        .expect("project-info");
    assert!(output.status.success());

    let report = parse_report(&output.stdout);
    assert_eq!(report["files"], serde_json::json!(["notes.md"]));
    assert!(report["gitStatus"].is_null());
    assert!(report.get("projectName").is_none());
}

#[test]
fn unreadable_workspace_still_exits_zero() {
    let temp = TempDir::new().expect("tempdir");
    let output = bin()
        .arg("--workspace")
        .arg(temp.path().join("missing"))
        .output()
        .expect("project-info");
    assert!(output.status.success());

    let report = parse_report(&output.stdout);
    assert!(report["error"].is_string());
    assert_eq!(report["files"], serde_json::json!([]));
}
