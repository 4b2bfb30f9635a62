use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

const DOCUMENT: &str = r#"{
  "name": "poster.psd",
  "layers": [
    { "kind": "container", "name": "A", "children": [
      { "kind": "leaf", "name": "x" },
      { "kind": "leaf", "name": "y" }
    ] },
    { "kind": "container", "name": "B", "children": [ { "kind": "leaf", "name": "z" } ] }
  ]
}"#;

fn layername(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("layername").expect("binary exists");
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("LAYERNAME_LINE_ENDING")
        .env_remove("LAYERNAME_DEFAULT_FILE_NAME");
    cmd
}

fn selection_names(path: &Path) -> Vec<String> {
    let value: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|object| object["name"].as_str().unwrap().to_owned())
        .collect()
}

#[test]
fn help_displays_usage() {
    Command::cargo_bin("layername")
        .expect("binary exists")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn export_writes_names_and_reports_path() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("doc.json"), DOCUMENT).unwrap();

    layername(temp.path())
        .args(["export", "--document", "doc.json", "--output", "names.txt"])
        .args(["--line-ending", "lf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Layer names saved to:"))
        .stdout(predicate::str::contains("names.txt"));

    let written = fs::read_to_string(temp.path().join("names.txt")).unwrap();
    assert_eq!(written, "A/x\nA/y\nB/z\n");
}

#[test]
fn import_renames_selection_in_place() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("names.txt"), "A/x\n\n  A/y \nB/z\n").unwrap();
    fs::write(
        temp.path().join("selection.json"),
        r#"[{"name": "Path 1", "id": 1}, {"name": "Path 2", "id": 2}, {"name": "Path 3", "id": 3}]"#,
    )
    .unwrap();

    layername(temp.path())
        .args(["import", "--selection", "selection.json", "--names", "names.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed 3 objects from list."));

    assert_eq!(
        selection_names(&temp.path().join("selection.json")),
        ["B/z", "A/y", "A/x"]
    );
}

#[test]
fn import_mismatch_exits_with_both_counts() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("names.txt"), "A/x\nA/y\nB/z\n").unwrap();
    let original = r#"[{"name": "keep"}]"#;
    fs::write(temp.path().join("selection.json"), original).unwrap();

    layername(temp.path())
        .args(["import", "-s", "selection.json", "-n", "names.txt"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("(1)").and(predicate::str::contains("(3)")));

    assert_eq!(
        fs::read_to_string(temp.path().join("selection.json")).unwrap(),
        original
    );
}

#[test]
fn import_missing_list_is_cancelled() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("selection.json"), r#"[{"name": "keep"}]"#).unwrap();

    layername(temp.path())
        .args(["import", "-s", "selection.json", "-n", "missing.txt"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Could not open"));
}

#[test]
fn dry_run_prints_plan_without_writing() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("names.txt"), "first\nsecond\n").unwrap();
    let original = r#"[{"name": "a"}, {"name": "b"}]"#;
    fs::write(temp.path().join("selection.json"), original).unwrap();

    layername(temp.path())
        .args(["import", "-s", "selection.json", "-n", "names.txt", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a -> second").and(predicate::str::contains("b -> first")));

    assert_eq!(
        fs::read_to_string(temp.path().join("selection.json")).unwrap(),
        original
    );
}

#[test]
fn import_output_flag_keeps_source_selection() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("names.txt"), "only\n").unwrap();
    let original = r#"[{"name": "a"}]"#;
    fs::write(temp.path().join("selection.json"), original).unwrap();

    layername(temp.path())
        .args(["import", "-s", "selection.json", "-n", "names.txt", "-o", "renamed.json"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp.path().join("selection.json")).unwrap(),
        original
    );
    assert_eq!(selection_names(&temp.path().join("renamed.json")), ["only"]);
}

#[test]
fn failures_exit_apart_from_cancellation() {
    let temp = tempfile::tempdir().unwrap();

    layername(temp.path())
        .args(["export", "--document", "missing.json", "--output", "names.txt"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("missing.json"));

    assert!(!temp.path().join("names.txt").exists());
}

#[test]
#[cfg(target_os = "linux")]
fn config_is_read_from_isolated_home() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("doc.json"), DOCUMENT).unwrap();
    let config_dir = temp.path().join(".config/layername");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "[export]\nline_ending = \"crlf\"\n").unwrap();

    layername(temp.path())
        .args(["export", "--document", "doc.json", "--output", "names.txt"])
        .assert()
        .success();

    let written = fs::read_to_string(temp.path().join("names.txt")).unwrap();
    assert_eq!(written, "A/x\r\nA/y\r\nB/z\r\n");
}

#[test]
fn completions_are_generated() {
    Command::cargo_bin("layername")
        .expect("binary exists")
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("layername"));
}
