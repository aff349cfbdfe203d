use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn todo(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("todo").unwrap();
    cmd.env("HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("SMART_TODO_DATA")
        .env_remove("RUST_LOG");
    cmd
}

fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "command failed: {output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

fn add_json(home: &Path, text: &str) -> Value {
    json_output(todo(home).args(["-o", "json", "add", text]))
}

#[test]
fn test_add_and_list() {
    let home = TempDir::new().unwrap();

    todo(home.path())
        .args(["add", "Buy milk @shopping #high"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created:"))
        .stdout(predicate::str::contains("Buy milk"));

    todo(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Buy milk"))
        .stdout(predicate::str::contains("@shopping"));

    assert!(home.path().join(".smart-todo/tasks.json").exists());
}

#[test]
fn test_add_json_fields() {
    let home = TempDir::new().unwrap();
    let value = add_json(
        home.path(),
        "Review PR assigned:Bob@Example.com 1h30m by 17:00 @work @WORK",
    );

    let task = &value["task"];
    assert_eq!(task["description"], "Review PR");
    assert_eq!(task["assigned_to"], "bob@example.com");
    assert_eq!(task["duration"], "1h30m");
    assert_eq!(task["due_time"], "17:00:00");
    assert_eq!(task["tags"], serde_json::json!(["work"]));
}

#[test]
fn test_parse_only_with_reference_date() {
    let home = TempDir::new().unwrap();
    let value = json_output(todo(home.path()).args([
        "-o",
        "json",
        "add",
        "--parse-only",
        "--today",
        "2025-01-31",
        "Pay rent due:next month",
    ]));

    assert_eq!(value["description"], "Pay rent");
    assert_eq!(value["due_date"], "2025-02-28");
    assert!(!home.path().join(".smart-todo/tasks.json").exists());
}

#[test]
fn test_parse_error_exits_nonzero() {
    let home = TempDir::new().unwrap();

    todo(home.path())
        .args(["add", "Party due:someday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid_due_date"));

    todo(home.path())
        .args(["add", "Meet at 25:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid_time"));
}

#[test]
fn test_parse_error_json_lists_reasons() {
    let home = TempDir::new().unwrap();
    let output = todo(home.path())
        .args(["-o", "json", "add", "Fix bug assigned:not-an-email 0m"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let value: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(value["error"], "validation_failed");
    assert_eq!(value["details"].as_array().unwrap().len(), 2);
}

#[test]
fn test_complete_show_and_delete_by_prefix() {
    let home = TempDir::new().unwrap();
    let value = add_json(home.path(), "Call mom");
    let id = value["task"]["id"].as_str().unwrap().to_string();
    let prefix = &id[..8];

    todo(home.path())
        .args(["complete", prefix])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed:"));

    let shown = json_output(todo(home.path()).args(["-o", "json", "show", prefix]));
    assert_eq!(shown["id"], id.as_str());
    assert_eq!(shown["status"], "complete");

    todo(home.path()).args(["delete", prefix]).assert().success();
    todo(home.path())
        .args(["show", prefix])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_list_status_filter() {
    let home = TempDir::new().unwrap();
    let done = add_json(home.path(), "Finished thing");
    add_json(home.path(), "Open thing");
    let id = done["task"]["id"].as_str().unwrap().to_string();
    todo(home.path()).args(["complete", id.as_str()]).assert().success();

    let listed = json_output(todo(home.path()).args(["-o", "json", "list", "--status", "incomplete"]));
    assert_eq!(listed["count"], 1);
    assert_eq!(listed["items"][0]["description"], "Open thing");
}

#[test]
fn test_update_and_clear() {
    let home = TempDir::new().unwrap();
    let value = add_json(home.path(), "Draft email #low");
    let id = value["task"]["id"].as_str().unwrap().to_string();

    let updated = json_output(todo(home.path()).args([
        "-o",
        "json",
        "update",
        id.as_str(),
        "--priority",
        "high",
        "--add-tag",
        "work",
    ]));
    assert_eq!(updated["task"]["priority"], "high");
    assert_eq!(updated["task"]["tags"], serde_json::json!(["work"]));

    todo(home.path()).args(["complete", id.as_str()]).assert().success();
    let cleared = json_output(todo(home.path()).args(["-o", "json", "clear"]));
    assert_eq!(cleared["removed"], 1);
    assert_eq!(cleared["remaining"], 0);

    let backups = std::fs::read_dir(home.path().join(".smart-todo/backups"))
        .unwrap()
        .count();
    assert_eq!(backups, 1);
}

#[test]
fn test_data_file_override() {
    let home = TempDir::new().unwrap();
    let data = home.path().join("elsewhere/tasks.json");

    todo(home.path())
        .env("SMART_TODO_DATA", &data)
        .args(["add", "Water plants"])
        .assert()
        .success();

    assert!(data.exists());
    assert!(!home.path().join(".smart-todo/tasks.json").exists());
}

#[test]
fn test_config_default_output() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("config.yaml");
    std::fs::write(&config, "general:\n  default_output: json\n").unwrap();

    let output = todo(home.path())
        .args(["--config", config.to_str().unwrap(), "stats"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["total"], 0);
}

#[test]
fn test_backup_and_restore() {
    let home = TempDir::new().unwrap();
    add_json(home.path(), "Keep me");
    let snapshot = home.path().join("snapshot.json");

    todo(home.path())
        .args(["backup", snapshot.to_str().unwrap()])
        .assert()
        .success();
    todo(home.path()).args(["clear", "--all"]).assert().success();
    todo(home.path())
        .args(["restore", snapshot.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 task(s)"));
}

#[test]
fn test_completions() {
    let home = TempDir::new().unwrap();
    todo(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("todo"));

    todo(home.path())
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown shell"));
}

#[test]
fn test_repl_reads_stdin() {
    let home = TempDir::new().unwrap();
    todo(home.path())
        .write_stdin("add Walk the dog @pets\nlist\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Walk the dog"))
        .stdout(predicate::str::contains("Goodbye!"));

    todo(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Walk the dog"));
}
