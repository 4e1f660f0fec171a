//! Integration tests for the `td` CLI.
//!
//! Each test creates a temp data directory, runs `td` as a subprocess,
//! and verifies stdout and/or the saved slot file.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Get the path to the built `td` binary.
fn td_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("td");
    path
}

fn td(dir: &Path, args: &[&str]) -> Output {
    Command::new(td_bin())
        .arg("-C")
        .arg(dir)
        .args(args)
        .output()
        .unwrap()
}

/// Run and expect success; returns stdout
fn td_ok(dir: &Path, args: &[&str]) -> String {
    let out = td(dir, args);
    assert!(
        out.status.success(),
        "td {:?} failed: {}",
        args,
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8(out.stdout).unwrap()
}

fn install_fixture(dir: &Path, name: &str) {
    let src = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    fs::copy(src, dir.join("todos.json")).unwrap();
}

fn saved(dir: &Path) -> serde_json::Value {
    let text = fs::read_to_string(dir.join("todos.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn saved_texts(dir: &Path) -> Vec<String> {
    saved(dir)
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["task"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// add / list
// ---------------------------------------------------------------------------

#[test]
fn list_on_fresh_dir() {
    let dir = TempDir::new().unwrap();
    assert_eq!(td_ok(dir.path(), &["list"]), "no tasks\n");
    // Reading never creates the slot
    assert!(!dir.path().join("todos.json").exists());
}

#[test]
fn add_appends_and_prints_id() {
    let dir = TempDir::new().unwrap();
    let id = td_ok(dir.path(), &["add", "buy", "milk"]);
    td_ok(dir.path(), &["add", "walk dog"]);

    let slot = saved(dir.path());
    assert_eq!(slot[0]["id"].as_str().unwrap(), id.trim());
    assert_eq!(saved_texts(dir.path()), vec!["buy milk", "walk dog"]);

    let list = td_ok(dir.path(), &["list"]);
    let lines: Vec<&str> = list.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("1. [ ] buy milk  ("));
    assert!(lines[1].starts_with("2. [ ] walk dog  ("));
}

#[test]
fn add_empty_is_an_error() {
    let dir = TempDir::new().unwrap();
    let out = td(dir.path(), &["add", ""]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.starts_with("error: please input todo"), "{}", stderr);
    assert!(!dir.path().join("todos.json").exists());
}

#[test]
fn add_whitespace_is_a_task() {
    let dir = TempDir::new().unwrap();
    td_ok(dir.path(), &["add", "   "]);
    assert_eq!(saved_texts(dir.path()), vec!["   "]);
}

#[test]
fn saved_records_have_slot_layout() {
    let dir = TempDir::new().unwrap();
    td_ok(dir.path(), &["add", "walk dog"]);
    let slot = saved(dir.path());
    let record = slot[0].as_object().unwrap();
    let mut keys: Vec<&str> = record.keys().map(|k| k.as_str()).collect();
    keys.sort();
    assert_eq!(keys, vec!["completed", "id", "priority", "task"]);
    assert_eq!(record["completed"], false);
    assert_eq!(record["priority"], 0);
}

#[test]
fn list_json() {
    let dir = TempDir::new().unwrap();
    install_fixture(dir.path(), "shared_prefix.json");
    let out = td_ok(dir.path(), &["list", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"position": 1, "id": "abc1", "task": "first", "completed": false},
            {"position": 2, "id": "abc2", "task": "second", "completed": false},
            {"position": 3, "id": "zzz9", "task": "third", "completed": true},
        ])
    );
}

// ---------------------------------------------------------------------------
// Mutations by id
// ---------------------------------------------------------------------------

#[test]
fn done_and_undone_by_prefix() {
    let dir = TempDir::new().unwrap();
    install_fixture(dir.path(), "shared_prefix.json");

    assert_eq!(
        td_ok(dir.path(), &["done", "abc2"]),
        "2. [x] second  (abc2)\n"
    );
    assert_eq!(saved(dir.path())[1]["completed"], true);

    // Already complete
    assert_eq!(td_ok(dir.path(), &["done", "abc2"]), "no change\n");

    assert_eq!(td_ok(dir.path(), &["undone", "zz"]), "3. [ ] third  (zzz9)\n");
    assert_eq!(saved(dir.path())[2]["completed"], false);
}

#[test]
fn ambiguous_prefix_is_an_error() {
    let dir = TempDir::new().unwrap();
    install_fixture(dir.path(), "shared_prefix.json");
    let before = fs::read_to_string(dir.path().join("todos.json")).unwrap();

    let out = td(dir.path(), &["rm", "abc"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("ambiguous id 'abc'"), "{}", stderr);

    let after = fs::read_to_string(dir.path().join("todos.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn unknown_id_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    install_fixture(dir.path(), "shared_prefix.json");
    for cmd in ["done", "undone", "rm", "up", "down"] {
        assert_eq!(td_ok(dir.path(), &[cmd, "nope"]), "no change\n", "{}", cmd);
    }
    assert_eq!(saved_texts(dir.path()), vec!["first", "second", "third"]);
}

#[test]
fn up_and_down_swap_neighbours() {
    let dir = TempDir::new().unwrap();
    install_fixture(dir.path(), "shared_prefix.json");

    assert_eq!(td_ok(dir.path(), &["up", "zzz9"]), "2. [x] third  (zzz9)\n");
    assert_eq!(saved_texts(dir.path()), vec!["first", "third", "second"]);

    assert_eq!(td_ok(dir.path(), &["down", "abc1"]), "2. [ ] first  (abc1)\n");
    assert_eq!(saved_texts(dir.path()), vec!["third", "first", "second"]);

    // Edges
    assert_eq!(td_ok(dir.path(), &["up", "zzz9"]), "no change\n");
    assert_eq!(td_ok(dir.path(), &["down", "abc2"]), "no change\n");
    assert_eq!(saved_texts(dir.path()), vec!["third", "first", "second"]);
}

#[test]
fn rm_deletes() {
    let dir = TempDir::new().unwrap();
    install_fixture(dir.path(), "shared_prefix.json");
    assert_eq!(td_ok(dir.path(), &["rm", "abc1"]), "removed first  (abc1)\n");
    assert_eq!(saved_texts(dir.path()), vec!["second", "third"]);
}

#[test]
fn walkthrough_scenario() {
    let dir = TempDir::new().unwrap();
    let milk = td_ok(dir.path(), &["add", "buy milk"]).trim().to_string();
    let dog = td_ok(dir.path(), &["add", "walk dog"]).trim().to_string();

    td_ok(dir.path(), &["up", &dog]);
    td_ok(dir.path(), &["done", &dog]);
    td_ok(dir.path(), &["rm", &milk]);

    let slot = saved(dir.path());
    assert_eq!(
        slot,
        serde_json::json!([
            {"id": dog, "task": "walk dog", "completed": true, "priority": 0}
        ])
    );
}

// ---------------------------------------------------------------------------
// Load failures and the event log
// ---------------------------------------------------------------------------

#[test]
fn legacy_numeric_ids_load_as_text() {
    let dir = TempDir::new().unwrap();
    install_fixture(dir.path(), "legacy_todos.json");

    let out = td_ok(dir.path(), &["list", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json[0]["id"], "0.5112");
    assert_eq!(json[1]["id"], "1700000000000");
    assert_eq!(json[1]["completed"], true);

    // The next save rewrites them as strings
    td_ok(dir.path(), &["done", "0.5112"]);
    assert_eq!(saved(dir.path())[0]["id"], "0.5112");
}

#[test]
fn corrupt_slot_starts_empty_and_is_logged() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("todos.json"), "{not json").unwrap();

    assert_eq!(td_ok(dir.path(), &["list"]), "no tasks\n");

    let log = td_ok(dir.path(), &["log"]);
    assert!(log.contains("[decode] saved tasks are not a valid task list"));
    assert!(log.contains("{not json"));

    let out = td_ok(dir.path(), &["log", "--json", "--limit", "1"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["category"], "decode");
    assert_eq!(json[0]["body"], "{not json");
}

#[test]
fn empty_log() {
    let dir = TempDir::new().unwrap();
    assert_eq!(td_ok(dir.path(), &["log"]), "no log entries\n");
}

#[test]
fn config_changes_storage_key() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "[storage]\nkey = \"work\"\n").unwrap();

    td_ok(dir.path(), &["add", "ship it"]);
    assert!(dir.path().join("work.json").exists());
    assert!(!dir.path().join("todos.json").exists());
}

#[test]
fn bad_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "[storage\n").unwrap();

    let out = td(dir.path(), &["list"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).starts_with("error:"));
}
