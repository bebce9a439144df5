#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn reunion_cmd(data: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("reunion"));
    cmd.env_remove("REUNION_DATA")
        .env_remove("RUST_LOG")
        .arg("--data")
        .arg(data.path());
    cmd
}

fn json(data: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = reunion_cmd(data)
        .args(["--output", "json"])
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?} failed", args);
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_naked_run_shows_seeded_board() {
    let data = TempDir::new().unwrap();
    reunion_cmd(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("合計 14.0 / 14.0"))
        .stdout(predicate::str::contains("会長挨拶"));

    for file in ["schedule.json", "improvements.json", "glossary.json", "magazine.json"] {
        assert!(data.path().join(file).exists(), "{} missing", file);
    }
}

#[test]
fn test_page_change_persists() {
    let data = TempDir::new().unwrap();
    reunion_cmd(&data)
        .args(["magazine", "pages", "1", "0.2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.2 pages"));

    let board = json(&data, &["magazine"]);
    assert_eq!(board["view"], "magazine");
    assert_eq!(board["totalPages"], 14.2);
    assert_eq!(board["target"], "over");

    reunion_cmd(&data)
        .args(["magazine", "pages", "1", "-0.2"])
        .assert()
        .success();
    let board = json(&data, &["magazine", "show"]);
    assert_eq!(board["totalPages"], 14.0);
    assert_eq!(board["target"], "at");
}

#[test]
fn test_move_section() {
    let data = TempDir::new().unwrap();
    reunion_cmd(&data)
        .args(["magazine", "move", "1", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved 会長挨拶 to position 3"));

    let board = json(&data, &["magazine"]);
    let titles: Vec<&str> = board["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert_eq!(&titles[..3], &["学校長挨拶", "総会報告", "会長挨拶"]);
    let orders: Vec<i64> = board["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["order"].as_i64().unwrap())
        .collect();
    assert_eq!(orders, (1..=orders.len() as i64).collect::<Vec<_>>());
}

#[test]
fn test_invalid_input_exits_with_error() {
    let data = TempDir::new().unwrap();
    reunion_cmd(&data)
        .args(["magazine", "status", "1", "finished"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));

    reunion_cmd(&data)
        .args(["improvements", "target", "1", "someday"])
        .assert()
        .failure();

    reunion_cmd(&data)
        .args(["magazine", "note", "99", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("99"));
}

#[test]
fn test_section_status_and_notes() {
    let data = TempDir::new().unwrap();
    reunion_cmd(&data)
        .args(["magazine", "status", "2", "done"])
        .assert()
        .success()
        .stdout(predicate::str::contains("完了"));
    reunion_cmd(&data)
        .args(["magazine", "note", "2", "原稿", "受領済み"])
        .assert()
        .success()
        .stdout(predicate::str::contains("メモ: 原稿 受領済み"));

    let board = json(&data, &["magazine"]);
    assert_eq!(board["sections"][1]["status"], "done");
    assert_eq!(board["sections"][1]["notes"], "原稿 受領済み");
}

#[test]
fn test_schedule_add_and_remove() {
    let data = TempDir::new().unwrap();
    reunion_cmd(&data)
        .args([
            "schedule", "add", "2027-03-20", "Spring", "board", "meeting", "--location", "Hall",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Spring board meeting"))
        .stdout(predicate::str::contains("@ Hall"));

    let view = json(&data, &["schedule"]);
    let events = view["events"].as_array().unwrap();
    let added = events
        .iter()
        .find(|e| e["title"] == "Spring board meeting")
        .unwrap();
    let position = added["position"].as_u64().unwrap().to_string();
    let count = events.len();

    reunion_cmd(&data)
        .args(["schedule", "remove", &position])
        .assert()
        .success();
    let view = json(&data, &["schedule", "list"]);
    assert_eq!(view["events"].as_array().unwrap().len(), count - 1);
}

#[test]
fn test_glossary_filters() {
    let data = TempDir::new().unwrap();
    let categories = json(&data, &["glossary", "categories"]);
    let first = categories[0].as_str().unwrap().to_string();

    let view = json(&data, &["glossary", "list", "--category", &first]);
    let terms = view["terms"].as_array().unwrap();
    assert!(!terms.is_empty());
    assert!(terms.iter().all(|t| t["category"] == first.as_str()));

    reunion_cmd(&data)
        .args(["glossary", "list", "--search", "zzz-no-such-term"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No matching terms"));
}

#[test]
fn test_improvements_status() {
    let data = TempDir::new().unwrap();
    let view = json(&data, &["improvements"]);
    let done_before = view["stats"]["done"].as_u64().unwrap();

    let view = json(&data, &["improvements", "status", "1", "done"]);
    assert_eq!(view["stats"]["done"].as_u64().unwrap(), done_before + 1);
}

#[test]
fn test_seed_respects_config() {
    let data = TempDir::new().unwrap();
    fs::write(data.path().join("reunion.toml"), "seed_on_start = false\n").unwrap();

    let board = json(&data, &["magazine"]);
    assert!(board["sections"].as_array().unwrap().is_empty());

    reunion_cmd(&data)
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized magazine"));
    reunion_cmd(&data)
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing seeded"));
}

#[test]
fn test_config_show_and_path() {
    let data = TempDir::new().unwrap();
    fs::write(data.path().join("reunion.toml"), "upcoming_window_days = 3\n").unwrap();

    reunion_cmd(&data)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("seed_on_start = true"))
        .stdout(predicate::str::contains("upcoming_window_days = 3"))
        .stdout(predicate::str::contains("log_level = \"warn\""));

    reunion_cmd(&data)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reunion.toml"));

    // config never opens the store
    assert!(!data.path().join("magazine.json").exists());
}

#[test]
fn test_version() {
    let data = TempDir::new().unwrap();
    reunion_cmd(&data)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("reunion v"));
}
