//! Integration tests for the tengan binary.
//!
//! These tests verify end-to-end behavior including:
//! - Onboarding and setup
//! - Dose completion and rotation advancement
//! - Rotation and data resets
//! - Deep-link output and the watch tick loop

use assert_cmd::Command;
use chrono::{Duration, Local};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("tengan"))
}

/// Read the persisted schedule record as raw JSON
fn read_state(data_dir: &Path) -> serde_json::Value {
    let raw = fs::read_to_string(data_dir.join("schedule.json"))
        .expect("Failed to read schedule file");
    serde_json::from_str(&raw).expect("Schedule file is not valid JSON")
}

/// Seed a day-1+ state: surgery yesterday, no dose recorded yet
fn setup_day1(data_dir: &Path) {
    let yesterday = (Local::now() - Duration::days(1)).date_naive();
    cli()
        .arg("setup")
        .arg(yesterday.to_string())
        .arg("10:00")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success();
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "ICL post-op eye-drop schedule tracker",
        ));
}

#[test]
fn test_status_without_setup_shows_onboarding() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("手術日が未設定"));
}

#[test]
fn test_setup_writes_schedule_record() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("setup")
        .arg("2024-01-10")
        .arg("10:00")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("設定を保存しました"));

    let state = read_state(data_dir);
    assert_eq!(state["surgeryInfo"]["date"], "2024-01-10");
    assert_eq!(state["surgeryInfo"]["day0StartTime"], "10:00");
    assert_eq!(state["lastDropTime"], serde_json::Value::Null);
    assert_eq!(state["rotationIndex"], 0);
}

#[test]
fn test_status_on_surgery_day_lists_all_three_drops() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    let today = Local::now().date_naive();

    cli()
        .arg("setup")
        .arg(today.to_string())
        .arg("23:59")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success();

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("手術当日"))
        .stdout(predicate::str::contains("DEX 0.1%"))
        .stdout(predicate::str::contains("モキシフロキサシン"))
        .stdout(predicate::str::contains("ジクロフェナクNa"))
        .stdout(predicate::str::contains("生活の注意事項"));
}

#[test]
fn test_status_day1_shows_post_op_day_count() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    setup_day1(data_dir);

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("術後 1日目"))
        .stdout(predicate::str::contains("DEX 0.1%"))
        .stdout(predicate::str::contains("READY"));
}

#[test]
fn test_status_is_the_default_command() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("手術日が未設定"));
}

#[test]
fn test_done_on_new_day_advances_to_moxi() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    setup_day1(data_dir);

    // First dose of the day: DEX done, rotation forced to Moxi (index 1)
    cli()
        .arg("done")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("点眼完了"));

    let state = read_state(data_dir);
    assert_eq!(state["rotationIndex"], 1);
    assert_ne!(state["lastDropTime"], serde_json::Value::Null);
}

#[test]
fn test_second_done_same_day_advances_to_diclo() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    setup_day1(data_dir);

    for _ in 0..2 {
        cli()
            .arg("done")
            .arg("--data-dir")
            .arg(data_dir)
            .assert()
            .success();
    }

    let state = read_state(data_dir);
    assert_eq!(state["rotationIndex"], 2);
}

#[test]
fn test_done_without_setup_does_not_create_state() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("done")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("手術日が未設定"));

    assert!(!data_dir.join("schedule.json").exists());
}

#[test]
fn test_reset_today_forces_index_zero_and_keeps_history() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    setup_day1(data_dir);

    for _ in 0..2 {
        cli()
            .arg("done")
            .arg("--data-dir")
            .arg(data_dir)
            .assert()
            .success();
    }
    let before = read_state(data_dir);
    assert_eq!(before["rotationIndex"], 2);

    cli()
        .arg("reset-today")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("朝リセット"));

    let after = read_state(data_dir);
    assert_eq!(after["rotationIndex"], 0);
    assert_eq!(after["lastDropTime"], before["lastDropTime"]);
    assert_eq!(after["surgeryInfo"], before["surgeryInfo"]);
}

#[test]
fn test_reset_all_requires_confirmation() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    setup_day1(data_dir);

    cli()
        .arg("reset-all")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("--yes"));

    // Unconfirmed: the record is untouched
    let state = read_state(data_dir);
    assert_ne!(state["surgeryInfo"]["date"], serde_json::Value::Null);
}

#[test]
fn test_reset_all_clears_back_to_onboarding() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    setup_day1(data_dir);

    cli()
        .arg("reset-all")
        .arg("--yes")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("初期化"));

    let state = read_state(data_dir);
    assert_eq!(state["surgeryInfo"]["date"], serde_json::Value::Null);
    assert_eq!(state["lastDropTime"], serde_json::Value::Null);
    assert_eq!(state["rotationIndex"], 0);

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("手術日が未設定"));
}

#[test]
fn test_setup_replaces_history() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    setup_day1(data_dir);

    cli()
        .arg("done")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success();
    assert_ne!(read_state(data_dir)["lastDropTime"], serde_json::Value::Null);

    // Re-running setup starts a fresh timeline
    cli()
        .arg("setup")
        .arg("2024-02-01")
        .arg("09:30")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success();

    let state = read_state(data_dir);
    assert_eq!(state["surgeryInfo"]["date"], "2024-02-01");
    assert_eq!(state["lastDropTime"], serde_json::Value::Null);
    assert_eq!(state["rotationIndex"], 0);
}

#[test]
fn test_links_prints_calendar_and_android_timer() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    setup_day1(data_dir);

    cli()
        .arg("links")
        .arg("--user-agent")
        .arg("Mozilla/5.0 (Linux; Android 14; Pixel 8)")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://www.google.com/calendar/render?action=TEMPLATE",
        ))
        .stdout(predicate::str::contains(
            "action=android.intent.action.SET_TIMER",
        ));
}

#[test]
fn test_links_without_timer_platform_prints_calendar_only() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    setup_day1(data_dir);

    cli()
        .arg("links")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("google.com/calendar"))
        .stdout(predicate::str::contains("intent:#Intent").not());
}

#[test]
fn test_watch_alerts_once_when_due() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    // New day on day-1+: the dose is immediately due
    setup_day1(data_dir);

    cli()
        .arg("watch")
        .arg("--ticks")
        .arg("1")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("点眼の時間です"))
        .stdout(predicate::str::contains("DEX 0.1%"));
}

#[test]
fn test_watch_without_setup_exits_with_hint() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("watch")
        .arg("--ticks")
        .arg("3")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("手術日が未設定"));
}
