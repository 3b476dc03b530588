//! Integration tests for the lift binary.
//!
//! These tests verify end-to-end behavior including:
//! - Split and workout generation from a profile
//! - Seeded reproducibility and CSV export
//! - History logging feeding later suggestions
//! - Equipment checks and swaps

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const PUSH_PROFILE: &str = r#"{
    "age": 30,
    "level": "1",
    "goals": ["Get stronger"],
    "days": ["Monday", "Wednesday", "Friday"],
    "session_minutes": 60,
    "equipment": [
        {"name": "Olympic barbell"},
        {"name": "Bench"}
    ],
    "split": "Push-Pull-Legs",
    "workout_count": 0
}"#;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn write_profile(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("profile.json");
    fs::write(&path, contents).expect("Failed to write profile");
    path
}

/// CLI command isolated from the user's config and data directories
fn cli(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("lift"));
    cmd.env("XDG_CONFIG_HOME", dir.path().join("config"))
        .arg("--data-dir")
        .arg(dir.path().join("data"));
    cmd
}

#[test]
fn test_cli_help() {
    Command::new(assert_cmd::cargo::cargo_bin!("lift"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Strength workout generator"));
}

#[test]
fn test_split_shows_today() {
    let temp_dir = setup_test_dir();
    let profile = write_profile(&temp_dir, PUSH_PROFILE);

    cli(&temp_dir)
        .arg("split")
        .arg("--profile")
        .arg(&profile)
        .assert()
        .success()
        .stdout(predicate::str::contains("Split: Push-Pull-Legs"))
        .stdout(predicate::str::contains("→ 1. Push"))
        .stdout(predicate::str::contains("Phase: Strength"));
}

#[test]
fn test_generate_push_day() {
    let temp_dir = setup_test_dir();
    let profile = write_profile(&temp_dir, PUSH_PROFILE);

    cli(&temp_dir)
        .arg("generate")
        .arg("--profile")
        .arg(&profile)
        .arg("--seed")
        .arg("7")
        .assert()
        .success()
        .stdout(predicate::str::contains("PUSH DAY (Strength)"))
        .stdout(predicate::str::contains("minutes"));
}

#[test]
fn test_generate_is_reproducible_with_seed() {
    let temp_dir = setup_test_dir();
    let profile = write_profile(&temp_dir, PUSH_PROFILE);

    let run = || {
        let output = cli(&temp_dir)
            .arg("generate")
            .arg("--profile")
            .arg(&profile)
            .arg("--seed")
            .arg("123")
            .arg("--json")
            .output()
            .expect("Failed to run lift");
        assert!(output.status.success());
        String::from_utf8(output.stdout).expect("stdout is not UTF-8")
    };

    let first = run();
    assert_eq!(first, run());

    let workout: serde_json::Value = serde_json::from_str(&first).expect("invalid JSON");
    assert_eq!(workout["day_label"], "Push");
    assert_eq!(workout["phase"], "Strength");
    assert_eq!(workout["budget"], 5);
}

#[test]
fn test_generate_writes_csv() {
    let temp_dir = setup_test_dir();
    let profile = write_profile(&temp_dir, PUSH_PROFILE);
    let csv_path = temp_dir.path().join("workout.csv");

    cli(&temp_dir)
        .arg("generate")
        .arg("--profile")
        .arg(&profile)
        .arg("--seed")
        .arg("1")
        .arg("--csv")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let content = fs::read_to_string(&csv_path).expect("Failed to read CSV");
    assert!(content.starts_with("order,exercise,modality,reps,weight,band,seconds,basis"));
    assert!(content.lines().count() > 1);
}

#[test]
fn test_log_then_suggest_progresses() {
    let temp_dir = setup_test_dir();
    let profile = write_profile(&temp_dir, PUSH_PROFILE);

    cli(&temp_dir)
        .args(["log", "--exercise", "Barbell bench press", "--phase", "Strength"])
        .args(["--weight", "100", "--reps", "5,5,5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged Barbell bench press"));

    let history = temp_dir.path().join("data").join("history.jsonl");
    let content = fs::read_to_string(&history).expect("Failed to read history");
    assert_eq!(content.lines().count(), 1);
    assert!(content.contains("\"reps\":[5,5,5]"));

    cli(&temp_dir)
        .arg("suggest")
        .arg("--profile")
        .arg(&profile)
        .args(["--exercise", "barbell bench press"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Barbell bench press: 90 x 7 reps (progression)"));
}

#[test]
fn test_log_requires_reps_or_time() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .args(["log", "--exercise", "Plank", "--phase", "Endurance"])
        .assert()
        .failure();
}

#[test]
fn test_log_rejects_unknown_phase() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .args(["log", "--exercise", "Plank", "--phase", "Cardio", "--time", "30"])
        .assert()
        .failure();
}

#[test]
fn test_suggest_unknown_exercise_fails() {
    let temp_dir = setup_test_dir();
    let profile = write_profile(&temp_dir, PUSH_PROFILE);

    cli(&temp_dir)
        .arg("suggest")
        .arg("--profile")
        .arg(&profile)
        .args(["--exercise", "Moon squat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Moon squat"));
}

#[test]
fn test_check_reports_purchase() {
    let temp_dir = setup_test_dir();
    let profile = write_profile(&temp_dir, PUSH_PROFILE);

    cli(&temp_dir)
        .arg("check")
        .arg("--profile")
        .arg(&profile)
        .args(["--exercise", "Dumbbell bench press"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Missing for Dumbbell bench press: 2 Dumbbell"))
        .stdout(predicate::str::contains("To buy: dumbbells"));

    cli(&temp_dir)
        .arg("check")
        .arg("--profile")
        .arg(&profile)
        .args(["--exercise", "Barbell bench press"])
        .assert()
        .success()
        .stdout(predicate::str::contains("You have everything"));
}

#[test]
fn test_swap_modes() {
    let temp_dir = setup_test_dir();
    let profile = write_profile(&temp_dir, PUSH_PROFILE);

    cli(&temp_dir)
        .arg("swap")
        .arg("--profile")
        .arg(&profile)
        .args(["--exercise", "Barbell bench press", "--mode", "easy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Try Push up instead"));

    cli(&temp_dir)
        .arg("swap")
        .arg("--profile")
        .arg(&profile)
        .args(["--exercise", "Barbell bench press", "--mode", "challenge"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Incline barbell bench press needs Incline bench"));

    cli(&temp_dir)
        .arg("swap")
        .arg("--profile")
        .arg(&profile)
        .args(["--exercise", "Barbell bench press", "--mode", "sideways"])
        .assert()
        .failure();
}

#[test]
fn test_invalid_profile_fails() {
    let temp_dir = setup_test_dir();
    let profile = write_profile(&temp_dir, r#"{"level": "1", "goals": ["Get lean"]}"#);

    cli(&temp_dir)
        .arg("generate")
        .arg("--profile")
        .arg(&profile)
        .assert()
        .failure();
}
