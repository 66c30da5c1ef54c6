use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_atlantis-calc")
}

fn unique_temp_path(name: &str, extension: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("atlantis-{name}-{stamp}.{extension}"))
}

const EASY_SEED: [&str; 9] = ["1a", "1b", "1c", "1d", "1e", "2a", "2b", "2c", "2d"];

#[test]
fn calc_command_dispatches_and_emits_json() {
    let output = Command::new(bin())
        .arg("calc")
        .args(EASY_SEED)
        .args(["--limit", "2"])
        .output()
        .expect("calc should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("calc should emit json");
    let results = payload.as_array().expect("results should be an array");
    assert_eq!(results.len(), 2);
    assert!(results[0]["boost_time"].is_number());
    assert!(results[0]["boosts"].is_array());
}

#[test]
fn calc_command_emits_csv() {
    let output = Command::new(bin())
        .arg("calc")
        .args(EASY_SEED)
        .args(["--csv", "--limit", "3"])
        .output()
        .expect("calc should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("rank,boostless_time,boost_time"));
    assert!(lines[1].starts_with("1,"));
}

#[test]
fn calc_command_fails_on_short_seed() {
    let output = Command::new(bin())
        .args(["calc", "1a", "1b"])
        .output()
        .expect("calc should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("calculation failed"));
}

#[test]
fn rooms_command_lists_hard_rooms() {
    let output = Command::new(bin())
        .args(["rooms", "hard"])
        .output()
        .expect("rooms should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().any(|line| line == "1f"));
    assert!(!stdout.lines().any(|line| line == "1a"));
}

#[test]
fn validate_command_passes_builtin_catalog() {
    let output = Command::new(bin())
        .arg("validate")
        .output()
        .expect("validate should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("validation passed"));
}

#[test]
fn validate_command_returns_non_zero_on_invalid_catalog() {
    let path = unique_temp_path("invalid-catalog", "json");
    fs::write(
        &path,
        r#"{"rooms":[{"name":"x","boostless_time":5.0,"boost_strats":[{"name":"s","time":9.0,"boost_time":1.0}]}]}"#,
    )
    .expect("fixture should be written");

    let output = Command::new(bin())
        .args(["validate", path.to_string_lossy().as_ref()])
        .output()
        .expect("validate should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("validation failed"));

    let _ = fs::remove_file(path);
}

#[test]
fn batch_command_calculates_each_seed() {
    let path = unique_temp_path("seeds", "txt");
    fs::write(
        &path,
        format!("# two seeds\n{}\n1a 1b\n", EASY_SEED.join(" ")),
    )
    .expect("fixture should be written");

    let output = Command::new(bin())
        .args(["batch", path.to_string_lossy().as_ref(), "--workers", "2"])
        .output()
        .expect("batch should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("batch should emit json");
    let outcomes = payload.as_array().expect("outcomes should be an array");
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes[0]["best"]["boost_time"].is_number());
    assert!(outcomes[1]["error"].is_string());

    let _ = fs::remove_file(path);
}

#[test]
fn unknown_command_prints_usage() {
    let output = Command::new(bin()).output().expect("binary should run");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: atlantis-calc"));
}
