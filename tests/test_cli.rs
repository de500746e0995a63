// Copyright (c) 2021 Tangram Robotics Inc. - All Rights Reserved
// Unauthorized copying of this file, via any medium is strictly prohibited
// Proprietary and confidential
// ----------------------------

use assert_cmd::prelude::*;
use predicates::prelude::*;

use std::process::Command;

fn watersort() -> Command {
    Command::cargo_bin("watersort").expect("Calling binary failed")
}

#[test]
fn test_cli() {
    let mut cmd = watersort();
    cmd.assert().failure();
}

#[test]
fn test_solve_shortest() {
    watersort()
        .args(&["solve", "tests/resources/simple.toml", "--strategy", "bfs"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Solved in 3 moves"));
}

#[test]
fn test_solve_with_config_file() {
    // The config selects bfs with stream pours.
    watersort()
        .args(&[
            "--config",
            "tests/resources/bfs_config.toml",
            "solve",
            "tests/resources/three_colors.json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Solved in 10 moves"));
}

#[test]
fn test_solve_unsolvable() {
    watersort()
        .args(&["solve", "tests/resources/stuck.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No solution exists (1 states explored)"));
}

#[test]
fn test_solve_invalid_puzzle() {
    watersort()
        .args(&["solve", "tests/resources/invalid.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Color 1 appears 1 times, expected 2"));
}

#[test]
fn test_solve_search_limit() {
    watersort()
        .args(&[
            "solve",
            "tests/resources/simple.toml",
            "--max-states",
            "2",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Search limit of 2 states exceeded"));
}

#[test]
fn test_solve_json_report() {
    watersort()
        .args(&[
            "solve",
            "tests/resources/simple.toml",
            "--strategy=dfs",
            "--format=json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""strategy": "dfs""#))
        .stdout(predicate::str::contains(r#""explored":"#));
}

#[test]
fn test_generate_is_reproducible() {
    let args = ["generate", "--colors", "3", "--capacity", "4", "--seed", "5"];
    let first = watersort().args(&args).output().unwrap();
    let second = watersort().args(&args).output().unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let text = String::from_utf8(first.stdout).unwrap();
    assert!(text.starts_with("capacity = 4"));
}

#[test]
fn test_verify() {
    watersort()
        .args(&["verify", "tests/resources/simple.toml", "0>2,1>0,1>2"])
        .assert()
        .success()
        .stdout("Solved after 3 moves\n");

    watersort()
        .args(&["verify", "tests/resources/simple.toml", "0>2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not solved after 1 moves"));

    watersort()
        .args(&["verify", "tests/resources/simple.toml", "0>1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Move #1 (0>1) cannot be played"));
}

#[test]
fn test_config() {
    watersort()
        .args(&["-c", "tests/resources/bfs_config.toml", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[solver]"))
        .stdout(predicate::str::contains(r#"strategy = "bfs""#))
        .stdout(predicate::str::contains("[generator]"));
}

#[test]
fn test_missing_config_file() {
    watersort()
        .args(&["-c", "tests/resources/nope.toml", "config"])
        .assert()
        .failure();
}

#[test]
fn test_env_overrides_solver_limit() {
    watersort()
        .env("WATERSORT__SOLVER__MAX_STATES", "2")
        .args(&["solve", "tests/resources/simple.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Search limit of 2 states exceeded"));
}

#[test]
fn test_env_overrides_config_file() {
    // The config file says bfs, the environment wins.
    watersort()
        .env("WATERSORT__SOLVER__STRATEGY", "dfs")
        .args(&["-c", "tests/resources/bfs_config.toml", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"strategy = "dfs""#))
        .stdout(predicate::str::contains(r#"pour = "stream""#));
}

#[test]
fn test_generate_oversized_puzzle() {
    watersort()
        .args(&["generate", "--colors", "255", "--capacity", "4000000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid generator parameters: at most"));
}
