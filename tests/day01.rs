use std::fs;
use std::process::{Command, Output};

use tempfile::TempDir;

const EXAMPLE_INPUT: &str = "199\n200\n208\n210\n200\n207\n240\n269\n260\n263\n";

fn run_day01(dir: &TempDir, rust_log: Option<&str>) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_day01"));
    cmd.current_dir(dir.path());
    match rust_log {
        Some(filter) => cmd.env("RUST_LOG", filter),
        None => cmd.env_remove("RUST_LOG"),
    };
    cmd.output().expect("day01 should start")
}

fn dir_with_input(contents: &str) -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("input.txt"), contents).expect("write input.txt");
    dir
}

#[test]
fn test_reports_example() {
    let dir = dir_with_input(EXAMPLE_INPUT);
    let out = run_day01(&dir, None);
    assert_eq!(Some(0), out.status.code());
    assert_eq!(
        "10 data points found\nPart 1: 7 increases found\nPart 2: 5 increases found\n",
        String::from_utf8_lossy(&out.stdout)
    );
}

#[test]
fn test_reports_example_with_rust_log() {
    let dir = dir_with_input(EXAMPLE_INPUT);
    let out = run_day01(&dir, Some("day01=trace"));
    assert_eq!(Some(0), out.status.code());
    assert_eq!(
        "10 data points found\nPart 1: 7 increases found\nPart 2: 5 increases found\n",
        String::from_utf8_lossy(&out.stdout)
    );
}

#[test]
fn test_reports_empty_input() {
    let dir = dir_with_input("");
    let out = run_day01(&dir, None);
    assert_eq!(Some(0), out.status.code());
    assert_eq!(
        "0 data points found\nPart 1: 0 increases found\nPart 2: 0 increases found\n",
        String::from_utf8_lossy(&out.stdout)
    );
}

#[test]
fn test_missing_input_fails() {
    let dir = TempDir::new().expect("temp dir");
    let out = run_day01(&dir, None);
    assert_eq!(Some(1), out.status.code());
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("day01: cannot open input.txt"),
        "unexpected stderr: {}",
        stderr
    );
}

#[test]
fn test_junk_line_fails() {
    let dir = dir_with_input("1\n2\nthree\n4\n");
    let out = run_day01(&dir, None);
    assert_eq!(Some(1), out.status.code());
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("line 3: expected an integer, got 'three'"),
        "unexpected stderr: {}",
        stderr
    );
}
