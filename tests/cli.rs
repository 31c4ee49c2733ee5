//! Integration tests for top-level CLI behavior.

use std::process::Command;

use netvcr::cassette::storage;
use netvcr::ports::{HttpResponse, Method};
use netvcr::RecordedInteraction;

fn run_netvcr(args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_netvcr");
    Command::new(bin).args(args).output().expect("failed to run netvcr binary")
}

#[test]
fn path_subcommand_sanitizes_name() {
    let output = run_netvcr(&["path", "--cache-dir", "/tmp/c", "api/user login?"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert_eq!(stdout.trim(), "/tmp/c/api/user_login_.yml");
}

#[test]
fn show_subcommand_lists_interactions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("c.yml");
    storage::save(
        &path,
        &[RecordedInteraction::new(
            Method::new("get"),
            "http://api.test:80/x",
            HttpResponse::new(200, "Q"),
        )],
    )
    .unwrap();

    let output = run_netvcr(&["show", path.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("GET"));
    assert!(stdout.contains("http://api.test:80/x"));

    let output = run_netvcr(&["show", "--json", path.to_str().unwrap()]);
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed[0]["method"], "get");
    assert_eq!(parsed[0]["response"]["body"], "Q");
}

#[test]
fn show_corrupt_cassette_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yml");
    std::fs::write(&path, "- [").unwrap();

    let output = run_netvcr(&["show", path.to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Failed to parse cassette file"));
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let output = run_netvcr(&["nonsense"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
}
