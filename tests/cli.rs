//! Integration tests for top-level CLI behavior.

use std::fs;
use std::path::Path;
use std::process::Command;

fn run_client(args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_hippod-client");
    Command::new(bin)
        .args(args)
        .env_remove("HIPPOD_URL")
        .env_remove("HIPPOD_TIMEOUT_SECS")
        .output()
        .expect("failed to run hippod-client binary")
}

fn write_descriptor(dir: &Path) -> String {
    fs::write(dir.join("notes.txt"), "all green").unwrap();
    let path = dir.join("report.yaml");
    fs::write(
        &path,
        "title: Grüße\ncategories: [team:cli]\nfiles:\n  - path: notes.txt\n\
         achievement:\n  result: passed\n  test_date: 2024-05-02T14:03:07Z\n",
    )
    .unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn render_prints_canonical_json() {
    let dir = tempfile::tempdir().unwrap();
    let descriptor = write_descriptor(dir.path());

    let output = run_client(&["render", &descriptor]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.starts_with("{\"achievements\": [{\"result\": \"passed\""));
    assert!(stdout.contains("\"title\": \"Gr\\u00fc\\u00dfe\""));
    assert!(stdout.contains("\"name\": \"notes.txt\""));
    assert!(stdout.is_ascii());
}

#[test]
fn submit_without_url_fails() {
    let dir = tempfile::tempdir().unwrap();
    let descriptor = write_descriptor(dir.path());

    let output = run_client(&["submit", &descriptor]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("no hippod server URL"));
}

#[test]
fn dry_run_lists_reports_without_sending() {
    let dir = tempfile::tempdir().unwrap();
    let descriptor = write_descriptor(dir.path());

    let output = run_client(&["submit", &descriptor, "--url", "http://127.0.0.1:9", "--dry-run"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("endpoint: http://127.0.0.1:9/api/v1/object"));
    assert!(stdout.contains("[DRY ] Grüße ("));
}

#[test]
fn unreachable_server_marks_item_failed() {
    let dir = tempfile::tempdir().unwrap();
    let descriptor = write_descriptor(dir.path());

    let output =
        run_client(&["submit", &descriptor, "--url", "http://127.0.0.1:9", "--timeout", "2"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!output.status.success());
    assert!(stdout.contains("[FAIL] Grüße"));
}

#[test]
fn invalid_timeout_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let descriptor = write_descriptor(dir.path());

    let output = run_client(&["submit", &descriptor, "--url", "http://x", "--timeout", "soon"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("invalid timeout"));
}

#[test]
fn submit_help_shows_usage() {
    let output = run_client(&["submit", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("--dry-run"));
    assert!(stdout.contains("--url"));
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let output = run_client(&["nonsense"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
}
