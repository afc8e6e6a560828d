//! Headless `--summary` runs of the binary
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn summary_reports_counts_and_orphans() {
    cargo_bin_cmd!("deps-explorer")
        .args(["--summary", "--data-dir", "tests/fixtures", "--file", "snapshot.json"])
        .env_remove("DEPS_EXPLORER_FILE")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "8 packages (2 explicit, 6 dependencies)",
        ))
        .stdout(predicate::str::contains("6 links"))
        .stdout(predicate::str::contains("1 orphaned"))
        .stdout(predicate::str::contains("  python-six 1.16.0-9"))
        .stdout(predicate::str::contains("collected 2025/03/14 09:26:53"));
}

#[test]
fn summary_accepts_a_plain_path() {
    cargo_bin_cmd!("deps-explorer")
        .args(["--summary", "--file", "tests/fixtures/cyclic.json"])
        .env_remove("DEPS_EXPLORER_DATA_DIR")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 packages (1 explicit, 2 dependencies)"))
        .stdout(predicate::str::contains("0 orphaned"));
}

#[test]
fn file_can_come_from_the_environment() {
    cargo_bin_cmd!("deps-explorer")
        .args(["--summary", "--data-dir", "tests/fixtures"])
        .env("DEPS_EXPLORER_FILE", "cyclic.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 links"));
}

#[test]
fn malformed_snapshot_fails_with_message() {
    cargo_bin_cmd!("deps-explorer")
        .args(["--summary", "--file", "tests/fixtures/malformed.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing nodes object"));
}

#[test]
fn missing_snapshot_fails() {
    cargo_bin_cmd!("deps-explorer")
        .args(["--summary", "--file", "tests/fixtures/does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load"));
}

#[test]
fn summary_requires_a_file() {
    cargo_bin_cmd!("deps-explorer")
        .arg("--summary")
        .env_remove("DEPS_EXPLORER_FILE")
        .assert()
        .code(2);
}

#[test]
fn unknown_view_is_rejected() {
    cargo_bin_cmd!("deps-explorer")
        .args(["--view", "tree"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value"));
}
