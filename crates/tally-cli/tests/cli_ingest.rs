use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

const SAMPLE_TRX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<TestRun id="e7b" name="run" xmlns="http://microsoft.com/schemas/VisualStudio/TeamTest/2010">
  <Results>
    <UnitTestResult executionId="a1" testName="Suite.test_alpha" outcome="Passed" />
    <UnitTestResult executionId="a2" testName="Suite.test_beta" outcome="Failed">
      <Output>
        <ErrorInfo>
          <Message>assertion failed</Message>
        </ErrorInfo>
      </Output>
    </UnitTestResult>
  </Results>
</TestRun>"#;

fn tally() -> Command {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.env_remove("TALLY_DB");
    cmd
}

fn write_report(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("run.trx");
    std::fs::write(&path, SAMPLE_TRX).unwrap();
    path
}

#[test]
fn bad_timestamp_exits_with_bad_input() {
    let dir = tempfile::tempdir().unwrap();
    let report = write_report(dir.path());

    tally()
        .arg("ingest")
        .arg(&report)
        .args(["2025-01-08 16:27", "nano165", "1.0"])
        .arg("--db")
        .arg(dir.path().join("tally.db"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unparseable timestamp"));
}

#[test]
fn digitless_branch_exits_with_bad_input() {
    let dir = tempfile::tempdir().unwrap();
    let report = write_report(dir.path());

    tally()
        .arg("ingest")
        .arg(&report)
        .args(["2025_01_08_1627", "trunk", "1.0"])
        .arg("--db")
        .arg(dir.path().join("tally.db"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no numeric token"));
}

#[test]
fn missing_report_exits_with_missing_report() {
    let dir = tempfile::tempdir().unwrap();

    tally()
        .arg("ingest")
        .arg(dir.path().join("nope.trx"))
        .args(["2025_01_08_1627", "nano165", "1.0"])
        .arg("--db")
        .arg(dir.path().join("tally.db"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn ingest_bootstraps_and_records() {
    let dir = tempfile::tempdir().unwrap();
    let report = write_report(dir.path());
    let db = dir.path().join("tally.db");

    tally()
        .arg("ingest")
        .arg(&report)
        .args(["2025_01_08_1627", "nano165", "24.5.6717"])
        .arg("--db")
        .arg(&db)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("recorded run"));

    // Same branch again: another run against the same store.
    tally()
        .arg("ingest")
        .arg(&report)
        .args(["2025_01_09_0900", "nano165", "24.5.6801"])
        .arg("--db")
        .arg(&db)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("recorded run"));
}

#[test]
fn stale_branch_exits_with_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let report = write_report(dir.path());
    let db = dir.path().join("tally.db");

    tally()
        .arg("ingest")
        .arg(&report)
        .args(["2025_01_08_1627", "nano165", "24.5.6717"])
        .arg("--db")
        .arg(&db)
        .assert()
        .code(0);

    tally()
        .arg("ingest")
        .arg(&report)
        .args(["2025_01_08_1700", "nano150", "24.5.6717"])
        .arg("--db")
        .arg(&db)
        .assert()
        .code(5)
        .stderr(predicate::str::contains("older than the oldest active branch"));
}

#[test]
fn newer_branch_archives_the_oldest() {
    let dir = tempfile::tempdir().unwrap();
    let report = write_report(dir.path());
    let db = dir.path().join("tally.db");

    tally()
        .arg("ingest")
        .arg(&report)
        .args(["2025_01_08_1627", "nano165", "24.5.6717"])
        .arg("--db")
        .arg(&db)
        .assert()
        .code(0);

    tally()
        .arg("ingest")
        .arg(&report)
        .args(["2025_02_01_0900", "nano166", "24.6.0001"])
        .arg("--db")
        .arg(&db)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("archived branch nano165"));

    // The archived branch no longer accepts results.
    tally()
        .arg("ingest")
        .arg(&report)
        .args(["2025_02_01_1000", "nano165", "24.5.6900"])
        .arg("--db")
        .arg(&db)
        .assert()
        .code(5)
        .stderr(predicate::str::contains("not active"));
}

#[test]
fn init_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("tally.db");

    tally()
        .arg("init")
        .arg("nano160")
        .arg("--db")
        .arg(&db)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("seeded branch nano160"));

    tally()
        .arg("init")
        .arg("nano160")
        .arg("--db")
        .arg(&db)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("already initialized"));
}
