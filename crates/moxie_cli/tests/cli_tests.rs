//! CLI integration tests.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn moxie(db_path: &Path) -> Command {
    moxie_logging_at(db_path, "error")
}

fn moxie_logging_at(db_path: &Path, level: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("moxie");
    cmd.env_remove("MOXIE_DB_PATH")
        .arg("--db-path")
        .arg(db_path)
        .args(["--log-level", level]);
    cmd
}

fn db_with_schema(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("moxie.db");
    moxie(&path)
        .arg("create-schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("Schema created"));
    path
}

#[test]
fn help_lists_commands() {
    cargo_bin_cmd!("moxie")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("upgrade-schema"))
        .stdout(predicate::str::contains("find-by-id"))
        .stdout(predicate::str::contains("demo"));
}

#[test]
fn upgrade_schema_then_find_all_prints_empty_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("moxie.db");

    moxie(&path)
        .arg("upgrade-schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("Schema upgraded"));

    moxie(&path)
        .arg("find-all")
        .assert()
        .success()
        .stdout("[]\n");
}

#[test]
fn create_then_find_by_id_round_trips_through_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = db_with_schema(&dir);

    moxie(&path)
        .args(["create", "--json-content", r#"{"title":"Do X","content":"steps"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"{"id":1,"title":"Do X","content":"steps"}"#,
        ));

    moxie(&path)
        .args(["find-by-id", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""title":"Do X""#));
}

#[test]
fn create_reads_json_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let path = db_with_schema(&dir);

    moxie(&path)
        .arg("create")
        .write_stdin(r#"{"title":"From stdin","content":"piped"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("From stdin"));

    moxie(&path)
        .arg("find-all")
        .assert()
        .success()
        .stdout(predicate::str::contains("piped"));
}

#[test]
fn create_with_blank_title_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = db_with_schema(&dir);

    moxie(&path)
        .args(["create", "--json-content", r#"{"title":"  ","content":"x"}"#])
        .assert()
        .failure()
        .stderr(predicate::str::contains("title"));
}

#[test]
fn find_by_id_exits_with_failure_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = db_with_schema(&dir);

    moxie(&path)
        .args(["find-by-id", "99"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn demo_saves_and_lists_sample_note() {
    let dir = tempfile::tempdir().unwrap();
    let path = db_with_schema(&dir);

    moxie(&path)
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved a new note with id: 1"))
        .stdout(predicate::str::contains("First note title"));
}

#[test]
fn demo_logs_assigned_id_and_loaded_notes() {
    let dir = tempfile::tempdir().unwrap();
    let path = db_with_schema(&dir);

    moxie_logging_at(&path, "info")
        .arg("demo")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "event=bootstrap module=bootstrap status=ok step=insert note_id=1",
        ))
        .stderr(predicate::str::contains(
            r#"step=load count=1 notes=[{"id":1,"title":"First note title","content":"and some content"}]"#,
        ));
}

#[test]
fn demo_reports_unreachable_database_without_panicking() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("moxie.db");

    moxie(&path)
        .arg("demo")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("connection failed"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn demo_logs_unreachable_database_once_per_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("moxie.db");

    let output = moxie_logging_at(&path, "info")
        .arg("demo")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "event=bootstrap module=bootstrap status=error",
        ))
        .get_output()
        .stderr
        .clone();

    let stderr = String::from_utf8(output).unwrap();
    let error_line = stderr
        .lines()
        .find(|line| line.starts_with("error: "))
        .expect("top-level error line should be printed");
    assert!(error_line.starts_with("error: connection failed: "), "{error_line}");
    assert_eq!(
        error_line.matches("unable to open database file").count(),
        1,
        "{error_line}"
    );
}

#[test]
fn find_all_without_schema_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.db");

    moxie(&path)
        .arg("find-all")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required table `note` is missing"));
}
