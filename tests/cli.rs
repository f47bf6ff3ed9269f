//! End-to-end tests for the datasweep binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn datasweep() -> Command {
    Command::cargo_bin("datasweep").unwrap()
}

#[test]
fn converts_csv_and_writes_suggested_name() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("data.csv");
    std::fs::write(&input, "a,b\n1,x\n2,y\n").unwrap();
    let out = dir.path().join("out");

    datasweep()
        .arg(&input)
        .args(["--to", "csv", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("data.csv"));

    let written = std::fs::read_to_string(out.join("data.csv")).unwrap();
    assert_eq!(written, "a,b\n1,x\n2,y\n");
}

#[test]
fn cleaning_flags_apply_dedup_then_fill() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("data.csv");
    std::fs::write(&input, "a,b\n1,\n2,5\n1,\n").unwrap();
    let out = dir.path().join("out");

    datasweep()
        .arg(&input)
        .args(["--dedup", "--fill-missing", "--quiet", "--out"])
        .arg(&out)
        .assert()
        .success();

    let written = std::fs::read_to_string(out.join("data.csv")).unwrap();
    assert_eq!(written, "a,b\n1,5\n2,5\n");
}

#[test]
fn column_selection_projects_and_reorders() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("data.csv");
    std::fs::write(&input, "a,b,c\n1,2,3\n4,5,6\n").unwrap();
    let out = dir.path().join("out");

    datasweep()
        .arg(&input)
        .args(["--columns", "c,a", "--quiet", "--out"])
        .arg(&out)
        .assert()
        .success();

    let written = std::fs::read_to_string(out.join("data.csv")).unwrap();
    assert_eq!(written, "c,a\n3,1\n6,4\n");
}

#[test]
fn unknown_column_fails_that_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("data.csv");
    std::fs::write(&input, "a,b\n1,2\n").unwrap();

    datasweep()
        .arg(&input)
        .args(["--columns", "z", "--out"])
        .arg(dir.path().join("out"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Column not found: z"));
}

#[test]
fn unsupported_extension_reported_and_batch_continues() {
    let dir = tempdir().unwrap();
    let txt = dir.path().join("data.txt");
    std::fs::write(&txt, "a,b\n1,2\n").unwrap();
    let csv = dir.path().join("good.csv");
    std::fs::write(&csv, "a,b\n1,2\n").unwrap();
    let out = dir.path().join("out");

    // The bad file fails, the good one still converts
    datasweep()
        .arg(&txt)
        .arg(&csv)
        .args(["--quiet", "--out"])
        .arg(&out)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unsupported file format: txt"));

    assert!(out.join("good.csv").exists());
    assert!(!out.join("data.csv").exists());
}

#[test]
fn preview_shows_first_rows() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("data.csv");
    std::fs::write(&input, "name,score\nalice,9\nbob,7\ncarol,8\n").unwrap();

    datasweep()
        .arg(&input)
        .args(["--preview", "2", "--out"])
        .arg(dir.path().join("out"))
        .assert()
        .success()
        .stdout(predicate::str::contains("alice"))
        .stdout(predicate::str::contains("bob"))
        .stdout(predicate::str::contains("carol").not());
}

#[test]
fn json_report_covers_every_file() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("data.csv");
    std::fs::write(&csv, "a,b\n1,2\n").unwrap();
    let txt = dir.path().join("bad.txt");
    std::fs::write(&txt, "x").unwrap();

    let output = datasweep()
        .arg(&csv)
        .arg(&txt)
        .args(["--json", "--out"])
        .arg(dir.path().join("out"))
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let results = report["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["status"], "ok");
    assert_eq!(results[0]["download"]["mime_type"], "text/csv");
    assert_eq!(results[1]["status"], "error");
    assert!(results[1]["message"]
        .as_str()
        .unwrap()
        .contains("Unsupported file format"));
}

#[test]
fn missing_input_file_is_a_per_file_error() {
    let dir = tempdir().unwrap();

    datasweep()
        .arg(dir.path().join("nope.csv"))
        .args(["--out"])
        .arg(dir.path().join("out"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read file"));
}

#[cfg(feature = "xlsx")]
#[test]
fn converts_csv_to_xlsx() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("data.csv");
    std::fs::write(&input, "a,b\n1,x\n").unwrap();
    let out = dir.path().join("out");

    datasweep()
        .arg(&input)
        .args(["--to", "xlsx", "--quiet", "--out"])
        .arg(&out)
        .assert()
        .success();

    let bytes = std::fs::read(out.join("data.xlsx")).unwrap();
    assert_eq!(&bytes[0..4], b"PK\x03\x04");
}

#[cfg(not(feature = "xlsx"))]
#[test]
fn xlsx_target_without_writer_suggests_csv() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("data.csv");
    std::fs::write(&input, "a,b\n1,x\n").unwrap();

    datasweep()
        .arg(&input)
        .args(["--to", "xlsx", "--out"])
        .arg(dir.path().join("out"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("convert to csv instead"));
}
