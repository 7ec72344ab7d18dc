//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SAMPLE: &str = "../../data/sample_players.csv";

fn flashcourt() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("flashcourt").unwrap();
    cmd.env_remove("FLASHCOURT_SOURCE");
    cmd
}

#[test]
fn validate_sample_roster() {
    flashcourt()
        .arg("validate")
        .arg("--file")
        .arg(SAMPLE)
        .assert()
        .success()
        .stdout(predicate::str::contains("20 players"))
        .stdout(predicate::str::contains("1 duplicates"))
        .stdout(predicate::str::contains("1 bad ages"))
        .stdout(predicate::str::contains("Dataset valid."));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tiny.csv");
    std::fs::write(
        &path,
        "Player,Team,Age,Ht,Exp,College,Pos,Draft Pick\n\
         A,X,25,5'10\",2,Duke,G,3rd overall\n\
         B,Y,30,tall,8,UConn,C,5th overall\n",
    )
    .unwrap();

    flashcourt()
        .arg("validate")
        .arg("--file")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("WARNING"))
        .stdout(predicate::str::contains("unparseable height"))
        .stdout(predicate::str::contains("warning(s) found"));
}

#[test]
fn validate_missing_columns_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scores.csv");
    std::fs::write(&path, "name,score\nA,1\n").unwrap();

    flashcourt()
        .arg("validate")
        .arg("--file")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required columns"));
}

#[test]
fn validate_nonexistent_file() {
    flashcourt()
        .arg("validate")
        .arg("--file")
        .arg("nonexistent.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();

    flashcourt()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created flashcourt.toml"));

    let written = std::fs::read_to_string(dir.path().join("flashcourt.toml")).unwrap();
    assert!(written.contains("mode = \"leveled\""));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    flashcourt()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    flashcourt()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn levels_lists_all_five() {
    flashcourt()
        .arg("levels")
        .assert()
        .success()
        .stdout(predicate::str::contains("4 College"))
        .stdout(predicate::str::contains("2 Height, 2 Draft Pick"))
        .stdout(predicate::str::contains("MVP"));
}

#[test]
fn play_shows_first_question_and_quits() {
    let dir = TempDir::new().unwrap();

    flashcourt()
        .current_dir(dir.path())
        .arg("play")
        .arg("--source")
        .arg(std::fs::canonicalize(SAMPLE).unwrap())
        .arg("--seed")
        .arg("1")
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("20 players, leveled mode"))
        .stdout(predicate::str::contains("Level 1 | Question 1 of 10"))
        .stdout(predicate::str::contains("  4. "));
}

#[test]
fn play_classic_mode() {
    let dir = TempDir::new().unwrap();

    flashcourt()
        .current_dir(dir.path())
        .arg("play")
        .arg("--source")
        .arg(std::fs::canonicalize(SAMPLE).unwrap())
        .arg("--mode")
        .arg("classic")
        .write_stdin("1\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1 of 20"))
        .stdout(predicate::str::contains("Current Score: "));
}

#[test]
fn play_rejects_unknown_mode() {
    let dir = TempDir::new().unwrap();

    flashcourt()
        .current_dir(dir.path())
        .arg("play")
        .arg("--mode")
        .arg("endless")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown mode"));
}

#[test]
fn play_with_missing_source_reports_no_data() {
    let dir = TempDir::new().unwrap();

    flashcourt()
        .current_dir(dir.path())
        .arg("play")
        .arg("--source")
        .arg("no_such_roster.csv")
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No data found!"))
        .stdout(predicate::str::contains("no_such_roster.csv"));
}

#[test]
fn play_writes_a_report_that_review_reads() {
    let dir = TempDir::new().unwrap();
    let report = dir.path().join("session.json");

    flashcourt()
        .current_dir(dir.path())
        .arg("play")
        .arg("--source")
        .arg(std::fs::canonicalize(SAMPLE).unwrap())
        .arg("--seed")
        .arg("9")
        .arg("--summary-out")
        .arg(&report)
        .write_stdin("1\n2\nq\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Session report saved to"));

    assert!(report.exists());

    flashcourt()
        .arg("review")
        .arg("--report")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("leveled mode"))
        .stdout(predicate::str::contains("in progress"));

    flashcourt()
        .arg("review")
        .arg("--report")
        .arg(&report)
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("["));
}

#[test]
fn review_nonexistent_report() {
    flashcourt()
        .arg("review")
        .arg("--report")
        .arg("no_such_file.json")
        .assert()
        .failure();
}

#[test]
fn inspect_sample_roster() {
    let dir = TempDir::new().unwrap();

    flashcourt()
        .current_dir(dir.path())
        .arg("inspect")
        .arg("--source")
        .arg(std::fs::canonicalize(SAMPLE).unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("23 rows read, 20 kept"))
        .stdout(predicate::str::contains("Distinct Values"))
        .stdout(predicate::str::contains("A'ja Wilson"));
}

#[test]
fn help_output() {
    flashcourt()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("WNBA roster flashcard trainer"));
}

#[test]
fn version_output() {
    flashcourt()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("flashcourt"));
}
