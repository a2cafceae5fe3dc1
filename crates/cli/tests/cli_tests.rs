// End-to-end tests for the `predcheck` binary.
// Run with: cargo test -p predcheck-cli --test cli_tests

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::{tempdir, TempDir};

/// Binary with cwd inside `dir` and a private config dir, so a user's own
/// `predcheck/config.toml` never leaks into the test.
fn predcheck(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_predcheck"));
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("PREDCHECK_CONFIG");
    cmd
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn run_check(dir: &TempDir, test: &Path, output: &Path, extra: &[&str]) -> Output {
    predcheck(dir.path())
        .arg("--test-filename")
        .arg(test)
        .arg("--output-filename")
        .arg(output)
        .args(extra)
        .output()
        .expect("run predcheck")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

// -------------------------------------------------------------------------
// Happy path
// -------------------------------------------------------------------------

#[test]
fn invalid_prediction_blanked_valid_kept() {
    let dir = tempdir().unwrap();
    let test = write(&dir, "test.csv", "index\n1\n2\n");
    let output = write(&dir, "out.csv", "index,prediction\n1,12kg\n2,abc\n");

    let out = run_check(&dir, &test, &output, &["--new-filename", "fixed.csv"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let repaired = fs::read_to_string(dir.path().join("fixed.csv")).unwrap();
    assert_eq!(repaired, "index,prediction\n1,12kg\n2,\n");

    let text = stdout(&out);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Parsing index 1");
    assert_eq!(lines[1], "Parsing index 2");
    assert_eq!(lines[2], "Invalid format for index 2: invalid format in 'abc'");
    assert!(lines[3].starts_with("Parsing successful for file: "));
    assert!(lines[4].starts_with("Successfully saved updated output to "));
    assert_eq!(lines.len(), 5);
}

#[test]
fn default_new_filename_is_written_in_cwd() {
    let dir = tempdir().unwrap();
    let test = write(&dir, "test.csv", "index\n1\n");
    let output = write(&dir, "out.csv", "index,prediction\n1,3 volt\n");

    let out = run_check(&dir, &test, &output, &[]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(
        fs::read_to_string(dir.path().join("bapu.csv")).unwrap(),
        "index,prediction\n1,3 volt\n"
    );
}

#[test]
fn pass_through_columns_survive() {
    let dir = tempdir().unwrap();
    let test = write(&dir, "test.csv", "index,image_link,group_id,entity_name\n7,http://x/a.jpg,1,width\n");
    let output = write(
        &dir,
        "out.csv",
        "prediction,index,comment\n10 inches,7,\"looks, fine\"\n",
    );

    let out = run_check(&dir, &test, &output, &["--new-filename", "fixed.csv", "-q"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(
        fs::read_to_string(dir.path().join("fixed.csv")).unwrap(),
        "prediction,index,comment\n10 inches,7,\"looks, fine\"\n"
    );
}

#[test]
fn id_mismatches_are_reported_not_fatal() {
    let dir = tempdir().unwrap();
    let test = write(&dir, "test.csv", "index\n1\n2\n3\n");
    let output = write(&dir, "out.csv", "index,prediction\n2,1 kg\n3,2 kg\n4,3 kg\n");

    let out = run_check(&dir, &test, &output, &["--new-filename", "fixed.csv"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let text = stdout(&out);
    assert!(text.contains("Missing index in output file: {1}"), "{text}");
    assert!(text.contains("Extra index in output file: {4}"), "{text}");
    assert!(dir.path().join("fixed.csv").exists());
}

#[test]
fn quiet_suppresses_diagnostics() {
    let dir = tempdir().unwrap();
    let test = write(&dir, "test.csv", "index\n1\n");
    let output = write(&dir, "out.csv", "index,prediction\n1,junk\n");

    let out = run_check(&dir, &test, &output, &["--quiet"]);
    assert!(out.status.success());
    assert!(stdout(&out).is_empty());
}

#[test]
fn json_report_written() {
    let dir = tempdir().unwrap();
    let test = write(&dir, "test.csv", "index\n1\n2\n");
    let output = write(&dir, "out.csv", "index,prediction\n1,5 gram\n2,\n");

    let out = run_check(&dir, &test, &output, &["--report", "run.json", "-q"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("run.json")).unwrap()).unwrap();
    assert_eq!(json["sanitize"]["rows"], 2);
    assert_eq!(json["sanitize"]["kept"], 1);
    assert_eq!(json["sanitize"]["blanked"][0]["reason"], "empty prediction");
    assert_eq!(json["sanitize"]["blanked"][0]["was_empty"], true);
    assert_eq!(json["reconciliation"]["missing"], serde_json::json!([]));
}

#[test]
fn config_file_changes_columns_and_units() {
    let dir = tempdir().unwrap();
    let config = write(
        &dir,
        "predcheck.toml",
        "default_output = \"clean.csv\"\n\n[columns]\nindex = \"id\"\nprediction = \"value\"\n\n[units]\nallowed = [\"carat\"]\n[units.aliases]\nct = \"carat\"\n",
    );
    let test = write(&dir, "test.csv", "id\n1\n2\n");
    let output = write(&dir, "out.csv", "id,value\n1,2ct\n2,2 parsec\n");

    let out = run_check(&dir, &test, &output, &["--config", config.to_str().unwrap()]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(
        fs::read_to_string(dir.path().join("clean.csv")).unwrap(),
        "id,value\n1,2ct\n2,\n"
    );
}

// -------------------------------------------------------------------------
// Fatal errors
// -------------------------------------------------------------------------

#[test]
fn missing_output_file_exits_not_found() {
    let dir = tempdir().unwrap();
    let test = write(&dir, "test.csv", "index\n1\n");
    let missing = dir.path().join("nope.csv");

    let out = run_check(&dir, &test, &missing, &[]);
    assert_eq!(out.status.code(), Some(4));
    assert!(stderr(&out).starts_with("error: "));
    assert!(stderr(&out).contains("nope.csv"));
    assert!(!dir.path().join("bapu.csv").exists());
}

#[test]
fn wrong_extension_exits_invalid_format() {
    let dir = tempdir().unwrap();
    let test = write(&dir, "test.txt", "index\n1\n");
    let output = write(&dir, "out.csv", "index,prediction\n1,1 kg\n");

    let out = run_check(&dir, &test, &output, &[]);
    assert_eq!(out.status.code(), Some(3));
    assert!(stderr(&out).contains(".csv"));
    assert!(!dir.path().join("bapu.csv").exists());
}

#[test]
fn reference_without_index_exits_schema_before_reading_output() {
    let dir = tempdir().unwrap();
    let test = write(&dir, "test.csv", "id\n1\n");
    // Malformed on purpose: reading it would fail with a load error instead.
    let output = write(&dir, "out.csv", "index,prediction\n1,1 kg,extra\n");

    let out = run_check(&dir, &test, &output, &[]);
    assert_eq!(out.status.code(), Some(5));
    let err = stderr(&out);
    assert!(err.contains("'index'"), "{err}");
    assert_eq!(err.lines().count(), 1);
    assert!(!dir.path().join("bapu.csv").exists());
}

#[test]
fn output_without_prediction_exits_schema() {
    let dir = tempdir().unwrap();
    let test = write(&dir, "test.csv", "index\n1\n");
    let output = write(&dir, "out.csv", "index,value\n1,1 kg\n");

    let out = run_check(&dir, &test, &output, &[]);
    assert_eq!(out.status.code(), Some(5));
    assert!(stderr(&out).contains("'prediction'"));
}

#[test]
fn malformed_output_exits_load_error() {
    let dir = tempdir().unwrap();
    let test = write(&dir, "test.csv", "index\n1\n");
    let output = write(&dir, "out.csv", "index,prediction\n1,1 kg,extra\n");

    let out = run_check(&dir, &test, &output, &[]);
    assert_eq!(out.status.code(), Some(6));
    assert!(!dir.path().join("bapu.csv").exists());
}

#[test]
fn unwritable_destination_exits_write_error() {
    let dir = tempdir().unwrap();
    let test = write(&dir, "test.csv", "index\n1\n");
    let output = write(&dir, "out.csv", "index,prediction\n1,1 kg\n");

    let out = run_check(&dir, &test, &output, &["--new-filename", "missing/dir/fixed.csv"]);
    assert_eq!(out.status.code(), Some(7));
}

#[test]
fn unwritable_report_exits_write_error_without_repaired_file() {
    let dir = tempdir().unwrap();
    let test = write(&dir, "test.csv", "index\n1\n");
    let output = write(&dir, "out.csv", "index,prediction\n1,1 kg\n");

    let out = run_check(&dir, &test, &output, &["--report", "no/such/dir/run.json", "-q"]);
    assert_eq!(out.status.code(), Some(7));
    assert!(stderr(&out).contains("run.json"), "{}", stderr(&out));
    assert!(!dir.path().join("bapu.csv").exists());
}

#[test]
fn invalid_config_exits_config_error() {
    let dir = tempdir().unwrap();
    let config = write(&dir, "bad.toml", "no_such_key = 1\n");
    let test = write(&dir, "test.csv", "index\n1\n");
    let output = write(&dir, "out.csv", "index,prediction\n1,1 kg\n");

    let out = run_check(&dir, &test, &output, &["--config", config.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(8));
    assert!(!dir.path().join("bapu.csv").exists());
}

#[test]
fn missing_required_argument_is_usage_error() {
    let dir = tempdir().unwrap();
    let out = predcheck(dir.path())
        .args(["--test-filename", "test.csv"])
        .output()
        .expect("run predcheck");
    assert_eq!(out.status.code(), Some(2));
}
