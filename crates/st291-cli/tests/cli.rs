use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("st291"))
}

fn repo_root() -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn golden_case(case: &str) -> std::path::PathBuf {
    repo_root().join("tests").join("golden").join(case)
}

fn sample_hex() -> std::path::PathBuf {
    golden_case("cea708_raw").join("input.hex")
}

#[test]
fn help_lists_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("decode").and(contains("reencode")));
    cmd().arg("decode").arg("--help").assert().success();
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.bin");

    cmd()
        .arg("decode")
        .arg(missing)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn decode_stdout_outputs_plain_json() {
    let assert = cmd()
        .arg("decode")
        .arg(sample_hex())
        .arg("--hex")
        .arg("--stdout")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let actual: Value = serde_json::from_str(&stdout).expect("valid json");
    let expected: Value = serde_json::from_str(
        &std::fs::read_to_string(golden_case("cea708_raw").join("expected_plain.json"))
            .expect("read expected"),
    )
    .expect("parse expected");
    assert_eq!(actual, expected);
}

#[test]
fn decode_display_renders_hex_ids() {
    let assert = cmd()
        .arg("decode")
        .arg(sample_hex())
        .arg("--hex")
        .arg("--display")
        .arg("--stdout")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(value["DID"], "0x61");
    assert_eq!(value["Checksum Word"], "0x1c3");
}

#[test]
fn decode_writes_report_file() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("nested").join("view.json");

    cmd()
        .arg("decode")
        .arg(sample_hex())
        .arg("--hex")
        .arg("-o")
        .arg(&report)
        .arg("--pretty")
        .assert()
        .success()
        .stderr(contains("OK:"));
    let text = std::fs::read_to_string(&report).expect("report written");
    let _: Value = serde_json::from_str(&text).expect("valid json");
}

#[test]
fn stdout_and_report_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("view.json");

    cmd()
        .arg("decode")
        .arg(sample_hex())
        .arg("--hex")
        .arg("--stdout")
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn pretty_and_compact_conflict() {
    cmd()
        .arg("decode")
        .arg(sample_hex())
        .arg("--hex")
        .arg("--stdout")
        .arg("--pretty")
        .arg("--compact")
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn quiet_suppresses_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("view.json");

    cmd()
        .arg("decode")
        .arg(sample_hex())
        .arg("--hex")
        .arg("-o")
        .arg(report)
        .arg("--quiet")
        .assert()
        .success()
        .stderr(predicates::str::contains("OK:").not());
}

#[test]
fn truncated_binary_input_fails() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("short.bin");
    std::fs::write(&input, [0x00, 0x90, 0x00]).expect("write input");

    cmd()
        .arg("decode")
        .arg(input)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("truncated input"));
}

#[test]
fn invalid_hex_shows_hint() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("bad.hex");
    std::fs::write(&input, "zz").expect("write input");

    cmd()
        .arg("decode")
        .arg(input)
        .arg("--hex")
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("invalid hex input").and(contains("hint:")));
}

#[test]
fn reencode_stdout_matches_golden() {
    let case = golden_case("scte104_delegated");
    let expected =
        std::fs::read_to_string(case.join("expected_reencoded.hex")).expect("read expected");

    cmd()
        .arg("reencode")
        .arg(case.join("input.hex"))
        .arg("--hex")
        .arg("--stdout")
        .assert()
        .success()
        .stdout(contains(expected.trim()));
}

#[test]
fn reencode_writes_raw_bytes() {
    let temp = TempDir::new().expect("tempdir");
    let output = temp.path().join("packet.bin");

    cmd()
        .arg("reencode")
        .arg(sample_hex())
        .arg("--hex")
        .arg("-o")
        .arg(&output)
        .assert()
        .success();
    let bytes = std::fs::read(&output).expect("output written");
    assert_eq!(bytes.len(), 16);
    assert_eq!(&bytes[..3], &[0x7F, 0xFF, 0xFF]);
}

#[test]
fn output_must_differ_from_input() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("packet.hex");
    std::fs::copy(sample_hex(), &input).expect("copy fixture");

    cmd()
        .arg("reencode")
        .arg(&input)
        .arg("--hex")
        .arg("-o")
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("must differ from input"));
}

#[test]
fn glob_matching_many_files_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    std::fs::write(temp.path().join("a.hex"), "00").expect("write a");
    std::fs::write(temp.path().join("b.hex"), "00").expect("write b");
    let pattern = temp.path().join("*.hex");

    cmd()
        .arg("decode")
        .arg(pattern)
        .arg("--hex")
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("multiple files match pattern"));
}
