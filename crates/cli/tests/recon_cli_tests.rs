// Integration tests for `samhita recon` and `samhita clean-translation`.
// Run with: cargo test -p samhita-cli --test recon_cli_tests
//
// Each test copies the recon fixture corpus into a temp dir so configs can
// resolve their sources (and write their output) relative to it.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn samhita() -> Command {
    Command::new(env!("CARGO_BIN_EXE_samhita"))
}

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../recon/tests/fixtures")
}

fn corpus_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in ["transliteration.txt", "translation.txt", "deva.txt", "rigveda.recon.toml"] {
        std::fs::copy(fixtures_dir().join(name), dir.path().join(name)).unwrap();
    }
    dir
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ── recon run ───────────────────────────────────────────────────────

#[test]
fn run_writes_record_array_next_to_config() {
    let dir = corpus_dir();
    let output = samhita()
        .args(["recon", "run"])
        .arg(dir.path().join("rigveda.recon.toml"))
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("recon 'Rigveda sample': 4 verses"));

    let written = std::fs::read_to_string(dir.path().join("rigveda_data.json")).unwrap();
    let records: serde_json::Value = serde_json::from_str(&written).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records[0]["mandala"], 1);
    assert_eq!(records[0]["verse"], 1);
    assert!(records[0]["translation_griffith"].as_str().unwrap().starts_with("I Laud Agni"));
    assert_eq!(
        records[3]["devanagari"],
        "वायवा याहि दर्शतेमे सोमा अरंकृताः । तेषां पाहि श्रुधी हवम् ॥"
    );
    // Non-ASCII text is written as-is, not \u-escaped.
    assert!(written.contains("अग्निमीळे"));
}

#[test]
fn run_json_prints_full_result() {
    let dir = corpus_dir();
    let out_path = dir.path().join("records.json");
    let output = samhita()
        .args(["recon", "run", "--json", "--output"])
        .arg(&out_path)
        .arg(dir.path().join("rigveda.recon.toml"))
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["meta"]["config_name"], "Rigveda sample");
    assert_eq!(result["summary"]["records"], 4);
    assert_eq!(result["summary"]["translation_misses"], 0);
    assert!(result["summary"].get("structural_mismatch").is_none());
    assert_eq!(result["records"].as_array().unwrap().len(), 4);

    // --output wins over [output] json
    assert!(out_path.exists());
    assert!(!dir.path().join("rigveda_data.json").exists());
}

#[test]
fn run_short_translation_warns_but_succeeds() {
    let dir = corpus_dir();
    std::fs::write(
        dir.path().join("translation.txt"),
        "HYMN I. Agni.\n1. one\n2. two\n",
    )
    .unwrap();

    let output = samhita()
        .args(["recon", "run", "--json"])
        .arg(dir.path().join("rigveda.recon.toml"))
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("4 authoritative keys vs 2 translation blocks"));
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["records"][3]["translation_griffith"], "Translation not found");
    assert_eq!(result["summary"]["structural_mismatch"]["translation_blocks"], 2);
}

#[test]
fn run_fail_on_mismatch_exits_63_after_writing() {
    let dir = corpus_dir();
    std::fs::write(dir.path().join("translation.txt"), "1. only one\n").unwrap();
    let config = std::fs::read_to_string(dir.path().join("rigveda.recon.toml")).unwrap();
    std::fs::write(
        dir.path().join("strict.recon.toml"),
        format!("{config}\n[alignment]\nfail_on_mismatch = true\n"),
    )
    .unwrap();

    let output = samhita()
        .args(["recon", "run"])
        .arg(dir.path().join("strict.recon.toml"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(63));
    assert!(stderr(&output).contains("structural mismatch"));
    assert!(dir.path().join("rigveda_data.json").exists());
}

#[test]
fn run_missing_native_file_exits_62() {
    let dir = corpus_dir();
    std::fs::remove_file(dir.path().join("deva.txt")).unwrap();

    let output = samhita()
        .args(["recon", "run"])
        .arg(dir.path().join("rigveda.recon.toml"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(62));
    let err = stderr(&output);
    assert!(err.contains("error: cannot read native source"));
    assert!(err.contains("hint:"));
    assert!(!dir.path().join("rigveda_data.json").exists());
}

// ── recon validate ──────────────────────────────────────────────────

#[test]
fn validate_accepts_fixture_config() {
    let output = samhita()
        .args(["recon", "validate"])
        .arg(fixtures_dir().join("rigveda.recon.toml"))
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("valid: recon 'Rigveda sample'"));
    assert!(stderr(&output).contains("native deva.txt (keyed)"));
}

#[test]
fn validate_rejects_empty_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.recon.toml");
    std::fs::write(
        &path,
        r#"
name = "bad"

[sources.transliteration]
file = "t.txt"

[sources.translation]
file = "e.txt"

[placeholders]
translation = ""
"#,
    )
    .unwrap();

    let output = samhita().args(["recon", "validate"]).arg(&path).output().unwrap();
    assert_eq!(output.status.code(), Some(60));
    assert!(stderr(&output).contains("config validation error"));
}

#[test]
fn validate_rejects_unknown_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("typo.recon.toml");
    std::fs::write(
        &path,
        "name = \"typo\"\nsoruces = 1\n[sources.transliteration]\nfile = \"t\"\n[sources.translation]\nfile = \"e\"\n",
    )
    .unwrap();

    let output = samhita().args(["recon", "validate"]).arg(&path).output().unwrap();
    assert_eq!(output.status.code(), Some(60));
    assert!(stderr(&output).contains("config parse error"));
}

// ── clean-translation ───────────────────────────────────────────────

#[test]
fn clean_translation_keeps_titles_and_numbered_lines() {
    let dir = tempfile::tempdir().unwrap();
    let raw = dir.path().join("raw.txt");
    let clean = dir.path().join("clean.txt");
    std::fs::write(
        &raw,
        "\n\n--- START OF BOOK 1 ---\n\n\n--- HYMN I. Agni. ---\nRig Veda\n  HYMN I. Agni.\n1. I Laud Agni\nThe hotar.\n2. Worthy is Agni\nNext: Hymn 2\n",
    )
    .unwrap();

    let output = samhita()
        .arg("clean-translation")
        .arg(&raw)
        .arg("--out")
        .arg(&clean)
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        std::fs::read_to_string(&clean).unwrap(),
        "HYMN I. Agni.\n1. I Laud Agni\n2. Worthy is Agni\n"
    );
}

#[test]
fn clean_translation_missing_input_is_io_error() {
    let output = samhita()
        .args(["clean-translation", "/nonexistent/raw.txt"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
}

// ── version ─────────────────────────────────────────────────────────

#[test]
fn long_version_reports_commit_and_engine() {
    let output = samhita().arg("--version").output().unwrap();
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains(&format!("samhita {} (", env!("CARGO_PKG_VERSION"))));
    assert!(text.contains("engine:  samhita-recon"));
    assert!(!text.contains("target:"));
}
