//! Configuration discovery and precedence, observed through the binary.
//!
//! Most tests run `info --json` in a scratch directory and inspect the
//! reported `config` object.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

fn write(dir: &Path, name: &str, body: &str) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join(name), body).unwrap();
}

fn run_json(dir: &Path, args: &[&str]) -> Value {
    let output = cmd()
        .arg("-C")
        .arg(dir)
        .args(args)
        .arg("--json")
        .output()
        .expect("failed to run reprise");
    assert!(
        output.status.success(),
        "reprise {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

/// The `config` object reported by `info --json` when run in `dir`.
fn effective_config(dir: &Path) -> Value {
    run_json(dir, &["info"])["config"].clone()
}

// =============================================================================
// Discovery
// =============================================================================

#[test]
fn defaults_without_any_file() {
    let tmp = TempDir::new().unwrap();
    let config = effective_config(tmp.path());

    assert_eq!(config["log_level"], "info");
    assert!(config["config_file"].is_null());
    assert_eq!(config["analysis"]["max_results"], 20);
}

#[test]
fn every_supported_name_is_discovered() {
    for (name, body) in [
        (".reprise.toml", "log_level = \"warn\""),
        ("reprise.toml", "log_level = \"warn\""),
        (".reprise.yaml", "log_level: warn\n"),
        (".reprise.yml", "log_level: warn\n"),
        (".reprise.json", r#"{"log_level": "warn"}"#),
    ] {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), name, body);

        let config = effective_config(tmp.path());
        assert_eq!(config["log_level"], "warn", "{name} not applied");
        let reported = config["config_file"].as_str().unwrap();
        assert!(reported.ends_with(name), "{name} not reported: {reported}");
    }
}

#[test]
fn found_from_a_nested_directory() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), ".reprise.toml", "log_level = \"debug\"");
    let deep = tmp.path().join("part-one").join("chapter-two");
    std::fs::create_dir_all(&deep).unwrap();

    assert_eq!(effective_config(&deep)["log_level"], "debug");
}

#[test]
fn git_directory_bounds_the_search() {
    let tmp = TempDir::new().unwrap();
    let outside = tmp.path().join("outside");
    let repo = outside.join("repo");
    write(&outside, ".reprise.toml", "log_level = \"error\"");
    std::fs::create_dir_all(repo.join(".git")).unwrap();
    std::fs::create_dir_all(repo.join("drafts")).unwrap();

    let config = effective_config(&repo.join("drafts"));
    assert_eq!(config["log_level"], "info");
    assert!(config["config_file"].is_null());
}

#[test]
fn config_next_to_git_is_used() {
    let tmp = TempDir::new().unwrap();
    let repo = tmp.path().join("repo");
    std::fs::create_dir_all(repo.join(".git")).unwrap();
    write(&repo, ".reprise.toml", "log_level = \"debug\"");
    std::fs::create_dir_all(repo.join("drafts")).unwrap();

    let config = effective_config(&repo.join("drafts"));
    assert_eq!(config["log_level"], "debug");
    assert!(config["config_file"].is_string());
}

// =============================================================================
// Precedence
// =============================================================================

#[test]
fn plain_name_beats_dotfile() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), ".reprise.toml", "log_level = \"debug\"");
    write(tmp.path(), "reprise.toml", "log_level = \"error\"");

    assert_eq!(effective_config(tmp.path())["log_level"], "error");
}

#[test]
fn yaml_beats_toml_in_one_directory() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), ".reprise.toml", "log_level = \"debug\"");
    write(tmp.path(), ".reprise.yaml", "log_level: error\n");

    assert_eq!(effective_config(tmp.path())["log_level"], "error");
}

#[test]
fn nearer_directory_wins() {
    let tmp = TempDir::new().unwrap();
    let inner = tmp.path().join("inner");
    write(tmp.path(), ".reprise.toml", "log_level = \"error\"");
    write(&inner, ".reprise.toml", "log_level = \"debug\"");

    assert_eq!(effective_config(&inner)["log_level"], "debug");
}

#[test]
fn explicit_config_flag_wins() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), ".reprise.toml", "log_level = \"debug\"");
    write(tmp.path(), "override.toml", "log_level = \"error\"");
    let explicit = tmp.path().join("override.toml");

    let json = run_json(tmp.path(), &["--config", explicit.to_str().unwrap(), "info"]);
    assert_eq!(json["config"]["log_level"], "error");
    assert!(
        json["config"]["config_file"]
            .as_str()
            .unwrap()
            .ends_with("override.toml")
    );
}

#[test]
fn environment_beats_files() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), ".reprise.toml", "[analysis]\nmax_results = 5\n");

    let output = cmd()
        .env("REPRISE_ANALYSIS__MAX_RESULTS", "2")
        .arg("-C")
        .arg(tmp.path())
        .args(["info", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["analysis"]["max_results"], 2);
}

// =============================================================================
// Analysis defaults and input limits
// =============================================================================

#[test]
fn analysis_table_is_reported() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        ".reprise.toml",
        "[analysis]\nmax_results = 5\nsimilar_sentences = false\ncustom_words = [\"very\"]\n",
    );

    let analysis = &effective_config(tmp.path())["analysis"];
    assert_eq!(analysis["max_results"], 5);
    assert_eq!(analysis["similar_sentences"], false);
    assert_eq!(analysis["repeated_words"], true);
    assert_eq!(analysis["custom_words"][0], "very");
}

#[test]
fn analysis_table_drives_analyze() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        ".reprise.toml",
        "[analysis]\nexclude_common = false\nmax_results = 1\n",
    );

    let report = run_json(
        tmp.path(),
        &["analyze", "--text", "The dog and the cat and the bird."],
    );
    let words = report["repeatedWords"].as_array().unwrap();
    assert_eq!(words.len(), 1);
    assert_eq!(words[0]["value"], "the");
    assert_eq!(words[0]["count"], 3);
}

#[test]
fn configured_focus_terms_match_case_insensitively() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        ".reprise.toml",
        "[analysis]\ncustom_words = [\"Very\", \"GOOD\"]\n",
    );

    let report = run_json(tmp.path(), &["analyze", "--text", "It was very, very good."]);
    let counts = report["customCounts"].as_array().unwrap();
    assert_eq!(counts[0]["value"], "very");
    assert_eq!(counts[0]["count"], 2);
    assert_eq!(counts[1]["value"], "good");
    assert_eq!(counts[1]["count"], 1);
}

#[test]
fn max_input_bytes_is_enforced() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), ".reprise.toml", "max_input_bytes = 10\n");

    cmd()
        .arg("-C")
        .arg(tmp.path())
        .args(["analyze", "--text", "This sentence is longer than ten bytes."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));

    assert_eq!(effective_config(tmp.path())["max_input_bytes"], 10);
}

#[test]
fn disable_input_limit_lifts_the_cap() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        ".reprise.toml",
        "max_input_bytes = 10\ndisable_input_limit = true\n",
    );

    run_json(
        tmp.path(),
        &["analyze", "--text", "This sentence is longer than ten bytes."],
    );
    assert!(effective_config(tmp.path())["max_input_bytes"].is_null());
}

// =============================================================================
// Invalid files
// =============================================================================

#[test]
fn malformed_files_fail_loudly() {
    for (name, body) in [
        (".reprise.toml", "this is not valid toml [[["),
        (".reprise.yaml", "invalid:\n  yaml\n content:\n[broken"),
        (".reprise.json", "{not valid json}"),
    ] {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), name, body);

        cmd()
            .arg("-C")
            .arg(tmp.path())
            .arg("info")
            .assert()
            .failure()
            .stderr(predicate::str::contains("configuration"));
    }
}

#[test]
fn unknown_keys_are_ignored() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        ".reprise.toml",
        "log_level = \"warn\"\nthreshold = 0.5\n[analysis]\nstemming = true\n",
    );

    assert_eq!(effective_config(tmp.path())["log_level"], "warn");
}
