use assert_cmd::Command;
use predicates::prelude::*;

/// Every upstream points at a closed local port so no test leaves the machine.
fn discussit_cmd() -> Command {
    let mut cmd = Command::cargo_bin("discussit").unwrap();
    cmd.env("RUST_LOG", "off")
        .env("DISCUSSIT_TIMEOUT_SECS", "2")
        .env("DISCUSSIT_REDDIT_URL", "http://127.0.0.1:9")
        .env("DISCUSSIT_HN_URL", "http://127.0.0.1:9")
        .env("DISCUSSIT_SLASHDOT_URL", "http://127.0.0.1:9")
        .env_remove("DISCUSSIT_API_VERSION");
    cmd
}

fn report_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).unwrap()
}

#[test]
fn test_help_shows_lookup_flags() {
    discussit_cmd()
        .arg("lookup")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--keep-query"))
        .stdout(predicate::str::contains("--api-version"))
        .stdout(predicate::str::contains("--source"));
}

#[test]
fn test_sources_lists_all_for_latest_version() {
    discussit_cmd()
        .arg("sources")
        .assert()
        .success()
        .stdout("reddit\nhackernews\nslashdot\n");
}

#[test]
fn test_sources_hides_slashdot_for_old_version() {
    discussit_cmd()
        .args(["sources", "--api-version", "0.2"])
        .assert()
        .success()
        .stdout("reddit\nhackernews\n");
}

#[test]
fn test_api_version_from_env() {
    discussit_cmd()
        .arg("sources")
        .env("DISCUSSIT_API_VERSION", "2")
        .assert()
        .success()
        .stdout(predicate::str::contains("slashdot").not());
}

#[test]
fn test_empty_url_is_rejected() {
    discussit_cmd()
        .args(["lookup", "  "])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error:"))
        .stdout("");
}

#[test]
fn test_unknown_source_is_rejected() {
    discussit_cmd()
        .args(["lookup", "https://example.com/article", "--source", "digg"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown source: digg"));
}

#[test]
fn test_bad_config_is_rejected() {
    discussit_cmd()
        .args(["lookup", "https://example.com/article"])
        .env("DISCUSSIT_TIMEOUT_SECS", "soon")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_unreachable_upstreams_still_produce_report() {
    let assert = discussit_cmd()
        .args(["lookup", "https://example.com/article"])
        .assert()
        .success();

    let report = report_json(&assert.get_output().stdout);
    assert_eq!(report["total_hits"], 0);
    assert_eq!(report["top_results"]["hits"], 0);

    let errors = report["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 3);
    for error in errors {
        assert!(error.as_str().unwrap().contains("network error"));
    }
}

#[test]
fn test_single_source_lookup_only_queries_that_source() {
    let assert = discussit_cmd()
        .args(["lookup", "https://example.com/article", "--source", "HN"])
        .assert()
        .success();

    let report = report_json(&assert.get_output().stdout);
    let errors = report["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].as_str().unwrap().starts_with("hackernews network error"));
}

#[test]
fn test_old_version_lookup_skips_slashdot() {
    let assert = discussit_cmd()
        .args([
            "lookup",
            "https://example.com/article",
            "--api-version",
            "0.2",
        ])
        .assert()
        .success();

    let report = report_json(&assert.get_output().stdout);
    let errors = report["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert!(errors
        .iter()
        .all(|e| !e.as_str().unwrap().starts_with("slashdot")));
}

#[test]
fn test_unparsable_url_is_reported() {
    let assert = discussit_cmd()
        .args(["lookup", "not a url", "--pretty"])
        .assert()
        .success();

    let report = report_json(&assert.get_output().stdout);
    assert_eq!(report["total_hits"], 0);
    assert!(report["errors"][0]
        .as_str()
        .unwrap()
        .starts_with("aggregator invalid-input error"));
}
