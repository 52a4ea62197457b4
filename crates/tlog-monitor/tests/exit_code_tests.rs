//! Process exit codes and output of the tlog-monitor binary

use std::path::PathBuf;
use std::process::{Command, Output};

use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

const TREE_ID: &str = "2605736670972794746";
const ROOT_AT_4: &str = "a5c0d02d840384e0cdb32284d2615734692acbafb89a993c3aad88077b60b176";

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn fixture(name: &str) -> serde_json::Value {
    serde_json::from_slice(&std::fs::read(fixture_path(name)).unwrap()).unwrap()
}

fn tlog_monitor(args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tlog-monitor"));
    cmd.args(args).env_remove("REKOR_URL").env_remove("RUST_LOG");
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn help_exits_zero() {
    let output = tlog_monitor(&["--help"]).output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("--consistency"));
}

#[test]
fn version_exits_zero() {
    let output = tlog_monitor(&["--version"]).output().unwrap();
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn inclusion_without_artifact_exits_one() {
    let output = tlog_monitor(&["--inclusion", "5"]).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("--artifact"));
}

#[test]
fn unknown_flag_exits_one() {
    let output = tlog_monitor(&["--bogus"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn consistency_without_tree_id_exits_one() {
    // Unroutable URL: the checkpoint must be rejected before any request
    let output = tlog_monitor(&[
        "--consistency",
        "--tree-size",
        "4",
        "--root-hash",
        ROOT_AT_4,
        "--rekor-url",
        "http://127.0.0.1:9",
    ])
    .output()
    .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr(&output);
    assert!(stderr.contains("Operation failed:"));
    assert!(stderr.contains("--tree-id"));
}

#[tokio::test(flavor = "multi_thread")]
async fn inclusion_success_exits_zero() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/api/v1/log/entries"))
        .and(matchers::query_param("logIndex", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("signed_entry.json")))
        .mount(&mock_server)
        .await;

    let artifact = fixture_path("artifact.txt");
    let output = tlog_monitor(&[
        "--inclusion",
        "5",
        "--artifact",
        artifact.to_str().unwrap(),
        "--rekor-url",
        mock_server.uri().as_str(),
    ])
    .output()
    .unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Offline root hash calculation for inclusion verified."));
}

#[tokio::test(flavor = "multi_thread")]
async fn inclusion_failure_exits_one() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/api/v1/log/entries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("signed_entry.json")))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let artifact = dir.path().join("other.txt");
    std::fs::write(&artifact, b"not the signed artifact\n").unwrap();

    let output = tlog_monitor(&[
        "--inclusion",
        "5",
        "--artifact",
        artifact.to_str().unwrap(),
        "--rekor-url",
        mock_server.uri().as_str(),
    ])
    .output()
    .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Operation failed:"));
    assert!(!stdout(&output).contains("verified"));
}

#[tokio::test(flavor = "multi_thread")]
async fn consistency_with_url_from_environment_exits_zero() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/api/v1/log"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("log_info.json")))
        .mount(&mock_server)
        .await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/api/v1/log/proof"))
        .and(matchers::query_param("treeID", TREE_ID))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("consistency_proof.json")))
        .mount(&mock_server)
        .await;

    let output = tlog_monitor(&[
        "--consistency",
        "--tree-id",
        TREE_ID,
        "--tree-size",
        "4",
        "--root-hash",
        ROOT_AT_4,
    ])
    .env("REKOR_URL", mock_server.uri())
    .output()
    .unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Consistency verification successful."));
}
