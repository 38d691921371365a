//! Runs the graphdb-load binary against temporary workspaces.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const BATCH: &str = r#"{
    "A": { "sources": [{ "sourcePath": "s1", "contents": "" }], "contracts": [] },
    "B": {
        "sources": [{ "sourcePath": "s2", "contents": "contract C1 {}" }],
        "contracts": [{ "contractName": "c1", "abi": [] }]
    }
}"#;

fn graphdb_load(workspace: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_graphdb-load"))
        .arg("--workspace")
        .arg(workspace)
        .arg("--quiet")
        .args(args)
        .env("HOME", workspace)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("GRAPHDB_LOADER_ENV")
        .env_remove("GRAPHDB_LOADER__ENDPOINT__URL")
        .output()
        .unwrap()
}

fn workspace_with_batch() -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("batch.json"), BATCH).unwrap();
    temp
}

#[test]
fn plan_prints_requests_as_json() {
    let temp = workspace_with_batch();
    let batch = temp.path().join("batch.json");
    let output = graphdb_load(
        temp.path(),
        &["plan", batch.to_str().unwrap(), "--format", "json"],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["total"], 3);
    let operations: Vec<&str> = parsed["requests"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["operation"].as_str().unwrap())
        .collect();
    assert_eq!(operations, vec!["sourcesAdd", "bytecodesAdd", "compilationsAdd"]);
}

#[test]
fn plan_text_without_bytecodes() {
    let temp = workspace_with_batch();
    let batch = temp.path().join("batch.json");
    let output = graphdb_load(temp.path(), &["plan", batch.to_str().unwrap(), "--no-bytecodes"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Total: 2 request(s) (1 sources, 0 bytecodes, 1 compilations)"));
}

#[test]
fn load_without_endpoint_fails_cleanly() {
    let temp = workspace_with_batch();
    let batch = temp.path().join("batch.json");
    let output = graphdb_load(temp.path(), &["load", batch.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No endpoint configured"));
}

#[test]
fn load_reports_unreachable_endpoint_as_execution_failure() {
    let temp = workspace_with_batch();
    let batch = temp.path().join("batch.json");
    let output = graphdb_load(
        temp.path(),
        &[
            "load",
            batch.to_str().unwrap(),
            "--endpoint",
            "http://127.0.0.1:9/graphql",
        ],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No further requests were sent"));
}

#[test]
fn config_show_reflects_workspace_file() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("config")).unwrap();
    std::fs::write(
        temp.path().join("config").join("config.toml"),
        "[endpoint]\nurl = \"http://workspace:4444/graphql\"\n",
    )
    .unwrap();

    let output = graphdb_load(temp.path(), &["config", "show"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("url = \"http://workspace:4444/graphql\""));
    assert!(stdout.contains("[load]"));
}
