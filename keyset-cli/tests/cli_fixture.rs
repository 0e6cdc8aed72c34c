//! CLI command tests against the bundled fixture

use keyset_cli::{backup, export, remove, show, SessionOptions};
use std::path::PathBuf;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/sample.json")
}

fn options(networks: &[&str]) -> SessionOptions {
    SessionOptions {
        fixture: fixture(),
        key_set: "Main".to_string(),
        config: None,
        networks: networks.iter().map(|n| n.to_string()).collect(),
    }
}

#[tokio::test]
async fn test_show_lists_sorted_rows() {
    let output = show(&options(&[]), false).await.unwrap();
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(
        lines[0],
        "Key set: Main (5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY)"
    );
    assert!(lines[1].starts_with("//kusama\tKusama\t"));
    assert!(lines[2].starts_with("//polkadot [pwd]\tPolkadot\t1"));
    assert!(lines[3].starts_with("//polkadot//1\tPolkadot\t1"));
}

#[tokio::test]
async fn test_show_with_network_filter() {
    let output = show(&options(&["kusama"]), false).await.unwrap();
    assert!(output.contains("Filter: kusama"));
    assert!(output.contains("//kusama"));
    assert!(!output.contains("//polkadot"));
}

#[tokio::test]
async fn test_show_json() {
    let output = show(&options(&[]), true).await.unwrap();
    let rows: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_export_selected_paths() {
    let paths = vec!["//polkadot//1".to_string(), "//kusama".to_string()];
    let output = export(&options(&[]), &paths, false).await.unwrap();
    let payload: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(payload["summary"]["key_name"], "Main");
    let keys = payload["keys"].as_array().unwrap();
    assert_eq!(keys.len(), 2);
    assert_eq!(keys[0]["path"], "//polkadot//1");
    assert_eq!(keys[1]["network_title"], "Kusama");
}

#[tokio::test]
async fn test_export_unknown_path_fails() {
    let paths = vec!["//nope".to_string()];
    assert!(export(&options(&[]), &paths, false).await.is_err());
}

#[tokio::test]
async fn test_export_all() {
    let output = export(&options(&["polkadot"]), &[], true).await.unwrap();
    let payload: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(payload["keys"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_remove_reports_signals() {
    let output = remove(&options(&[])).await.unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "completion: KeySetDeleted");
    assert_eq!(lines[1], "dismiss");
    assert_eq!(lines[2], "Remaining key sets: 0");
}

#[tokio::test]
async fn test_backup_offline() {
    let output = backup(&options(&[])).await.unwrap();
    assert_eq!(output, "Backup started for Main");
}

#[tokio::test]
async fn test_unknown_key_set() {
    let mut opts = options(&[]);
    opts.key_set = "Other".to_string();
    let err = show(&opts, false).await.unwrap_err();
    assert!(err.to_string().contains("Unknown key set"));
}

#[tokio::test]
async fn test_config_file_applied() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    std::fs::write(&config, r#"{"root_base58_prefix": 0}"#).unwrap();

    let mut opts = options(&[]);
    opts.config = Some(config);
    let output = show(&opts, false).await.unwrap();
    assert!(output.starts_with("Key set: Main (15oF4uVJwmo4TdGW7VfQxNLavjCXviqxT9S1MgbjMNHr6Sp5)"));
}
