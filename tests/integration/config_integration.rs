//! Integration tests for the layered configuration

use super::test_utils::ENV_LOCK;
use graphdb_loader::config::{ConfigLoader, LoaderConfig};
use std::path::Path;
use tempfile::TempDir;

/// Run `f` with HOME pointed into `temp` and the given variables set, restoring afterwards.
fn with_env<T>(temp: &Path, vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
    let _guard = ENV_LOCK.lock();
    let saved: Vec<(String, Option<String>)> = ["HOME", "XDG_CONFIG_HOME"]
        .iter()
        .copied()
        .chain(vars.iter().map(|(k, _)| *k))
        .map(|k| (k.to_string(), std::env::var(k).ok()))
        .collect();

    let home = temp.join("home");
    std::fs::create_dir_all(&home).unwrap();
    std::env::set_var("HOME", &home);
    std::env::remove_var("XDG_CONFIG_HOME");
    for (k, v) in vars {
        std::env::set_var(k, v);
    }

    let result = f();

    for (k, v) in saved {
        match v {
            Some(v) => std::env::set_var(&k, v),
            None => std::env::remove_var(&k),
        }
    }
    result
}

fn write_workspace_file(workspace: &Path, name: &str, content: &str) {
    let dir = workspace.join("config");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(name), content).unwrap();
}

#[test]
fn env_specific_workspace_file_is_selected_by_env_var() {
    let temp = TempDir::new().unwrap();
    let workspace = temp.path().join("ws");
    write_workspace_file(
        &workspace,
        "config.toml",
        "[endpoint]\nurl = \"http://base:4444/graphql\"\n[logging]\nlevel = \"warn\"\n",
    );
    write_workspace_file(
        &workspace,
        "staging.toml",
        "[endpoint]\nurl = \"https://staging.example/graphql\"\n",
    );

    let config: LoaderConfig = with_env(temp.path(), &[("GRAPHDB_LOADER_ENV", "staging")], || {
        ConfigLoader::load(&workspace)
    })
    .unwrap();

    assert_eq!(
        config.endpoint.url.as_deref(),
        Some("https://staging.example/graphql")
    );
    assert_eq!(config.logging.level, "warn");
    assert!(config.validate().is_ok());
}

#[test]
fn environment_variables_override_nested_keys() {
    let temp = TempDir::new().unwrap();
    let workspace = temp.path().join("ws");
    write_workspace_file(
        &workspace,
        "config.toml",
        "[endpoint]\nurl = \"http://base:4444/graphql\"\nrequest_timeout_secs = 30\n",
    );

    let config = with_env(
        temp.path(),
        &[("GRAPHDB_LOADER__ENDPOINT__REQUEST_TIMEOUT_SECS", "5")],
        || ConfigLoader::load(&workspace),
    )
    .unwrap();

    assert_eq!(config.endpoint.request_timeout_secs, 5);
    assert_eq!(config.endpoint.url.as_deref(), Some("http://base:4444/graphql"));
}

#[test]
fn invalid_workspace_values_fail_validation() {
    let temp = TempDir::new().unwrap();
    let workspace = temp.path().join("ws");
    write_workspace_file(
        &workspace,
        "config.toml",
        "[endpoint]\nconnect_timeout_secs = 0\n[logging]\noutput = \"syslog\"\n",
    );

    let config = with_env(temp.path(), &[], || ConfigLoader::load(&workspace)).unwrap();
    let errors = config.validate().unwrap_err();
    assert_eq!(errors.len(), 2);
}
