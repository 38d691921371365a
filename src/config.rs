//! Configuration System
//!
//! Layered configuration for the loader: built-in defaults, then the user's global
//! config file, then workspace config files, then `GRAPHDB_LOADER__*` environment
//! variables. Later layers override earlier ones key by key.

use crate::error::LoadError;
use crate::loader::LoadOptions;
use crate::logging::LoggingConfig;
use config::Environment;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

mod merge {
    pub mod merge_policy;
}
mod sources {
    pub mod global_file;
    pub mod workspace_file;
}

/// Prefix of environment variables that override config keys, e.g.
/// `GRAPHDB_LOADER__ENDPOINT__URL`.
pub const ENV_PREFIX: &str = "GRAPHDB_LOADER";

// Serializes tests that read or write process-wide environment variables.
#[cfg(test)]
pub(crate) static TEST_ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// GraphQL endpoint the batch is submitted to
    #[serde(default)]
    pub endpoint: EndpointConfig,

    /// Stage toggles
    #[serde(default)]
    pub load: LoadOptions,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Full URL of the GraphQL endpoint
    #[serde(default)]
    pub url: Option<String>,

    /// Bearer token sent with every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: None,
            token: None,
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            headers: HashMap::new(),
        }
    }
}

impl EndpointConfig {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(url) = &self.url {
            let parsed =
                reqwest::Url::parse(url).map_err(|e| format!("Invalid url '{}': {}", url, e))?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                return Err(format!(
                    "Unsupported url scheme '{}' (must be http or https)",
                    parsed.scheme()
                ));
            }
        }
        if self.connect_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err("Timeouts must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Endpoint(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Endpoint(msg) => write!(f, "Endpoint: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl LoaderConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.endpoint.validate() {
            errors.push(ValidationError::Endpoint(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate, folding every problem into one error.
    pub fn validated(self) -> Result<Self, LoadError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            LoadError::Config(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(self)
    }

    pub fn to_toml(&self) -> Result<String, LoadError> {
        toml::to_string_pretty(self)
            .map_err(|e| LoadError::Config(format!("Failed to render configuration: {}", e)))
    }
}

/// Builds a [`LoaderConfig`] from its layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for `workspace_root`: defaults, global file, workspace files, env.
    pub fn load(workspace_root: &Path) -> Result<LoaderConfig, LoadError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root)?;
        let config = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize::<LoaderConfig>()?;
        Ok(config)
    }

    /// Load configuration from one explicit file, still applying defaults and env overrides.
    pub fn load_from_file(path: &Path) -> Result<LoaderConfig, LoadError> {
        if !path.exists() {
            return Err(LoadError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        let config = merge::merge_policy::builder_with_defaults()?
            .add_source(config::File::from(path))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize::<LoaderConfig>()?;
        Ok(config)
    }

    /// Path of the user-level config file, if a home directory can be determined.
    pub fn global_config_path() -> Option<PathBuf> {
        sources::global_file::global_config_path()
    }
}
