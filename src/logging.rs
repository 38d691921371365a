//! Logging System
//!
//! Structured logging built on `tracing`. Level, format, and destination come from
//! the `[logging]` config table, environment overrides, and CLI flags.

use crate::error::LoadError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::debug;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Filter directive override, e.g. `GRAPHDB_LOADER_LOG=graphdb_loader=debug`.
pub const LOG_ENV: &str = "GRAPHDB_LOADER_LOG";
pub const LOG_FORMAT_ENV: &str = "GRAPHDB_LOADER_LOG_FORMAT";
pub const LOG_OUTPUT_ENV: &str = "GRAPHDB_LOADER_LOG_OUTPUT";
pub const LOG_MODULES_ENV: &str = "GRAPHDB_LOADER_LOG_MODULES";

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Install a subscriber at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path, required when output is "file"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format, terminal outputs only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

// Results go to stdout; logs stay out of the way.
fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: true,
            modules: HashMap::new(),
        }
    }
}

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !LEVELS.contains(&self.level.as_str()) {
            return Err(format!(
                "Invalid log level: {} (must be one of {})",
                self.level,
                LEVELS.join(", ")
            ));
        }
        parse_format(&self.format)?;
        let output = parse_output(&self.output)?;
        if output == Output::File && self.file.is_none() {
            return Err("Log output 'file' requires logging.file to be set".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Stdout,
    Stderr,
    File,
}

fn parse_format(format: &str) -> Result<Format, String> {
    match format {
        "text" => Ok(Format::Text),
        "json" => Ok(Format::Json),
        other => Err(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            other
        )),
    }
}

fn parse_output(output: &str) -> Result<Output, String> {
    match output {
        "stdout" => Ok(Output::Stdout),
        "stderr" => Ok(Output::Stderr),
        "file" => Ok(Output::File),
        other => Err(format!(
            "Invalid log output: {} (must be 'stdout', 'stderr', or 'file')",
            other
        )),
    }
}

/// Initialize the logging system
///
/// Priority order (highest to lowest):
/// 1. Environment variables (GRAPHDB_LOADER_LOG, GRAPHDB_LOADER_LOG_FORMAT, ...)
/// 2. The given config, which already folds in CLI flags and config files
/// 3. Defaults
///
/// Calling this when a global subscriber is already installed is a no-op.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), LoadError> {
    let defaults = LoggingConfig::default();
    let config = config.unwrap_or(&defaults);
    if !config.enabled {
        return Ok(());
    }

    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let output = determine_output(config)?;
    let use_color = config.color && output != Output::File;
    let writer = make_writer(output, config)?;

    let registry = Registry::default().with(filter);
    let installed = match format {
        Format::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init(),
        Format::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(use_color)
                    .with_writer(writer),
            )
            .try_init(),
    };

    if installed.is_err() {
        debug!("Global subscriber already installed; keeping it");
    }
    Ok(())
}

fn make_writer(output: Output, config: &LoggingConfig) -> Result<BoxMakeWriter, LoadError> {
    match output {
        Output::Stdout => Ok(BoxMakeWriter::new(std::io::stdout)),
        Output::Stderr => Ok(BoxMakeWriter::new(std::io::stderr)),
        Output::File => {
            let path = config.file.as_ref().ok_or_else(|| {
                LoadError::Config("Log output 'file' requires logging.file to be set".to_string())
            })?;
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    LoadError::Config(format!("Failed to create log directory: {}", e))
                })?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    LoadError::Config(format!("Failed to open log file {:?}: {}", path, e))
                })?;
            Ok(BoxMakeWriter::new(Mutex::new(file)))
        }
    }
}

/// Build environment filter from config or environment variables
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, LoadError> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return Ok(filter);
    }

    if config.level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::new(&config.level);
    for (module, module_level) in &config.modules {
        filter = filter.add_directive(
            format!("{}={}", module, module_level)
                .parse()
                .map_err(|e| LoadError::Config(format!("Invalid log directive: {}", e)))?,
        );
    }

    if let Ok(modules_str) = std::env::var(LOG_MODULES_ENV) {
        for module_spec in modules_str.split(',') {
            if let Some((module, level)) = module_spec.split_once('=') {
                let directive = format!("{}={}", module.trim(), level.trim());
                filter = filter.add_directive(directive.parse().map_err(|e| {
                    LoadError::Config(format!("Invalid log directive from env: {}", e))
                })?);
            }
        }
    }

    Ok(filter)
}

fn determine_format(config: &LoggingConfig) -> Result<Format, LoadError> {
    if let Ok(format) = std::env::var(LOG_FORMAT_ENV) {
        if let Ok(format) = parse_format(&format) {
            return Ok(format);
        }
    }
    parse_format(&config.format).map_err(LoadError::Config)
}

fn determine_output(config: &LoggingConfig) -> Result<Output, LoadError> {
    let output = std::env::var(LOG_OUTPUT_ENV).unwrap_or_else(|_| config.output.clone());
    parse_output(&output).map_err(LoadError::Config)
}
