//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::LoadError;

/// Map loader errors to a string for CLI output.
pub fn map_error(e: &LoadError) -> String {
    match e {
        LoadError::Config(msg) => format!(
            "Configuration error: {}\n\nRun 'graphdb-load config show' to inspect the effective settings.",
            msg
        ),
        other if other.is_execution_failure() => format!(
            "{}\n\nNo further requests were sent; records already created were kept.",
            other
        ),
        other => other.to_string(),
    }
}
