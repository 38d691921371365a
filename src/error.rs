//! Error types for the graph database loader.

use thiserror::Error;

/// Errors raised while planning, executing, or configuring a load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Execution failed: {0}")]
    Execution(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    #[error("Malformed response for {operation}: missing {pointer}")]
    MalformedResponse {
        operation: &'static str,
        pointer: String,
    },

    #[error("Protocol misuse: {0}")]
    Protocol(String),

    #[error("Invalid input batch: {0}")]
    Input(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LoadError {
    /// True for failures reported by the executor rather than by the plan or the caller.
    pub fn is_execution_failure(&self) -> bool {
        matches!(
            self,
            LoadError::Execution(_)
                | LoadError::Transport(_)
                | LoadError::Status { .. }
                | LoadError::GraphQl(_)
        )
    }
}

impl From<config::ConfigError> for LoadError {
    fn from(err: config::ConfigError) -> Self {
        LoadError::Config(err.to_string())
    }
}
