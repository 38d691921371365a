//! CLI route: single route table and run context. Dispatches to the loader and presentation.

use crate::cli::help::command_name;
use crate::cli::parse::{Commands, ConfigCommands};
use crate::cli::presentation::{
    format_load_result_json, format_load_result_text, format_plan_json, format_plan_text,
};
use crate::config::{ConfigLoader, EndpointConfig, LoaderConfig};
use crate::error::LoadError;
use crate::http::HttpExecutor;
use crate::loader::{DryRunExecutor, LoadOptions, Loader};
use crate::types::CompilationBatch;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Runtime context for CLI execution: workspace, config path, and the effective config.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    workspace_root: PathBuf,
    config_path: Option<PathBuf>,
    config: LoaderConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, LoadError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        let config = config.validated()?;
        Ok(Self {
            workspace_root,
            config_path,
            config,
        })
    }

    /// Execute one command and return its rendered output.
    pub fn execute(&self, command: &Commands) -> Result<String, LoadError> {
        let name = command_name(command);
        let started = Instant::now();
        debug!(command = %name, workspace = %self.workspace_root.display(), "Dispatching command");

        let result = match command {
            Commands::Plan {
                batch,
                format,
                no_bytecodes,
            } => self.handle_plan(batch, format, *no_bytecodes),
            Commands::Load {
                batch,
                endpoint,
                format,
                no_bytecodes,
            } => self.handle_load(batch, endpoint.as_deref(), format, *no_bytecodes),
            Commands::Config { command } => match command {
                ConfigCommands::Show => self.handle_config_show(),
            },
        };

        info!(
            command = %name,
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn load_options(&self, no_bytecodes: bool) -> LoadOptions {
        let mut options = self.config.load;
        if no_bytecodes {
            options.bytecodes = false;
        }
        options
    }

    fn handle_plan(
        &self,
        batch_path: &Path,
        format: &str,
        no_bytecodes: bool,
    ) -> Result<String, LoadError> {
        let batch = CompilationBatch::from_file(batch_path)?;
        let loader = Loader::new(self.load_options(no_bytecodes));
        let executor = DryRunExecutor::new();

        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(loader.load(&executor, &batch))?;

        let requests = executor.requests();
        if format == "json" {
            format_plan_json(&requests)
        } else {
            Ok(format_plan_text(&requests))
        }
    }

    fn handle_load(
        &self,
        batch_path: &Path,
        endpoint_override: Option<&str>,
        format: &str,
        no_bytecodes: bool,
    ) -> Result<String, LoadError> {
        let endpoint = self.endpoint_config(endpoint_override)?;
        let batch = CompilationBatch::from_file(batch_path)?;
        let loader = Loader::new(self.load_options(no_bytecodes));
        let executor = HttpExecutor::new(&endpoint)?;
        info!(url = %executor.url(), units = batch.len(), "Submitting batch");

        let rt = tokio::runtime::Runtime::new()?;
        let loaded = rt.block_on(loader.load(&executor, &batch))?;

        if format == "json" {
            format_load_result_json(&loaded)
        } else {
            Ok(format_load_result_text(&loaded))
        }
    }

    fn endpoint_config(&self, endpoint_override: Option<&str>) -> Result<EndpointConfig, LoadError> {
        let mut endpoint = self.config.endpoint.clone();
        if let Some(url) = endpoint_override {
            endpoint.url = Some(url.to_string());
        }
        if endpoint.url.is_none() {
            return Err(LoadError::Config(
                "No endpoint configured; pass --endpoint or set endpoint.url".to_string(),
            ));
        }
        endpoint.validate().map_err(LoadError::Config)?;
        Ok(endpoint)
    }

    fn handle_config_show(&self) -> Result<String, LoadError> {
        let mut out = String::new();
        match &self.config_path {
            Some(path) => out.push_str(&format!("# Source: {}\n", path.display())),
            None => {
                if let Some(global) = ConfigLoader::global_config_path() {
                    out.push_str(&format!("# Global config: {}\n", global.display()));
                }
                out.push_str(&format!(
                    "# Workspace config: {}\n",
                    self.workspace_root.join("config").join("config.toml").display()
                ));
            }
        }
        out.push('\n');
        out.push_str(&self.config.to_toml()?);
        Ok(out)
    }
}
