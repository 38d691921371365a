//! Integration tests for graphdb-loader

mod cli_commands;
mod config_integration;
mod dry_run_plan;
mod test_utils;
