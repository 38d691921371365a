//! CLI help: stable command names for logs.

use crate::cli::parse::{Commands, ConfigCommands};

pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Plan { .. } => "plan".to_string(),
        Commands::Load { .. } => "load".to_string(),
        Commands::Config { command } => format!("config.{}", config_command_name(command)),
    }
}

pub fn config_command_name(command: &ConfigCommands) -> &'static str {
    match command {
        ConfigCommands::Show => "show",
    }
}
