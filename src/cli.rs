//! CLI domain: parse, route, help, output, and presentation only.
//! No loading logic here; the route table hands batches to the loader.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands, ConfigCommands};
pub use presentation::{
    format_load_result_json, format_load_result_text, format_plan_json, format_plan_text,
};
pub use route::RunContext;
