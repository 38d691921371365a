//! CLI presentation: text and json formatters per command family.

mod load;
mod plan;

pub use load::{format_load_result_json, format_load_result_text};
pub use plan::{format_plan_json, format_plan_text};
