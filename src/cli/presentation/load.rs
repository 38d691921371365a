//! Load command presentation: registered compilations.

use crate::error::LoadError;
use crate::loader::LoadedCompilations;
use comfy_table::Table;

pub fn format_load_result_text(loaded: &LoadedCompilations) -> String {
    if loaded.is_empty() {
        return "No compilations registered (no unit had contracts).".to_string();
    }
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Unit", "Compilation ID", "Sources", "Contracts"]);
    for compilation in &loaded.compilations {
        table.add_row(vec![
            compilation.key.clone(),
            compilation.id.id.clone(),
            compilation.sources.len().to_string(),
            compilation.bytecodes.len().to_string(),
        ]);
    }
    format!("{}\n\nLoaded {} compilation(s)", table, loaded.len())
}

pub fn format_load_result_json(loaded: &LoadedCompilations) -> Result<String, LoadError> {
    Ok(serde_json::to_string_pretty(loaded)?)
}
