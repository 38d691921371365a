//! Plan command presentation: the ordered request list.

use crate::error::LoadError;
use crate::loader::{Operation, Request};
use comfy_table::Table;
use serde_json::json;

fn count(requests: &[Request], operation: Operation) -> usize {
    requests
        .iter()
        .filter(|r| r.operation() == operation)
        .count()
}

pub fn format_plan_text(requests: &[Request]) -> String {
    if requests.is_empty() {
        return "No requests planned.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["#", "Operation", "Key", "Records"]);
    for (i, request) in requests.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            request.operation().to_string(),
            request.key().to_string(),
            request.record_count().to_string(),
        ]);
    }
    format!(
        "{}\n\nTotal: {} request(s) ({} sources, {} bytecodes, {} compilations)",
        table,
        requests.len(),
        count(requests, Operation::AddSources),
        count(requests, Operation::AddBytecodes),
        count(requests, Operation::AddCompilations),
    )
}

pub fn format_plan_json(requests: &[Request]) -> Result<String, LoadError> {
    let rows: Vec<serde_json::Value> = requests
        .iter()
        .enumerate()
        .map(|(i, r)| {
            json!({
                "sequence": i + 1,
                "operation": r.operation().name(),
                "key": r.key(),
                "records": r.record_count(),
                "variables": r.variables(),
            })
        })
        .collect();
    let out = json!({ "requests": rows, "total": requests.len() });
    Ok(serde_json::to_string_pretty(&out)?)
}
