//! Sources stage: registers each source file of a compilation unit.

use crate::error::LoadError;
use crate::loader::record::{EachRecord, RecordStage};
use crate::loader::request::{Operation, Response};
use crate::types::{CompilationUnit, IdObject, Source};
use serde_json::json;

pub struct SourcesStage {
    unit_key: String,
}

impl RecordStage for SourcesStage {
    type Record = Source;
    type Id = IdObject;

    const OPERATION: Operation = Operation::AddSources;

    fn unit_key(&self) -> &str {
        &self.unit_key
    }

    fn variables(&self, source: &Source) -> serde_json::Value {
        json!({
            "sources": [{
                "contents": source.contents,
                "sourcePath": source.source_path,
            }]
        })
    }

    fn extract(&self, response: &Response) -> Result<IdObject, LoadError> {
        let mut ids = Self::OPERATION.extract_exact(response, 1)?;
        Ok(ids.remove(0))
    }
}

pub type SourcesLoad = EachRecord<SourcesStage>;

/// Saga registering every source of `unit`, returning their ids in source order.
pub fn sources_load(unit_key: &str, unit: &CompilationUnit) -> SourcesLoad {
    EachRecord::new(
        SourcesStage {
            unit_key: unit_key.to_string(),
        },
        unit.sources.clone(),
    )
}
