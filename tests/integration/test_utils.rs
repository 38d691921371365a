//! Shared fixtures for integration tests.

use graphdb_loader::error::LoadError;
use graphdb_loader::loader::{Executor, Request, Response};
use graphdb_loader::types::{
    Bytecode, CompilationBatch, CompilationUnit, Contract, IdObject, Source,
};
use parking_lot::Mutex;
use serde_json::json;

/// Serializes tests that mutate process environment or spawn the binary.
pub static ENV_LOCK: Mutex<()> = parking_lot::const_mutex(());

pub fn source(path: &str) -> Source {
    Source {
        source_path: path.to_string(),
        contents: format!("// {}", path),
        language: None,
    }
}

pub fn contract(name: &str) -> Contract {
    Contract {
        contract_name: name.to_string(),
        source_path: None,
        abi: json!([]),
        bytecode: Bytecode {
            bytes: "0x6080".to_string(),
            link_references: Vec::new(),
        },
        deployed_bytecode: Bytecode::default(),
        source_map: None,
        deployed_source_map: None,
    }
}

pub fn unit(sources: &[&str], contracts: &[&str]) -> CompilationUnit {
    CompilationUnit {
        sources: sources.iter().map(|s| source(s)).collect(),
        contracts: contracts.iter().map(|c| contract(c)).collect(),
        ..Default::default()
    }
}

/// `{A: {contracts: [], sources: [s1]}, B: {contracts: [c1], sources: [s2]}}`
pub fn two_unit_batch() -> CompilationBatch {
    vec![("A", unit(&["s1"], &[])), ("B", unit(&["s2"], &["c1"]))]
        .into_iter()
        .collect()
}

/// Executor that records requests, answers with `<call>.<index>` ids, and can
/// fail on one call number (1-based).
pub struct RecordingExecutor {
    pub calls: Mutex<Vec<Request>>,
    fail_on: Option<usize>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on: None,
        }
    }

    pub fn failing_on(call: usize) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on: Some(call),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl Executor for RecordingExecutor {
    async fn execute(&self, request: &Request) -> Result<Response, LoadError> {
        let mut calls = self.calls.lock();
        calls.push(request.clone());
        let call = calls.len();
        if self.fail_on == Some(call) {
            return Err(LoadError::Execution(format!("store rejected call {}", call)));
        }
        let ids: Vec<IdObject> = (0..request.record_count())
            .map(|i| IdObject::new(format!("{}.{}", call, i)))
            .collect();
        Ok(request.operation().response_with_ids(&ids))
    }
}
