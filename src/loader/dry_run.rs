//! Dry-run executor: answers every request with synthetic ids and keeps a log of
//! what was asked. Nothing leaves the process.

use crate::error::LoadError;
use crate::loader::executor::Executor;
use crate::loader::request::{Operation, Request, Response};
use crate::types::IdObject;
use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Default)]
struct DryRunLog {
    requests: Vec<Request>,
    counters: HashMap<Operation, usize>,
}

/// Executor that never contacts a store.
#[derive(Default)]
pub struct DryRunExecutor {
    log: Mutex<DryRunLog>,
}

fn id_prefix(operation: Operation) -> &'static str {
    match operation {
        Operation::AddSources => "source",
        Operation::AddBytecodes => "bytecode",
        Operation::AddCompilations => "compilation",
    }
}

impl DryRunExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests received so far, in execution order.
    pub fn requests(&self) -> Vec<Request> {
        self.log.lock().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.log.lock().requests.len()
    }
}

impl Executor for DryRunExecutor {
    async fn execute(&self, request: &Request) -> Result<Response, LoadError> {
        let mut log = self.log.lock();
        log.requests.push(request.clone());

        let operation = request.operation();
        let counter = log.counters.entry(operation).or_insert(0);
        let ids: Vec<IdObject> = (0..request.record_count())
            .map(|_| {
                *counter += 1;
                IdObject::new(format!("{}-{}", id_prefix(operation), counter))
            })
            .collect();
        Ok(operation.response_with_ids(&ids))
    }
}
