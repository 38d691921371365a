//! Per-record stages: one request per record, results collected in record order.

use crate::error::LoadError;
use crate::loader::request::{Operation, Request, RequestKey, Response};
use crate::loader::saga::{Phase, Saga, Step};

/// A category of record that is registered one record per request.
pub trait RecordStage {
    type Record;
    type Id;

    const OPERATION: Operation;

    /// Key of the compilation unit the records belong to.
    fn unit_key(&self) -> &str;

    /// Input variables registering a single record.
    fn variables(&self, record: &Self::Record) -> serde_json::Value;

    /// Identifier(s) assigned to the record, read from its response.
    fn extract(&self, response: &Response) -> Result<Self::Id, LoadError>;
}

/// Saga walking a list of records through a [`RecordStage`].
pub struct EachRecord<S: RecordStage> {
    stage: S,
    records: Vec<S::Record>,
    next: usize,
    collected: Vec<S::Id>,
    phase: Phase,
}

impl<S: RecordStage> EachRecord<S> {
    pub fn new(stage: S, records: Vec<S::Record>) -> Self {
        let capacity = records.len();
        Self {
            stage,
            records,
            next: 0,
            collected: Vec::with_capacity(capacity),
            phase: Phase::Fresh,
        }
    }

    fn request_for(&self, index: usize) -> Request {
        Request::new(
            S::OPERATION,
            RequestKey::record(self.stage.unit_key(), index),
            self.stage.variables(&self.records[index]),
        )
    }
}

impl<S: RecordStage> Saga for EachRecord<S> {
    type Output = Vec<S::Id>;

    fn resume(&mut self, response: Option<Response>) -> Result<Step<Self::Output>, LoadError> {
        if let Some(response) = self.phase.accept(S::OPERATION.name(), response)? {
            let id = self.stage.extract(&response)?;
            self.collected.push(id);
            self.next += 1;
        }

        if self.next < self.records.len() {
            self.phase = Phase::Suspended;
            return Ok(Step::Yield(self.request_for(self.next)));
        }

        self.phase = Phase::Finished;
        Ok(Step::Complete(std::mem::take(&mut self.collected)))
    }
}
