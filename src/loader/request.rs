//! Operation descriptors handed from a saga to the driver, and the responses handed back.

use crate::error::LoadError;
use crate::types::IdObject;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw response returned by an executor: the full GraphQL response body.
pub type Response = serde_json::Value;

/// The mutations a load can issue.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Operation {
    AddSources,
    AddBytecodes,
    AddCompilations,
}

const ADD_SOURCES: &str = r#"mutation AddSources($sources: [SourceInput!]!) {
  sourcesAdd(input: { sources: $sources }) {
    sources {
      id
    }
  }
}"#;

const ADD_BYTECODES: &str = r#"mutation AddBytecodes($bytecodes: [BytecodeInput!]!) {
  bytecodesAdd(input: { bytecodes: $bytecodes }) {
    bytecodes {
      id
    }
  }
}"#;

const ADD_COMPILATIONS: &str = r#"mutation AddCompilations($compilations: [CompilationInput!]!) {
  compilationsAdd(input: { compilations: $compilations }) {
    compilations {
      id
    }
  }
}"#;

impl Operation {
    /// Field name of the mutation, as it appears under `data` in the response.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::AddSources => "sourcesAdd",
            Operation::AddBytecodes => "bytecodesAdd",
            Operation::AddCompilations => "compilationsAdd",
        }
    }

    /// GraphQL document sent to the store.
    pub fn mutation(&self) -> &'static str {
        match self {
            Operation::AddSources => ADD_SOURCES,
            Operation::AddBytecodes => ADD_BYTECODES,
            Operation::AddCompilations => ADD_COMPILATIONS,
        }
    }

    /// Name of the list both in the input variables and in the response payload.
    pub fn collection(&self) -> &'static str {
        match self {
            Operation::AddSources => "sources",
            Operation::AddBytecodes => "bytecodes",
            Operation::AddCompilations => "compilations",
        }
    }

    /// JSON pointer to the list of created records in a response.
    pub fn ids_pointer(&self) -> String {
        format!("/data/{}/{}", self.name(), self.collection())
    }

    /// Extract every `{ id }` the store assigned, in response order.
    pub fn extract_ids(&self, response: &Response) -> Result<Vec<IdObject>, LoadError> {
        let pointer = self.ids_pointer();
        let entries = response
            .pointer(&pointer)
            .and_then(serde_json::Value::as_array)
            .ok_or_else(|| LoadError::MalformedResponse {
                operation: self.name(),
                pointer: pointer.clone(),
            })?;

        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                entry
                    .get("id")
                    .and_then(serde_json::Value::as_str)
                    .map(IdObject::new)
                    .ok_or_else(|| LoadError::MalformedResponse {
                        operation: self.name(),
                        pointer: format!("{}/{}/id", pointer, index),
                    })
            })
            .collect()
    }

    /// Build a response in the shape the store answers this operation with.
    pub fn response_with_ids(&self, ids: &[IdObject]) -> Response {
        let mut payload = serde_json::Map::new();
        payload.insert(self.collection().to_string(), serde_json::json!(ids));
        let mut data = serde_json::Map::new();
        data.insert(self.name().to_string(), serde_json::Value::Object(payload));
        serde_json::json!({ "data": data })
    }

    /// Extract exactly `expected` ids; any other count means the response does not
    /// belong to the request it was supplied for.
    pub fn extract_exact(
        &self,
        response: &Response,
        expected: usize,
    ) -> Result<Vec<IdObject>, LoadError> {
        let ids = self.extract_ids(response)?;
        if ids.len() != expected {
            return Err(LoadError::MalformedResponse {
                operation: self.name(),
                pointer: format!(
                    "{} (expected {} entries, got {})",
                    self.ids_pointer(),
                    expected,
                    ids.len()
                ),
            });
        }
        Ok(ids)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifies which unit and record a request was built from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct RequestKey {
    pub unit: Option<String>,
    pub record: Option<usize>,
}

impl RequestKey {
    pub fn record(unit: &str, record: usize) -> Self {
        Self {
            unit: Some(unit.to_string()),
            record: Some(record),
        }
    }

    pub fn batch() -> Self {
        Self {
            unit: None,
            record: None,
        }
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.unit, self.record) {
            (Some(unit), Some(record)) => write!(f, "{}#{}", unit, record),
            (Some(unit), None) => f.write_str(unit),
            _ => f.write_str("*"),
        }
    }
}

/// A fully specified operation, ready for execution. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Request {
    operation: Operation,
    key: RequestKey,
    variables: serde_json::Value,
}

impl Request {
    pub fn new(operation: Operation, key: RequestKey, variables: serde_json::Value) -> Self {
        Self {
            operation,
            key,
            variables,
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn key(&self) -> &RequestKey {
        &self.key
    }

    pub fn mutation(&self) -> &'static str {
        self.operation.mutation()
    }

    pub fn variables(&self) -> &serde_json::Value {
        &self.variables
    }

    /// Number of records this request asks the store to create.
    pub fn record_count(&self) -> usize {
        self.variables
            .get(self.operation.collection())
            .and_then(serde_json::Value::as_array)
            .map_or(0, Vec::len)
    }
}
