//! Input batch model: compilation units as produced by the compile pipeline.

use crate::error::LoadError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Compilation units keyed by an opaque key, in document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct CompilationBatch {
    pub units: IndexMap<String, CompilationUnit>,
}

impl CompilationBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, unit: CompilationUnit) {
        self.units.insert(key.into(), unit);
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn from_json(content: &str) -> Result<Self, LoadError> {
        serde_json::from_str(content)
            .map_err(|e| LoadError::Input(format!("Failed to parse compilation batch: {}", e)))
    }

    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LoadError::Input(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }
}

impl<K: Into<String>> FromIterator<(K, CompilationUnit)> for CompilationBatch {
    fn from_iter<I: IntoIterator<Item = (K, CompilationUnit)>>(iter: I) -> Self {
        Self {
            units: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompilationUnit {
    #[serde(default)]
    pub compiler: Compiler,
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub contracts: Vec<Contract>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Compiler {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub source_path: String,
    pub contents: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub contract_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
    #[serde(default)]
    pub abi: serde_json::Value,
    #[serde(default)]
    pub bytecode: Bytecode,
    #[serde(default)]
    pub deployed_bytecode: Bytecode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_map: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployed_source_map: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Bytecode {
    #[serde(default)]
    pub bytes: String,
    #[serde(default)]
    pub link_references: Vec<LinkReference>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkReference {
    pub offsets: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub length: u32,
}

/// Identifier assigned by the store, in the `{ "id": ... }` shape it is referenced by.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct IdObject {
    pub id: String,
}

impl IdObject {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
