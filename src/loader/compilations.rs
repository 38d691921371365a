//! Compilations stage: registers every loaded unit in a single aggregate request.

use crate::error::LoadError;
use crate::loader::bytecodes::ContractBytecodes;
use crate::loader::request::{Operation, Request, RequestKey, Response};
use crate::loader::saga::{Phase, Saga, Step};
use crate::types::{CompilationUnit, Contract, IdObject};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// A unit together with the ids derived for it by earlier stages.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadableCompilation {
    pub key: String,
    pub compilation: CompilationUnit,
    pub sources: Vec<IdObject>,
    /// Per-contract bytecode ids, in contract order; `None` when bytecodes were not loaded.
    pub bytecodes: Option<Vec<ContractBytecodes>>,
}

/// One registered compilation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoadedCompilation {
    pub key: String,
    pub id: IdObject,
    pub sources: Vec<IdObject>,
    #[serde(default)]
    pub bytecodes: Vec<ContractBytecodes>,
}

/// Final result of a load: registered compilations in the order units were loaded.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoadedCompilations {
    pub compilations: Vec<LoadedCompilation>,
}

impl LoadedCompilations {
    pub fn len(&self) -> usize {
        self.compilations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compilations.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&LoadedCompilation> {
        self.compilations.iter().find(|c| c.key == key)
    }

    pub fn ids(&self) -> Vec<&IdObject> {
        self.compilations.iter().map(|c| &c.id).collect()
    }
}

fn contract_input(contract: &Contract, bytecodes: Option<&ContractBytecodes>) -> serde_json::Value {
    let mut input = json!({
        "name": contract.contract_name,
        "abi": { "json": contract.abi.to_string() },
    });
    if let Some(source_path) = &contract.source_path {
        input["sourcePath"] = json!(source_path);
    }
    if let Some(source_map) = &contract.source_map {
        input["sourceMap"] = json!({ "json": source_map });
    }
    if let Some(deployed_source_map) = &contract.deployed_source_map {
        input["deployedSourceMap"] = json!({ "json": deployed_source_map });
    }
    if let Some(ids) = bytecodes {
        input["createBytecode"] = json!(ids.create_bytecode);
        input["callBytecode"] = json!(ids.call_bytecode);
    }
    input
}

fn compilation_input(loadable: &LoadableCompilation) -> serde_json::Value {
    let unit = &loadable.compilation;
    let contracts: Vec<serde_json::Value> = unit
        .contracts
        .iter()
        .enumerate()
        .map(|(index, contract)| {
            let ids = loadable.bytecodes.as_ref().and_then(|all| all.get(index));
            contract_input(contract, ids)
        })
        .collect();

    json!({
        "compiler": {
            "name": unit.compiler.name,
            "version": unit.compiler.version,
        },
        "sources": loadable.sources,
        "contracts": contracts,
    })
}

/// Saga issuing the aggregate `compilationsAdd` request.
pub struct CompilationsLoad {
    loadables: Vec<LoadableCompilation>,
    phase: Phase,
}

impl CompilationsLoad {
    pub fn new(loadables: Vec<LoadableCompilation>) -> Self {
        Self {
            loadables,
            phase: Phase::Fresh,
        }
    }

    fn request(&self) -> Request {
        let compilations: Vec<serde_json::Value> =
            self.loadables.iter().map(compilation_input).collect();
        Request::new(
            Operation::AddCompilations,
            RequestKey::batch(),
            json!({ "compilations": compilations }),
        )
    }

    fn collect(&mut self, response: &Response) -> Result<LoadedCompilations, LoadError> {
        let ids = Operation::AddCompilations.extract_exact(response, self.loadables.len())?;
        let compilations = std::mem::take(&mut self.loadables)
            .into_iter()
            .zip(ids)
            .map(|(loadable, id)| LoadedCompilation {
                key: loadable.key,
                id,
                sources: loadable.sources,
                bytecodes: loadable.bytecodes.unwrap_or_default(),
            })
            .collect();
        Ok(LoadedCompilations { compilations })
    }
}

impl Saga for CompilationsLoad {
    type Output = LoadedCompilations;

    fn resume(&mut self, response: Option<Response>) -> Result<Step<Self::Output>, LoadError> {
        match self.phase.accept("compilationsAdd", response)? {
            None => {
                self.phase = Phase::Suspended;
                Ok(Step::Yield(self.request()))
            }
            Some(response) => {
                let loaded = self.collect(&response)?;
                self.phase = Phase::Finished;
                Ok(Step::Complete(loaded))
            }
        }
    }
}
