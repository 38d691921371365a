//! Bytecodes stage: registers the creation and deployed bytecode of each contract.

use crate::error::LoadError;
use crate::loader::record::{EachRecord, RecordStage};
use crate::loader::request::{Operation, Response};
use crate::types::{Bytecode, CompilationUnit, Contract, IdObject};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Ids of one contract's bytecodes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContractBytecodes {
    pub create_bytecode: IdObject,
    pub call_bytecode: IdObject,
}

pub struct BytecodesStage {
    unit_key: String,
}

fn bytecode_input(bytecode: &Bytecode) -> serde_json::Value {
    json!({
        "bytes": bytecode.bytes,
        "linkReferences": bytecode.link_references,
    })
}

impl RecordStage for BytecodesStage {
    type Record = Contract;
    type Id = ContractBytecodes;

    const OPERATION: Operation = Operation::AddBytecodes;

    fn unit_key(&self) -> &str {
        &self.unit_key
    }

    fn variables(&self, contract: &Contract) -> serde_json::Value {
        json!({
            "bytecodes": [
                bytecode_input(&contract.bytecode),
                bytecode_input(&contract.deployed_bytecode),
            ]
        })
    }

    fn extract(&self, response: &Response) -> Result<ContractBytecodes, LoadError> {
        let mut ids = Self::OPERATION.extract_exact(response, 2)?.into_iter();
        match (ids.next(), ids.next()) {
            (Some(create_bytecode), Some(call_bytecode)) => Ok(ContractBytecodes {
                create_bytecode,
                call_bytecode,
            }),
            _ => Err(LoadError::MalformedResponse {
                operation: Self::OPERATION.name(),
                pointer: Self::OPERATION.ids_pointer(),
            }),
        }
    }
}

pub type BytecodesLoad = EachRecord<BytecodesStage>;

/// Saga registering the bytecodes of every contract in `unit`, in contract order.
pub fn bytecodes_load(unit_key: &str, unit: &CompilationUnit) -> BytecodesLoad {
    EachRecord::new(
        BytecodesStage {
            unit_key: unit_key.to_string(),
        },
        unit.contracts.clone(),
    )
}
