//! End-to-end planning of a JSON batch with the dry-run executor.

use graphdb_loader::loader::{DryRunExecutor, Loader, Operation};
use graphdb_loader::types::CompilationBatch;

const BATCH: &str = r#"{
    "zeta": {
        "compiler": { "name": "solc", "version": "0.8.19" },
        "sources": [
            { "sourcePath": "contracts/Zeta.sol", "contents": "contract Zeta {}" },
            { "sourcePath": "contracts/Lib.sol", "contents": "library Lib {}" }
        ],
        "contracts": [
            {
                "contractName": "Zeta",
                "sourcePath": "contracts/Zeta.sol",
                "abi": [{ "type": "constructor", "inputs": [] }],
                "bytecode": {
                    "bytes": "6080604052",
                    "linkReferences": [{ "offsets": [4], "name": "Lib", "length": 20 }]
                },
                "deployedBytecode": { "bytes": "6080" },
                "sourceMap": "1:2:0",
                "deployedSourceMap": "3:4:0"
            }
        ]
    },
    "empty": { "sources": [{ "sourcePath": "x.sol", "contents": "" }] },
    "alpha": {
        "sources": [{ "sourcePath": "Alpha.sol", "contents": "contract Alpha {}" }],
        "contracts": [{ "contractName": "Alpha", "abi": [] }]
    }
}"#;

#[tokio::test]
async fn plan_follows_document_order() {
    let batch = CompilationBatch::from_json(BATCH).unwrap();
    let executor = DryRunExecutor::new();
    let loaded = Loader::default().load(&executor, &batch).await.unwrap();

    let keys: Vec<String> = executor
        .requests()
        .iter()
        .map(|r| format!("{}:{}", r.operation(), r.key()))
        .collect();
    assert_eq!(
        keys,
        vec![
            "sourcesAdd:zeta#0",
            "sourcesAdd:zeta#1",
            "bytecodesAdd:zeta#0",
            "sourcesAdd:alpha#0",
            "bytecodesAdd:alpha#0",
            "compilationsAdd:*",
        ]
    );

    let keys: Vec<&str> = loaded.compilations.iter().map(|c| c.key.as_str()).collect();
    assert_eq!(keys, vec!["zeta", "alpha"]);
    assert_eq!(loaded.get("alpha").unwrap().id.id, "compilation-2");
}

#[tokio::test]
async fn payloads_carry_records_and_derived_ids() {
    let batch = CompilationBatch::from_json(BATCH).unwrap();
    let executor = DryRunExecutor::new();
    Loader::default().load(&executor, &batch).await.unwrap();
    let requests = executor.requests();

    let bytecodes = &requests[2];
    assert_eq!(bytecodes.operation(), Operation::AddBytecodes);
    assert_eq!(bytecodes.record_count(), 2);
    let create = &bytecodes.variables()["bytecodes"][0];
    assert_eq!(create["bytes"], "6080604052");
    assert_eq!(create["linkReferences"][0]["name"], "Lib");
    assert_eq!(bytecodes.variables()["bytecodes"][1]["bytes"], "6080");

    let aggregate = requests.last().unwrap();
    let zeta = &aggregate.variables()["compilations"][0];
    assert_eq!(zeta["compiler"]["version"], "0.8.19");
    assert_eq!(
        zeta["sources"],
        serde_json::json!([{ "id": "source-1" }, { "id": "source-2" }])
    );
    let contract = &zeta["contracts"][0];
    assert_eq!(contract["name"], "Zeta");
    assert_eq!(contract["sourcePath"], "contracts/Zeta.sol");
    assert_eq!(contract["createBytecode"]["id"], "bytecode-1");
    assert_eq!(contract["callBytecode"]["id"], "bytecode-2");
    assert_eq!(contract["sourceMap"]["json"], "1:2:0");

    let alpha = &aggregate.variables()["compilations"][1];
    assert_eq!(alpha["sources"][0]["id"], "source-3");
    assert_eq!(alpha["contracts"][0]["createBytecode"]["id"], "bytecode-3");
}

#[test]
fn malformed_batch_is_an_input_error() {
    let err = CompilationBatch::from_json(r#"{ "a": { "sources": 3 } }"#).unwrap_err();
    assert!(err.to_string().starts_with("Invalid input batch"));
}
