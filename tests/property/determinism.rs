//! Property-based tests for determinism guarantees

use graphdb_loader::loader::{
    eligible_units, DryRunExecutor, LoadOptions, Loader, Operation, Request,
};
use graphdb_loader::types::{Bytecode, CompilationBatch, CompilationUnit, Contract, Source};
use proptest::prelude::*;

/// (sources, contracts) per unit.
fn shape() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0usize..4, 0usize..4), 0..6)
}

fn batch_from_shape(shape: &[(usize, usize)]) -> CompilationBatch {
    shape
        .iter()
        .enumerate()
        .map(|(u, &(sources, contracts))| {
            let unit = CompilationUnit {
                sources: (0..sources)
                    .map(|i| Source {
                        source_path: format!("u{}/s{}.sol", u, i),
                        contents: String::new(),
                        language: None,
                    })
                    .collect(),
                contracts: (0..contracts)
                    .map(|i| Contract {
                        contract_name: format!("C{}", i),
                        source_path: None,
                        abi: serde_json::json!([]),
                        bytecode: Bytecode::default(),
                        deployed_bytecode: Bytecode::default(),
                        source_map: None,
                        deployed_source_map: None,
                    })
                    .collect(),
                ..Default::default()
            };
            (format!("unit-{}", u), unit)
        })
        .collect()
}

fn plan_requests(batch: &CompilationBatch, options: LoadOptions) -> Vec<Request> {
    let executor = DryRunExecutor::new();
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    rt.block_on(Loader::new(options).load(&executor, batch))
        .unwrap();
    executor.requests()
}

/// Test that the request sequence depends only on the batch
#[test]
fn test_request_sequence_determinism_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&shape(), |shape| {
            let batch = batch_from_shape(&shape);
            let first = plan_requests(&batch, LoadOptions::default());
            let second = plan_requests(&batch, LoadOptions::default());
            prop_assert_eq!(first, second);
            Ok(())
        })
        .unwrap();
}

/// Test that the request count is sum(k_i) + sum(c_i) + 1 over eligible units
#[test]
fn test_request_count_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(shape(), any::<bool>()), |(shape, bytecodes)| {
            let batch = batch_from_shape(&shape);
            let requests = plan_requests(&batch, LoadOptions { bytecodes });

            let eligible: Vec<&(usize, usize)> = shape.iter().filter(|(_, c)| *c > 0).collect();
            let sources: usize = eligible.iter().map(|(k, _)| k).sum();
            let contracts: usize = if bytecodes {
                eligible.iter().map(|(_, c)| c).sum()
            } else {
                0
            };
            prop_assert_eq!(requests.len(), sources + contracts + 1);

            let last = requests.last().unwrap();
            prop_assert_eq!(last.operation(), Operation::AddCompilations);
            prop_assert_eq!(last.record_count(), eligible.len());
            Ok(())
        })
        .unwrap();
}

/// Test that eligible units keep batch order and each unit's requests are contiguous
#[test]
fn test_eligibility_and_order_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&shape(), |shape| {
            let batch = batch_from_shape(&shape);
            let expected: Vec<String> = shape
                .iter()
                .enumerate()
                .filter(|(_, (_, c))| *c > 0)
                .map(|(u, _)| format!("unit-{}", u))
                .collect();
            let eligible: Vec<String> =
                eligible_units(&batch).into_iter().map(|(k, _)| k).collect();
            prop_assert_eq!(&eligible, &expected);

            let requests = plan_requests(&batch, LoadOptions::default());
            let mut seen: Vec<String> = Vec::new();
            for request in &requests[..requests.len() - 1] {
                let unit = request.key().unit.clone().unwrap();
                if seen.last() != Some(&unit) {
                    prop_assert!(!seen.contains(&unit), "unit {} revisited", unit);
                    seen.push(unit);
                }
            }
            // every eligible unit has at least one bytecode request
            prop_assert_eq!(seen, expected);
            Ok(())
        })
        .unwrap();
}
