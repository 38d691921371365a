//! Load plan: orders the stages of a batch load and threads derived ids between them.
//!
//! For each eligible unit the plan runs the sources stage, then (optionally) the
//! bytecodes stage, and records the unit with its ids. Once every unit is
//! recorded it runs the compilations stage over the whole context and completes
//! with its result.

use crate::error::LoadError;
use crate::loader::bytecodes::{bytecodes_load, BytecodesLoad, ContractBytecodes};
use crate::loader::compilations::{CompilationsLoad, LoadableCompilation, LoadedCompilations};
use crate::loader::request::Response;
use crate::loader::saga::{Saga, Step};
use crate::loader::sources::{sources_load, SourcesLoad};
use crate::types::{CompilationBatch, CompilationUnit, IdObject};
use serde::{Deserialize, Serialize};

/// Stage toggles for a load.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoadOptions {
    /// Register contract bytecodes before the compilations that reference them.
    #[serde(default = "default_true")]
    pub bytecodes: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { bytecodes: true }
    }
}

/// Units that have at least one contract, in batch order.
pub fn eligible_units(batch: &CompilationBatch) -> Vec<(String, CompilationUnit)> {
    batch
        .units
        .iter()
        .filter(|(_, unit)| !unit.contracts.is_empty())
        .map(|(key, unit)| (key.clone(), unit.clone()))
        .collect()
}

enum PlanState {
    Start,
    Sources {
        unit: usize,
        saga: SourcesLoad,
    },
    Bytecodes {
        unit: usize,
        sources: Vec<IdObject>,
        saga: BytecodesLoad,
    },
    Compilations(CompilationsLoad),
    Done,
}

/// Saga loading a whole batch.
pub struct LoadPlan {
    units: Vec<(String, CompilationUnit)>,
    options: LoadOptions,
    loadables: Vec<LoadableCompilation>,
    state: PlanState,
}

impl LoadPlan {
    pub fn new(batch: &CompilationBatch, options: LoadOptions) -> Self {
        Self::from_units(eligible_units(batch), options)
    }

    /// Build a plan over units that were already filtered for eligibility.
    pub fn from_units(units: Vec<(String, CompilationUnit)>, options: LoadOptions) -> Self {
        let capacity = units.len();
        Self {
            units,
            options,
            loadables: Vec::with_capacity(capacity),
            state: PlanState::Start,
        }
    }

    pub fn unit_keys(&self) -> impl Iterator<Item = &str> {
        self.units.iter().map(|(key, _)| key.as_str())
    }

    /// State that begins work on `unit`, or the compilations stage once all units are recorded.
    fn enter_unit(&mut self, unit: usize) -> PlanState {
        match self.units.get(unit) {
            Some((key, compilation)) => PlanState::Sources {
                unit,
                saga: sources_load(key, compilation),
            },
            None => PlanState::Compilations(CompilationsLoad::new(std::mem::take(
                &mut self.loadables,
            ))),
        }
    }

    fn record(
        &mut self,
        unit: usize,
        sources: Vec<IdObject>,
        bytecodes: Option<Vec<ContractBytecodes>>,
    ) {
        let (key, compilation) = &self.units[unit];
        self.loadables.push(LoadableCompilation {
            key: key.clone(),
            compilation: compilation.clone(),
            sources,
            bytecodes,
        });
    }
}

impl Saga for LoadPlan {
    type Output = LoadedCompilations;

    fn resume(&mut self, response: Option<Response>) -> Result<Step<Self::Output>, LoadError> {
        let mut input = response;
        loop {
            match std::mem::replace(&mut self.state, PlanState::Done) {
                PlanState::Start => {
                    if input.is_some() {
                        return Err(LoadError::Protocol(
                            "load plan was started with a response before yielding any request"
                                .to_string(),
                        ));
                    }
                    self.state = self.enter_unit(0);
                }
                PlanState::Sources { unit, mut saga } => match saga.resume(input.take())? {
                    Step::Yield(request) => {
                        self.state = PlanState::Sources { unit, saga };
                        return Ok(Step::Yield(request));
                    }
                    Step::Complete(sources) => {
                        if self.options.bytecodes {
                            let (key, compilation) = &self.units[unit];
                            self.state = PlanState::Bytecodes {
                                unit,
                                sources,
                                saga: bytecodes_load(key, compilation),
                            };
                        } else {
                            self.record(unit, sources, None);
                            self.state = self.enter_unit(unit + 1);
                        }
                    }
                },
                PlanState::Bytecodes {
                    unit,
                    sources,
                    mut saga,
                } => match saga.resume(input.take())? {
                    Step::Yield(request) => {
                        self.state = PlanState::Bytecodes {
                            unit,
                            sources,
                            saga,
                        };
                        return Ok(Step::Yield(request));
                    }
                    Step::Complete(bytecodes) => {
                        self.record(unit, sources, Some(bytecodes));
                        self.state = self.enter_unit(unit + 1);
                    }
                },
                PlanState::Compilations(mut saga) => match saga.resume(input.take())? {
                    Step::Yield(request) => {
                        self.state = PlanState::Compilations(saga);
                        return Ok(Step::Yield(request));
                    }
                    Step::Complete(loaded) => return Ok(Step::Complete(loaded)),
                },
                PlanState::Done => {
                    return Err(LoadError::Protocol(
                        "load plan was resumed after it completed".to_string(),
                    ));
                }
            }
        }
    }
}
