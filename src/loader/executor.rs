//! Load driver: pumps a saga, executing each yielded request against an executor.
//! Requests run one at a time in yield order; the first failure ends the load.

use crate::error::LoadError;
use crate::loader::compilations::LoadedCompilations;
use crate::loader::plan::{LoadOptions, LoadPlan};
use crate::loader::request::{Request, Response};
use crate::loader::saga::{Saga, Step};
use crate::types::CompilationBatch;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Capability that sends one request to the store and returns its response.
#[allow(async_fn_in_trait)]
pub trait Executor: Send + Sync {
    async fn execute(&self, request: &Request) -> Result<Response, LoadError>;
}

/// Run `saga` to completion against `executor`.
///
/// The saga is never resumed after a failed request; the error is returned
/// as-is and requests already executed are not undone.
pub async fn drive<E, S>(executor: &E, mut saga: S) -> Result<S::Output, LoadError>
where
    E: Executor,
    S: Saga,
{
    let mut executed = 0usize;
    let mut step = saga.resume(None)?;
    loop {
        match step {
            Step::Yield(request) => {
                debug!(
                    operation = %request.operation(),
                    key = %request.key(),
                    records = request.record_count(),
                    sequence = executed,
                    "Executing request"
                );
                let response = match executor.execute(&request).await {
                    Ok(response) => response,
                    Err(err) => {
                        warn!(
                            operation = %request.operation(),
                            key = %request.key(),
                            executed,
                            error = %err,
                            "Request failed; aborting load"
                        );
                        return Err(err);
                    }
                };
                executed += 1;
                step = saga.resume(Some(response))?;
            }
            Step::Complete(output) => {
                debug!(executed, "Saga completed");
                return Ok(output);
            }
        }
    }
}

/// Loads compilation batches through an executor.
#[derive(Debug, Clone, Default)]
pub struct Loader {
    options: LoadOptions,
}

impl Loader {
    pub fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> LoadOptions {
        self.options
    }

    /// Load every eligible unit of `batch`, returning the registered compilations.
    pub async fn load<E: Executor>(
        &self,
        executor: &E,
        batch: &CompilationBatch,
    ) -> Result<LoadedCompilations, LoadError> {
        let plan = LoadPlan::new(batch, self.options);
        let eligible = plan.unit_keys().count();
        let started = Instant::now();
        info!(
            units = batch.len(),
            eligible,
            bytecodes = self.options.bytecodes,
            "Load started"
        );

        let loaded = drive(executor, plan).await?;

        info!(
            compilations = loaded.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Load completed"
        );
        Ok(loaded)
    }
}
