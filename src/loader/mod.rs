//! Batch loading: sagas that plan the requests, and the driver that executes them.
//! Planning never performs I/O; executors never decide what to send.

pub mod bytecodes;
pub mod compilations;
pub mod dry_run;
pub mod executor;
pub mod plan;
pub mod record;
pub mod request;
pub mod saga;
pub mod sources;

pub use bytecodes::{bytecodes_load, BytecodesLoad, ContractBytecodes};
pub use compilations::{
    CompilationsLoad, LoadableCompilation, LoadedCompilation, LoadedCompilations,
};
pub use dry_run::DryRunExecutor;
pub use executor::{drive, Executor, Loader};
pub use plan::{eligible_units, LoadOptions, LoadPlan};
pub use record::{EachRecord, RecordStage};
pub use request::{Operation, Request, RequestKey, Response};
pub use saga::{Saga, Step};
pub use sources::{sources_load, SourcesLoad};
