//! graphdb-loader: register compiled artifacts with a graph database
//!
//! A load is planned as a saga that yields one GraphQL mutation at a time and is
//! resumed with each response; a driver executes the requests in order against an
//! executor. Sources and bytecodes are registered per unit, then every unit is
//! registered as a compilation in one aggregate request.

pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod loader;
pub mod logging;
pub mod types;
