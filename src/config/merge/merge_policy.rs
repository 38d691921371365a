//! Merge rules: defaults, override order, conflict handling.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("endpoint.connect_timeout_secs", 10)?
        .set_default("endpoint.request_timeout_secs", 120)?
        .set_default("load.bytecodes", true)
}
