//! Merge rules: defaults and override order.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Create a Config builder with merge policy defaults applied.
///
/// Later sources override earlier ones: defaults, global file, workspace
/// files, then `SPLICE__*` environment variables.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("install.mode", "sequential")?
        .set_default("install.policy", "audit")?
        .set_default("install.blocked_result", 0)?
        .set_default("logging.level", "info")?
        .set_default("logging.output", "stderr")
}
