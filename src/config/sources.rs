//! Configuration sources, in precedence order.

pub mod global_file;
pub mod workspace_file;

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment};

/// Add `SPLICE__SECTION__KEY` environment overrides.
pub fn add_environment(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("SPLICE")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    )
}
