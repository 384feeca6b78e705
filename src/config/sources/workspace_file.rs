//! Workspace config file source: splice.toml and config/{env}.toml

use config::builder::DefaultState;
use config::{ConfigBuilder, File, FileFormat};
use std::path::Path;

/// Add workspace config files to builder.
/// Precedence: splice.toml (base) then config/{SPLICE_ENV}.toml (env-specific).
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> ConfigBuilder<DefaultState> {
    let env_name = std::env::var("SPLICE_ENV").unwrap_or_else(|_| "development".to_string());
    let mut builder = builder;

    let base_config_path = workspace_root.join("splice.toml");
    if base_config_path.exists() {
        builder = builder.add_source(
            File::from(base_config_path.as_path())
                .format(FileFormat::Toml)
                .required(false),
        );
    }

    let env_config_path = workspace_root
        .join("config")
        .join(format!("{}.toml", env_name));
    if env_config_path.exists() {
        builder = builder.add_source(
            File::from(env_config_path.as_path())
                .format(FileFormat::Toml)
                .required(false),
        );
    }

    builder
}
