//! Global config file source: <config dir>/splice/config.toml

use config::builder::DefaultState;
use config::{ConfigBuilder, File, FileFormat};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Path to the global config file.
///
/// `SPLICE_GLOBAL_CONFIG` overrides the platform location
/// (`$XDG_CONFIG_HOME/splice/config.toml` on Linux).
pub fn global_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("SPLICE_GLOBAL_CONFIG") {
        return Some(PathBuf::from(path));
    }
    ProjectDirs::from("", "", "splice").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Add the global config file to the builder if it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    path: Option<&Path>,
) -> ConfigBuilder<DefaultState> {
    match path {
        Some(path) if path.exists() => {
            builder.add_source(File::from(path).format(FileFormat::Toml).required(false))
        }
        Some(path) => {
            debug!(config_path = %path.display(), "Global configuration file not found");
            builder
        }
        None => builder,
    }
}
