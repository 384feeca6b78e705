//! Config loading facade: the one entry point callers use.

use super::merge::builder_with_defaults;
use super::sources::{add_environment, global_file, workspace_file};
use super::SpliceConfig;
use crate::error::ApiError;
use config::{File, FileFormat};
use std::path::Path;
use tracing::debug;

/// Loads [`SpliceConfig`] from layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace: defaults, global file, workspace
    /// files, environment.
    pub fn load(workspace_root: &Path) -> Result<SpliceConfig, ApiError> {
        let global = global_file::global_config_path();
        Self::load_with_global(workspace_root, global.as_deref())
    }

    /// Like [`ConfigLoader::load`] with an explicit global file location.
    pub fn load_with_global(
        workspace_root: &Path,
        global_path: Option<&Path>,
    ) -> Result<SpliceConfig, ApiError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder, global_path);
        let builder = workspace_file::add_to_builder(builder, workspace_root);
        let builder = add_environment(builder);

        let config: SpliceConfig = builder.build()?.try_deserialize()?;
        debug!(workspace = %workspace_root.display(), "Configuration loaded");
        Self::checked(config)
    }

    /// Load configuration from one explicit file (plus environment overrides).
    pub fn load_from_file(path: &Path) -> Result<SpliceConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let builder = builder_with_defaults()?
            .add_source(File::from(path).format(FileFormat::Toml).required(true));
        let config: SpliceConfig = add_environment(builder).build()?.try_deserialize()?;
        Self::checked(config)
    }

    fn checked(config: SpliceConfig) -> Result<SpliceConfig, ApiError> {
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(config)
    }
}
