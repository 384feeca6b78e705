//! Configuration System
//!
//! Layered configuration: built-in defaults, a global file, workspace files,
//! and `SPLICE__*` environment overrides, merged with the `config` crate.

use crate::intercept::InstallMode;
use crate::logging::LoggingConfig;
use crate::path::TargetPath;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpliceConfig {
    /// Command tree manifest (defaults to `<workspace>/commands.toml`)
    #[serde(default)]
    pub manifest: Option<PathBuf>,

    /// Interception settings
    #[serde(default)]
    pub install: InstallConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// What the CLI's interception does around each intercepted command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterceptPolicy {
    /// Record the invocation, run the original, record its result.
    #[default]
    Audit,
    /// Refuse to run the original and return `blocked_result`.
    Block,
}

/// Interception settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstallConfig {
    #[serde(default)]
    pub mode: InstallMode,

    #[serde(default)]
    pub policy: InterceptPolicy,

    /// Result code returned for blocked invocations
    #[serde(default)]
    pub blocked_result: i32,

    /// Paths intercepted by default, dotted or space separated
    #[serde(default)]
    pub targets: Vec<String>,
}

impl InstallConfig {
    /// Parse configured targets.
    pub fn target_paths(&self) -> Result<Vec<TargetPath>, ValidationError> {
        self.targets
            .iter()
            .map(|raw| {
                TargetPath::parse(raw)
                    .map_err(|e| ValidationError::Install(format!("target '{}': {}", raw, e)))
            })
            .collect()
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Install(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Install(msg) => write!(f, "Install: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl SpliceConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for raw in &self.install.targets {
            if let Err(e) = TargetPath::parse(raw) {
                errors.push(ValidationError::Install(format!("target '{}': {}", raw, e)));
            }
        }

        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Manifest location, relative paths resolved against the workspace.
    pub fn manifest_path(&self, workspace_root: &std::path::Path) -> PathBuf {
        match &self.manifest {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => workspace_root.join(path),
            None => workspace_root.join("commands.toml"),
        }
    }
}
