//! Error types for command interception and the reference command tree.

use crate::path::TargetPath;
use crate::types::NodeId;
use thiserror::Error;

/// Interception errors raised while configuring or installing a unit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterceptError {
    #[error("Command path cannot be empty")]
    InvalidPath,

    #[error("Interception already installed; configuration is closed")]
    AlreadyConfigured,

    #[error("Interception already installed")]
    AlreadyInstalled,

    #[error("Interception function not set")]
    MissingInterceptionFunction,

    #[error("No interceptions registered")]
    NoTargetsConfigured,

    #[error("Command path segment not found: '{segment}' in {path}")]
    PathNotFound { segment: String, path: TargetPath },

    #[error("Target node at path {path} is not executable")]
    NodeNotExecutable { path: TargetPath },
}

/// Errors raised by the in-memory command tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("Node not found: {0}")]
    UnknownNode(NodeId),

    #[error("Node '{parent}' already has a child named '{name}'")]
    DuplicateChild { parent: String, name: String },

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Command is not executable: {0}")]
    NotExecutable(String),

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),
}

/// Application-level errors surfaced by the CLI and configuration layers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Interception error: {0}")]
    Intercept(#[from] InterceptError),

    #[error("Command tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
