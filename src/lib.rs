//! Splice: Transparent Handler Interception
//!
//! Wraps the executable handler of nodes in an existing command-dispatch tree
//! with custom pre/post logic, without touching how the tree is built. The
//! replacement is mirrored onto every alias and cache of the node so each
//! invocation is intercepted exactly once, whichever entry point was used.

pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod host;
pub mod intercept;
pub mod logging;
pub mod path;
pub mod tree;
pub mod types;

pub use command::{Command, Handler};
pub use error::{ApiError, InterceptError, TreeError};
pub use host::CommandHost;
pub use intercept::{InstallMode, InstallReport, InterceptionBuilder, InterceptionContext};
pub use path::TargetPath;
pub use types::{NodeId, ResultCode, VariantKind};
