//! Command Interception
//!
//! Locates already-registered nodes of a host command tree and swaps their
//! handler for a wrapper that runs user logic around the original handler.
//! The replacement is mirrored onto every variant of the node, so whichever
//! entry point a caller uses, the interception fires exactly once.
//!
//! Install during a quiescent registration phase: the engine takes no locks
//! and assumes nothing else mutates the same nodes while it runs.

pub mod builder;
pub mod context;
pub mod propagate;
pub mod resolve;
pub mod slot;
pub mod wrapper;

pub use builder::{InstallMode, InstallReport, InterceptionBuilder, TargetOutcome};
pub use context::InterceptionContext;
pub use propagate::{propagate, propagate_excluding, Propagation};
pub use resolve::resolve;
pub use wrapper::{InterceptFn, Interception};

use crate::error::InterceptError;
use crate::host::CommandHost;

/// Configure and install one interception unit in a single call.
///
/// ```ignore
/// splice::intercept::build(&mut tree, |b| {
///     b.interception(|ic| ic.run_original())?;
///     b.path(["foo", "bar"])
/// })?;
/// ```
pub fn build<H, F>(host: &mut H, configure: F) -> Result<InstallReport<H::Node>, InterceptError>
where
    H: CommandHost,
    F: FnOnce(&mut InterceptionBuilder<H::Context>) -> Result<(), InterceptError>,
{
    let mut builder = InterceptionBuilder::new();
    configure(&mut builder)?;
    builder.install(host)
}
