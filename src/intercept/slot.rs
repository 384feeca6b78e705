//! Access to a node's executable handler slot.

use crate::command::Command;
use crate::error::InterceptError;
use crate::host::CommandHost;
use crate::path::TargetPath;
use tracing::trace;

/// Current handler of `node`, which must be executable.
pub fn read_command<H: CommandHost>(
    host: &H,
    node: H::Node,
    path: &TargetPath,
) -> Result<Command<H::Context>, InterceptError> {
    host.command(node)
        .ok_or_else(|| InterceptError::NodeNotExecutable { path: path.clone() })
}

/// Overwrite the handler of `node`.
pub fn write_command<H: CommandHost>(host: &mut H, node: H::Node, command: Command<H::Context>) {
    trace!(node = ?node, name = host.name(node), "Writing handler slot");
    host.set_command(node, command);
}
