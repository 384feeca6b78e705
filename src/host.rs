//! Host Boundary
//!
//! The command-dispatch tree belongs to an external framework. Everything the
//! interception engine needs from it is expressed by [`CommandHost`]: child
//! lookup, shadow projection, the executable handler slot, and the variant
//! relations that expose one logical command through several nodes.
//!
//! A framework whose handler slot is private should supply a thin integration
//! shim implementing `command`/`set_command`, rather than having the engine
//! patch the field behind its back.

use crate::command::Command;
use crate::types::VariantKind;
use std::fmt::Debug;
use std::hash::Hash;

/// Capabilities a command-dispatch tree exposes to the interception engine.
pub trait CommandHost {
    /// Node identity. Two handles compare equal only when they designate the
    /// same node object, never because two nodes look alike.
    type Node: Copy + Eq + Hash + Debug;

    /// Invocation context handed to handlers at dispatch time.
    type Context: 'static;

    /// Root of the dispatch tree.
    fn root(&self) -> Self::Node;

    /// Name of `node` within its parent.
    fn name(&self, node: Self::Node) -> &str;

    /// Child of `parent` whose name equals `name`.
    fn find_child(&self, parent: Self::Node, name: &str) -> Option<Self::Node>;

    /// Project a shadow/proxy node onto the node it stands for.
    fn underlying(&self, node: Self::Node) -> Self::Node {
        node
    }

    /// Current handler in the node's slot, if any.
    fn command(&self, node: Self::Node) -> Option<Command<Self::Context>>;

    /// Replace the node's handler. Later reads of the slot, through any code
    /// path, must observe `command`.
    fn set_command(&mut self, node: Self::Node, command: Command<Self::Context>);

    /// Variant of `node` of the given kind, if the host keeps one.
    fn variant(&self, node: Self::Node, kind: VariantKind) -> Option<Self::Node>;
}
