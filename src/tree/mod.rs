//! In-memory Command Tree
//!
//! Arena-backed dispatch tree implementing [`CommandHost`]. Nodes live in a
//! flat table and are addressed by [`NodeId`], so node identity is index
//! identity: two nodes with the same name and handler are still distinct.
//!
//! Besides child edges, a node may carry a shadow handle (it stands in for
//! another node during lookup) and up to one variant per [`VariantKind`].
//! Variant links are free-form and may form cycles.

pub mod builder;
pub mod invocation;
pub mod walker;

use crate::command::Command;
use crate::error::TreeError;
use crate::host::CommandHost;
use crate::types::{NodeId, ResultCode, VariantKind};
use std::collections::BTreeMap;
use std::fmt;
use tracing::trace;

/// One node of the tree.
pub struct CommandNode<C> {
    name: String,
    children: BTreeMap<String, NodeId>,
    command: Option<Command<C>>,
    shadow_of: Option<NodeId>,
    variants: [Option<NodeId>; 3],
    detached: bool,
}

impl<C> CommandNode<C> {
    fn new(name: String, command: Option<Command<C>>) -> Self {
        Self {
            name,
            children: BTreeMap::new(),
            command,
            shadow_of: None,
            variants: [None; 3],
            detached: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Children in name order.
    pub fn children(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.children.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub fn command(&self) -> Option<&Command<C>> {
        self.command.as_ref()
    }

    pub fn is_executable(&self) -> bool {
        self.command.is_some()
    }

    /// Node this shadow stands for during lookup.
    pub fn shadow_of(&self) -> Option<NodeId> {
        self.shadow_of
    }

    pub fn variant(&self, kind: VariantKind) -> Option<NodeId> {
        self.variants[kind.index()]
    }

    /// True for nodes that are only reachable through variant links.
    pub fn is_detached(&self) -> bool {
        self.detached
    }
}

impl<C> fmt::Debug for CommandNode<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandNode")
            .field("name", &self.name)
            .field("children", &self.children)
            .field("executable", &self.command.is_some())
            .field("shadow_of", &self.shadow_of)
            .field("variants", &self.variants)
            .field("detached", &self.detached)
            .finish()
    }
}

/// Arena of command nodes rooted at `NodeId(0)`.
pub struct CommandTree<C> {
    nodes: Vec<CommandNode<C>>,
}

impl<C> fmt::Debug for CommandTree<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n)))
            .finish()
    }
}

impl<C> Default for CommandTree<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> CommandTree<C> {
    pub fn new() -> Self {
        Self {
            nodes: vec![CommandNode::new(String::new(), None)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root exists from construction.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&CommandNode<C>> {
        self.nodes.get(id.0)
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    fn node(&self, id: NodeId) -> Result<&CommandNode<C>, TreeError> {
        self.nodes.get(id.0).ok_or(TreeError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut CommandNode<C>, TreeError> {
        self.nodes.get_mut(id.0).ok_or(TreeError::UnknownNode(id))
    }

    fn push(&mut self, node: CommandNode<C>) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    fn attach(&mut self, parent: NodeId, node: CommandNode<C>) -> Result<NodeId, TreeError> {
        let parent_node = self.node(parent)?;
        if parent_node.children.contains_key(&node.name) {
            return Err(TreeError::DuplicateChild {
                parent: parent_node.name.clone(),
                name: node.name,
            });
        }
        let name = node.name.clone();
        let id = self.push(node);
        self.node_mut(parent)?.children.insert(name, id);
        Ok(id)
    }

    /// Register a child of `parent`.
    pub fn add_node(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        command: Option<Command<C>>,
    ) -> Result<NodeId, TreeError> {
        self.attach(parent, CommandNode::new(name.into(), command))
    }

    /// Register a node that has no parent. It is reachable only through
    /// variant links, like a client-side mirror or a memoized form.
    pub fn add_detached(&mut self, name: impl Into<String>, command: Option<Command<C>>) -> NodeId {
        let mut node = CommandNode::new(name.into(), command);
        node.detached = true;
        self.push(node)
    }

    /// Register a child of `parent` that stands in for `handle` during lookup.
    /// Chains of shadows collapse onto the final handle.
    pub fn add_shadow(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        handle: NodeId,
    ) -> Result<NodeId, TreeError> {
        let handle = self.node(handle)?.shadow_of.unwrap_or(handle);
        let mut node = CommandNode::new(name.into(), None);
        node.shadow_of = Some(handle);
        self.attach(parent, node)
    }

    /// Point `from`'s variant of `kind` at `to`.
    pub fn link_variant(
        &mut self,
        from: NodeId,
        kind: VariantKind,
        to: NodeId,
    ) -> Result<(), TreeError> {
        self.node(to)?;
        self.node_mut(from)?.variants[kind.index()] = Some(to);
        Ok(())
    }

    /// Replace a node's handler. Unlike interception this touches one node only.
    pub fn set_node_command(&mut self, id: NodeId, command: Option<Command<C>>) -> Result<(), TreeError> {
        self.node_mut(id)?.command = command;
        Ok(())
    }

    /// Resolve words to a node the way dispatch does: exact child name, then
    /// through shadows.
    pub fn lookup<S: AsRef<str>>(&self, words: &[S]) -> Option<NodeId> {
        let mut current = self.root();
        for word in words {
            let word: &str = word.as_ref();
            let child = *self.get(current)?.children.get(word)?;
            current = self.resolve_shadow(child);
        }
        Some(current)
    }

    fn resolve_shadow(&self, id: NodeId) -> NodeId {
        self.get(id).and_then(|n| n.shadow_of).unwrap_or(id)
    }

    /// Dispatch `words` and run the handler found there.
    pub fn execute<S: AsRef<str>>(&self, words: &[S], context: &C) -> Result<ResultCode, TreeError> {
        let input = words
            .iter()
            .map(|w| w.as_ref())
            .collect::<Vec<&str>>()
            .join(" ");
        let id = self
            .lookup(words)
            .ok_or_else(|| TreeError::UnknownCommand(input.clone()))?;
        let command = self
            .node(id)?
            .command
            .clone()
            .ok_or(TreeError::NotExecutable(input))?;
        trace!(node = %id, "Dispatching command");
        Ok(command.run(context))
    }

    /// Run a node's handler directly, bypassing lookup.
    pub fn execute_node(&self, id: NodeId, context: &C) -> Result<ResultCode, TreeError> {
        let node = self.node(id)?;
        let command = node
            .command
            .as_ref()
            .ok_or_else(|| TreeError::NotExecutable(node.name.clone()))?;
        Ok(command.run(context))
    }
}

impl<C: 'static> CommandHost for CommandTree<C> {
    type Node = NodeId;
    type Context = C;

    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn name(&self, node: NodeId) -> &str {
        self.get(node).map(CommandNode::name).unwrap_or_default()
    }

    fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.get(parent)?.children.get(name).copied()
    }

    fn underlying(&self, node: NodeId) -> NodeId {
        self.resolve_shadow(node)
    }

    fn command(&self, node: NodeId) -> Option<Command<C>> {
        self.get(node)?.command.clone()
    }

    fn set_command(&mut self, node: NodeId, command: Command<C>) {
        if let Some(entry) = self.nodes.get_mut(node.0) {
            entry.command = Some(command);
        }
    }

    fn variant(&self, node: NodeId, kind: VariantKind) -> Option<NodeId> {
        self.get(node)?.variant(kind)
    }
}
