//! Depth-first walker for listing a command tree

use crate::tree::CommandTree;
use crate::types::{NodeId, VariantKind};
use std::collections::HashSet;

/// One listed node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: NodeId,
    /// Words leading to the node from the root. Detached nodes carry only
    /// their own name.
    pub path: Vec<String>,
    pub executable: bool,
    pub shadow_of: Option<NodeId>,
    pub detached: bool,
    pub variants: Vec<(VariantKind, NodeId)>,
}

/// Walker configuration
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Maximum depth to descend (None = unlimited)
    pub max_depth: Option<usize>,
    /// Include nodes reachable only through variant links
    pub include_detached: bool,
}

/// Command tree walker
pub struct Walker<'a, C> {
    tree: &'a CommandTree<C>,
    config: WalkerConfig,
}

impl<'a, C> Walker<'a, C> {
    pub fn new(tree: &'a CommandTree<C>) -> Self {
        Self {
            tree,
            config: WalkerConfig {
                max_depth: None,
                include_detached: true,
            },
        }
    }

    pub fn with_config(tree: &'a CommandTree<C>, config: WalkerConfig) -> Self {
        Self { tree, config }
    }

    /// List nodes depth-first with children in name order, followed by detached
    /// nodes in arena order. The root itself is not listed. Shadow nodes are
    /// listed but not descended into.
    pub fn walk(&self) -> Vec<Entry> {
        let mut entries = Vec::new();
        let mut seen = HashSet::new();
        let mut path = Vec::new();
        self.descend(self.tree.root(), &mut path, &mut entries, &mut seen);

        if self.config.include_detached {
            for id in self.tree.ids() {
                let Some(node) = self.tree.get(id) else {
                    continue;
                };
                if node.is_detached() && seen.insert(id) {
                    entries.push(self.entry(id, vec![node.name().to_string()]));
                }
            }
        }

        entries
    }

    fn descend(
        &self,
        id: NodeId,
        path: &mut Vec<String>,
        entries: &mut Vec<Entry>,
        seen: &mut HashSet<NodeId>,
    ) {
        let Some(node) = self.tree.get(id) else {
            return;
        };
        if let Some(max) = self.config.max_depth {
            if path.len() >= max {
                return;
            }
        }
        for (name, child) in node.children() {
            seen.insert(child);
            path.push(name.to_string());
            entries.push(self.entry(child, path.clone()));
            let is_shadow = self
                .tree
                .get(child)
                .map(|c| c.shadow_of().is_some())
                .unwrap_or(false);
            if !is_shadow {
                self.descend(child, path, entries, seen);
            }
            path.pop();
        }
    }

    fn entry(&self, id: NodeId, path: Vec<String>) -> Entry {
        let node = self.tree.get(id);
        Entry {
            id,
            path,
            executable: node.map(|n| n.is_executable()).unwrap_or(false),
            shadow_of: node.and_then(|n| n.shadow_of()),
            detached: node.map(|n| n.is_detached()).unwrap_or(false),
            variants: VariantKind::ALL
                .iter()
                .filter_map(|kind| node.and_then(|n| n.variant(*kind)).map(|to| (*kind, to)))
                .collect(),
        }
    }
}
