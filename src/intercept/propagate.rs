//! Mirror a handler replacement across a node's variants.
//!
//! Variant links (client mirror, wrapped cache, unwrapped cache) form a
//! general directed graph. The walk keeps a visited set keyed by node
//! identity, so cycles terminate and every node is written exactly once.

use crate::command::Command;
use crate::host::CommandHost;
use crate::intercept::slot::write_command;
use crate::types::VariantKind;
use std::collections::HashSet;

/// Nodes written by one propagation pass, primary first, in visit order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Propagation<N> {
    pub visited: Vec<N>,
}

impl<N: PartialEq> Propagation<N> {
    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }

    pub fn contains(&self, node: &N) -> bool {
        self.visited.contains(node)
    }
}

/// Write `command` onto `node` and every variant reachable from it.
pub fn propagate<H: CommandHost>(
    host: &mut H,
    node: H::Node,
    command: &Command<H::Context>,
) -> Propagation<H::Node> {
    propagate_excluding(host, node, command, &HashSet::new())
}

/// Like [`propagate`], but nodes in `exclude` are neither written nor
/// walked through. `node` itself is always written.
pub fn propagate_excluding<H: CommandHost>(
    host: &mut H,
    node: H::Node,
    command: &Command<H::Context>,
    exclude: &HashSet<H::Node>,
) -> Propagation<H::Node> {
    let mut seen = exclude.clone();
    seen.insert(node);
    let mut visited = Vec::new();
    visit(host, node, command, &mut seen, &mut visited);
    Propagation { visited }
}

fn visit<H: CommandHost>(
    host: &mut H,
    node: H::Node,
    command: &Command<H::Context>,
    seen: &mut HashSet<H::Node>,
    visited: &mut Vec<H::Node>,
) {
    write_command(host, node, command.clone());
    visited.push(node);

    for kind in VariantKind::ALL {
        if let Some(variant) = host.variant(node, kind) {
            if seen.insert(variant) {
                visit(host, variant, command, seen, visited);
            }
        }
    }
}
