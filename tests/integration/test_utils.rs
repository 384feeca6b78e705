//! Shared test utilities for integration tests

use splice::tree::builder::{TreeBuilder, TreeManifest};
use splice::tree::invocation::Invocation;
use splice::tree::CommandTree;
use splice::{Command, NodeId, VariantKind};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Serializes tests that touch SPLICE_* environment variables.
pub static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Handler counting its invocations and returning a fixed code.
pub fn counting(code: i32) -> (Command<()>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let command = Command::new(move |_: &()| {
        counter.fetch_add(1, Ordering::SeqCst);
        code
    });
    (command, calls)
}

/// `foo bar` with a shadow `fb`, a client mirror and a wrapped cache.
pub struct MirroredTree {
    pub tree: CommandTree<()>,
    pub foo: NodeId,
    pub bar: NodeId,
    pub shadow: NodeId,
    pub mirror: NodeId,
    pub cache: NodeId,
    pub original_calls: Arc<AtomicUsize>,
}

pub fn mirrored_tree() -> MirroredTree {
    let mut tree = CommandTree::new();
    let root = tree.root();
    let (foo_cmd, _) = counting(1);
    let (bar_cmd, original_calls) = counting(1);
    let foo = tree.add_node(root, "foo", Some(foo_cmd)).unwrap();
    let bar = tree.add_node(foo, "bar", Some(bar_cmd.clone())).unwrap();
    let shadow = tree.add_shadow(root, "fb", bar).unwrap();
    let mirror = tree.add_detached("bar#client", Some(bar_cmd.clone()));
    let cache = tree.add_detached("bar#wrapped", Some(bar_cmd));
    tree.link_variant(bar, VariantKind::ClientMirror, mirror).unwrap();
    tree.link_variant(bar, VariantKind::WrappedCache, cache).unwrap();
    MirroredTree {
        tree,
        foo,
        bar,
        shadow,
        mirror,
        cache,
        original_calls,
    }
}

pub fn manifest_tree(manifest: &str) -> CommandTree<Invocation> {
    let manifest = TreeManifest::from_toml_str(manifest).unwrap();
    TreeBuilder::new(manifest).build().unwrap()
}
