//! Propagation over arbitrary variant graphs

use proptest::prelude::*;
use splice::intercept::{self, propagate};
use splice::tree::CommandTree;
use splice::{Command, NodeId, VariantKind};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A root-level executable node per index, plus variant links between them.
fn graph(size: usize, links: &[(usize, usize, usize)]) -> (CommandTree<()>, Vec<NodeId>) {
    let mut tree = CommandTree::new();
    let root = tree.root();
    let nodes: Vec<NodeId> = (0..size)
        .map(|i| {
            tree.add_node(root, format!("n{}", i), Some(Command::new(|_: &()| 1)))
                .unwrap()
        })
        .collect();
    for &(from, kind, to) in links {
        tree.link_variant(nodes[from % size], VariantKind::ALL[kind], nodes[to % size])
            .unwrap();
    }
    (tree, nodes)
}

fn reachable(tree: &CommandTree<()>, start: NodeId) -> HashSet<NodeId> {
    let mut seen = HashSet::new();
    let mut stack = vec![start];
    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        for kind in VariantKind::ALL {
            if let Some(next) = tree.get(id).and_then(|n| n.variant(kind)) {
                stack.push(next);
            }
        }
    }
    seen
}

fn links_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize, usize)>)> {
    (1usize..12).prop_flat_map(|size| {
        (
            Just(size),
            prop::collection::vec((0..size, 0usize..3, 0..size), 0..24),
        )
    })
}

/// Every reachable node gets the same handler, each written once, and nothing
/// else changes.
#[test]
fn test_propagation_covers_reachable_set_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&links_strategy(), |(size, links)| {
            let (mut tree, nodes) = graph(size, &links);
            let start = nodes[0];
            let expected = reachable(&tree, start);
            let before: Vec<Command<()>> = nodes
                .iter()
                .map(|id| tree.get(*id).unwrap().command().unwrap().clone())
                .collect();

            let replacement = Command::new(|_: &()| 7);
            let visit = propagate(&mut tree, start, &replacement);

            let visited: HashSet<NodeId> = visit.visited.iter().copied().collect();
            prop_assert_eq!(visited.len(), visit.visited.len());
            prop_assert_eq!(&visited, &expected);
            prop_assert_eq!(visit.visited[0], start);

            for (i, id) in nodes.iter().enumerate() {
                let current = tree.get(*id).unwrap().command().unwrap();
                if expected.contains(id) {
                    prop_assert!(current.same_as(&replacement));
                } else {
                    prop_assert!(current.same_as(&before[i]));
                }
            }
            Ok(())
        })
        .unwrap();
}

/// An installed interception fires exactly once per dispatch, whichever
/// reachable node is executed.
#[test]
fn test_interception_fires_once_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&links_strategy(), |(size, links)| {
            let (mut tree, nodes) = graph(size, &links);
            let fired = Arc::new(AtomicUsize::new(0));
            let counter = Arc::clone(&fired);
            intercept::build(&mut tree, move |b| {
                b.interception(move |ic| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    ic.run_original()
                })?;
                b.path(["n0"])
            })
            .unwrap();

            for id in reachable(&tree, nodes[0]) {
                fired.store(0, Ordering::SeqCst);
                prop_assert_eq!(tree.execute_node(id, &()).unwrap(), 1);
                prop_assert_eq!(fired.load(Ordering::SeqCst), 1);
            }
            Ok(())
        })
        .unwrap();
}
