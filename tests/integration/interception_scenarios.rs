//! End-to-end interception scenarios against the reference tree

use crate::integration::test_utils::{counting, mirrored_tree};
use splice::intercept::{self, InstallMode, InterceptionBuilder};
use splice::tree::CommandTree;
use splice::{InterceptError, NodeId, TargetPath, VariantKind};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[test]
fn test_interception_fires_once_per_entry_point() {
    let mut t = mirrored_tree();
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);

    let mut builder = InterceptionBuilder::new();
    builder
        .interception(move |ic| {
            counter.fetch_add(1, Ordering::SeqCst);
            ic.run_original()
        })
        .unwrap();
    builder.path(["foo", "bar"]).unwrap();
    let report = builder.install(&mut t.tree).unwrap();

    assert_eq!(report.targets[0].node, t.bar);
    assert_eq!(report.targets[0].written, vec![t.bar, t.mirror, t.cache]);

    assert_eq!(t.tree.execute(&["foo", "bar"], &()).unwrap(), 1);
    assert_eq!(t.tree.execute(&["fb"], &()).unwrap(), 1);
    assert_eq!(t.tree.execute_node(t.mirror, &()).unwrap(), 1);
    assert_eq!(t.tree.execute_node(t.cache, &()).unwrap(), 1);

    assert_eq!(fired.load(Ordering::SeqCst), 4);
    assert_eq!(t.original_calls.load(Ordering::SeqCst), 4);
}

#[test]
fn test_all_variants_share_one_wrapper() {
    let mut t = mirrored_tree();
    intercept::build(&mut t.tree, |b| {
        b.interception(|ic| ic.run_original())?;
        b.path(["foo", "bar"])
    })
    .unwrap();

    let installed = t.tree.get(t.bar).unwrap().command().unwrap().clone();
    for node in [t.mirror, t.cache] {
        assert!(t.tree.get(node).unwrap().command().unwrap().same_as(&installed));
    }
    // The shadow keeps no handler of its own.
    assert!(t.tree.get(t.shadow).unwrap().command().is_none());
    // Siblings and ancestors are untouched.
    assert_eq!(t.tree.execute_node(t.foo, &()).unwrap(), 1);
}

#[test]
fn test_interception_can_skip_original() {
    let mut t = mirrored_tree();
    intercept::build(&mut t.tree, |b| {
        b.interception(|_| -1)?;
        b.path(["foo", "bar"])
    })
    .unwrap();

    assert_eq!(t.tree.execute(&["fb"], &()).unwrap(), -1);
    assert_eq!(t.original_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_interception_sees_target_and_context() {
    let mut tree: CommandTree<String> = CommandTree::new();
    let root = tree.root();
    tree.add_node(
        root,
        "say",
        Some(splice::Command::new(|s: &String| s.len() as i32)),
    )
    .unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    intercept::build(&mut tree, move |b| {
        b.interception(move |ic| {
            log.lock()
                .unwrap()
                .push(format!("{}:{}", ic.target(), ic.context()));
            ic.run_original() + 100
        })?;
        b.path(["say"])
    })
    .unwrap();

    assert_eq!(tree.execute(&["say"], &"hello".to_string()).unwrap(), 105);
    assert_eq!(*seen.lock().unwrap(), vec!["say:hello".to_string()]);
}

fn two_targets() -> (CommandTree<()>, NodeId) {
    let mut tree = CommandTree::new();
    let root = tree.root();
    let (x, _) = counting(1);
    let x = tree.add_node(root, "x", Some(x)).unwrap();
    (tree, x)
}

#[test]
fn test_sequential_keeps_earlier_targets_on_failure() {
    let (mut tree, x) = two_targets();
    let original = tree.get(x).unwrap().command().unwrap().clone();

    let mut builder = InterceptionBuilder::new();
    builder.interception(|ic| ic.run_original() + 1).unwrap();
    builder.path(["x"]).unwrap();
    builder.path(["y"]).unwrap();

    let err = builder.install(&mut tree).unwrap_err();
    assert_eq!(
        err,
        InterceptError::PathNotFound {
            segment: "y".to_string(),
            path: TargetPath::parse("y").unwrap(),
        }
    );
    assert!(!tree.get(x).unwrap().command().unwrap().same_as(&original));
    assert_eq!(tree.execute(&["x"], &()).unwrap(), 2);

    // The unit is spent even though installation failed.
    assert_eq!(
        builder.install(&mut tree).unwrap_err(),
        InterceptError::AlreadyInstalled
    );
}

#[test]
fn test_atomic_writes_nothing_on_failure() {
    let (mut tree, x) = two_targets();
    let original = tree.get(x).unwrap().command().unwrap().clone();

    let mut builder = InterceptionBuilder::new().with_mode(InstallMode::Atomic);
    builder.interception(|ic| ic.run_original() + 1).unwrap();
    builder.path(["x"]).unwrap();
    builder.path(["y"]).unwrap();

    assert!(builder.install(&mut tree).is_err());
    assert!(tree.get(x).unwrap().command().unwrap().same_as(&original));
    assert_eq!(tree.execute(&["x"], &()).unwrap(), 1);
}

#[test]
fn test_second_unit_wraps_the_first() {
    let mut t = mirrored_tree();
    for offset in [10, 100] {
        intercept::build(&mut t.tree, move |b| {
            b.interception(move |ic| ic.run_original() + offset)?;
            b.path(["foo", "bar"])
        })
        .unwrap();
    }
    // Outer unit runs last-installed first, then the earlier wrapper.
    assert_eq!(t.tree.execute(&["foo", "bar"], &()).unwrap(), 111);
    assert_eq!(t.tree.execute_node(t.mirror, &()).unwrap(), 111);
    assert_eq!(t.original_calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_shared_variant_between_targets_wrapped_once() {
    let mut tree = CommandTree::new();
    let root = tree.root();
    let (a, _) = counting(1);
    let (b, _) = counting(1);
    let a = tree.add_node(root, "a", Some(a)).unwrap();
    let b = tree.add_node(root, "b", Some(b)).unwrap();
    tree.link_variant(a, VariantKind::UnwrappedCache, b).unwrap();

    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    let report = intercept::build(&mut tree, move |builder| {
        builder.interception(move |ic| {
            counter.fetch_add(1, Ordering::SeqCst);
            ic.run_original()
        })?;
        builder.path(["a"])?;
        builder.path(["b"])
    })
    .unwrap();

    assert!(report.targets[1].already_intercepted);
    assert!(report.targets[1].written.is_empty());
    tree.execute(&["b"], &()).unwrap();
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}
