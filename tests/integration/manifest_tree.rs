//! Manifest-built trees with the CLI's invocation context

use crate::integration::test_utils::manifest_tree;
use splice::intercept;
use splice::tree::invocation::Invocation;
use splice::tree::walker::Walker;
use splice::TreeError;

const MANIFEST: &str = r#"
    [[command]]
    path = "foo bar"
    result = 1
    output = "bar: {input}"

    [[command]]
    path = "baz"
    shadow = "foo bar"

    [[detached]]
    name = "bar#client"
    result = 1
    output = "client bar"

    [[link]]
    from = "foo bar"
    kind = "client_mirror"
    to = "@bar#client"
"#;

#[test]
fn test_alias_and_mirror_intercepted() {
    let mut tree = manifest_tree(MANIFEST);
    intercept::build(&mut tree, |b| {
        b.interception(|ic| {
            ic.context().emit("before");
            let result = ic.run_original();
            ic.context().emit("after");
            result
        })?;
        b.path(["foo", "bar"])
    })
    .unwrap();

    let invocation = Invocation::new("baz", "console");
    assert_eq!(tree.execute(&["baz"], &invocation).unwrap(), 1);
    assert_eq!(invocation.lines(), vec!["before", "bar: baz", "after"]);

    let mirror = tree
        .lookup(&["foo", "bar"])
        .and_then(|bar| tree.get(bar))
        .and_then(|n| n.variant(splice::VariantKind::ClientMirror))
        .unwrap();
    // The mirror carries the same wrapper, which runs the primary's original.
    let bar = tree.lookup(&["foo", "bar"]).unwrap();
    let installed = tree.get(bar).unwrap().command().unwrap().clone();
    assert!(tree.get(mirror).unwrap().command().unwrap().same_as(&installed));
    let invocation = Invocation::default();
    tree.execute_node(mirror, &invocation).unwrap();
    assert_eq!(invocation.lines(), vec!["before", "bar: ", "after"]);
}

#[test]
fn test_group_cannot_be_intercepted() {
    let mut tree = manifest_tree(MANIFEST);
    let err = intercept::build(&mut tree, |b| {
        b.interception(|ic| ic.run_original())?;
        b.path(["foo"])
    })
    .unwrap_err();
    assert!(matches!(err, splice::InterceptError::NodeNotExecutable { .. }));
    assert_eq!(
        tree.execute(&["foo"], &Invocation::default()),
        Err(TreeError::NotExecutable("foo".to_string()))
    );
}

#[test]
fn test_walker_lists_detached_last() {
    let tree = manifest_tree(MANIFEST);
    let entries = Walker::new(&tree).walk();
    let names: Vec<String> = entries.iter().map(|e| e.path.join(" ")).collect();
    assert_eq!(names, vec!["baz", "foo", "foo bar", "bar#client"]);
    assert!(entries.last().unwrap().detached);
}
