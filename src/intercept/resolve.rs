//! Node resolution: target path to host node.

use crate::error::InterceptError;
use crate::host::CommandHost;
use crate::path::TargetPath;
use tracing::trace;

/// Follow `path` from the root, one child per segment.
///
/// Each matched child is projected through [`CommandHost::underlying`] before
/// descending, so shadow nodes resolve to the node they stand for.
pub fn resolve<H: CommandHost>(host: &H, path: &TargetPath) -> Result<H::Node, InterceptError> {
    let mut current = host.root();
    for segment in path.segments() {
        let child = host
            .find_child(current, segment)
            .ok_or_else(|| InterceptError::PathNotFound {
                segment: segment.clone(),
                path: path.clone(),
            })?;
        current = host.underlying(child);
        trace!(segment = %segment, node = ?current, "Resolved segment");
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::tree::CommandTree;

    fn tree() -> CommandTree<()> {
        let mut tree = CommandTree::new();
        let root = tree.root();
        let a = tree.add_node(root, "a", None).unwrap();
        let b = tree.add_node(a, "b", None).unwrap();
        tree.add_node(b, "c", Some(Command::new(|_: &()| 1))).unwrap();
        tree.add_shadow(root, "alias", a).unwrap();
        tree
    }

    #[test]
    fn test_resolves_nested_path() {
        let tree = tree();
        let node = resolve(&tree, &TargetPath::new(["a", "b", "c"]).unwrap()).unwrap();
        assert_eq!(tree.get(node).unwrap().name(), "c");
    }

    #[test]
    fn test_missing_segment_is_reported() {
        let mut tree: CommandTree<()> = CommandTree::new();
        let root = tree.root();
        tree.add_node(root, "a", None).unwrap();

        let path = TargetPath::new(["a", "b", "c"]).unwrap();
        assert_eq!(
            resolve(&tree, &path),
            Err(InterceptError::PathNotFound {
                segment: "b".to_string(),
                path,
            })
        );
    }

    #[test]
    fn test_resolves_through_shadow() {
        let tree = tree();
        let via_alias = resolve(&tree, &TargetPath::parse("alias.b.c").unwrap()).unwrap();
        let direct = resolve(&tree, &TargetPath::parse("a.b.c").unwrap()).unwrap();
        assert_eq!(via_alias, direct);
    }

    #[test]
    fn test_resolution_does_not_mutate() {
        let tree = tree();
        let before = tree.len();
        let _ = resolve(&tree, &TargetPath::parse("a.missing").unwrap());
        assert_eq!(tree.len(), before);
    }
}
