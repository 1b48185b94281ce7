//! Diagnostic addresses for tree nodes.

use super::tree::{ConfigTree, NodeId};

/// Address of `id`, built from the root outwards.
///
/// A file root renders as `[name]` and any other root as its bare name.
/// Named nodes append `.name`; array items append their zero-based position
/// as `[index]`.
///
/// # Examples
///
/// ```
/// use config_utils::config::path::path_of;
/// use config_utils::config::tree::ConfigTree;
///
/// let mut tree = ConfigTree::new_file_root("views.view.comment");
/// let root = tree.root();
/// let deps = tree.add_mapping(root, "dependencies", false).unwrap();
/// let module = tree.add_mapping(deps, "module", false).unwrap();
/// let item = tree.add_scalar(module, "-", "comment").unwrap();
/// assert_eq!(path_of(&tree, item), "[views.view.comment].dependencies.module[0]");
/// ```
#[must_use]
pub fn path_of(tree: &ConfigTree, id: NodeId) -> String {
    let node = tree.node(id);
    let Some(parent) = node.parent() else {
        return if tree.is_file_root(id) {
            format!("[{}]", node.name())
        } else {
            node.name().to_string()
        };
    };
    let parent_path = path_of(tree, parent);
    if node.is_array_item()
        && let Some(index) = tree
            .node(parent)
            .children()
            .iter()
            .position(|&c| c == id)
    {
        return format!("{parent_path}[{index}]");
    }
    format!("{parent_path}.{}", node.name())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn file_root_is_bracketed() {
        let tree = ConfigTree::new_file_root("system.site");
        assert_eq!(path_of(&tree, tree.root()), "[system.site]");
    }

    #[test]
    fn plain_root_is_bare() {
        let tree = ConfigTree::new("settings");
        assert_eq!(path_of(&tree, tree.root()), "settings");
    }

    #[test]
    fn nested_names_are_dotted() {
        let mut tree = ConfigTree::new_file_root("system.site");
        let root = tree.root();
        let page = tree.add_mapping(root, "page", false).unwrap();
        let front = tree.add_scalar(page, "front", "/node").unwrap();
        assert_eq!(path_of(&tree, front), "[system.site].page.front");
    }

    #[test]
    fn array_items_use_position() {
        let mut tree = ConfigTree::new_file_root("f");
        let root = tree.root();
        let list = tree.add_mapping(root, "list", false).unwrap();
        tree.add_scalar(list, "-", "a").unwrap();
        let item = tree.add_mapping(list, "-", false).unwrap();
        let key = tree.add_scalar(item, "key", "v").unwrap();
        assert_eq!(path_of(&tree, item), "[f].list[1]");
        assert_eq!(path_of(&tree, key), "[f].list[1].key");
    }

    #[test]
    fn nested_array_items() {
        let mut tree = ConfigTree::new("m");
        let root = tree.root();
        let outer = tree.add_mapping(root, "-", false).unwrap();
        let inner = tree.add_scalar(outer, "-", "x").unwrap();
        assert_eq!(path_of(&tree, inner), "m[0][0]");
    }
}
