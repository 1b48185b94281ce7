//! Arena-backed configuration tree.
//!
//! A [`ConfigTree`] owns every node in a flat `Vec`; nodes refer to their
//! parent and children by [`NodeId`].  Nodes are either mappings (named
//! children, or `-` array items, never both) or scalars.
//!
//! Removing a child only detaches it: the node stays in the arena but is no
//! longer reachable from the root.

use std::io;

use super::grammar::ARRAY_MARKER;
use crate::error::StructureError;

/// Index of a node inside its [`ConfigTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Variant payload of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A node with children.
    Mapping {
        /// Children in insertion order.
        children: Vec<NodeId>,
        /// `true` when the children are `-` array items (or for `NAME: { }`).
        is_array: bool,
    },
    /// A leaf holding a value.
    Scalar {
        /// The scalar text.
        value: String,
    },
}

/// A single tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    name: String,
    indent_level: u16,
    parent: Option<NodeId>,
    kind: NodeKind,
}

impl Node {
    /// Node name (`-` for array items).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Output indentation level.
    #[must_use]
    pub const fn indent_level(&self) -> u16 {
        self.indent_level
    }

    /// Parent node, `None` for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Variant payload.
    #[must_use]
    pub const fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Children of a mapping; empty for scalars.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Mapping { children, .. } => children,
            NodeKind::Scalar { .. } => &[],
        }
    }

    /// Scalar value, `None` for mappings.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Scalar { value } => Some(value),
            NodeKind::Mapping { .. } => None,
        }
    }

    /// Whether this is a mapping holding array items.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self.kind, NodeKind::Mapping { is_array: true, .. })
    }

    /// Whether this is a mapping node.
    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self.kind, NodeKind::Mapping { .. })
    }

    /// Whether this node is an array item.
    #[must_use]
    pub fn is_array_item(&self) -> bool {
        self.name == ARRAY_MARKER
    }
}

/// A rooted configuration tree.
///
/// # Examples
///
/// ```
/// use config_utils::config::tree::ConfigTree;
///
/// let mut tree = ConfigTree::new("settings");
/// let root = tree.root();
/// tree.add_scalar(root, "langcode", "en").unwrap();
/// let deps = tree.add_mapping(root, "module", false).unwrap();
/// tree.add_scalar(deps, "-", "node").unwrap();
/// assert_eq!(tree.render(root), "settings:\n  langcode: en\n  module:\n    - node\n");
/// ```
#[derive(Debug, Clone)]
pub struct ConfigTree {
    nodes: Vec<Node>,
    root: NodeId,
    file_root: bool,
}

impl ConfigTree {
    /// Create a tree whose root is an ordinary empty mapping.
    #[must_use]
    pub fn new(root_name: &str) -> Self {
        Self::with_root(root_name, false)
    }

    /// Create a tree whose root stands for a whole file.
    ///
    /// The root is not emitted on write and its children sit at indent 0.
    #[must_use]
    pub fn new_file_root(name: &str) -> Self {
        Self::with_root(name, true)
    }

    fn with_root(name: &str, file_root: bool) -> Self {
        Self {
            nodes: vec![Node {
                name: name.to_string(),
                indent_level: 0,
                parent: None,
                kind: NodeKind::Mapping {
                    children: Vec::new(),
                    is_array: false,
                },
            }],
            root: NodeId(0),
            file_root,
        }
    }

    /// The root node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Whether `id` is the root of a file tree.
    #[must_use]
    pub fn is_file_root(&self, id: NodeId) -> bool {
        self.file_root && id == self.root
    }

    /// Borrow a node.
    ///
    /// `NodeId`s are only minted by this tree, so the index is always valid
    /// for ids obtained from it.
    #[must_use]
    #[allow(clippy::indexing_slicing)]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    #[allow(clippy::indexing_slicing)]
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// First child of `id` named `name`.
    #[must_use]
    pub fn child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.node(id)
            .children()
            .iter()
            .copied()
            .find(|&c| self.node(c).name == name)
    }

    /// Values of the scalar children of `id` (the items of a scalar array).
    pub fn scalar_values(&self, id: NodeId) -> impl Iterator<Item = &str> {
        self.node(id)
            .children()
            .iter()
            .filter_map(|&c| self.node(c).value())
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Append a scalar child.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::NotAMapping`] if `parent` is a scalar and
    /// [`StructureError::MixedChildren`] if the child would mix array items
    /// with named nodes.
    pub fn add_scalar(
        &mut self,
        parent: NodeId,
        name: &str,
        value: &str,
    ) -> Result<NodeId, StructureError> {
        let index = self.node(parent).children().len();
        self.insert_scalar(parent, index, name, value)
    }

    /// Insert a scalar child at `index` (clamped to the child count).
    ///
    /// # Errors
    ///
    /// Same as [`add_scalar`](Self::add_scalar).
    pub fn insert_scalar(
        &mut self,
        parent: NodeId,
        index: usize,
        name: &str,
        value: &str,
    ) -> Result<NodeId, StructureError> {
        let name = checked_name(name)?;
        self.check_adopt(parent, &name)?;
        let id = self.alloc(
            parent,
            name,
            NodeKind::Scalar {
                value: value.to_string(),
            },
        );
        self.attach_at(parent, id, index)?;
        Ok(id)
    }

    /// Append a mapping child; `is_array` marks an (initially empty) array.
    ///
    /// # Errors
    ///
    /// Same as [`add_scalar`](Self::add_scalar).
    pub fn add_mapping(
        &mut self,
        parent: NodeId,
        name: &str,
        is_array: bool,
    ) -> Result<NodeId, StructureError> {
        let name = checked_name(name)?;
        self.check_adopt(parent, &name)?;
        let id = self.alloc(
            parent,
            name,
            NodeKind::Mapping {
                children: Vec::new(),
                is_array,
            },
        );
        self.attach(parent, id)?;
        Ok(id)
    }

    /// Detach `child` from `parent`.  Returns `false` if it was not a child.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if let NodeKind::Mapping { children, .. } = &mut self.node_mut(parent).kind
            && let Some(pos) = children.iter().position(|&c| c == child)
        {
            children.remove(pos);
            return true;
        }
        false
    }

    /// Replace a scalar's value.  Returns `false` for mappings.
    pub fn set_value(&mut self, id: NodeId, value: &str) -> bool {
        if let NodeKind::Scalar { value: current } = &mut self.node_mut(id).kind {
            value.clone_into(current);
            return true;
        }
        false
    }

    /// Rename a node.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::EmptyName`] for an empty or whitespace name
    /// and [`StructureError::MarkerRename`] when the node is an array item.
    pub fn rename(&mut self, id: NodeId, new_name: &str) -> Result<(), StructureError> {
        let new_name = checked_name(new_name)?;
        let node = self.node_mut(id);
        if node.is_array_item() {
            return Err(StructureError::MarkerRename);
        }
        node.name = new_name;
        Ok(())
    }

    /// Allocate a detached node whose parent and indent level point at
    /// `parent`.
    pub(super) fn alloc(&mut self, parent: NodeId, name: String, kind: NodeKind) -> NodeId {
        let indent_level = if self.is_file_root(parent) {
            0
        } else {
            self.node(parent).indent_level.saturating_add(1)
        };
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name,
            indent_level,
            parent: Some(parent),
            kind,
        });
        id
    }

    /// Append a node produced by [`alloc`](Self::alloc) to its parent.
    pub(super) fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<(), StructureError> {
        let index = self.node(parent).children().len();
        self.attach_at(parent, child, index)
    }

    fn attach_at(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: usize,
    ) -> Result<(), StructureError> {
        let child_is_item = self.node(child).is_array_item();
        self.check_adopt(parent, self.node(child).name())?;
        if let NodeKind::Mapping { children, is_array } = &mut self.node_mut(parent).kind {
            if children.is_empty() && !*is_array {
                *is_array = child_is_item;
            }
            children.insert(index.min(children.len()), child);
        }
        Ok(())
    }

    /// Check that `parent` can take a child named `name`.
    ///
    /// An empty plain mapping takes either kind; an empty array only takes
    /// items.
    fn check_adopt(&self, parent: NodeId, name: &str) -> Result<(), StructureError> {
        let node = self.node(parent);
        match &node.kind {
            NodeKind::Scalar { .. } => Err(StructureError::NotAMapping(node.name.clone())),
            NodeKind::Mapping { children, is_array } => {
                let is_item = name == ARRAY_MARKER;
                if (*is_array && !is_item) || (!children.is_empty() && !*is_array && is_item) {
                    return Err(StructureError::MixedChildren {
                        node: node.name.clone(),
                    });
                }
                Ok(())
            }
        }
    }

    // -----------------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------------

    /// Write `id` and its subtree as configuration text.
    ///
    /// Each level indents by two spaces.  A file root writes only its
    /// children.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write_node<W: io::Write + ?Sized>(&self, id: NodeId, out: &mut W) -> io::Result<()> {
        let node = self.node(id);
        if !self.is_file_root(id) {
            let pad = " ".repeat(usize::from(node.indent_level) * 2);
            let name = &node.name;
            match &node.kind {
                NodeKind::Scalar { value } if node.is_array_item() => {
                    writeln!(out, "{pad}- {value}")?;
                }
                NodeKind::Scalar { value } => writeln!(out, "{pad}{name}: {value}")?,
                NodeKind::Mapping { children, is_array } if *is_array && children.is_empty() => {
                    writeln!(out, "{pad}{name}: {{  }}")?;
                }
                NodeKind::Mapping { .. } if node.is_array_item() => writeln!(out, "{pad}-")?,
                NodeKind::Mapping { .. } => writeln!(out, "{pad}{name}:")?,
            }
        }
        for &child in node.children() {
            self.write_node(child, out)?;
        }
        Ok(())
    }

    /// Render `id` and its subtree to a string.
    #[must_use]
    pub fn render(&self, id: NodeId) -> String {
        let mut buf = Vec::new();
        if self.write_node(id, &mut buf).is_err() {
            return String::new();
        }
        String::from_utf8(buf).unwrap_or_default()
    }

    // -----------------------------------------------------------------------
    // Equality
    // -----------------------------------------------------------------------

    /// Structural equality of `id` with `other_id` in `other`.
    ///
    /// Names must match.  Scalars compare values.  Arrays compare items
    /// pairwise in order; mappings pair each child with the first unused
    /// child of the same name, so their order does not matter.
    #[must_use]
    pub fn equivalent(&self, id: NodeId, other: &Self, other_id: NodeId) -> bool {
        let a = self.node(id);
        let b = other.node(other_id);
        if a.name != b.name {
            return false;
        }
        match (&a.kind, &b.kind) {
            (NodeKind::Scalar { value: left }, NodeKind::Scalar { value: right }) => left == right,
            (
                NodeKind::Mapping {
                    children: left,
                    is_array,
                },
                NodeKind::Mapping {
                    children: right, ..
                },
            ) => {
                if left.len() != right.len() {
                    return false;
                }
                if *is_array {
                    return left
                        .iter()
                        .zip(right)
                        .all(|(&l, &r)| self.equivalent(l, other, r));
                }
                let mut unused: Vec<Option<NodeId>> = right.iter().copied().map(Some).collect();
                left.iter().all(|&l| {
                    let name = self.node(l).name();
                    unused
                        .iter_mut()
                        .find(|slot| slot.is_some_and(|r| other.node(r).name() == name))
                        .and_then(Option::take)
                        .is_some_and(|r| self.equivalent(l, other, r))
                })
            }
            _ => false,
        }
    }

    // -----------------------------------------------------------------------
    // Cloning
    // -----------------------------------------------------------------------

    /// Deep-copy a parentless node into a new, independent tree.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::InvalidCloneParent`] if `id` has a parent;
    /// use [`clone_into`](Self::clone_into) for those.
    pub fn try_clone_root(&self, id: NodeId) -> Result<Self, StructureError> {
        let node = self.node(id);
        if node.parent.is_some() {
            return Err(StructureError::InvalidCloneParent(format!(
                "'{}' has a parent but no target parent was given",
                node.name
            )));
        }
        let mut target = Self::with_root(&node.name, self.is_file_root(id));
        let root = target.root;
        for &child in node.children() {
            let copy = self.copy_detached(child, &mut target, root);
            target.attach(root, copy)?;
        }
        if let NodeKind::Mapping { is_array, .. } = &mut target.node_mut(root).kind {
            *is_array = node.is_array();
        }
        Ok(target)
    }

    /// Deep-copy `id` and append the copy under `target_parent` in `target`.
    ///
    /// `target_parent` must have the same name and indent level as the
    /// original's parent.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::InvalidCloneParent`] when `id` has no
    /// parent or the parents do not match, and
    /// [`StructureError::MixedChildren`] if the copy cannot join the target's
    /// existing children.
    pub fn clone_into(
        &self,
        id: NodeId,
        target: &mut Self,
        target_parent: NodeId,
    ) -> Result<NodeId, StructureError> {
        let Some(parent) = self.node(id).parent else {
            return Err(StructureError::InvalidCloneParent(format!(
                "'{}' is a root and cannot be cloned under a parent",
                self.node(id).name
            )));
        };
        let original = self.node(parent);
        let candidate = target.node(target_parent);
        if original.name != candidate.name || original.indent_level != candidate.indent_level {
            return Err(StructureError::InvalidCloneParent(format!(
                "expected parent '{}' at level {}, got '{}' at level {}",
                original.name, original.indent_level, candidate.name, candidate.indent_level
            )));
        }
        target.check_adopt(target_parent, &self.node(id).name)?;
        let copy = self.copy_detached(id, target, target_parent);
        target.attach(target_parent, copy)?;
        Ok(copy)
    }

    /// Copy the subtree at `id` into `target` as a detached child of
    /// `parent`.  Array-ness is carried over unchanged.
    fn copy_detached(&self, id: NodeId, target: &mut Self, parent: NodeId) -> NodeId {
        let node = self.node(id);
        let kind = match &node.kind {
            NodeKind::Scalar { value } => NodeKind::Scalar {
                value: value.clone(),
            },
            NodeKind::Mapping { is_array, .. } => NodeKind::Mapping {
                children: Vec::new(),
                is_array: *is_array,
            },
        };
        let copy = target.alloc(parent, node.name.clone(), kind);
        let children: Vec<NodeId> = node
            .children()
            .iter()
            .map(|&child| self.copy_detached(child, target, copy))
            .collect();
        if let NodeKind::Mapping { children: slot, .. } = &mut target.node_mut(copy).kind {
            *slot = children;
        }
        copy
    }
}

/// Trim `name` and reject it if empty.
fn checked_name(name: &str) -> Result<String, StructureError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StructureError::EmptyName);
    }
    Ok(trimmed.to_string())
}
