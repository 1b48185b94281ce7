//! Recursive-descent builder turning configuration text into a tree.

use super::grammar::{ARRAY_MARKER, LineKind, classify};
use super::path::path_of;
use super::reader::LineReader;
use super::tree::{ConfigTree, NodeId, NodeKind};
use crate::error::{FormatError, ParseError};
use crate::logging::Log;

/// Decides whether a freshly parsed top-level node is kept.
pub type NodeFilter = fn(&ConfigTree, NodeId, &dyn Log) -> bool;

/// Keeps everything except `_core`.
///
/// A `_core` node is expected to hold exactly one `default_config_hash`
/// child; anything else is reported as a warning before the node is dropped.
pub const DEFAULT_NODE_FILTER: NodeFilter = drop_core;

/// Keeps every node.
pub const KEEP_ALL: NodeFilter = keep_all;

const fn keep_all(_tree: &ConfigTree, _id: NodeId, _log: &dyn Log) -> bool {
    true
}

fn drop_core(tree: &ConfigTree, id: NodeId, log: &dyn Log) -> bool {
    let node = tree.node(id);
    if node.name() != "_core" {
        return true;
    }
    let children = node.children();
    let well_formed = children.len() == 1
        && children
            .first()
            .is_some_and(|&c| tree.node(c).name() == "default_config_hash");
    if !well_formed {
        log.warn(&format!(
            "{} - expected a single 'default_config_hash' entry",
            path_of(tree, id)
        ));
    }
    false
}

/// Parse a whole file into a tree whose root is named `name`.
///
/// `filter` is applied to the root's direct children only.
///
/// # Examples
///
/// ```
/// use config_utils::config::parser::{DEFAULT_NODE_FILTER, parse_file};
/// use config_utils::logging::BufferedLog;
///
/// let text = "_core:\n  default_config_hash: abc\nid: page\nmodule:\n  - node\n";
/// let tree = parse_file("node.type.page", text, DEFAULT_NODE_FILTER, &BufferedLog::new()).unwrap();
/// assert_eq!(tree.render(tree.root()), "id: page\nmodule:\n  - node\n");
/// ```
///
/// # Errors
///
/// Returns a [`ParseError::Format`] for bad indentation, unparsable lines
/// or lines left over after the top-level nodes, and a
/// [`ParseError::Structure`] when array items and named nodes are mixed.
pub fn parse_file(
    name: &str,
    text: &str,
    filter: NodeFilter,
    log: &dyn Log,
) -> Result<ConfigTree, ParseError> {
    let mut reader = LineReader::new(text)?;
    let mut tree = ConfigTree::new_file_root(name);
    let mut builder = Builder {
        reader: &mut reader,
        tree: &mut tree,
        filter,
        log,
    };
    let root = builder.tree.root();
    builder.load_children(root, 0)?;
    if !reader.is_eof() {
        return Err(FormatError::UnconsumedLines {
            line: reader.line_number(),
        }
        .into());
    }
    Ok(tree)
}

struct Builder<'r, 'a> {
    reader: &'r mut LineReader<'a>,
    tree: &'r mut ConfigTree,
    filter: NodeFilter,
    log: &'r dyn Log,
}

impl Builder<'_, '_> {
    /// Read the children of `parent`, whose own line sat at `indent`.
    ///
    /// The first following line fixes the child indent; the run ends at the
    /// first line with a different indent.
    fn load_children(&mut self, parent: NodeId, indent: usize) -> Result<(), ParseError> {
        let file_root = self.tree.is_file_root(parent);
        let Some(first) = self.reader.current() else {
            return Ok(());
        };
        let required = first.indent;
        if required < indent || (required == indent && !file_root) {
            return Ok(());
        }

        while let Some(line) = self.reader.current().copied()
            && line.indent == required
        {
            self.reader.advance()?;
            let child = self.load_node(parent, line.number, line.content, required)?;
            if !file_root || (self.filter)(self.tree, child, self.log) {
                self.tree.attach(parent, child)?;
            }
        }
        Ok(())
    }

    /// Build the node declared by `content` (and, for mappings, its
    /// children) as a detached child of `parent`.
    fn load_node(
        &mut self,
        parent: NodeId,
        number: usize,
        content: &str,
        indent: usize,
    ) -> Result<NodeId, ParseError> {
        let Some(kind) = classify(content) else {
            return Err(FormatError::UnparsableLine {
                line: number,
                content: content.to_string(),
            }
            .into());
        };
        let (name, node_kind, recurse) = match kind {
            LineKind::EmptyArray { name } => (name, mapping(true), false),
            LineKind::Scalar { name, value } => (name, scalar(value), false),
            LineKind::Mapping { name } => (name, mapping(false), true),
            LineKind::ArrayItem => (ARRAY_MARKER, mapping(false), true),
            LineKind::ArrayScalar { value } => (ARRAY_MARKER, scalar(value), false),
        };
        let id = self.tree.alloc(parent, name.to_string(), node_kind);
        if recurse {
            self.load_children(id, indent)?;
        }
        Ok(id)
    }
}

const fn mapping(is_array: bool) -> NodeKind {
    NodeKind::Mapping {
        children: Vec::new(),
        is_array,
    }
}

fn scalar(value: &str) -> NodeKind {
    NodeKind::Scalar {
        value: value.to_string(),
    }
}
