//! Literal text substitution over names and values of a subtree.

use super::path::path_of;
use super::tree::{ConfigTree, NodeId, NodeKind};
use crate::error::StructureError;
use crate::logging::Log;

/// Replace every occurrence of `pattern` with `replacement` in the names
/// and scalar values of `id` and its descendants.
///
/// Matching is literal and case-sensitive.  Every child is visited even
/// after a change was found.  Each renamed node is reported as a warning
/// naming its address before the change.  Returns whether anything changed.
///
/// # Errors
///
/// Returns [`StructureError::EmptyPattern`] for an empty pattern, and any
/// error from renaming a node (e.g. when an array item's `-` would change).
pub fn replace(
    tree: &mut ConfigTree,
    id: NodeId,
    pattern: &str,
    replacement: &str,
    log: &dyn Log,
) -> Result<bool, StructureError> {
    if pattern.is_empty() {
        return Err(StructureError::EmptyPattern);
    }
    replace_in(tree, id, pattern, replacement, log)
}

fn replace_in(
    tree: &mut ConfigTree,
    id: NodeId,
    pattern: &str,
    replacement: &str,
    log: &dyn Log,
) -> Result<bool, StructureError> {
    let mut changed = false;

    match tree.node(id).kind() {
        NodeKind::Mapping { children, .. } => {
            for child in children.clone() {
                changed |= replace_in(tree, child, pattern, replacement, log)?;
            }
        }
        NodeKind::Scalar { value } => {
            if let Some(new_value) = substitute(value, pattern, replacement) {
                tree.set_value(id, &new_value);
                changed = true;
            }
        }
    }

    if let Some(new_name) = substitute(tree.node(id).name(), pattern, replacement) {
        log.warn(&format!(
            "{} - node name will be changed to: {new_name}",
            path_of(tree, id)
        ));
        tree.rename(id, &new_name)?;
        changed = true;
    }

    Ok(changed)
}

/// The replaced text, if it differs from `text`.
fn substitute(text: &str, pattern: &str, replacement: &str) -> Option<String> {
    if !text.contains(pattern) {
        return None;
    }
    let replaced = text.replace(pattern, replacement);
    (replaced != text).then_some(replaced)
}
