//! Classification of a single indent-stripped line.

/// Name given to array items.
pub const ARRAY_MARKER: &str = "-";

/// What one line of configuration text declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `NAME: { }`: an array with no items.
    EmptyArray {
        /// Node name.
        name: &'a str,
    },
    /// `NAME: VALUE`.
    Scalar {
        /// Node name.
        name: &'a str,
        /// Trimmed value.
        value: &'a str,
    },
    /// `NAME:` with children on the following lines.
    Mapping {
        /// Node name.
        name: &'a str,
    },
    /// A lone `-` opening an array item with children.
    ArrayItem,
    /// `- VALUE`.
    ArrayScalar {
        /// Trimmed item value.
        value: &'a str,
    },
}

/// Classify `content` (already indent- and right-trimmed).
///
/// Rules are tried in order: empty array, scalar, mapping, array-item
/// mapping, scalar array item.  Returns `None` when nothing matches.
///
/// # Examples
///
/// ```
/// use config_utils::config::grammar::{LineKind, classify};
///
/// assert_eq!(classify("langcode: en"), Some(LineKind::Scalar { name: "langcode", value: "en" }));
/// assert_eq!(classify("module: {  }"), Some(LineKind::EmptyArray { name: "module" }));
/// assert_eq!(classify("- node"), Some(LineKind::ArrayScalar { value: "node" }));
/// assert_eq!(classify("no colon here"), None);
/// ```
#[must_use]
pub fn classify(content: &str) -> Option<LineKind<'_>> {
    if let Some((name, rest)) = split_name(content) {
        let rest = rest.trim();
        if is_empty_braces(rest) {
            return Some(LineKind::EmptyArray { name });
        }
        if rest.is_empty() {
            return Some(LineKind::Mapping { name });
        }
        return Some(LineKind::Scalar { name, value: rest });
    }
    if content == ARRAY_MARKER {
        return Some(LineKind::ArrayItem);
    }
    if let Some(rest) = content.strip_prefix("- ") {
        let value = rest.trim();
        if !value.is_empty() {
            return Some(LineKind::ArrayScalar { value });
        }
    }
    None
}

/// Split `NAME:REST` where NAME is a non-empty run without whitespace or
/// colons.
fn split_name(content: &str) -> Option<(&str, &str)> {
    let (name, rest) = content.split_once(':')?;
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return None;
    }
    Some((name, rest))
}

/// `{` and `}` with only whitespace between them.
fn is_empty_braces(rest: &str) -> bool {
    rest.strip_prefix('{')
        .and_then(|inner| inner.strip_suffix('}'))
        .is_some_and(|inner| inner.trim().is_empty())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Named lines
    // -----------------------------------------------------------------------

    #[test]
    fn empty_array_with_any_inner_spacing() {
        for text in ["name: { }", "name: {}", "name:{  }", "name: {     }"] {
            assert_eq!(
                classify(text),
                Some(LineKind::EmptyArray { name: "name" }),
                "{text}"
            );
        }
    }

    #[test]
    fn empty_array_wins_over_scalar() {
        assert_ne!(
            classify("name: { }"),
            Some(LineKind::Scalar {
                name: "name",
                value: "{ }"
            })
        );
    }

    #[test]
    fn braces_with_content_are_a_scalar() {
        assert_eq!(
            classify("name: { a }"),
            Some(LineKind::Scalar {
                name: "name",
                value: "{ a }"
            })
        );
    }

    #[test]
    fn scalar_value_is_trimmed() {
        assert_eq!(
            classify("label:    Article"),
            Some(LineKind::Scalar {
                name: "label",
                value: "Article"
            })
        );
    }

    #[test]
    fn scalar_without_space_after_colon() {
        assert_eq!(
            classify("weight:0"),
            Some(LineKind::Scalar {
                name: "weight",
                value: "0"
            })
        );
    }

    #[test]
    fn scalar_value_may_contain_colons() {
        assert_eq!(
            classify("path: 'http://example.com:8080'"),
            Some(LineKind::Scalar {
                name: "path",
                value: "'http://example.com:8080'"
            })
        );
    }

    #[test]
    fn bare_name_is_mapping() {
        assert_eq!(
            classify("dependencies:"),
            Some(LineKind::Mapping {
                name: "dependencies"
            })
        );
    }

    #[test]
    fn name_with_whitespace_is_rejected() {
        assert_eq!(classify("bad name: value"), None);
    }

    #[test]
    fn missing_name_is_rejected() {
        assert_eq!(classify(": value"), None);
    }

    // -----------------------------------------------------------------------
    // Array lines
    // -----------------------------------------------------------------------

    #[test]
    fn lone_dash_is_array_item() {
        assert_eq!(classify("-"), Some(LineKind::ArrayItem));
    }

    #[test]
    fn dash_value_is_array_scalar() {
        assert_eq!(
            classify("-   field.storage.node.body"),
            Some(LineKind::ArrayScalar {
                value: "field.storage.node.body"
            })
        );
    }

    #[test]
    fn dash_item_keeps_inner_colon_text() {
        assert_eq!(
            classify("- key: value"),
            Some(LineKind::ArrayScalar {
                value: "key: value"
            })
        );
    }

    #[test]
    fn dash_without_space_is_rejected() {
        assert_eq!(classify("-value"), None);
    }
}
