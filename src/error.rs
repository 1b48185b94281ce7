//! Domain-specific error types for the configuration toolkit.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Library modules return typed errors (e.g., [`FormatError`],
//! [`StructureError`]) while command handlers at the CLI boundary convert
//! them to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! ConfigUtilsError
//! ├── Parse { path, ParseError } — one file failed to parse
//! │   ├── Format(FormatError)        — indentation / grammar
//! │   └── Structure(StructureError)  — tree invariant violated while building
//! ├── DirectoryNotFound              — a configuration directory is missing
//! ├── Io { path, source }            — read/write failures
//! └── Options { path, message }      — malformed options file
//!
//! StructureError                      — tree invariant violated by a mutation
//! DependencyError                     — unresolvable `dependencies.config` entry
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the configuration toolkit.
#[derive(Error, Debug)]
pub enum ConfigUtilsError {
    /// A configuration file could not be parsed.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        /// Path of the offending file.
        path: PathBuf,
        /// What went wrong.
        source: ParseError,
    },

    /// A configuration directory does not exist.
    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// An I/O error occurred while reading or writing a file.
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        /// Path to the file that could not be read or written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// An options file could not be loaded.
    #[error("invalid options file {}: {message}", .path.display())]
    Options {
        /// Path to the options file.
        path: PathBuf,
        /// Human-readable reason.
        message: String,
    },
}

/// Errors produced while turning text into a tree.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The text does not follow the line grammar.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The text parsed but the resulting tree would break an invariant.
    #[error(transparent)]
    Structure(#[from] StructureError),
}

/// Malformed indentation or unrecognised line content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The left indent of a line contains something other than spaces.
    #[error("line {line}: left indent contains non-space characters")]
    NonSpaceIndent {
        /// 1-based source line number.
        line: usize,
    },

    /// A line matches none of the grammar rules.
    #[error("line {line}: content cannot be parsed: {content}")]
    UnparsableLine {
        /// 1-based source line number.
        line: usize,
        /// The indent-stripped line content.
        content: String,
    },

    /// Lines remain after the top-level nodes were consumed.
    #[error("line {line}: not all lines were loaded (inconsistent indentation)")]
    UnconsumedLines {
        /// 1-based line number of the first unconsumed line.
        line: usize,
    },
}

/// Violations of the tree's structural invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// Array items and named nodes would share one parent.
    #[error("'{node}' cannot hold both array items and named nodes")]
    MixedChildren {
        /// Name of the parent node.
        node: String,
    },

    /// The parent passed to a clone does not match the original's parent.
    #[error("invalid clone parent: {0}")]
    InvalidCloneParent(String),

    /// The array-item marker `-` cannot be renamed.
    #[error("array item nodes named '-' cannot be renamed")]
    MarkerRename,

    /// A node name was empty or whitespace.
    #[error("node name is empty")]
    EmptyName,

    /// A substitution pattern was empty.
    #[error("replacement pattern is empty")]
    EmptyPattern,

    /// A mapping operation was applied to a scalar node.
    #[error("'{0}' is not a mapping node")]
    NotAMapping(String),

    /// A `uuid` value is not a valid UUID.
    #[error("invalid uuid '{0}'")]
    InvalidUuid(String),
}

/// Errors that arise while walking `dependencies.config` references.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DependencyError {
    /// A referenced configuration file does not exist in the directory.
    #[error("dependency file '{0}.yml' not found")]
    NotFound(String),
}
