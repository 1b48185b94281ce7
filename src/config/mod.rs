//! Configuration files: parsing, the tree model, and operations over
//! directories of files.
//!
//! Text flows through [`reader`] and [`grammar`] into [`parser`], which
//! builds a [`tree::ConfigTree`] per file.  [`directory`] loads whole
//! directories, [`filter`] selects from them and [`dependencies`] follows
//! their cross-file references.

pub mod dependencies;
pub mod directory;
pub mod file;
pub mod filter;
pub mod grammar;
pub mod parser;
pub mod path;
pub mod reader;
pub mod replace;
pub mod tree;

pub use dependencies::{DependencyClosure, RequirementReport};
pub use directory::{ConfigDirectory, LoadOptions};
pub use file::ConfigFile;
pub use parser::{DEFAULT_NODE_FILTER, NodeFilter};
pub use tree::{ConfigTree, Node, NodeId, NodeKind};
