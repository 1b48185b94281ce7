//! One configuration file: a parsed tree plus where it came from.

use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::parser::{NodeFilter, parse_file};
use super::tree::{ConfigTree, NodeId};
use crate::error::{ConfigUtilsError, ParseError, StructureError};
use crate::logging::Log;

/// Extension of configuration files.
pub const EXTENSION: &str = "yml";

/// A parsed configuration file.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    tree: ConfigTree,
    path: PathBuf,
}

impl ConfigFile {
    /// Read and parse the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigUtilsError::Io`] if the file cannot be read and
    /// [`ConfigUtilsError::Parse`] if its content is malformed.
    pub fn load(path: &Path, filter: NodeFilter, log: &dyn Log) -> Result<Self, ConfigUtilsError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigUtilsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &text, filter, log).map_err(|source| ConfigUtilsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse `text` as the content of the file at `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use config_utils::config::file::ConfigFile;
    /// use config_utils::config::parser::DEFAULT_NODE_FILTER;
    /// use config_utils::logging::BufferedLog;
    ///
    /// let file = ConfigFile::parse(
    ///     "conf/system.site.YML".as_ref(),
    ///     "id: system.site\nname: Example\n",
    ///     DEFAULT_NODE_FILTER,
    ///     &BufferedLog::new(),
    /// )
    /// .unwrap();
    /// assert_eq!(file.name(), "system.site");
    /// assert_eq!(file.machine_name(), Some("system.site"));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the text is malformed or `path` has no
    /// file name.
    pub fn parse(
        path: &Path,
        text: &str,
        filter: NodeFilter,
        log: &dyn Log,
    ) -> Result<Self, ParseError> {
        let name = file_name(path);
        if name.trim().is_empty() {
            return Err(StructureError::EmptyName.into());
        }
        let tree = parse_file(&name, text, filter, log)?;
        Ok(Self {
            tree,
            path: path.to_path_buf(),
        })
    }

    /// File name without the `.yml` extension (the root node's name).
    #[must_use]
    pub fn name(&self) -> &str {
        self.tree.node(self.tree.root()).name()
    }

    /// Path the file was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The underlying tree.
    #[must_use]
    pub const fn tree(&self) -> &ConfigTree {
        &self.tree
    }

    /// The file root node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Top-level child named `name`.
    #[must_use]
    pub fn top_level(&self, name: &str) -> Option<NodeId> {
        self.tree.child(self.root(), name)
    }

    /// Value of the top-level `id` scalar.
    #[must_use]
    pub fn machine_name(&self) -> Option<&str> {
        self.top_level("id")
            .and_then(|id| self.tree.node(id).value())
    }

    /// The top-level `dependencies` mapping.
    #[must_use]
    pub fn dependencies_node(&self) -> Option<NodeId> {
        self.top_level("dependencies")
            .filter(|&id| self.tree.node(id).is_mapping())
    }

    /// Items of the `dependencies.<kind>` array (`config`, `module`, `theme`).
    #[must_use]
    pub fn dependencies_of(&self, kind: &str) -> Vec<&str> {
        self.dependencies_node()
            .and_then(|deps| self.tree.child(deps, kind))
            .map(|list| self.tree.scalar_values(list).collect())
            .unwrap_or_default()
    }

    /// The top-level `uuid`, if present.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::InvalidUuid`] if the value is not a UUID.
    pub fn uuid(&self) -> Result<Option<Uuid>, StructureError> {
        let Some(value) = self
            .top_level("uuid")
            .and_then(|id| self.tree.node(id).value())
        else {
            return Ok(None);
        };
        Uuid::parse_str(value)
            .map(Some)
            .map_err(|_| StructureError::InvalidUuid(value.to_string()))
    }

    /// Set, replace or (with `None`) remove the top-level `uuid`.
    ///
    /// A new entry is inserted as the first child.
    ///
    /// # Errors
    ///
    /// Returns a [`StructureError`] if the entry cannot be inserted.
    pub fn set_uuid(&mut self, uuid: Option<Uuid>) -> Result<(), StructureError> {
        let root = self.root();
        match (uuid, self.top_level("uuid")) {
            (None, Some(id)) => {
                self.tree.remove_child(root, id);
            }
            (None, None) => {}
            (Some(uuid), Some(id)) => {
                if !self.tree.set_value(id, &format_uuid(uuid)) {
                    self.tree.remove_child(root, id);
                    self.tree.insert_scalar(root, 0, "uuid", &format_uuid(uuid))?;
                }
            }
            (Some(uuid), None) => {
                self.tree.insert_scalar(root, 0, "uuid", &format_uuid(uuid))?;
            }
        }
        Ok(())
    }

    /// Structural equality with another file.
    #[must_use]
    pub fn equivalent(&self, other: &Self) -> bool {
        self.tree.equivalent(self.root(), &other.tree, other.root())
    }

    /// Substitute `pattern` with `replacement` in every name and value,
    /// the file name included.  Returns whether anything changed.
    ///
    /// # Errors
    ///
    /// Propagates [`StructureError`] from [`replace`](super::replace::replace).
    pub fn replace(
        &mut self,
        pattern: &str,
        replacement: &str,
        log: &dyn Log,
    ) -> Result<bool, StructureError> {
        let root = self.root();
        super::replace::replace(&mut self.tree, root, pattern, replacement, log)
    }

    /// Deep copy into an independent file.
    ///
    /// # Errors
    ///
    /// Propagates [`StructureError`] from the clone.
    pub fn try_clone(&self) -> Result<Self, StructureError> {
        Ok(Self {
            tree: self.tree.try_clone_root(self.root())?,
            path: self.path.clone(),
        })
    }

    /// Serialize the file content.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn write_to<W: io::Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        self.tree.write_node(self.root(), out)
    }

    /// Serialize the file content to a string.
    #[must_use]
    pub fn render(&self) -> String {
        self.tree.render(self.root())
    }

    /// Write the file content to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigUtilsError::Io`] if the file cannot be created or
    /// written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigUtilsError> {
        let write = || -> io::Result<()> {
            let mut out = io::BufWriter::new(fs::File::create(path)?);
            self.write_to(&mut out)?;
            out.flush()
        };
        write().map_err(|source| ConfigUtilsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// File base name with a trailing `.yml` (any case) removed.
#[must_use]
pub fn file_name(path: &Path) -> String {
    let base = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    strip_extension(&base).to_string()
}

/// `name` without a trailing `.yml` (any case).
#[must_use]
pub fn strip_extension(name: &str) -> &str {
    let split = name.len().saturating_sub(EXTENSION.len() + 1);
    match (name.get(..split), name.get(split..)) {
        (Some(stem), Some(ext)) if !stem.is_empty() && ext.eq_ignore_ascii_case(".yml") => stem,
        _ => name,
    }
}

/// Whether `path` has a `.yml` extension (any case).
#[must_use]
pub fn is_config_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(EXTENSION))
}

fn format_uuid(uuid: Uuid) -> String {
    uuid.hyphenated().to_string()
}
