//! A directory of configuration files.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::WalkDir;

use super::file::{ConfigFile, is_config_path};
use super::parser::{DEFAULT_NODE_FILTER, NodeFilter};
use crate::error::ConfigUtilsError;
use crate::logging::{BufferedLog, Log};

/// Name of the file listing enabled modules and themes.
pub const CORE_EXTENSION: &str = "core.extension";

/// How a directory is read.
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Descend into sub-directories.
    pub recursive: bool,
    /// Parse files on the rayon thread pool.
    pub parallel: bool,
    /// Filter applied to every file's top-level nodes.
    pub filter: NodeFilter,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            recursive: false,
            parallel: true,
            filter: DEFAULT_NODE_FILTER,
        }
    }
}

/// Every configuration file found in a directory.
///
/// Files that cannot be read or parsed are reported and left out.  The
/// collection is read-only once loaded.
#[derive(Debug)]
pub struct ConfigDirectory {
    path: PathBuf,
    files: Vec<ConfigFile>,
    core_extension: Option<usize>,
}

impl ConfigDirectory {
    /// Load the `.yml` files in `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigUtilsError::DirectoryNotFound`] if `path` is not a
    /// directory.  Per-file failures are logged, not returned.
    pub fn load(
        path: &Path,
        options: &LoadOptions,
        log: &dyn Log,
    ) -> Result<Self, ConfigUtilsError> {
        if !path.is_dir() {
            return Err(ConfigUtilsError::DirectoryNotFound(path.to_path_buf()));
        }
        let candidates = candidate_paths(path, options.recursive, log);
        log.debug(&format!(
            "found {} configuration files in {}",
            candidates.len(),
            path.display()
        ));

        let filter = options.filter;
        let files: Vec<ConfigFile> = if options.parallel {
            let loaded: Vec<(Option<ConfigFile>, BufferedLog)> = candidates
                .par_iter()
                .map(|candidate| {
                    let buffer = BufferedLog::new();
                    let file = load_one(candidate, filter, &buffer);
                    (file, buffer)
                })
                .collect();
            loaded
                .into_iter()
                .filter_map(|(file, buffer)| {
                    buffer.replay_into(log);
                    file
                })
                .collect()
        } else {
            candidates
                .iter()
                .filter_map(|candidate| load_one(candidate, filter, log))
                .collect()
        };

        Ok(Self::from_files(path.to_path_buf(), files))
    }

    /// Build a collection from already parsed files.
    #[must_use]
    pub fn from_files(path: PathBuf, files: Vec<ConfigFile>) -> Self {
        let core_extension = files.iter().position(|f| f.name() == CORE_EXTENSION);
        Self {
            path,
            files,
            core_extension,
        }
    }

    /// Directory the files were loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All loaded files, in path order.
    #[must_use]
    pub fn files(&self) -> &[ConfigFile] {
        &self.files
    }

    /// Whether no file was loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of loaded files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// First file named `name` (without extension).
    #[must_use]
    pub fn file(&self, name: &str) -> Option<&ConfigFile> {
        self.files.iter().find(|f| f.name() == name)
    }

    /// The `core.extension` file, if the directory has one.
    #[must_use]
    pub fn core_extension(&self) -> Option<&ConfigFile> {
        self.core_extension.and_then(|i| self.files.get(i))
    }
}

/// `.yml` files under `dir`, sorted by path.
fn candidate_paths(dir: &Path, recursive: bool, log: &dyn Log) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(dir).min_depth(1).follow_links(false);
    if !recursive {
        walker = walker.max_depth(1);
    }
    let mut paths: Vec<PathBuf> = walker
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                log.warn(&format!("cannot read directory entry: {err}"));
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_config_path(entry.path()))
        .map(walkdir::DirEntry::into_path)
        .collect();
    paths.sort();
    paths
}

fn load_one(path: &Path, filter: NodeFilter, log: &dyn Log) -> Option<ConfigFile> {
    match ConfigFile::load(path, filter, log) {
        Ok(file) => {
            log.debug(&format!("loaded {}", path.display()));
            Some(file)
        }
        Err(e) => {
            log.error(&format!("skipping {}: {e}", path.display()));
            None
        }
    }
}
