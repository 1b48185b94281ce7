//! TOML options file for the `copy` command.
//!
//! ```toml
//! source-dir = "../site-a/config/sync"
//! dest-dir = "../site-b/config/sync"
//! file-name-filter = "node.type.*,field.*"
//! override = true
//! ```
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigUtilsError;

/// Values read from an options file.  Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CopyOptionsFile {
    /// Source configuration directory.
    pub source_dir: Option<PathBuf>,
    /// Destination configuration directory.
    pub dest_dir: Option<PathBuf>,
    /// Comma-separated machine names.
    pub machine_name_filter: Option<String>,
    /// Comma-separated file names (`*` wildcard).
    pub file_name_filter: Option<String>,
    /// Overwrite files that differ at the destination.
    #[serde(rename = "override")]
    pub override_existing: Option<bool>,
}

/// Load an options file.
///
/// Relative directories in the file are resolved against the file's own
/// directory.
///
/// # Errors
///
/// Returns [`ConfigUtilsError::Io`] if the file cannot be read and
/// [`ConfigUtilsError::Options`] if it is not valid TOML or has unknown keys.
pub fn load(path: &Path) -> Result<CopyOptionsFile, ConfigUtilsError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigUtilsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut options = parse(&content).map_err(|e| ConfigUtilsError::Options {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })?;
    if let Some(base) = path.parent() {
        options.source_dir = options.source_dir.map(|dir| base.join(dir));
        options.dest_dir = options.dest_dir.map(|dir| base.join(dir));
    }
    Ok(options)
}

/// Parse options from TOML text.
///
/// # Errors
///
/// Returns the TOML error if the text is invalid or has unknown keys.
pub fn parse(content: &str) -> Result<CopyOptionsFile, toml::de::Error> {
    toml::from_str(content)
}
