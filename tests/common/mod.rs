// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed pair of site configuration
// directories and a fluent builder so each integration test can set up an
// isolated environment without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use config_utils::cli::GlobalOpts;
use config_utils::commands::copy::CopySettings;
use config_utils::logging::{BufferedLog, CopyStatus, LogEntry};

/// Write `content` to `dir/rel`, creating parent directories.
pub fn write_file(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(&path, content).expect("write fixture file");
}

/// `core.extension.yml` content enabling `modules` and `themes`.
pub fn core_extension(modules: &[&str], themes: &[&str]) -> String {
    let mut text = String::from("module:\n");
    for module in modules {
        text.push_str(&format!("  {module}: 0\n"));
    }
    text.push_str("theme:\n");
    for theme in themes {
        text.push_str(&format!("  {theme}: 0\n"));
    }
    text
}

/// Per-file statuses recorded in `log`, in order.
pub fn file_statuses(log: &BufferedLog) -> Vec<(String, CopyStatus)> {
    log.entries()
        .into_iter()
        .filter_map(|entry| match entry {
            LogEntry::File { name, status, .. } => Some((name, status)),
            LogEntry::Message(..) => None,
        })
        .collect()
}

/// Sequential loading keeps test output deterministic.
pub const fn sequential() -> GlobalOpts {
    GlobalOpts { parallel: false }
}

/// Source and destination site directories backed by a [`tempfile::TempDir`].
pub struct SiteContext {
    /// Temporary directory holding `source/` and `dest/`.
    pub root: tempfile::TempDir,
}

impl SiteContext {
    /// Create empty `source/` and `dest/` directories.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir(root.path().join("source")).expect("create source dir");
        std::fs::create_dir(root.path().join("dest")).expect("create dest dir");
        Self { root }
    }

    /// Path to the source directory.
    pub fn source(&self) -> PathBuf {
        self.root.path().join("source")
    }

    /// Path to the destination directory.
    pub fn dest(&self) -> PathBuf {
        self.root.path().join("dest")
    }

    /// Content of `dest/<name>.yml`, if present.
    pub fn read_dest(&self, name: &str) -> Option<String> {
        std::fs::read_to_string(self.dest().join(format!("{name}.yml"))).ok()
    }

    /// Copy settings for this pair with no filters and no overriding.
    pub fn settings(&self) -> CopySettings {
        CopySettings {
            source_dir: self.source(),
            dest_dir: self.dest(),
            machine_name_filter: None,
            file_name_filter: None,
            override_existing: false,
            dry_run: false,
        }
    }
}

/// Fluent builder for [`SiteContext`].
pub struct SiteContextBuilder {
    ctx: SiteContext,
}

impl SiteContextBuilder {
    /// Begin building with empty directories.
    pub fn new() -> Self {
        Self {
            ctx: SiteContext::new(),
        }
    }

    /// Write `source/<name>.yml`.
    pub fn with_source_file(self, name: &str, content: &str) -> Self {
        write_file(&self.ctx.source(), &format!("{name}.yml"), content);
        self
    }

    /// Write `dest/<name>.yml`.
    pub fn with_dest_file(self, name: &str, content: &str) -> Self {
        write_file(&self.ctx.dest(), &format!("{name}.yml"), content);
        self
    }

    /// Write the destination's `core.extension.yml`.
    pub fn with_enabled(self, modules: &[&str], themes: &[&str]) -> Self {
        self.with_dest_file("core.extension", &core_extension(modules, themes))
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> SiteContext {
        self.ctx
    }
}
