//! Subtheme command implementation.
//!
//! Copies the theme-specific files under `<theme>/config` into
//! `<subtheme>/config`, renaming every occurrence of the theme's directory
//! name to the subtheme's.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use super::prompt::{self, Confirm};
use super::{CommandError, ExitStatus};
use crate::cli::{GlobalOpts, SubthemeOpts};
use crate::config::file::EXTENSION;
use crate::config::{
    ConfigDirectory, ConfigFile, ConfigTree, DEFAULT_NODE_FILTER, LoadOptions, NodeId,
};
use crate::logging::{CopyStatus, Log, Logger};

/// Sub-directory of a theme holding its configuration.
pub const CONFIG_DIR: &str = "config";

/// Drops `_core` (still checking its shape) and `uuid`.
fn theme_node_filter(tree: &ConfigTree, id: NodeId, log: &dyn Log) -> bool {
    DEFAULT_NODE_FILTER(tree, id, log) && tree.node(id).name() != "uuid"
}

/// A rewritten file and where it goes.
#[derive(Debug)]
struct Planned {
    file: ConfigFile,
    dir: PathBuf,
}

impl Planned {
    fn target(&self) -> PathBuf {
        self.dir.join(format!("{}.{EXTENSION}", self.file.name()))
    }
}

/// Run the subtheme command.
///
/// # Errors
///
/// Returns an error if the directories are invalid, the user cancels, a
/// target file already exists, or a file cannot be written.
pub fn run(global: &GlobalOpts, opts: &SubthemeOpts, log: &Logger) -> Result<()> {
    let confirm = prompt::for_flag(opts.yes);
    let result = execute(global, &opts.theme, &opts.subtheme, confirm.as_ref(), log);
    log.print_summary();
    result
}

/// Derive `subtheme`'s configuration from `theme`'s.
///
/// # Errors
///
/// Fails with a [`CommandError`] carrying the matching [`ExitStatus`].
pub fn execute(
    global: &GlobalOpts,
    theme: &Path,
    subtheme: &Path,
    confirm: &dyn Confirm,
    log: &dyn Log,
) -> Result<()> {
    let theme = theme_dir(theme)?;
    let subtheme = subtheme_dir(subtheme)?;
    if theme == subtheme {
        return Err(CommandError::new(
            ExitStatus::InvalidDestinationDirectory,
            "subtheme directory cannot be the same as the theme directory",
        )
        .into());
    }
    let theme_name = base_name(&theme)?;
    let subtheme_name = base_name(&subtheme)?;

    let theme_config = theme.join(CONFIG_DIR);
    if !theme_config.is_dir() {
        log.warn(&format!(
            "{} has no '{CONFIG_DIR}' directory, nothing to copy",
            theme.display()
        ));
        return Ok(());
    }

    log.stage("Loading theme configuration");
    let options = LoadOptions {
        recursive: true,
        parallel: global.parallel,
        filter: theme_node_filter,
    };
    let source = ConfigDirectory::load(&theme_config, &options, log)
        .context("failed to load the theme configuration")?;
    if source.is_empty() {
        log.warn(&format!(
            "{} has no configuration files, nothing to copy",
            theme_config.display()
        ));
        return Ok(());
    }

    log.stage(&format!("Renaming '{theme_name}' to '{subtheme_name}'"));
    let subtheme_config = subtheme.join(CONFIG_DIR);
    let mut planned = Vec::new();
    for file in source.files() {
        let mut renamed = file
            .try_clone()
            .with_context(|| format!("failed to clone {}", file.name()))?;
        if !renamed
            .replace(theme_name, subtheme_name, log)
            .with_context(|| format!("failed to rename {}", file.name()))?
        {
            log.warn(&format!(
                "{} isn't theme-specific, skipping",
                file.path().display()
            ));
            continue;
        }
        let within = file
            .path()
            .parent()
            .and_then(|dir| dir.strip_prefix(&theme_config).ok())
            .unwrap_or_else(|| Path::new(""));
        planned.push(Planned {
            dir: subtheme_config.join(within),
            file: renamed,
        });
    }

    if planned.is_empty() {
        log.info("no theme-specific configuration files found");
        return Ok(());
    }
    if let Some(existing) = planned.iter().map(Planned::target).find(|t| t.exists()) {
        return Err(CommandError::new(
            ExitStatus::InvalidDestinationDirectory,
            format!("destination file '{}' already exists", existing.display()),
        )
        .into());
    }

    log.info(&format!(
        "{} files will be written to {}:",
        planned.len(),
        subtheme_config.display()
    ));
    for plan in &planned {
        log.info(&format!("  - {}.{EXTENSION}", plan.file.name()));
    }
    prompt::require(confirm, "Is this OK?")?;

    log.stage("Writing subtheme configuration");
    for plan in &planned {
        write_planned(plan, log)?;
    }
    Ok(())
}

fn write_planned(plan: &Planned, log: &dyn Log) -> Result<(), CommandError> {
    let name = plan.file.name();
    fs::create_dir_all(&plan.dir).map_err(|e| {
        log.record_file(name, CopyStatus::Failed, Some(&e.to_string()));
        CommandError::new(
            ExitStatus::IoError,
            format!("cannot create directory '{}': {e}", plan.dir.display()),
        )
    })?;
    let target = plan.target();
    if let Err(e) = plan.file.save(&target) {
        log.record_file(name, CopyStatus::Failed, Some(&e.to_string()));
        return Err(CommandError::new(ExitStatus::IoError, e.to_string()));
    }
    log.info(&format!("{} created", target.display()));
    log.record_file(name, CopyStatus::Created, None);
    Ok(())
}

/// Canonical theme directory, which must exist.
fn theme_dir(path: &Path) -> Result<PathBuf, CommandError> {
    if !path.is_dir() {
        return Err(CommandError::new(
            ExitStatus::InvalidSourceDirectory,
            format!("theme directory '{}' doesn't exist", path.display()),
        ));
    }
    dunce::canonicalize(path).map_err(|e| {
        CommandError::new(
            ExitStatus::InvalidSourceDirectory,
            format!("cannot resolve theme directory '{}': {e}", path.display()),
        )
    })
}

/// Absolute subtheme directory, which need not exist yet.
fn subtheme_dir(path: &Path) -> Result<PathBuf, CommandError> {
    let invalid =
        |message: String| CommandError::new(ExitStatus::InvalidDestinationDirectory, message);
    if path.exists() {
        if !path.is_dir() {
            return Err(invalid(format!("'{}' is not a directory", path.display())));
        }
        return dunce::canonicalize(path).map_err(|e| {
            invalid(format!(
                "cannot resolve subtheme directory '{}': {e}",
                path.display()
            ))
        });
    }
    std::path::absolute(path).map_err(|e| {
        invalid(format!(
            "cannot resolve subtheme directory '{}': {e}",
            path.display()
        ))
    })
}

fn base_name(dir: &Path) -> Result<&str, CommandError> {
    dir.file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            CommandError::new(
                ExitStatus::InvalidArguments,
                format!("'{}' has no usable directory name", dir.display()),
            )
        })
}
