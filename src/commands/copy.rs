//! Copy command implementation.
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use super::prompt::{self, Confirm};
use super::{CommandError, ExitStatus};
use crate::cli::{CopyOpts, GlobalOpts};
use crate::config::file::EXTENSION;
use crate::config::filter;
use crate::config::{ConfigDirectory, ConfigFile, LoadOptions};
use crate::logging::{CopyStatus, Log, Logger};
use crate::options::{self, CopyOptionsFile};

/// Copy options after merging the command line with the options file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopySettings {
    /// Directory to copy from.
    pub source_dir: PathBuf,
    /// Directory to copy to.
    pub dest_dir: PathBuf,
    /// Comma-separated machine names, if filtering by machine name.
    pub machine_name_filter: Option<String>,
    /// Comma-separated file names, if filtering by file name.
    pub file_name_filter: Option<String>,
    /// Overwrite destination files that differ.
    pub override_existing: bool,
    /// Report what would be written without writing.
    pub dry_run: bool,
}

impl CopySettings {
    /// Merge `opts` with its options file; command-line values win.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] with [`ExitStatus::InvalidArguments`] if
    /// the options file cannot be loaded or a directory is missing from both.
    pub fn resolve(opts: &CopyOpts) -> Result<Self, CommandError> {
        let file = match &opts.options {
            Some(path) => options::load(path)
                .map_err(|e| CommandError::new(ExitStatus::InvalidArguments, e.to_string()))?,
            None => CopyOptionsFile::default(),
        };

        let source_dir = opts.source_dir.clone().or(file.source_dir).ok_or_else(|| {
            CommandError::new(
                ExitStatus::InvalidArguments,
                "no source directory given (--source-dir or source-dir in the options file)",
            )
        })?;
        let dest_dir = opts.dest_dir.clone().or(file.dest_dir).ok_or_else(|| {
            CommandError::new(
                ExitStatus::InvalidArguments,
                "no destination directory given (--dest-dir or dest-dir in the options file)",
            )
        })?;

        Ok(Self {
            source_dir,
            dest_dir,
            machine_name_filter: non_blank(
                opts.machine_name_filter.clone().or(file.machine_name_filter),
            ),
            file_name_filter: non_blank(opts.file_name_filter.clone().or(file.file_name_filter)),
            override_existing: opts.override_existing || file.override_existing.unwrap_or(false),
            dry_run: opts.dry_run,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Run the copy command.
///
/// # Errors
///
/// Returns an error if the options are invalid, the user cancels, a
/// dependency is missing or unmet, or a file cannot be written.
pub fn run(global: &GlobalOpts, opts: &CopyOpts, log: &Logger) -> Result<()> {
    let settings = CopySettings::resolve(opts)?;
    let confirm = prompt::for_flag(opts.yes);
    let result = execute(global, &settings, confirm.as_ref(), log);
    log.print_summary();
    result
}

/// Copy the selected files and their dependencies.
///
/// Every file handled is recorded with [`Log::record_file`].
///
/// # Errors
///
/// Fails with a [`CommandError`] carrying the matching [`ExitStatus`], or
/// with the underlying error (exit status `Unknown`) when a directory cannot
/// be loaded or a dependency is missing.
pub fn execute(
    global: &GlobalOpts,
    settings: &CopySettings,
    confirm: &dyn Confirm,
    log: &dyn Log,
) -> Result<()> {
    let source_dir = existing_dir(
        &settings.source_dir,
        ExitStatus::InvalidSourceDirectory,
        "source",
    )?;
    let dest_dir = existing_dir(
        &settings.dest_dir,
        ExitStatus::InvalidDestinationDirectory,
        "destination",
    )?;
    if source_dir == dest_dir {
        return Err(CommandError::new(
            ExitStatus::InvalidDestinationDirectory,
            "destination directory cannot be the same as the source directory",
        )
        .into());
    }

    let load = LoadOptions {
        parallel: global.parallel,
        ..LoadOptions::default()
    };

    log.stage("Loading configuration");
    let source = ConfigDirectory::load(&source_dir, &load, log)
        .context("failed to load the source directory")?;
    log.info(&format!(
        "{} configuration files in {}",
        source.len(),
        source_dir.display()
    ));
    let dest = ConfigDirectory::load(&dest_dir, &load, log)
        .context("failed to load the destination directory")?;
    log.info(&format!(
        "{} configuration files in {}",
        dest.len(),
        dest_dir.display()
    ));

    log.stage("Selecting files");
    let mut files = select(&source, settings);
    if files.is_empty() {
        log.info("no files are satisfying the filtering criteria");
        return Ok(());
    }
    log.info(&format!("{} files selected:", files.len()));
    list_files(&files, log);
    prompt::require(confirm, "Is this OK?")?;

    let dependencies = source
        .resolve_dependencies(files.iter().copied())
        .context("failed to resolve configuration dependencies")?;
    if !dependencies.is_empty() {
        log.info(&format!(
            "{} additional dependencies will also be copied:",
            dependencies.len()
        ));
        list_files(&dependencies, log);
        prompt::require(confirm, "Is this OK?")?;
    }
    files.extend(dependencies);

    log.stage("Checking module and theme requirements");
    let report = dest.check_requirements(&files, log);
    if !report.is_satisfied() {
        return Err(CommandError::new(
            ExitStatus::UnmetDependencies,
            format!(
                "{} modules and {} themes required by the copied files are not enabled",
                report.missing_modules.len(),
                report.missing_themes.len()
            ),
        )
        .into());
    }

    log.stage("Copying files");
    for file in files {
        copy_file(file, &dest, settings, log)?;
    }
    Ok(())
}

/// Canonical form of `path`, which must be an existing directory.
fn existing_dir(path: &Path, status: ExitStatus, role: &str) -> Result<PathBuf, CommandError> {
    if !path.is_dir() {
        return Err(CommandError::new(
            status,
            format!("{role} directory '{}' doesn't exist", path.display()),
        ));
    }
    dunce::canonicalize(path).map_err(|e| {
        CommandError::new(
            status,
            format!("cannot resolve {role} directory '{}': {e}", path.display()),
        )
    })
}

/// Files of `source` passing the file-name filter, then the machine-name
/// filter.  Without filters every file is selected.
fn select<'a>(source: &'a ConfigDirectory, settings: &CopySettings) -> Vec<&'a ConfigFile> {
    let mut files: Vec<&ConfigFile> = source.files().iter().collect();
    if let Some(spec) = &settings.file_name_filter {
        files = filter::by_file_names(files, spec);
    }
    if let Some(spec) = &settings.machine_name_filter {
        files = filter::by_machine_names(files, spec);
    }
    files
}

fn list_files(files: &[&ConfigFile], log: &dyn Log) {
    for file in files {
        log.info(&format!("  - {}.{EXTENSION}", file.name()));
    }
}

/// Copy one file into `dest` and record what happened.
fn copy_file(
    file: &ConfigFile,
    dest: &ConfigDirectory,
    settings: &CopySettings,
    log: &dyn Log,
) -> Result<CopyStatus> {
    let clone = file
        .try_clone()
        .with_context(|| format!("failed to clone {}", file.name()))?;
    let name = clone.name();
    let target = dest.path().join(format!("{name}.{EXTENSION}"));

    let status = if target.exists() {
        match dest.file(name) {
            Some(existing) if clone.equivalent(existing) => CopyStatus::Unchanged,
            _ if settings.override_existing => CopyStatus::Overridden,
            _ => CopyStatus::Different,
        }
    } else {
        CopyStatus::Created
    };

    match status {
        CopyStatus::Unchanged => {
            log.debug(&format!("{name}.{EXTENSION} is already equivalent, skipping"));
        }
        CopyStatus::Different => {
            log.warn(&format!(
                "{name}.{EXTENSION} already exists and differs, skipping (use --override to replace it)"
            ));
        }
        _ if settings.dry_run => {
            let action = if status == CopyStatus::Created {
                "create"
            } else {
                "override"
            };
            log.dry_run(&format!("would {action} {}", target.display()));
            log.record_file(name, CopyStatus::DryRun, Some(action));
            return Ok(CopyStatus::DryRun);
        }
        _ => {
            if let Err(e) = clone.save(&target) {
                log.record_file(name, CopyStatus::Failed, Some(&e.to_string()));
                return Err(CommandError::new(ExitStatus::IoError, e.to_string()).into());
            }
            log.info(&format!("{name}.{EXTENSION} {}", describe(status)));
        }
    }

    log.record_file(name, status, None);
    Ok(status)
}

const fn describe(status: CopyStatus) -> &'static str {
    match status {
        CopyStatus::Created => "created",
        CopyStatus::Overridden => "overridden",
        CopyStatus::Unchanged => "unchanged",
        CopyStatus::Different => "still different",
        CopyStatus::DryRun => "dry run",
        CopyStatus::Failed => "failed",
    }
}
