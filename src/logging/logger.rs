//! Structured logger with dry-run awareness and summary collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::types::{CopyStatus, FileEntry, Log};
use super::utils::log_file_path;

/// `tracing` target of stage headers.
pub(super) const STAGE_TARGET: &str = "config_utils::stage";
/// `tracing` target of dry-run messages.
pub(super) const DRY_RUN_TARGET: &str = "config_utils::dry_run";

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
///
/// The `record_file` method is **not** included because its signature differs
/// from the `fn(&self, &str)` pattern shared by the display methods.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger with dry-run awareness and summary collection.
///
/// Every message becomes a [`tracing`] event; the subscriber installed by
/// [`init_subscriber`](super::subscriber::init_subscriber) renders them on
/// the console and appends them to
/// `$XDG_CACHE_HOME/config-utils/<command>.log`.
#[derive(Debug)]
pub struct Logger {
    files: Mutex<Vec<FileEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger.
    ///
    /// Stores the log file path for display in the run summary.  The log file
    /// itself is created by [`init_subscriber`](super::subscriber::init_subscriber).
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            files: Mutex::new(Vec::new()),
            log_file: log_file_path(command),
        }
    }

    /// Return the log file path, if available.
    #[cfg(test)]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Return a clone of all recorded file entries.
    #[must_use]
    pub fn file_entries(&self) -> Vec<FileEntry> {
        self.files.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    /// Record a per-file result for the summary.
    pub fn record_file(&self, name: &str, status: CopyStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.files.lock() {
            guard.push(FileEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Print the summary of all recorded files.
    pub fn print_summary(&self) {
        let files = self.file_entries();
        if files.is_empty() {
            return;
        }

        self.stage("Summary");

        let mut created = 0u32;
        let mut overridden = 0u32;
        let mut unchanged = 0u32;
        let mut different = 0u32;
        let mut dry_run = 0u32;
        let mut failed = 0u32;

        for file in &files {
            let (icon, color) = match file.status {
                CopyStatus::Created => {
                    created += 1;
                    ("+", "\x1b[32m")
                }
                CopyStatus::Overridden => {
                    overridden += 1;
                    ("~", "\x1b[33m")
                }
                CopyStatus::Unchanged => {
                    unchanged += 1;
                    ("=", "\x1b[2m")
                }
                CopyStatus::Different => {
                    different += 1;
                    ("≠", "\x1b[33m")
                }
                CopyStatus::DryRun => {
                    dry_run += 1;
                    ("?", "\x1b[37m")
                }
                CopyStatus::Failed => {
                    failed += 1;
                    ("✗", "\x1b[31m")
                }
            };

            let suffix = file
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));

            self.debug(&format!("{color}{icon} {}.yml{suffix}\x1b[0m", file.name));
        }

        self.info(&format!(
            "\x1b[32m{created} created\x1b[0m, \x1b[33m{overridden} overridden\x1b[0m, \x1b[2m{unchanged} unchanged\x1b[0m, \x1b[33m{different} still different\x1b[0m, \x1b[37m{dry_run} dry-run\x1b[0m, \x1b[31m{failed} failed\x1b[0m"
        ));

        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error, dry_run);

    fn record_file(&self, name: &str, status: CopyStatus, message: Option<&str>) {
        self.record_file(name, status, message);
    }
}
