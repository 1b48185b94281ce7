//! Core logging types: file entries, copy status, and the [`Log`] trait.

/// Per-file result recorded for the run summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Configuration file name (without the `.yml` extension).
    pub name: String,
    /// What happened to the file.
    pub status: CopyStatus,
    /// Optional detail message (e.g., a write error).
    pub message: Option<String>,
}

/// Outcome of copying one configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyStatus {
    /// The file did not exist at the destination and was written.
    Created,
    /// The destination file differed and was overwritten.
    Overridden,
    /// The destination file already held equivalent content.
    Unchanged,
    /// The destination file differs but overriding was disabled.
    Different,
    /// Dry-run mode; nothing was written.
    DryRun,
    /// Writing the file failed.
    Failed,
}

/// Leveled diagnostics sink.
///
/// [`Logger`](super::logger::Logger) forwards to `tracing` for console and
/// log-file output; [`BufferedLog`](super::buffered::BufferedLog) keeps the
/// messages in memory so that parallel loads and tests can inspect or
/// replay them later.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Record a per-file result for the summary.
    fn record_file(&self, name: &str, status: CopyStatus, message: Option<&str>);
}
