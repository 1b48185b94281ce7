//! Buffered logger for parallel file loading and for tests.
use std::sync::Mutex;

use super::types::{CopyStatus, Log};

/// Severity/kind of a buffered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// A stage header entry.
    Stage,
    /// An informational entry.
    Info,
    /// A debug entry.
    Debug,
    /// A warning entry.
    Warn,
    /// An error entry.
    Error,
    /// A dry-run entry.
    DryRun,
}

/// A single buffered log entry, replayed when flushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    /// A leveled message.
    Message(Level, String),
    /// A per-file summary record.
    File {
        /// File name.
        name: String,
        /// Recorded status.
        status: CopyStatus,
        /// Optional detail.
        message: Option<String>,
    },
}

impl LogEntry {
    /// Replay this entry into another sink.
    fn replay(&self, log: &dyn Log) {
        match self {
            Self::Message(Level::Stage, msg) => log.stage(msg),
            Self::Message(Level::Info, msg) => log.info(msg),
            Self::Message(Level::Debug, msg) => log.debug(msg),
            Self::Message(Level::Warn, msg) => log.warn(msg),
            Self::Message(Level::Error, msg) => log.error(msg),
            Self::Message(Level::DryRun, msg) => log.dry_run(msg),
            Self::File {
                name,
                status,
                message,
            } => log.record_file(name, *status, message.as_deref()),
        }
    }
}

/// Implement the display methods of [`Log`] by buffering each message into
/// `self.entries` with the corresponding [`Level`].
macro_rules! buffer_log_methods {
    ($($method:ident => $level:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.push(LogEntry::Message(Level::$level, msg.to_string()));
            }
        )+
    };
}

/// In-memory log sink.
///
/// Each file parsed on a worker thread gets its own `BufferedLog`; once the
/// parallel phase is over the buffers are replayed in file order so that
/// console output does not interleave.  Tests use it to inspect the
/// warnings an operation produced.
#[derive(Debug, Default)]
pub struct BufferedLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl BufferedLog {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, entry: LogEntry) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.push(entry);
        }
    }

    /// Return a clone of all buffered entries.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Return the text of all buffered messages at `level`.
    #[must_use]
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|entry| match entry {
                LogEntry::Message(l, msg) if l == level => Some(msg),
                _ => None,
            })
            .collect()
    }

    /// Replay all buffered entries, in order, into `log`.
    pub fn replay_into(&self, log: &dyn Log) {
        let entries = match self.entries.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => return,
        };
        for entry in &entries {
            entry.replay(log);
        }
    }
}

impl Log for BufferedLog {
    buffer_log_methods! {
        stage   => Stage,
        info    => Info,
        debug   => Debug,
        warn    => Warn,
        error   => Error,
        dry_run => DryRun,
    }

    fn record_file(&self, name: &str, status: CopyStatus, message: Option<&str>) {
        self.push(LogEntry::File {
            name: name.to_string(),
            status,
            message: message.map(String::from),
        });
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::isolated_logger;
    use std::fs;

    #[test]
    fn buffered_log_collects_messages_by_level() {
        let buf = BufferedLog::new();
        buf.warn("first");
        buf.info("ignored");
        buf.warn("second");
        assert_eq!(buf.messages(Level::Warn), vec!["first", "second"]);
        assert_eq!(buf.messages(Level::Info), vec!["ignored"]);
        assert!(buf.messages(Level::Error).is_empty());
    }

    #[test]
    fn buffered_log_records_files() {
        let buf = BufferedLog::new();
        buf.record_file("system.site", CopyStatus::Created, Some("new"));
        assert_eq!(
            buf.entries(),
            vec![LogEntry::File {
                name: "system.site".to_string(),
                status: CopyStatus::Created,
                message: Some("new".to_string()),
            }]
        );
    }

    #[test]
    fn replay_into_another_buffer_preserves_order() {
        let source = BufferedLog::new();
        source.stage("stage-1");
        source.info("info-1");
        source.record_file("a", CopyStatus::Unchanged, None);
        source.warn("warn-1");
        let target = BufferedLog::new();
        source.replay_into(&target);
        assert_eq!(target.entries(), source.entries());
    }

    #[test]
    fn buffered_output_reaches_file_only_after_replay() {
        let (log, _tmp, _guard) = isolated_logger();
        let buf = BufferedLog::new();
        let marker = format!("buf-marker-{}", std::process::id());
        buf.info(&marker);
        let path = log.log_path().expect("log path");
        let before = fs::read_to_string(path).unwrap();
        assert!(
            !before.contains(&marker),
            "buffered output should not be written before replay"
        );
        buf.replay_into(&log);
        let after = fs::read_to_string(path).unwrap();
        assert!(after.contains(&marker), "buffered output should appear after replay");
    }

    #[test]
    fn replay_forwards_file_records_to_logger() {
        let (log, _tmp, _guard) = isolated_logger();
        let buf = BufferedLog::new();
        buf.record_file("a", CopyStatus::Failed, Some("boom"));
        buf.replay_into(&log);
        let files = log.file_entries();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].status, CopyStatus::Failed);
        assert_eq!(files[0].message.as_deref(), Some("boom"));
    }
}
