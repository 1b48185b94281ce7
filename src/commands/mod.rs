//! Subcommand orchestration and exit statuses.

pub mod copy;
pub mod prompt;
pub mod subtheme;
pub mod version;

use std::process::ExitCode;

/// Process exit status of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// The command completed.
    Success,
    /// Any failure without a more specific status.
    Unknown,
    /// A confirmation was answered with "no".
    UserCancelled,
    /// Required modules or themes are not enabled at the destination.
    UnmetDependencies,
    /// Options are missing or malformed.
    InvalidArguments,
    /// The source or theme directory is missing or unusable.
    InvalidSourceDirectory,
    /// The destination or subtheme directory is unusable, or a file there
    /// would be clobbered.
    InvalidDestinationDirectory,
    /// Writing a file or directory failed.
    IoError,
}

impl ExitStatus {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Unknown => 1,
            Self::UserCancelled => 2,
            Self::UnmetDependencies => 3,
            Self::InvalidArguments => 100,
            Self::InvalidSourceDirectory => 101,
            Self::InvalidDestinationDirectory => 102,
            Self::IoError => 200,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        Self::from(status.code())
    }
}

/// A command failure with a specific exit status.
#[derive(thiserror::Error, Debug)]
#[error("{message}")]
pub struct CommandError {
    /// Exit status to report.
    pub status: ExitStatus,
    /// Human-readable reason.
    pub message: String,
}

impl CommandError {
    /// Create a failure with `status`.
    #[must_use]
    pub fn new(status: ExitStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

/// Exit status for a command failure.
///
/// The first [`CommandError`] in the error chain decides; anything else is
/// [`ExitStatus::Unknown`].
#[must_use]
pub fn exit_status(err: &anyhow::Error) -> ExitStatus {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<CommandError>())
        .map_or(ExitStatus::Unknown, |e| e.status)
}
