//! Error taxonomy shared by the schedule engine and its codecs.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by schedule operations and the persistence boundary.
///
/// Classroom double-booking is deliberately absent: insertion conflicts are
/// reported through the `bool` returned by
/// [`Schedule::add_lecture`](crate::Schedule::add_lecture).
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The source file does not exist.
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The file extension is missing, unknown, or the format cannot be used
    /// in the requested direction.
    #[error("unsupported file format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// Malformed content or configuration.
    #[error("failed to parse {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    /// A caller supplied an argument the engine cannot act on.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An I/O failure while reading or writing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScheduleError {
    /// Builds a [`ScheduleError::Parse`] for the given source.
    pub fn parse(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}

/// Alias for `Result<T, ScheduleError>`.
pub type ScheduleResult<T> = Result<T, ScheduleError>;
