use std::io;
use std::path::PathBuf;

/// Errors that can occur while launching a command and capturing its output
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Command is empty: an argument vector needs at least a program name")]
    EmptyCommand,

    #[error("Working directory must be an absolute path: {}", .0.display())]
    RelativeWorkingDir(PathBuf),

    #[error("Working directory does not exist: {}", .0.display())]
    WorkingDirNotFound(PathBuf),

    #[error("Working directory is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Working directory is not accessible: {}: {source}", .path.display())]
    WorkingDirInaccessible {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to launch `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to capture output of `{program}`: {source}")]
    Capture {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl Error {
    /// True for failures that happen before a child process exists.
    pub fn is_launch_error(&self) -> bool {
        matches!(
            self,
            Error::EmptyCommand
                | Error::RelativeWorkingDir(_)
                | Error::WorkingDirNotFound(_)
                | Error::NotADirectory(_)
                | Error::WorkingDirInaccessible { .. }
                | Error::Launch { .. }
        )
    }

    pub fn is_capture_error(&self) -> bool {
        matches!(self, Error::Capture { .. })
    }
}

/// Result type alias for testrun operations
pub type Result<T> = std::result::Result<T, Error>;
