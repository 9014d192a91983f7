//! Error types for EzDB.

use std::fmt;
use std::path::PathBuf;

/// The main error type for EzDB operations.
///
/// Handle-usage, persistence and corruption failures carry a stable code
/// (`E17001`..`E17005`) that hosts can match on without parsing messages.
#[derive(Debug)]
pub enum Error {
    /// Empty path, wrong extension or otherwise unusable path (E17001)
    InvalidPath(String),

    /// The database path points at a directory (E17002)
    IsDirectory(PathBuf),

    /// Encoding or writing the database file failed (E17003)
    WriteFailed(String),

    /// The database file could not be decoded (E17004)
    Corrupted(String),

    /// The database handle has already been closed (E17005)
    Closed,

    /// I/O error
    Io(std::io::Error),

    /// Serialization/deserialization error
    Serialization(String),

    /// Invalid operation
    InvalidOperation(String),
}

impl Error {
    /// Returns the stable error code, if this error has one.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Error::InvalidPath(_) => Some("E17001"),
            Error::IsDirectory(_) => Some("E17002"),
            Error::WriteFailed(_) => Some("E17003"),
            Error::Corrupted(_) => Some("E17004"),
            Error::Closed => Some("E17005"),
            Error::Io(_) | Error::Serialization(_) | Error::InvalidOperation(_) => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(code) = self.code() {
            write!(f, "{}: ", code)?;
        }
        match self {
            Error::InvalidPath(msg) => write!(f, "invalid database path: {}", msg),
            Error::IsDirectory(path) => {
                write!(f, "database path is a directory: {}", path.display())
            }
            Error::WriteFailed(msg) => write!(f, "failed to write database file: {}", msg),
            Error::Corrupted(msg) => write!(f, "database file is corrupted: {}", msg),
            Error::Closed => write!(f, "database is closed"),
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            Error::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

/// A specialized `Result` type for EzDB operations.
pub type Result<T> = std::result::Result<T, Error>;
