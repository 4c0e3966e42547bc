//! Filesystem error types

use thiserror::Error;

/// Errors reported by a filesystem capability
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FsError {
    /// No entry at the path
    #[error("Not found: {0}")]
    NotFound(String),

    /// An entry already occupies the path
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// A directory was required but something else was found
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    /// A file was required but a directory was found
    #[error("Is a directory: {0}")]
    IsADirectory(String),

    /// The filesystem cannot hold another entry
    #[error("No space left for: {0}")]
    NoSpace(String),

    /// The operation is not permitted on these paths
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Any other backend failure
    #[error("I/O error: {0}")]
    Io(String),
}

impl FsError {
    /// Returns the path this error refers to, if it names one
    pub fn path(&self) -> Option<&str> {
        match self {
            FsError::NotFound(path)
            | FsError::AlreadyExists(path)
            | FsError::NotADirectory(path)
            | FsError::IsADirectory(path)
            | FsError::NoSpace(path) => Some(path),
            FsError::InvalidOperation(_) | FsError::Io(_) => None,
        }
    }
}
