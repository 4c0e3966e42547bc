//! Error types for parent-ensuring operations

use fs_capability::FsError;
use thiserror::Error;

/// Errors that can occur while writing or renaming with parents
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParentsError {
    /// An ancestor exists but is not a directory
    #[error("\"{path}\" already exists and is not a directory")]
    Conflict {
        /// The offending ancestor
        path: String,
    },

    /// Creating an ancestor directory failed
    #[error("Failed to create directory \"{path}\": {source}")]
    Creation {
        /// The ancestor that could not be created
        path: String,
        /// Why the filesystem refused
        #[source]
        source: FsError,
    },

    /// The write or rename primitive itself failed
    #[error(transparent)]
    Propagated(#[from] FsError),
}

impl ParentsError {
    /// Returns the path this error names, if any
    pub fn path(&self) -> Option<&str> {
        match self {
            ParentsError::Conflict { path } | ParentsError::Creation { path, .. } => Some(path),
            ParentsError::Propagated(source) => source.path(),
        }
    }

    /// Returns true if an ancestor was found to be a non-directory
    pub fn is_conflict(&self) -> bool {
        matches!(self, ParentsError::Conflict { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_conflict_message() {
        let err = ParentsError::Conflict {
            path: "/etc".to_string(),
        };
        assert_eq!(err.to_string(), "\"/etc\" already exists and is not a directory");
        assert_eq!(err.path(), Some("/etc"));
        assert!(err.is_conflict());
    }

    #[test]
    fn test_creation_keeps_cause() {
        let err = ParentsError::Creation {
            path: "a/b".to_string(),
            source: FsError::NoSpace("/a/b".to_string()),
        };
        assert_eq!(err.path(), Some("a/b"));
        assert!(!err.is_conflict());

        let cause = err.source().unwrap();
        assert_eq!(cause.to_string(), "No space left for: /a/b");
    }

    #[test]
    fn test_propagated_is_transparent() {
        let err = ParentsError::from(FsError::NotFound("/old.txt".to_string()));
        assert_eq!(err.to_string(), "Not found: /old.txt");
        assert_eq!(err.path(), Some("/old.txt"));
    }
}
