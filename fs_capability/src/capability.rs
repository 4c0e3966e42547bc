//! Filesystem capability surface
//!
//! This module defines the operations a virtual filesystem exposes to callers,
//! along with the payload and option types that flow through them.

use crate::error::FsError;
use serde::{Deserialize, Serialize};

/// Classification of a single path at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExistenceOutcome {
    /// Nothing is present at the path
    Absent,
    /// A directory is present at the path
    ExistsAsDirectory,
    /// A file (or any other non-directory entry) is present at the path
    ExistsAsNonDirectory,
}

/// File contents handed to a write
///
/// Text is stored as its UTF-8 encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileData {
    /// UTF-8 text
    Text(String),
    /// Raw bytes
    Bytes(Vec<u8>),
}

impl FileData {
    /// Consumes the payload and returns its bytes
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            FileData::Text(text) => text.into_bytes(),
            FileData::Bytes(bytes) => bytes,
        }
    }

    /// Returns the payload length in bytes
    pub fn len(&self) -> usize {
        match self {
            FileData::Text(text) => text.len(),
            FileData::Bytes(bytes) => bytes.len(),
        }
    }

    /// Returns true if the payload is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&str> for FileData {
    fn from(text: &str) -> Self {
        FileData::Text(text.to_string())
    }
}

impl From<String> for FileData {
    fn from(text: String) -> Self {
        FileData::Text(text)
    }
}

impl From<Vec<u8>> for FileData {
    fn from(bytes: Vec<u8>) -> Self {
        FileData::Bytes(bytes)
    }
}

impl From<&[u8]> for FileData {
    fn from(bytes: &[u8]) -> Self {
        FileData::Bytes(bytes.to_vec())
    }
}

/// How a write treats existing contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteFlags {
    /// Replace existing contents
    #[default]
    Truncate,
    /// Append to existing contents
    Append,
}

/// Options bag for a write
///
/// Interpreted only by the filesystem that performs the write; layers above
/// it forward the value unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    /// Truncate or append
    pub flags: WriteFlags,
    /// Permission bits applied when the file is created
    pub mode: u32,
}

impl WriteOptions {
    /// Default permission bits for new files
    pub const DEFAULT_MODE: u32 = 0o666;

    /// Options that append instead of truncating
    pub fn append() -> Self {
        Self {
            flags: WriteFlags::Append,
            ..Self::default()
        }
    }

    /// Sets the permission bits
    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = mode;
        self
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            flags: WriteFlags::Truncate,
            mode: Self::DEFAULT_MODE,
        }
    }
}

/// Filesystem capability trait
///
/// The operations a virtual filesystem exposes. Implementations own their
/// state; callers only observe and mutate it through these methods.
pub trait FilesystemCapability {
    /// Returns true if any entry (file or directory) is present at the path
    fn exists(&self, path: &str) -> bool;

    /// Returns true only if a directory is present at the path
    fn is_directory(&self, path: &str) -> bool;

    /// Creates exactly one directory level
    ///
    /// Fails if the path is occupied or its parent is missing.
    fn mkdir(&mut self, path: &str) -> Result<(), FsError>;

    /// Writes or overwrites a file
    fn write_file(
        &mut self,
        path: &str,
        data: FileData,
        options: WriteOptions,
    ) -> Result<(), FsError>;

    /// Moves an entry
    ///
    /// Fails if nothing exists at `old_path`.
    fn rename(&mut self, old_path: &str, new_path: &str) -> Result<(), FsError>;

    /// Classifies the path
    ///
    /// Queries the filesystem on every call; nothing is cached.
    fn existence(&self, path: &str) -> ExistenceOutcome {
        if !self.exists(path) {
            ExistenceOutcome::Absent
        } else if self.is_directory(path) {
            ExistenceOutcome::ExistsAsDirectory
        } else {
            ExistenceOutcome::ExistsAsNonDirectory
        }
    }
}
