//! Initial file manifest
//!
//! A manifest lists files to seed a virtual filesystem with before anything
//! runs against it. Manifests are versioned JSON; files are written in path
//! order so the result is deterministic.

use crate::error::ParentsError;
use crate::operations::write_file_with_parents;
use fs_capability::{FileData, FilesystemCapability, WriteOptions};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while loading or applying a manifest
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ManifestError {
    /// Failed to serialize the manifest
    #[error("Failed to serialize manifest: {0}")]
    Serialization(String),

    /// Failed to deserialize the manifest
    #[error("Failed to deserialize manifest: {0}")]
    Deserialization(String),

    /// Manifest format version is not understood
    #[error("Unsupported manifest version: {0}")]
    UnsupportedVersion(u32),

    /// Writing one of the listed files failed
    #[error("Failed to write \"{path}\": {source}")]
    Write {
        /// Path of the file that could not be written
        path: String,
        /// Underlying failure
        #[source]
        source: ParentsError,
    },
}

/// A single file in a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestFile {
    /// File contents
    pub data: FileData,
    /// Options forwarded to the write
    #[serde(default)]
    pub options: WriteOptions,
}

/// A versioned set of files keyed by path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileManifest {
    /// Version of the manifest format
    pub version: u32,
    /// Files to write (stable ordering via BTreeMap)
    pub files: BTreeMap<String, ManifestFile>,
}

impl FileManifest {
    /// Current version of the manifest format
    pub const CURRENT_VERSION: u32 = 1;

    /// Creates an empty manifest
    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            files: BTreeMap::new(),
        }
    }

    /// Adds a file, replacing any earlier entry for the same path
    pub fn with_file(
        mut self,
        path: impl Into<String>,
        data: impl Into<FileData>,
        options: WriteOptions,
    ) -> Self {
        self.files.insert(
            path.into(),
            ManifestFile {
                data: data.into(),
                options,
            },
        );
        self
    }

    /// Number of files listed
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if no files are listed
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Parses a manifest from JSON bytes
    pub fn from_json(bytes: &[u8]) -> Result<Self, ManifestError> {
        let manifest: FileManifest = serde_json::from_slice(bytes)
            .map_err(|e| ManifestError::Deserialization(e.to_string()))?;

        if manifest.version != Self::CURRENT_VERSION {
            return Err(ManifestError::UnsupportedVersion(manifest.version));
        }

        Ok(manifest)
    }

    /// Serializes the manifest to pretty-printed JSON bytes
    pub fn to_json(&self) -> Result<Vec<u8>, ManifestError> {
        serde_json::to_vec_pretty(self).map_err(|e| ManifestError::Serialization(e.to_string()))
    }

    /// Writes every listed file, creating parent directories as needed
    ///
    /// Stops at the first failure. Files written before it stay written.
    /// Returns the number of files written.
    pub fn apply<F>(&self, fs: &mut F) -> Result<usize, ManifestError>
    where
        F: FilesystemCapability + ?Sized,
    {
        let mut written = 0;
        for (path, file) in &self.files {
            write_file_with_parents(fs, path, file.data.clone(), file.options.clone()).map_err(
                |source| ManifestError::Write {
                    path: path.clone(),
                    source,
                },
            )?;
            written += 1;
            debug!(path = %path, "seeded file");
        }

        info!(files = written, "applied file manifest");
        Ok(written)
    }
}

impl Default for FileManifest {
    fn default() -> Self {
        Self::new()
    }
}
