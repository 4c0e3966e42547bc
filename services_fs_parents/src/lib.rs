//! # Parent-Ensuring Filesystem Service
//!
//! This service writes and renames files in a virtual filesystem whose
//! `mkdir` creates only one level at a time, creating any missing ancestor
//! directories first.
//!
//! ## Philosophy
//!
//! - The filesystem is a capability passed to every call, never a global
//! - Existence is queried fresh for every ancestor; nothing is cached
//! - Failures propagate immediately; there are no retries and no rollback
//!
//! ## Operations
//!
//! - `ensure_parent(fs, path)`: Create every missing ancestor of `path`
//! - `write_file_with_parents(fs, path, data, options)`: Ensure, then write
//! - `rename_with_parents(fs, old, new)`: Ensure the destination, then rename
//! - `FileManifest::apply(fs)`: Write an initial set of files

pub mod ensure;
pub mod error;
pub mod manifest;
pub mod operations;

pub use ensure::ensure_parent;
pub use error::ParentsError;
pub use manifest::{FileManifest, ManifestError, ManifestFile};
pub use operations::{rename_with_parents, write_file_with_parents};
