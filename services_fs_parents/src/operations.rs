//! Write and rename with parents
//!
//! Both operations ensure the ancestor chain of the path they create, then
//! hand off to the filesystem primitive with their arguments untouched.

use crate::ensure::ensure_parent;
use crate::error::ParentsError;
use fs_capability::{FileData, FilesystemCapability, WriteOptions};
use tracing::debug;

/// Writes a file, creating any missing parent directories first
///
/// The write primitive receives `path`, `data` and `options` exactly as
/// given. It is never called if ensuring the parents fails; its own failure
/// is returned as [`ParentsError::Propagated`].
pub fn write_file_with_parents<F, D>(
    fs: &mut F,
    path: &str,
    data: D,
    options: WriteOptions,
) -> Result<(), ParentsError>
where
    F: FilesystemCapability + ?Sized,
    D: Into<FileData>,
{
    ensure_parent(fs, path)?;

    let data = data.into();
    debug!(path = %path, bytes = data.len(), "writing file");
    fs.write_file(path, data, options)?;
    Ok(())
}

/// Renames an entry, creating any missing parent directories of the destination
///
/// Only `new_path` is ensured; `old_path` is expected to exist already.
/// Failures of the rename primitive, including a missing source, are
/// returned as [`ParentsError::Propagated`].
pub fn rename_with_parents<F>(fs: &mut F, old_path: &str, new_path: &str) -> Result<(), ParentsError>
where
    F: FilesystemCapability + ?Sized,
{
    ensure_parent(fs, new_path)?;

    debug!(from = %old_path, to = %new_path, "renaming");
    fs.rename(old_path, new_path)?;
    Ok(())
}
