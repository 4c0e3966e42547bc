//! Ancestor directory creation
//!
//! Walks the ancestor chain of a target path from the shallowest directory to
//! the immediate parent, creating whatever is missing.

use crate::error::ParentsError;
use fs_capability::{ExistenceOutcome, FilesystemCapability};
use fs_path::PathNormalizer;
use tracing::{error, trace};

/// Ensures every ancestor directory of `target_path` exists
///
/// Ancestors are visited shallow to deep. An ancestor that exists as a
/// directory is left alone, a missing one is created, and one that exists as
/// anything else stops the walk with [`ParentsError::Conflict`]. A failed
/// `mkdir` stops the walk with [`ParentsError::Creation`]. Directories created
/// before a failure are not removed.
pub fn ensure_parent<F>(fs: &mut F, target_path: &str) -> Result<(), ParentsError>
where
    F: FilesystemCapability + ?Sized,
{
    let parent = PathNormalizer::parent_of(target_path);

    for prefix in PathNormalizer::segments(&parent) {
        match fs.existence(&prefix) {
            ExistenceOutcome::ExistsAsDirectory => continue,
            ExistenceOutcome::ExistsAsNonDirectory => {
                return Err(ParentsError::Conflict { path: prefix });
            }
            ExistenceOutcome::Absent => {
                if let Err(source) = fs.mkdir(&prefix) {
                    error!(path = %prefix, error = %source, "failed to create directory");
                    return Err(ParentsError::Creation {
                        path: prefix,
                        source,
                    });
                }
                trace!(path = %prefix, "created directory");
            }
        }
    }

    Ok(())
}
