//! # Failing Filesystem
//!
//! A FilesystemCapability wrapper that can simulate failures for testing.
//! Useful for exercising error paths of code layered over a filesystem
//! without needing a backend that actually runs out of resources.

use crate::capability::{FileData, FilesystemCapability, WriteOptions};
use crate::error::FsError;

/// Policy for when failures should occur
#[derive(Debug, Clone)]
pub enum FailurePolicy {
    /// Never fail (passthrough)
    Never,
    /// Fail every mkdir after N successful ones
    AfterMkdirs(usize),
    /// Fail mkdir on specific paths, compared verbatim
    OnMkdirPaths(Vec<String>),
    /// Fail every write
    OnWrites,
    /// Fail every rename
    OnRenames,
}

/// Wrapper around a FilesystemCapability that can simulate failures
///
/// Every call that reaches the wrapper is recorded, whether or not it fails.
pub struct FailingFilesystem<F: FilesystemCapability> {
    inner: F,
    policy: FailurePolicy,
    mkdir_count: usize,
    mkdir_log: Vec<String>,
    writes_attempted: usize,
    renames_attempted: usize,
}

impl<F: FilesystemCapability> FailingFilesystem<F> {
    /// Create a new failing filesystem with the given policy
    pub fn new(inner: F, policy: FailurePolicy) -> Self {
        Self {
            inner,
            policy,
            mkdir_count: 0,
            mkdir_log: Vec::new(),
            writes_attempted: 0,
            renames_attempted: 0,
        }
    }

    fn should_fail_mkdir(&self, path: &str) -> bool {
        match &self.policy {
            FailurePolicy::AfterMkdirs(n) => self.mkdir_count >= *n,
            FailurePolicy::OnMkdirPaths(paths) => paths.iter().any(|p| p == path),
            FailurePolicy::Never | FailurePolicy::OnWrites | FailurePolicy::OnRenames => false,
        }
    }

    /// Get the underlying filesystem (for inspection)
    pub fn inner(&self) -> &F {
        &self.inner
    }

    /// Get mutable access to the underlying filesystem
    pub fn inner_mut(&mut self) -> &mut F {
        &mut self.inner
    }

    /// Unwrap into the underlying filesystem
    pub fn into_inner(self) -> F {
        self.inner
    }

    /// Paths passed to mkdir, in call order
    pub fn mkdir_log(&self) -> &[String] {
        &self.mkdir_log
    }

    /// Number of write calls received
    pub fn writes_attempted(&self) -> usize {
        self.writes_attempted
    }

    /// Number of rename calls received
    pub fn renames_attempted(&self) -> usize {
        self.renames_attempted
    }

    /// Reset the failure policy and all counters
    pub fn set_policy(&mut self, policy: FailurePolicy) {
        self.policy = policy;
        self.mkdir_count = 0;
        self.mkdir_log.clear();
        self.writes_attempted = 0;
        self.renames_attempted = 0;
    }
}

impl<F: FilesystemCapability> FilesystemCapability for FailingFilesystem<F> {
    fn exists(&self, path: &str) -> bool {
        self.inner.exists(path)
    }

    fn is_directory(&self, path: &str) -> bool {
        self.inner.is_directory(path)
    }

    fn mkdir(&mut self, path: &str) -> Result<(), FsError> {
        self.mkdir_log.push(path.to_string());
        if self.should_fail_mkdir(path) {
            return Err(FsError::Io(format!("injected mkdir failure at {}", path)));
        }

        self.inner.mkdir(path)?;
        self.mkdir_count += 1;
        Ok(())
    }

    fn write_file(
        &mut self,
        path: &str,
        data: FileData,
        options: WriteOptions,
    ) -> Result<(), FsError> {
        self.writes_attempted += 1;
        if matches!(self.policy, FailurePolicy::OnWrites) {
            return Err(FsError::Io(format!("injected write failure at {}", path)));
        }
        self.inner.write_file(path, data, options)
    }

    fn rename(&mut self, old_path: &str, new_path: &str) -> Result<(), FsError> {
        self.renames_attempted += 1;
        if matches!(self.policy, FailurePolicy::OnRenames) {
            return Err(FsError::Io(format!(
                "injected rename failure {} -> {}",
                old_path, new_path
            )));
        }
        self.inner.rename(old_path, new_path)
    }
}
