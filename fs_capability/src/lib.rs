//! # Filesystem Capability
//!
//! This crate defines the surface through which callers observe and mutate a
//! virtual filesystem they do not own.
//!
//! ## Philosophy
//!
//! - **Capabilities, not globals**: every operation receives the filesystem
//!   it acts on; nothing reaches for a process-wide instance
//! - **One level at a time**: `mkdir` never creates missing ancestors
//! - **Options are opaque**: write options pass through untouched
//!
//! ## Contents
//!
//! - [`FilesystemCapability`]: exists / is-directory / mkdir / write / rename
//! - [`MemoryFilesystem`]: an in-memory implementation
//! - [`FailingFilesystem`]: a wrapper that injects failures for testing

pub mod capability;
pub mod error;
pub mod failing;
pub mod memory;

pub use capability::{ExistenceOutcome, FileData, FilesystemCapability, WriteFlags, WriteOptions};
pub use error::FsError;
pub use failing::{FailingFilesystem, FailurePolicy};
pub use memory::{MemoryFilesystem, NodeId};
