//! # Virtual Filesystem Paths
//!
//! Lexical path handling for the in-memory virtual filesystem.
//!
//! ## Design
//!
//! - Paths are plain strings separated by a single `/`
//! - Normalization is purely lexical: it never consults a filesystem
//! - Case is preserved; `A` and `a` are different entries
//! - A leading `/` marks an absolute path, everything else is relative

pub mod path;

pub use path::PathNormalizer;
