//! In-memory filesystem
//!
//! A flat table from absolute, normalized paths to nodes. Relative paths are
//! resolved against a working directory before every lookup.

use crate::capability::{FileData, FilesystemCapability, WriteFlags, WriteOptions};
use crate::error::FsError;
use fs_path::PathNormalizer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

const ROOT: &str = "/";

/// Unique identifier for a filesystem node
///
/// A node keeps its identifier when it is renamed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Creates a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

#[derive(Debug, Clone)]
enum NodeKind {
    Directory,
    File { contents: Vec<u8>, mode: u32 },
}

#[derive(Debug, Clone)]
struct Node {
    id: NodeId,
    kind: NodeKind,
}

impl Node {
    fn directory() -> Self {
        Self {
            id: NodeId::new(),
            kind: NodeKind::Directory,
        }
    }

    fn file(contents: Vec<u8>, mode: u32) -> Self {
        Self {
            id: NodeId::new(),
            kind: NodeKind::File { contents, mode },
        }
    }

    fn is_directory(&self) -> bool {
        matches!(self.kind, NodeKind::Directory)
    }
}

/// In-memory virtual filesystem
///
/// The root directory always exists. Errors name the resolved absolute path.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    /// All nodes, keyed by absolute normalized path
    nodes: BTreeMap<String, Node>,
    /// Working directory used to resolve relative paths
    cwd: String,
    /// Maximum number of entries besides the root
    capacity: Option<usize>,
}

impl MemoryFilesystem {
    /// Creates an empty filesystem rooted at `/`
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(ROOT.to_string(), Node::directory());
        Self {
            nodes,
            cwd: ROOT.to_string(),
            capacity: None,
        }
    }

    /// Sets the working directory, creating it if needed
    pub fn with_cwd(mut self, cwd: &str) -> Self {
        let cwd = PathNormalizer::join(&self.cwd, cwd);
        for prefix in PathNormalizer::segments(&cwd) {
            self.nodes.entry(prefix).or_insert_with(Node::directory);
        }
        self.cwd = cwd;
        self
    }

    /// Limits the number of entries the filesystem can hold
    ///
    /// Creating an entry beyond the limit fails with [`FsError::NoSpace`].
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Returns the working directory
    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    /// Counts entries, not including the root
    pub fn entry_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Reads a file's contents
    pub fn read_file(&self, path: &str) -> Result<&[u8], FsError> {
        let resolved = self.resolve(path);
        match self.nodes.get(&resolved) {
            Some(Node {
                kind: NodeKind::File { contents, .. },
                ..
            }) => Ok(contents.as_slice()),
            Some(_) => Err(FsError::IsADirectory(resolved)),
            None => Err(FsError::NotFound(resolved)),
        }
    }

    /// Reads a file's contents as UTF-8 text
    pub fn read_to_string(&self, path: &str) -> Result<String, FsError> {
        let contents = self.read_file(path)?;
        String::from_utf8(contents.to_vec())
            .map_err(|e| FsError::Io(format!("{} is not valid UTF-8: {}", path, e)))
    }

    /// Returns the permission bits of a file
    pub fn mode_of(&self, path: &str) -> Option<u32> {
        match self.nodes.get(&self.resolve(path))?.kind {
            NodeKind::File { mode, .. } => Some(mode),
            NodeKind::Directory => None,
        }
    }

    /// Returns the identifier of the node at the path
    pub fn node_id(&self, path: &str) -> Option<NodeId> {
        self.nodes.get(&self.resolve(path)).map(|node| node.id)
    }

    /// Lists the names directly inside a directory, sorted
    pub fn list_dir(&self, path: &str) -> Result<Vec<String>, FsError> {
        let resolved = self.resolve(path);
        match self.nodes.get(&resolved) {
            Some(node) if node.is_directory() => {}
            Some(_) => return Err(FsError::NotADirectory(resolved)),
            None => return Err(FsError::NotFound(resolved)),
        }

        let prefix = Self::child_prefix(&resolved);
        Ok(self
            .nodes
            .keys()
            .filter(|key| key.len() > prefix.len() && key.starts_with(&prefix))
            .map(|key| &key[prefix.len()..])
            .filter(|rest| !rest.contains('/'))
            .map(str::to_string)
            .collect())
    }

    fn resolve(&self, path: &str) -> String {
        PathNormalizer::join(&self.cwd, path)
    }

    fn child_prefix(dir: &str) -> String {
        if dir == ROOT {
            ROOT.to_string()
        } else {
            format!("{}/", dir)
        }
    }

    fn has_children(&self, dir: &str) -> bool {
        let prefix = Self::child_prefix(dir);
        self.nodes
            .keys()
            .any(|key| key.len() > prefix.len() && key.starts_with(&prefix))
    }

    /// Checks that the parent of a resolved path is an existing directory
    fn check_parent(&self, resolved: &str) -> Result<(), FsError> {
        let parent = PathNormalizer::parent_of(resolved);
        match self.nodes.get(&parent) {
            Some(node) if node.is_directory() => Ok(()),
            Some(_) => Err(FsError::NotADirectory(parent)),
            None => Err(FsError::NotFound(parent)),
        }
    }

    fn reserve_entry(&self, resolved: &str) -> Result<(), FsError> {
        match self.capacity {
            Some(capacity) if self.entry_count() >= capacity => {
                Err(FsError::NoSpace(resolved.to_string()))
            }
            _ => Ok(()),
        }
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FilesystemCapability for MemoryFilesystem {
    fn exists(&self, path: &str) -> bool {
        self.nodes.contains_key(&self.resolve(path))
    }

    fn is_directory(&self, path: &str) -> bool {
        self.nodes
            .get(&self.resolve(path))
            .is_some_and(Node::is_directory)
    }

    fn mkdir(&mut self, path: &str) -> Result<(), FsError> {
        let resolved = self.resolve(path);

        if self.nodes.contains_key(&resolved) {
            return Err(FsError::AlreadyExists(resolved));
        }
        self.check_parent(&resolved)?;
        self.reserve_entry(&resolved)?;

        self.nodes.insert(resolved, Node::directory());
        Ok(())
    }

    fn write_file(
        &mut self,
        path: &str,
        data: FileData,
        options: WriteOptions,
    ) -> Result<(), FsError> {
        let resolved = self.resolve(path);
        self.check_parent(&resolved)?;

        if let Some(node) = self.nodes.get_mut(&resolved) {
            return match &mut node.kind {
                NodeKind::Directory => Err(FsError::IsADirectory(resolved)),
                NodeKind::File { contents, .. } => {
                    match options.flags {
                        WriteFlags::Truncate => *contents = data.into_bytes(),
                        WriteFlags::Append => contents.extend(data.into_bytes()),
                    }
                    Ok(())
                }
            };
        }

        self.reserve_entry(&resolved)?;
        self.nodes
            .insert(resolved, Node::file(data.into_bytes(), options.mode));
        Ok(())
    }

    fn rename(&mut self, old_path: &str, new_path: &str) -> Result<(), FsError> {
        let from = self.resolve(old_path);
        let to = self.resolve(new_path);

        let source_is_dir = match self.nodes.get(&from) {
            Some(node) => node.is_directory(),
            None => return Err(FsError::NotFound(from)),
        };
        if from == to {
            return Ok(());
        }
        if from == ROOT || to == ROOT {
            return Err(FsError::InvalidOperation(
                "cannot rename the root directory".to_string(),
            ));
        }
        if source_is_dir && to.starts_with(&Self::child_prefix(&from)) {
            return Err(FsError::InvalidOperation(format!(
                "cannot move {} into its own subtree {}",
                from, to
            )));
        }
        self.check_parent(&to)?;

        match self.nodes.get(&to) {
            Some(dest) if dest.is_directory() => {
                if !source_is_dir {
                    return Err(FsError::IsADirectory(to));
                }
                if self.has_children(&to) {
                    return Err(FsError::InvalidOperation(format!(
                        "directory not empty: {}",
                        to
                    )));
                }
            }
            Some(_) if source_is_dir => return Err(FsError::NotADirectory(to)),
            _ => {}
        }
        self.nodes.remove(&to);

        let prefix = Self::child_prefix(&from);
        let moved: Vec<String> = self
            .nodes
            .keys()
            .filter(|key| **key == from || key.starts_with(&prefix))
            .cloned()
            .collect();

        for key in moved {
            if let Some(node) = self.nodes.remove(&key) {
                let new_key = format!("{}{}", to, &key[from.len()..]);
                self.nodes.insert(new_key, node);
            }
        }
        Ok(())
    }
}
