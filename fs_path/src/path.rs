//! Path normalization logic
//!
//! This module canonicalizes path strings and decomposes them into the
//! ordered chain of ancestor directories.

/// Path normalizer
///
/// Handles canonicalizing paths and splitting them into ancestor chains.
pub struct PathNormalizer;

impl PathNormalizer {
    /// Normalizes a path
    ///
    /// Resolves `.` and `..` segments, collapses repeated separators and
    /// drops trailing slashes. `..` above the root of an absolute path is
    /// discarded; leading `..` segments of a relative path are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use fs_path::PathNormalizer;
    ///
    /// assert_eq!(PathNormalizer::normalize("./a/../b/c"), "b/c");
    /// assert_eq!(PathNormalizer::normalize("/docs//notes/"), "/docs/notes");
    /// assert_eq!(PathNormalizer::normalize("a/.."), ".");
    /// ```
    pub fn normalize(path: &str) -> String {
        let absolute = Self::is_absolute(path);
        let mut components: Vec<&str> = Vec::new();

        for component in path.split('/') {
            match component {
                "" | "." => {}
                ".." => match components.last() {
                    Some(last) if *last != ".." => {
                        components.pop();
                    }
                    _ if absolute => {}
                    _ => components.push(".."),
                },
                name => components.push(name),
            }
        }

        let joined = components.join("/");
        if absolute {
            format!("/{}", joined)
        } else if joined.is_empty() {
            ".".to_string()
        } else {
            joined
        }
    }

    /// Returns the directory portion of the normalized path
    ///
    /// A bare name has `.` as its parent; the root is its own parent.
    pub fn parent_of(path: &str) -> String {
        let normalized = Self::normalize(path);
        match normalized.rfind('/') {
            Some(0) => "/".to_string(),
            Some(idx) => normalized[..idx].to_string(),
            None => ".".to_string(),
        }
    }

    /// Splits a directory path into its ancestor chain
    ///
    /// Each element is the path up to and including one segment, ordered
    /// from the shallowest to the deepest. `.` and `/` have no ancestors
    /// to create and yield an empty chain.
    ///
    /// # Examples
    ///
    /// ```
    /// use fs_path::PathNormalizer;
    ///
    /// assert_eq!(PathNormalizer::segments("a/b/c"), vec!["a", "a/b", "a/b/c"]);
    /// assert_eq!(PathNormalizer::segments("/etc/passwd"), vec!["/etc", "/etc/passwd"]);
    /// assert!(PathNormalizer::segments(".").is_empty());
    /// ```
    pub fn segments(dir: &str) -> Vec<String> {
        let normalized = Self::normalize(dir);
        if normalized == "." || normalized == "/" {
            return Vec::new();
        }

        let absolute = Self::is_absolute(&normalized);
        let body = normalized.trim_start_matches('/');

        let mut chain = Vec::new();
        let mut prefix = String::with_capacity(normalized.len());
        for (idx, component) in body.split('/').enumerate() {
            if idx > 0 || absolute {
                prefix.push('/');
            }
            prefix.push_str(component);
            chain.push(prefix.clone());
        }
        chain
    }

    /// Resolves `path` against `base` and normalizes the result
    ///
    /// An absolute `path` ignores `base` entirely.
    pub fn join(base: &str, path: &str) -> String {
        if Self::is_absolute(path) {
            Self::normalize(path)
        } else {
            Self::normalize(&format!("{}/{}", base, path))
        }
    }

    /// Returns the last component of a path
    ///
    /// Returns `None` for paths that do not name an entry (`/`, `.`, `..`).
    pub fn file_name(path: &str) -> Option<&str> {
        let name = path.trim_end_matches('/').rsplit('/').next()?;
        match name {
            "" | "." | ".." => None,
            name => Some(name),
        }
    }

    /// Returns true if the path starts at the root
    pub fn is_absolute(path: &str) -> bool {
        path.starts_with('/')
    }
}
