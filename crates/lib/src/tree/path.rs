//! Dot-path resolution for tree traversal.
//!
//! A key such as `"Server.HTTP.port"` is resolved into the ordered, lowercase
//! segments `["server", "http", "port"]`. Both read and write traversals use the
//! same resolution, so a key always addresses the same node regardless of the
//! case it was written in.
//!
//! Normalization rules:
//! - Separators are trimmed from both ends: `".a.b."` → `["a", "b"]`
//! - A key that is empty after trimming addresses the tree itself
//! - Internal repeated separators are *not* collapsed: `"a..b"` → `["a", "", "b"]`.
//!   The empty segment names a distinct child that only such keys can reach.
//!
//! ```
//! # use cfgtree::tree::KeyPath;
//! let path = KeyPath::parse(".Server.HTTP.port");
//! assert_eq!(path.segments(), ["server", "http", "port"]);
//! assert!(KeyPath::parse("").is_root());
//! ```

use std::{convert::Infallible, fmt, str::FromStr};

/// Separator between path segments.
pub const SEPARATOR: char = '.';

/// A resolved, normalized dot-path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// The path addressing the tree itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Resolves a key string into lowercase segments.
    pub fn parse(key: &str) -> Self {
        let trimmed = key.trim_matches(SEPARATOR);
        if trimmed.is_empty() {
            return Self::root();
        }
        Self {
            segments: trimmed
                .to_lowercase()
                .split(SEPARATOR)
                .map(str::to_string)
                .collect(),
        }
    }

    /// Returns true if this path addresses the tree itself.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Appends another path's segments, returning the combined path.
    pub fn join(&self, other: &KeyPath) -> KeyPath {
        let mut segments = Vec::with_capacity(self.len() + other.len());
        segments.extend_from_slice(&self.segments);
        segments.extend_from_slice(&other.segments);
        KeyPath { segments }
    }

    /// Appends a single child name verbatim.
    ///
    /// The name is not lowercased: child names produced by merging decoded maps
    /// keep their original case.
    pub fn child(&self, name: impl Into<String>) -> KeyPath {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        KeyPath { segments }
    }

    /// Returns the enclosing path, or `None` for the root.
    pub fn parent(&self) -> Option<KeyPath> {
        let (_, init) = self.segments.split_last()?;
        Some(KeyPath {
            segments: init.to_vec(),
        })
    }

    /// Returns the last segment, or `None` for the root.
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{SEPARATOR}")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for KeyPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(KeyPath::parse(s))
    }
}

impl From<&str> for KeyPath {
    fn from(s: &str) -> Self {
        KeyPath::parse(s)
    }
}
