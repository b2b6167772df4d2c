//! Resolved storage nodes.
//! A `Node` is a short-lived handle to a file or directory returned by a backend;
//! nothing here caches nodes between calls.

use chrono::{DateTime, Utc};
use std::fmt;

/// What a node is. `Other` covers entries that are neither a regular file nor a
/// directory (sockets, fifos, devices); callers bucket it with directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    File,
    Directory,
    Other,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeKind::File => "file",
            NodeKind::Directory => "directory",
            NodeKind::Other => "special entry",
        };
        f.write_str(s)
    }
}

/// A file or directory handle produced by a `StorageBackend`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<H> {
    name: String,
    kind: NodeKind,
    locator: String,
    handle: H,
}

impl<H> Node<H> {
    pub fn new(name: impl Into<String>, kind: NodeKind, locator: impl Into<String>, handle: H) -> Self {
        Self {
            name: name.into(),
            kind,
            locator: locator.into(),
            handle,
        }
    }

    /// Last path segment.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    pub fn is_directory(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    /// Absolute, backend-specific location (a local path for `LocalBackend`).
    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// Opaque backend handle; only the backend that produced it interprets it.
    pub fn handle(&self) -> &H {
        &self.handle
    }
}

/// Size and counts reported for a node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Bytes; for directories the sum of contained files.
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
    pub file_count: u64,
    pub directory_count: u64,
}
