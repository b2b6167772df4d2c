//! Storage backend capability surface.
//!
//! The core talks to storage only through `StorageBackend`: open a root, resolve a
//! path into a node, read/write bytes, and move/copy/remove a single node. Each
//! method is one backend round-trip; callers sequence them and never run two at once
//! on behalf of the same operation.
//!
//! `LocalBackend` maps the surface onto the host filesystem.

mod helpers;
mod local;
mod tree;

pub use helpers::{io_error_with_help, io_error_with_help_io};
pub use local::LocalBackend;

use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::{FsError, Result};
use crate::flags::{Removal, ResolveFlags};
use crate::node::{Metadata, Node, NodeKind};

/// Node type produced by backend `B`.
pub type NodeOf<B> = Node<<B as StorageBackend>::Handle>;

#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Opaque per-node handle.
    type Handle: Clone + fmt::Debug + PartialEq + Send + Sync;

    /// Open the directory a facade binds to.
    async fn open_root(&self, selector: &RootSelector) -> Result<Node<Self::Handle>>;

    /// Resolve `path` (already normalized, relative to `container`).
    ///
    /// Returns whatever exists there, of any kind. When absent and `flags.create` is
    /// set, creates a node of `kind` (and missing parents). `create && exclusive`
    /// fails `AlreadyExists` if something is already there.
    async fn resolve(
        &self,
        container: &Node<Self::Handle>,
        path: &str,
        kind: NodeKind,
        flags: ResolveFlags,
    ) -> Result<Node<Self::Handle>>;

    /// Whatever exists at `name` directly inside `dir`, of any kind. Never creates.
    async fn child(&self, dir: &Node<Self::Handle>, name: &str) -> Result<Node<Self::Handle>>;

    /// True when `node` sits strictly below `ancestor`.
    ///
    /// The default compares locators segment-wise; backends whose locators are
    /// lossy should compare handles instead.
    fn contains(&self, ancestor: &Node<Self::Handle>, node: &Node<Self::Handle>) -> bool {
        let (outer, inner) = (ancestor.locator(), node.locator());
        if outer == "/" {
            return inner.starts_with('/') && inner != "/";
        }
        inner.strip_prefix(outer).is_some_and(|rest| rest.starts_with('/'))
    }

    /// Directory containing `node`.
    async fn parent(&self, node: &Node<Self::Handle>) -> Result<Node<Self::Handle>>;

    async fn read_bytes(&self, node: &Node<Self::Handle>) -> Result<Vec<u8>>;

    /// Replace the contents of a file node.
    async fn write_bytes(&self, node: &Node<Self::Handle>, bytes: &[u8]) -> Result<()>;

    /// Move `src` into `dest_dir`, under `new_name` or its own name.
    /// Fails `AlreadyExists` when that slot is taken.
    async fn move_node(
        &self,
        src: &Node<Self::Handle>,
        dest_dir: &Node<Self::Handle>,
        new_name: Option<&str>,
    ) -> Result<()>;

    /// Copy `src` (a whole tree for directories) into `dest_dir`.
    /// Fails `AlreadyExists` when that slot is taken.
    async fn copy_node(
        &self,
        src: &Node<Self::Handle>,
        dest_dir: &Node<Self::Handle>,
        new_name: Option<&str>,
    ) -> Result<()>;

    /// `Removal::Entry` on a non-empty directory fails `NotEmpty`.
    async fn remove_node(&self, node: &Node<Self::Handle>, removal: Removal) -> Result<()>;

    /// With `recursive`, directory counts and size cover all descendants.
    async fn metadata(&self, node: &Node<Self::Handle>, recursive: bool) -> Result<Metadata>;

    /// Immediate children, delivered in one batch.
    async fn list_children(&self, container: &Node<Self::Handle>) -> Result<Vec<Node<Self::Handle>>>;
}

/// Well-known storage areas a root can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageArea {
    /// Application-private web assets.
    PrivateWww,
    /// Application-private documents.
    PrivateDoc,
    /// Shared user documents.
    PublicDocuments,
    /// Shared user downloads.
    PublicDownloads,
}

impl StorageArea {
    pub const ALL: [StorageArea; 4] = [
        StorageArea::PrivateWww,
        StorageArea::PrivateDoc,
        StorageArea::PublicDocuments,
        StorageArea::PublicDownloads,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageArea::PrivateWww => "private_www",
            StorageArea::PrivateDoc => "private_doc",
            StorageArea::PublicDocuments => "public_documents",
            StorageArea::PublicDownloads => "public_downloads",
        }
    }
}

impl fmt::Display for StorageArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageArea {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        StorageArea::ALL
            .into_iter()
            .find(|a| a.as_str() == wanted)
            .ok_or_else(|| format!("invalid storage area: '{s}'"))
    }
}

/// Which root a facade binds: an explicit directory or a storage area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootSelector {
    Path(PathBuf),
    Area(StorageArea),
}

impl RootSelector {
    /// Prefer an explicit path; fall back to an area; neither is a configuration error.
    pub fn from_parts(path: Option<PathBuf>, area: Option<StorageArea>) -> Result<Self> {
        match (path, area) {
            (Some(p), _) if !p.as_os_str().is_empty() => Ok(RootSelector::Path(p)),
            (_, Some(a)) => Ok(RootSelector::Area(a)),
            _ => Err(FsError::MissingConfiguration),
        }
    }
}

impl fmt::Display for RootSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootSelector::Path(p) => write!(f, "path:{}", p.display()),
            RootSelector::Area(a) => write!(f, "area:{a}"),
        }
    }
}
