//! Root-bound facade.
//!
//! `FileSystemManager` resolves one root directory at construction and then
//! exposes every operation relative to it. The root is never re-resolved or
//! swapped; build a new manager to bind a different one.

use tracing::info;

use crate::backend::{NodeOf, RootSelector, StorageBackend};
use crate::config::Config;
use crate::errors::{op_failed, Result};
use crate::flags::{RemoveDirectoryFlags, RemoveFileFlags, ResolveFlags, TransferFlags, WriteOptions};
use crate::fs_ops::{self, transfer, FileFormat};
use crate::node::Metadata;

pub struct FileSystemManager<B: StorageBackend> {
    backend: B,
    root: NodeOf<B>,
}

impl<B: StorageBackend> FileSystemManager<B> {
    /// Bind to the root named by `selector`. Fails as a whole if it cannot be opened.
    pub async fn new(backend: B, selector: &RootSelector) -> Result<Self> {
        let root = backend
            .open_root(selector)
            .await
            .map_err(op_failed("get file root"))?;
        info!(root = %root.locator(), %selector, "Bound file system root");
        Ok(Self { backend, root })
    }

    /// Bind to the root a loaded configuration selects.
    pub async fn from_config(backend: B, config: &Config) -> Result<Self> {
        let selector = config.root_selector().map_err(op_failed("get file root"))?;
        Self::new(backend, &selector).await
    }

    pub fn root(&self) -> &NodeOf<B> {
        &self.root
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn get_file_entry(&self, path: &str, flags: ResolveFlags) -> Result<NodeOf<B>> {
        fs_ops::resolve_file(&self.backend, &self.root, path, flags).await
    }

    pub async fn get_directory_entry(&self, path: &str, flags: ResolveFlags) -> Result<NodeOf<B>> {
        fs_ops::resolve_directory(&self.backend, &self.root, path, flags).await
    }

    /// Existing entry of either kind.
    pub async fn resolve_entry(&self, path: &str) -> Result<NodeOf<B>> {
        fs_ops::resolve_entry(&self.backend, &self.root, path).await
    }

    pub async fn read_file(&self, path: &str, format: FileFormat) -> Result<String> {
        fs_ops::read_file(&self.backend, &self.root, path, format).await
    }

    /// `opts` accepts a bare `FileFormat` (create if missing, not exclusive).
    pub async fn write_file(&self, path: &str, data: &str, opts: impl Into<WriteOptions>) -> Result<NodeOf<B>> {
        fs_ops::write_file(&self.backend, &self.root, path, data, opts.into()).await
    }

    /// Move an entry of either kind: a directory lands inside `dest`, a file is
    /// renamed to `dest`'s last segment.
    pub async fn move_path(&self, src: &str, dest: &str, flags: TransferFlags) -> Result<()> {
        fs_ops::move_path(&self.backend, &self.root, src, dest, flags).await
    }

    /// Copy an entry of either kind; destinations as for `move_path`.
    pub async fn copy_path(&self, src: &str, dest: &str, flags: TransferFlags) -> Result<()> {
        fs_ops::copy_path(&self.backend, &self.root, src, dest, flags).await
    }

    pub async fn move_file(&self, src: &str, dest: &str, flags: TransferFlags) -> Result<()> {
        fs_ops::move_file(&self.backend, &self.root, src, dest, flags).await
    }

    pub async fn copy_file(&self, src: &str, dest: &str, flags: TransferFlags) -> Result<()> {
        fs_ops::copy_file(&self.backend, &self.root, src, dest, flags).await
    }

    pub async fn remove_file(&self, path: &str, flags: RemoveFileFlags) -> Result<()> {
        fs_ops::remove_file(&self.backend, &self.root, path, flags).await
    }

    pub async fn create_directory(&self, path: &str, exclusive: bool) -> Result<NodeOf<B>> {
        fs_ops::create_directory(&self.backend, &self.root, path, exclusive).await
    }

    pub async fn read_directory(&self, path: &str) -> Result<Vec<NodeOf<B>>> {
        fs_ops::read_directory(&self.backend, &self.root, path).await
    }

    pub async fn move_directory(&self, src: &str, dest: &str, flags: TransferFlags) -> Result<()> {
        fs_ops::move_directory(&self.backend, &self.root, src, dest, flags).await
    }

    pub async fn copy_directory(&self, src: &str, dest: &str, flags: TransferFlags) -> Result<()> {
        fs_ops::copy_directory(&self.backend, &self.root, src, dest, flags).await
    }

    pub async fn remove_directory(&self, path: &str, flags: RemoveDirectoryFlags) -> Result<()> {
        fs_ops::remove_directory(&self.backend, &self.root, path, flags).await
    }

    /// Size, mtime and child counts for the entry at `path`.
    pub async fn entry_metadata(&self, path: &str, recursive: bool) -> Result<Metadata> {
        let node = self.resolve_entry(path).await?;
        transfer::entry_metadata(&self.backend, &node, recursive).await
    }

    /// Directory containing the entry at `path`.
    pub async fn parent_directory(&self, path: &str) -> Result<NodeOf<B>> {
        let node = self.resolve_entry(path).await?;
        transfer::parent_entry(&self.backend, &node).await
    }
}
