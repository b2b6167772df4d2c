//! Host filesystem backend.
//!
//! Handles are absolute `PathBuf`s. Paths are resolved lexically against the
//! container (see `crate::path`), then checked with a single `tokio::fs` call.
//! Symlinks are followed when classifying a node; a dangling link is reported as
//! `NodeKind::Other` so it can still be evicted or removed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use super::helpers::{io_error_with_help, is_cross_device};
use super::tree::{copy_tree, measure_tree};
use super::{RootSelector, StorageArea, StorageBackend};
use crate::errors::{FsError, Result};
use crate::flags::{Removal, ResolveFlags};
use crate::node::{Metadata, Node, NodeKind};
use crate::path;

const APP_DIR: &str = "fs_manager";

type LocalNode = Node<PathBuf>;

/// `StorageBackend` over the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct LocalBackend {
    area_base: Option<PathBuf>,
}

impl LocalBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place every storage area under `base/<area>` instead of the platform
    /// data/documents/downloads directories.
    pub fn with_area_base(base: impl Into<PathBuf>) -> Self {
        Self {
            area_base: Some(base.into()),
        }
    }

    /// Directory backing a storage area.
    pub fn area_dir(&self, area: StorageArea) -> Result<PathBuf> {
        if let Some(base) = &self.area_base {
            return Ok(base.join(area.as_str()));
        }
        let dir = match area {
            StorageArea::PrivateWww => dirs::data_dir().map(|d| d.join(APP_DIR).join("www")),
            StorageArea::PrivateDoc => dirs::data_dir().map(|d| d.join(APP_DIR).join("doc")),
            StorageArea::PublicDocuments => dirs::document_dir(),
            StorageArea::PublicDownloads => dirs::download_dir(),
        };
        dir.ok_or_else(|| FsError::not_found(format!("storage area {area}")))
    }

    /// Lexically place `rel` under `container`.
    ///
    /// Only `rel` is treated as a string; it is applied segment by segment to the
    /// container's own `PathBuf`, so a root that is not valid UTF-8 is kept intact.
    fn locate(&self, container: &Path, rel: &str) -> Result<PathBuf> {
        let rel = path::normalize(rel.trim().trim_start_matches('/'));
        let mut target = container.to_path_buf();
        for segment in rel.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    if !target.pop() {
                        return Err(FsError::InvalidPath(format!("'{rel}' climbs above the filesystem root")));
                    }
                }
                name => target.push(name),
            }
        }
        Ok(target)
    }

    async fn create(&self, target: &Path, kind: NodeKind, exclusive: bool) -> Result<()> {
        if kind == NodeKind::Directory && !exclusive {
            return fs::create_dir_all(target)
                .await
                .map_err(io_error_with_help("create directory", target));
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(io_error_with_help("create parent directory", parent))?;
        }

        if kind == NodeKind::Directory {
            return fs::create_dir(target)
                .await
                .map_err(io_error_with_help("create directory", target));
        }

        let mut opts = fs::OpenOptions::new();
        opts.write(true);
        if exclusive {
            opts.create_new(true);
        } else {
            opts.create(true);
        }
        opts.open(target)
            .await
            .map(drop)
            .map_err(io_error_with_help("create file", target))
    }

    /// Where `src` lands in `dest_dir`; the slot must be free.
    async fn landing(&self, src: &LocalNode, dest_dir: &LocalNode, new_name: Option<&str>) -> Result<PathBuf> {
        let name = entry_name(new_name.unwrap_or(src.name()))?;
        let target = dest_dir.handle().join(name);
        if src.is_directory() && target.starts_with(src.handle()) {
            return Err(FsError::InvalidPath(format!(
                "cannot place '{}' inside itself",
                src.locator()
            )));
        }

        match fs::symlink_metadata(&target).await {
            Ok(_) => Err(FsError::already_exists(target.display())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(target),
            Err(e) => Err(io_error_with_help("inspect destination", &target)(e)),
        }
    }

    async fn copy_to(&self, src: &LocalNode, target: &Path) -> Result<()> {
        match src.kind() {
            NodeKind::File => fs::copy(src.handle(), target)
                .await
                .map(drop)
                .map_err(io_error_with_help("copy file", target)),
            NodeKind::Directory => {
                let (from, to) = (src.handle().clone(), target.to_path_buf());
                tokio::task::spawn_blocking(move || copy_tree(&from, &to))
                    .await
                    .map_err(join_failed)?
                    .map_err(io_error_with_help("copy directory", src.handle()))
            }
            NodeKind::Other => Err(FsError::type_mismatch(src.locator(), NodeKind::File)),
        }
    }
}

#[async_trait]
impl StorageBackend for LocalBackend {
    type Handle = PathBuf;

    async fn open_root(&self, selector: &RootSelector) -> Result<LocalNode> {
        let dir = match selector {
            RootSelector::Path(p) => p.clone(),
            RootSelector::Area(area) => {
                let dir = self.area_dir(*area)?;
                fs::create_dir_all(&dir)
                    .await
                    .map_err(io_error_with_help("create storage area", &dir))?;
                dir
            }
        };

        let canonical = fs::canonicalize(&dir)
            .await
            .map_err(io_error_with_help("open root", &dir))?;
        let canonical = dunce::simplified(&canonical).to_path_buf();
        let meta = fs::metadata(&canonical)
            .await
            .map_err(io_error_with_help("open root", &canonical))?;
        if !meta.is_dir() {
            return Err(FsError::type_mismatch(canonical.display(), NodeKind::Directory));
        }
        debug!(root = %canonical.display(), %selector, "Opened root");
        Ok(node_at(canonical, &meta))
    }

    async fn resolve(
        &self,
        container: &LocalNode,
        path: &str,
        kind: NodeKind,
        flags: ResolveFlags,
    ) -> Result<LocalNode> {
        let target = self.locate(container.handle(), path)?;
        match stat(&target).await {
            Ok(meta) => {
                if flags.create && flags.exclusive {
                    return Err(FsError::already_exists(target.display()));
                }
                Ok(node_at(target, &meta))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound && flags.create => {
                self.create(&target, kind, flags.exclusive).await?;
                debug!(path = %target.display(), %kind, "Created node");
                let meta = fs::metadata(&target)
                    .await
                    .map_err(io_error_with_help("stat", &target))?;
                Ok(node_at(target, &meta))
            }
            Err(e) => Err(io_error_with_help("resolve", &target)(e)),
        }
    }

    async fn child(&self, dir: &LocalNode, name: &str) -> Result<LocalNode> {
        let target = dir.handle().join(entry_name(name)?);
        let meta = stat(&target)
            .await
            .map_err(io_error_with_help("resolve", &target))?;
        Ok(node_at(target, &meta))
    }

    fn contains(&self, ancestor: &LocalNode, node: &LocalNode) -> bool {
        node.handle() != ancestor.handle() && node.handle().starts_with(ancestor.handle())
    }

    async fn parent(&self, node: &LocalNode) -> Result<LocalNode> {
        let Some(parent) = node.handle().parent() else {
            return Err(FsError::not_found(format!("parent of {}", node.locator())));
        };
        let parent = parent.to_path_buf();
        let meta = fs::metadata(&parent)
            .await
            .map_err(io_error_with_help("resolve parent", &parent))?;
        Ok(node_at(parent, &meta))
    }

    async fn read_bytes(&self, node: &LocalNode) -> Result<Vec<u8>> {
        fs::read(node.handle())
            .await
            .map_err(io_error_with_help("read", node.handle()))
    }

    async fn write_bytes(&self, node: &LocalNode, bytes: &[u8]) -> Result<()> {
        fs::write(node.handle(), bytes)
            .await
            .map_err(io_error_with_help("write", node.handle()))
    }

    async fn move_node(&self, src: &LocalNode, dest_dir: &LocalNode, new_name: Option<&str>) -> Result<()> {
        let target = self.landing(src, dest_dir, new_name).await?;
        match fs::rename(src.handle(), &target).await {
            Ok(()) => Ok(()),
            Err(e) if is_cross_device(&e) => {
                warn!(
                    src = %src.locator(),
                    dest = %target.display(),
                    "Cross-filesystem move; copying then removing source"
                );
                self.copy_to(src, &target).await?;
                self.remove_node(src, Removal::Tree).await
            }
            Err(e) => Err(io_error_with_help("rename", src.handle())(e)),
        }
    }

    async fn copy_node(&self, src: &LocalNode, dest_dir: &LocalNode, new_name: Option<&str>) -> Result<()> {
        let target = self.landing(src, dest_dir, new_name).await?;
        self.copy_to(src, &target).await
    }

    async fn remove_node(&self, node: &LocalNode, removal: Removal) -> Result<()> {
        let path = node.handle();
        let result = match (node.kind(), removal) {
            (NodeKind::Directory, Removal::Tree) => fs::remove_dir_all(path).await,
            (NodeKind::Directory, Removal::Entry) => fs::remove_dir(path).await,
            _ => fs::remove_file(path).await,
        };
        result.map_err(io_error_with_help("remove", path))
    }

    async fn metadata(&self, node: &LocalNode, recursive: bool) -> Result<Metadata> {
        let path = node.handle();
        let meta = fs::metadata(path).await.map_err(io_error_with_help("stat", path))?;
        let modified = meta.modified().ok().map(DateTime::<Utc>::from);
        if !meta.is_dir() {
            return Ok(Metadata {
                size: meta.len(),
                modified,
                ..Metadata::default()
            });
        }

        let dir = path.clone();
        let totals = tokio::task::spawn_blocking(move || measure_tree(&dir, recursive))
            .await
            .map_err(join_failed)?
            .map_err(io_error_with_help("measure directory", path))?;
        Ok(Metadata {
            size: totals.size,
            modified,
            file_count: totals.files,
            directory_count: totals.directories,
        })
    }

    async fn list_children(&self, container: &LocalNode) -> Result<Vec<LocalNode>> {
        let dir = container.handle();
        let mut entries = fs::read_dir(dir)
            .await
            .map_err(io_error_with_help("read directory", dir))?;

        let mut children = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(io_error_with_help("read directory", dir))?
        {
            let child = entry.path();
            let meta = stat(&child).await.map_err(io_error_with_help("stat", &child))?;
            children.push(node_at(child, &meta));
        }
        children.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(children)
    }
}

/// Follow symlinks; fall back to the link itself when it dangles.
async fn stat(path: &Path) -> io::Result<std::fs::Metadata> {
    match fs::metadata(path).await {
        Err(e) if e.kind() == io::ErrorKind::NotFound => fs::symlink_metadata(path).await,
        other => other,
    }
}

fn node_at(path: PathBuf, meta: &std::fs::Metadata) -> LocalNode {
    let kind = if meta.is_file() {
        NodeKind::File
    } else if meta.is_dir() {
        NodeKind::Directory
    } else {
        NodeKind::Other
    };
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path_str(&path));
    let locator = path_str(&path);
    Node::new(name, kind, locator, path)
}

/// A single path segment naming an entry inside a directory.
fn entry_name(name: &str) -> Result<&str> {
    if name.is_empty() || name == "." || name == ".." || name.contains('/') {
        return Err(FsError::InvalidPath(format!("'{name}' is not a valid entry name")));
    }
    Ok(name)
}

/// Locator form of a host path: `/`-separated, for display and logs only.
fn path_str(path: &Path) -> String {
    let s = path.to_string_lossy();
    if cfg!(windows) { s.replace('\\', "/") } else { s.into_owned() }
}

fn join_failed(e: tokio::task::JoinError) -> FsError {
    FsError::Io {
        message: format!("blocking task failed: {e}"),
        source: io::Error::other(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FsErrorKind;
    use assert_fs::prelude::*;

    async fn root_of(temp: &assert_fs::TempDir) -> LocalNode {
        LocalBackend::new()
            .open_root(&RootSelector::Path(temp.path().to_path_buf()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn resolve_creates_with_parents() {
        let temp = assert_fs::TempDir::new().unwrap();
        let backend = LocalBackend::new();
        let root = root_of(&temp).await;

        let file = backend
            .resolve(&root, "a/b/c.txt", NodeKind::File, ResolveFlags::CREATE)
            .await
            .unwrap();
        assert!(file.is_file());
        assert_eq!(file.name(), "c.txt");
        assert!(temp.path().join("a/b/c.txt").is_file());

        let dir = backend
            .resolve(&root, "x/y", NodeKind::Directory, ResolveFlags::CREATE)
            .await
            .unwrap();
        assert!(dir.is_directory());
    }

    #[tokio::test]
    async fn exclusive_create_refuses_existing() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("taken.txt").touch().unwrap();
        let backend = LocalBackend::new();
        let root = root_of(&temp).await;

        let err = backend
            .resolve(&root, "taken.txt", NodeKind::File, ResolveFlags::CREATE_NEW)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FsErrorKind::AlreadyExists);
    }

    #[tokio::test]
    async fn resolve_missing_without_create_is_not_found() {
        let temp = assert_fs::TempDir::new().unwrap();
        let backend = LocalBackend::new();
        let root = root_of(&temp).await;
        let err = backend
            .resolve(&root, "nope", NodeKind::File, ResolveFlags::EXISTING)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FsErrorKind::NotFound);
    }

    #[tokio::test]
    async fn empty_path_is_the_container() {
        let temp = assert_fs::TempDir::new().unwrap();
        let backend = LocalBackend::new();
        let root = root_of(&temp).await;
        let same = backend
            .resolve(&root, "", NodeKind::Directory, ResolveFlags::EXISTING)
            .await
            .unwrap();
        assert_eq!(same.locator(), root.locator());
    }

    #[tokio::test]
    async fn open_root_rejects_a_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("plain").touch().unwrap();
        let err = LocalBackend::new()
            .open_root(&RootSelector::Path(temp.path().join("plain")))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FsErrorKind::TypeMismatch);
    }

    #[tokio::test]
    async fn area_roots_live_under_the_override_base() {
        let temp = assert_fs::TempDir::new().unwrap();
        let backend = LocalBackend::with_area_base(temp.path());
        let root = backend
            .open_root(&RootSelector::Area(StorageArea::PrivateDoc))
            .await
            .unwrap();
        assert!(root.is_directory());
        assert!(temp.path().join("private_doc").is_dir());
    }

    #[tokio::test]
    async fn move_refuses_occupied_slot_and_self_nesting() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("d/inner").create_dir_all().unwrap();
        temp.child("f.txt").write_str("x").unwrap();
        temp.child("d/f.txt").write_str("y").unwrap();
        let backend = LocalBackend::new();
        let root = root_of(&temp).await;

        let f = backend.resolve(&root, "f.txt", NodeKind::File, ResolveFlags::EXISTING).await.unwrap();
        let d = backend.resolve(&root, "d", NodeKind::Directory, ResolveFlags::EXISTING).await.unwrap();
        let inner = backend.resolve(&root, "d/inner", NodeKind::Directory, ResolveFlags::EXISTING).await.unwrap();

        let err = backend.move_node(&f, &d, None).await.unwrap_err();
        assert_eq!(err.kind(), FsErrorKind::AlreadyExists);

        let err = backend.move_node(&d, &inner, None).await.unwrap_err();
        assert_eq!(err.kind(), FsErrorKind::InvalidPath);

        backend.move_node(&f, &d, Some("g.txt")).await.unwrap();
        assert_eq!(std::fs::read_to_string(temp.path().join("d/g.txt")).unwrap(), "x");
    }

    #[tokio::test]
    async fn remove_entry_refuses_non_empty_directory() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("d").create_dir_all().unwrap();
        temp.child("d/f.txt").touch().unwrap();
        let backend = LocalBackend::new();
        let root = root_of(&temp).await;
        let d = backend.resolve(&root, "d", NodeKind::Directory, ResolveFlags::EXISTING).await.unwrap();

        let err = backend.remove_node(&d, Removal::Entry).await.unwrap_err();
        assert_eq!(err.kind(), FsErrorKind::NotEmpty);
        backend.remove_node(&d, Removal::Tree).await.unwrap();
        assert!(!temp.path().join("d").exists());
    }

    #[tokio::test]
    async fn children_are_sorted_by_name() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("b.txt").touch().unwrap();
        temp.child("a").create_dir_all().unwrap();
        temp.child("c.txt").touch().unwrap();
        let backend = LocalBackend::new();
        let root = root_of(&temp).await;

        let names: Vec<String> = backend
            .list_children(&root)
            .await
            .unwrap()
            .iter()
            .map(|n| n.name().to_string())
            .collect();
        assert_eq!(names, ["a", "b.txt", "c.txt"]);
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn non_utf8_root_keeps_writes_inside_it() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = assert_fs::TempDir::new().unwrap();
        let odd = temp.path().join(OsStr::from_bytes(b"caf\xff"));
        std::fs::create_dir(&odd).unwrap();
        let backend = LocalBackend::new();
        let root = backend.open_root(&RootSelector::Path(odd.clone())).await.unwrap();

        let file = backend
            .resolve(&root, "nested/a.txt", NodeKind::File, ResolveFlags::CREATE)
            .await
            .unwrap();
        backend.write_bytes(&file, b"hi").await.unwrap();

        assert_eq!(std::fs::read(odd.join("nested/a.txt")).unwrap(), b"hi");
        let siblings: Vec<_> = std::fs::read_dir(temp.path()).unwrap().collect();
        assert_eq!(siblings.len(), 1, "nothing may be created next to the root");

        let slot = backend.child(&root, "nested").await.unwrap();
        assert!(slot.is_directory());
        assert!(backend.contains(&root, &file));
    }

    #[tokio::test]
    async fn child_lookup_and_containment() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("d/e").create_dir_all().unwrap();
        let backend = LocalBackend::new();
        let root = root_of(&temp).await;
        let d = backend.child(&root, "d").await.unwrap();
        let e = backend.child(&d, "e").await.unwrap();

        assert!(backend.contains(&root, &e));
        assert!(backend.contains(&d, &e));
        assert!(!backend.contains(&e, &d));
        assert!(!backend.contains(&d, &d));

        let err = backend.child(&root, "missing").await.unwrap_err();
        assert_eq!(err.kind(), FsErrorKind::NotFound);
        let err = backend.child(&root, "..").await.unwrap_err();
        assert_eq!(err.kind(), FsErrorKind::InvalidPath);
    }

    #[tokio::test]
    async fn parent_segments_climb_from_the_container() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("a/b").create_dir_all().unwrap();
        let backend = LocalBackend::new();
        let root = root_of(&temp).await;
        let b = backend.child(&root, "a").await.unwrap();
        let b = backend.child(&b, "b").await.unwrap();

        let up = backend
            .resolve(&b, "../../a", NodeKind::Directory, ResolveFlags::EXISTING)
            .await
            .unwrap();
        assert_eq!(up.handle(), &root.handle().join("a"));
    }
}
