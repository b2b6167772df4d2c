//! Resolving paths into nodes.
//! - The path is normalized lexically first, then handed to the backend relative
//!   to the container.
//! - A node of the wrong kind is a `TypeMismatch`; nothing is coerced.

use tracing::debug;

use crate::backend::{NodeOf, StorageBackend};
use crate::errors::{op_failed, FsError, Result};
use crate::flags::ResolveFlags;
use crate::node::NodeKind;
use crate::path::normalize;

/// Resolve `path` to a file node, creating it when `flags.create` is set.
pub async fn resolve_file<B: StorageBackend>(
    backend: &B,
    container: &NodeOf<B>,
    path: &str,
    flags: ResolveFlags,
) -> Result<NodeOf<B>> {
    resolve_as(backend, container, path, Some(NodeKind::File), flags)
        .await
        .map_err(op_failed("get file entry"))
}

/// Resolve `path` to a directory node, creating it (and parents) when
/// `flags.create` is set.
pub async fn resolve_directory<B: StorageBackend>(
    backend: &B,
    container: &NodeOf<B>,
    path: &str,
    flags: ResolveFlags,
) -> Result<NodeOf<B>> {
    resolve_as(backend, container, path, Some(NodeKind::Directory), flags)
        .await
        .map_err(op_failed("get directory entry"))
}

/// Resolve an existing file, or a special entry such as a dangling symlink.
/// Only a directory is a `TypeMismatch`.
pub async fn resolve_non_directory<B: StorageBackend>(
    backend: &B,
    container: &NodeOf<B>,
    path: &str,
) -> Result<NodeOf<B>> {
    let found = match resolve_as(backend, container, path, None, ResolveFlags::EXISTING).await {
        Ok(node) if node.is_directory() => Err(FsError::type_mismatch(node.locator(), NodeKind::File)),
        other => other,
    };
    found.map_err(op_failed("get file entry"))
}

/// Resolve an existing node of any kind.
pub async fn resolve_entry<B: StorageBackend>(backend: &B, container: &NodeOf<B>, path: &str) -> Result<NodeOf<B>> {
    resolve_as(backend, container, path, None, ResolveFlags::EXISTING)
        .await
        .map_err(op_failed("get entry"))
}

async fn resolve_as<B: StorageBackend>(
    backend: &B,
    container: &NodeOf<B>,
    path: &str,
    expected: Option<NodeKind>,
    flags: ResolveFlags,
) -> Result<NodeOf<B>> {
    let path = normalize(path);
    debug!(
        container = %container.locator(),
        path = %path,
        create = flags.create,
        exclusive = flags.exclusive,
        "Resolving"
    );

    let node = backend
        .resolve(container, &path, expected.unwrap_or(NodeKind::File), flags)
        .await?;

    match expected {
        Some(NodeKind::File) if !node.is_file() => Err(FsError::type_mismatch(node.locator(), NodeKind::File)),
        Some(NodeKind::Directory) if !node.is_directory() => {
            Err(FsError::type_mismatch(node.locator(), NodeKind::Directory))
        }
        _ => Ok(node),
    }
}
