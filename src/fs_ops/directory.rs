//! Directory operations relative to a container.
//! Moves and copies keep the directory's own name inside the destination.

use tracing::debug;

use super::arbiter::{destination_directory, ensure_outside_container};
use super::resolve::resolve_directory;
use super::transfer::{copy_entry, list_entries, move_entry, remove_directory_entry};
use crate::backend::{NodeOf, StorageBackend};
use crate::errors::{op_failed, Result};
use crate::flags::{Removal, RemoveDirectoryFlags, ResolveFlags, TransferFlags};

/// Create the directory at `path` (with missing parents). With `exclusive` an
/// existing entry fails `AlreadyExists`.
pub async fn create_directory<B: StorageBackend>(
    backend: &B,
    container: &NodeOf<B>,
    path: &str,
    exclusive: bool,
) -> Result<NodeOf<B>> {
    let flags = ResolveFlags {
        create: true,
        exclusive,
    };
    resolve_directory(backend, container, path, flags).await
}

/// Immediate children, sorted by name.
pub async fn read_directory<B: StorageBackend>(
    backend: &B,
    container: &NodeOf<B>,
    path: &str,
) -> Result<Vec<NodeOf<B>>> {
    let dir = resolve_directory(backend, container, path, ResolveFlags::EXISTING).await?;
    list_entries(backend, &dir).await
}

/// Move the directory at `src_path` into the directory at `dest_path`.
pub async fn move_directory<B: StorageBackend>(
    backend: &B,
    container: &NodeOf<B>,
    src_path: &str,
    dest_path: &str,
    flags: TransferFlags,
) -> Result<()> {
    let src = resolve_directory(backend, container, src_path, ResolveFlags::EXISTING).await?;
    ensure_outside_container(backend, container, &src).map_err(op_failed("move entry"))?;
    let dest = destination_directory(backend, container, &src, dest_path, src.name(), &flags).await?;
    move_entry(backend, &src, &dest, None).await
}

/// Copy the tree at `src_path` into the directory at `dest_path`.
pub async fn copy_directory<B: StorageBackend>(
    backend: &B,
    container: &NodeOf<B>,
    src_path: &str,
    dest_path: &str,
    flags: TransferFlags,
) -> Result<()> {
    let src = resolve_directory(backend, container, src_path, ResolveFlags::EXISTING).await?;
    let dest = destination_directory(backend, container, &src, dest_path, src.name(), &flags).await?;
    copy_entry(backend, &src, &dest, None).await
}

/// `flags.recursive` takes the contents along; `flags.force` makes a missing
/// directory a no-op. The bound root (`""`, `"."`) and its ancestors are refused.
pub async fn remove_directory<B: StorageBackend>(
    backend: &B,
    container: &NodeOf<B>,
    path: &str,
    flags: RemoveDirectoryFlags,
) -> Result<()> {
    let node = match resolve_directory(backend, container, path, ResolveFlags::EXISTING).await {
        Ok(node) => node,
        Err(e) if flags.force && e.is_not_found() => {
            debug!(path, "Nothing to remove");
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    ensure_outside_container(backend, container, &node).map_err(op_failed("remove directory entry"))?;
    remove_directory_entry(backend, &node, Removal::from(flags)).await
}
