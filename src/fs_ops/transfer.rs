//! Single-node primitives over the backend.
//! Each is one backend call; a failure comes back prefixed with the operation
//! name and is never retried or rolled back.

use tracing::{debug, info};

use super::format::{self, FileFormat};
use crate::backend::{NodeOf, StorageBackend};
use crate::errors::{op_failed, Result};
use crate::flags::Removal;
use crate::node::Metadata;

/// Move `src` into `dest_dir`, optionally renaming it on the way.
pub async fn move_entry<B: StorageBackend>(
    backend: &B,
    src: &NodeOf<B>,
    dest_dir: &NodeOf<B>,
    new_name: Option<&str>,
) -> Result<()> {
    backend
        .move_node(src, dest_dir, new_name)
        .await
        .map_err(op_failed("move entry"))?;
    info!(
        src = %src.locator(),
        dest = %dest_dir.locator(),
        name = new_name.unwrap_or(src.name()),
        "Moved entry"
    );
    Ok(())
}

/// Copy `src` (recursively for directories) into `dest_dir`.
pub async fn copy_entry<B: StorageBackend>(
    backend: &B,
    src: &NodeOf<B>,
    dest_dir: &NodeOf<B>,
    new_name: Option<&str>,
) -> Result<()> {
    backend
        .copy_node(src, dest_dir, new_name)
        .await
        .map_err(op_failed("copy entry"))?;
    info!(
        src = %src.locator(),
        dest = %dest_dir.locator(),
        name = new_name.unwrap_or(src.name()),
        "Copied entry"
    );
    Ok(())
}

pub async fn remove_file_entry<B: StorageBackend>(backend: &B, node: &NodeOf<B>) -> Result<()> {
    backend
        .remove_node(node, Removal::Entry)
        .await
        .map_err(op_failed("remove file entry"))?;
    info!(path = %node.locator(), "Removed file");
    Ok(())
}

/// `Removal::Entry` leaves emptiness checks to the backend.
pub async fn remove_directory_entry<B: StorageBackend>(backend: &B, node: &NodeOf<B>, removal: Removal) -> Result<()> {
    backend
        .remove_node(node, removal)
        .await
        .map_err(op_failed("remove directory entry"))?;
    info!(path = %node.locator(), ?removal, "Removed directory");
    Ok(())
}

pub async fn read_file_entry<B: StorageBackend>(backend: &B, node: &NodeOf<B>, format: FileFormat) -> Result<String> {
    let bytes = backend
        .read_bytes(node)
        .await
        .map_err(op_failed("read file entry"))?;
    debug!(path = %node.locator(), bytes = bytes.len(), %format, "Read file");
    format::decode(bytes, format, node.name())
}

pub async fn write_file_entry<B: StorageBackend>(
    backend: &B,
    node: &NodeOf<B>,
    data: &str,
    format: FileFormat,
) -> Result<()> {
    let bytes = format::encode(data, format)?;
    backend
        .write_bytes(node, &bytes)
        .await
        .map_err(op_failed("write file entry"))?;
    debug!(path = %node.locator(), bytes = bytes.len(), %format, "Wrote file");
    Ok(())
}

pub async fn list_entries<B: StorageBackend>(backend: &B, dir: &NodeOf<B>) -> Result<Vec<NodeOf<B>>> {
    backend.list_children(dir).await.map_err(op_failed("read directory"))
}

pub async fn entry_metadata<B: StorageBackend>(backend: &B, node: &NodeOf<B>, recursive: bool) -> Result<Metadata> {
    backend
        .metadata(node, recursive)
        .await
        .map_err(op_failed("get entry info"))
}

pub async fn parent_entry<B: StorageBackend>(backend: &B, node: &NodeOf<B>) -> Result<NodeOf<B>> {
    backend.parent(node).await.map_err(op_failed("get parent entry"))
}
