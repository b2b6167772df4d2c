//! Move/copy for an entry of any kind.
//!
//! The source's kind picks the destination rule: a directory lands inside
//! `dest_path` under its own name, anything else takes the destination's last
//! segment as its new name (see `file::move_file`).

use super::arbiter::{destination_directory, ensure_outside_container};
use super::file::split_destination;
use super::resolve::resolve_entry;
use super::transfer::{copy_entry, move_entry};
use crate::backend::{NodeOf, StorageBackend};
use crate::errors::{op_failed, Result};
use crate::flags::TransferFlags;

/// Move whatever is at `src_path`.
pub async fn move_path<B: StorageBackend>(
    backend: &B,
    container: &NodeOf<B>,
    src_path: &str,
    dest_path: &str,
    flags: TransferFlags,
) -> Result<()> {
    let src = resolve_entry(backend, container, src_path).await?;
    ensure_outside_container(backend, container, &src).map_err(op_failed("move entry"))?;
    let (dest, name) = place(backend, container, &src, dest_path, &flags).await?;
    move_entry(backend, &src, &dest, name.as_deref()).await
}

/// Copy whatever is at `src_path` (a whole tree for directories).
pub async fn copy_path<B: StorageBackend>(
    backend: &B,
    container: &NodeOf<B>,
    src_path: &str,
    dest_path: &str,
    flags: TransferFlags,
) -> Result<()> {
    let src = resolve_entry(backend, container, src_path).await?;
    let (dest, name) = place(backend, container, &src, dest_path, &flags).await?;
    copy_entry(backend, &src, &dest, name.as_deref()).await
}

/// Destination directory plus the rename to apply, if any.
async fn place<B: StorageBackend>(
    backend: &B,
    container: &NodeOf<B>,
    src: &NodeOf<B>,
    dest_path: &str,
    flags: &TransferFlags,
) -> Result<(NodeOf<B>, Option<String>)> {
    if src.is_directory() {
        let dest = destination_directory(backend, container, src, dest_path, src.name(), flags).await?;
        return Ok((dest, None));
    }
    let (dest_dir, name) = split_destination(dest_path, src.name());
    let dest = destination_directory(backend, container, src, &dest_dir, &name, flags).await?;
    Ok((dest, Some(name)))
}
