//! File operations relative to a container.

use tracing::debug;

use super::arbiter::{destination_directory, ensure_outside_container};
use super::format::FileFormat;
use super::resolve::{resolve_file, resolve_non_directory};
use super::transfer::{copy_entry, move_entry, read_file_entry, remove_file_entry, write_file_entry};
use crate::backend::{NodeOf, StorageBackend};
use crate::errors::{op_failed, Result};
use crate::flags::{RemoveFileFlags, ResolveFlags, TransferFlags, WriteOptions};
use crate::path::{basename, dirname, normalize};

/// Write `data` to the file at `path` and return its node.
pub async fn write_file<B: StorageBackend>(
    backend: &B,
    container: &NodeOf<B>,
    path: &str,
    data: &str,
    opts: WriteOptions,
) -> Result<NodeOf<B>> {
    let node = resolve_file(backend, container, path, opts.resolve_flags()).await?;
    write_file_entry(backend, &node, data, opts.format).await?;
    Ok(node)
}

pub async fn read_file<B: StorageBackend>(
    backend: &B,
    container: &NodeOf<B>,
    path: &str,
    format: FileFormat,
) -> Result<String> {
    let node = resolve_file(backend, container, path, ResolveFlags::EXISTING).await?;
    read_file_entry(backend, &node, format).await
}

/// Move the file at `src_path` to `dest_path`.
///
/// The destination's last segment is the new file name; a destination ending in
/// `/` (or `..`) names a directory and the file keeps its name.
pub async fn move_file<B: StorageBackend>(
    backend: &B,
    container: &NodeOf<B>,
    src_path: &str,
    dest_path: &str,
    flags: TransferFlags,
) -> Result<()> {
    let src = resolve_file(backend, container, src_path, ResolveFlags::EXISTING).await?;
    let (dest_dir, name) = split_destination(dest_path, src.name());
    let dest = destination_directory(backend, container, &src, &dest_dir, &name, &flags).await?;
    move_entry(backend, &src, &dest, Some(&name)).await
}

/// Copy the file at `src_path` to `dest_path`; naming as for `move_file`.
pub async fn copy_file<B: StorageBackend>(
    backend: &B,
    container: &NodeOf<B>,
    src_path: &str,
    dest_path: &str,
    flags: TransferFlags,
) -> Result<()> {
    let src = resolve_file(backend, container, src_path, ResolveFlags::EXISTING).await?;
    let (dest_dir, name) = split_destination(dest_path, src.name());
    let dest = destination_directory(backend, container, &src, &dest_dir, &name, &flags).await?;
    copy_entry(backend, &src, &dest, Some(&name)).await
}

/// Remove a file, or a special entry such as a dangling symlink.
/// With `flags.force` a missing path is not an error.
pub async fn remove_file<B: StorageBackend>(
    backend: &B,
    container: &NodeOf<B>,
    path: &str,
    flags: RemoveFileFlags,
) -> Result<()> {
    let node = match resolve_non_directory(backend, container, path).await {
        Ok(node) => node,
        Err(e) if flags.force && e.is_not_found() => {
            debug!(path, "Nothing to remove");
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    ensure_outside_container(backend, container, &node).map_err(op_failed("remove file entry"))?;
    remove_file_entry(backend, &node).await
}

/// Normalize first, then split into (directory, entry name).
pub(super) fn split_destination(dest_path: &str, fallback: &str) -> (String, String) {
    let dest = normalize(dest_path);
    match basename(&dest, None) {
        "" | ".." => (dest.clone(), fallback.to_string()),
        name => (dirname(&dest).to_string(), name.to_string()),
    }
}
