//! Destination arbitration for move/copy.
//!
//! Resolves the destination directory and, under `force`, clears whatever
//! occupies the slot the transfer will land in. Check, evict and transfer are
//! separate backend calls and are not atomic: if another writer refills the slot
//! in between, the transfer itself fails `AlreadyExists`.

use tracing::{debug, info};

use super::resolve::resolve_directory;
use super::transfer::{remove_directory_entry, remove_file_entry};
use crate::backend::{NodeOf, StorageBackend};
use crate::errors::{FsError, Result};
use crate::flags::{Removal, TransferFlags};

/// Directory `src` should be moved or copied into.
///
/// `slot_name` is the name the entry will carry at the destination. With
/// `flags.force`, any node already at `<dest>/<slot_name>` is removed first: a
/// file as a single entry, anything else as a whole tree. The bound container
/// and its ancestors are never evicted.
pub async fn destination_directory<B: StorageBackend>(
    backend: &B,
    container: &NodeOf<B>,
    src: &NodeOf<B>,
    dest_path: &str,
    slot_name: &str,
    flags: &TransferFlags,
) -> Result<NodeOf<B>> {
    let dest = resolve_directory(backend, container, dest_path, flags.resolve_flags()).await?;
    if !flags.force {
        return Ok(dest);
    }
    if src.is_directory() && (dest.handle() == src.handle() || backend.contains(src, &dest)) {
        return Err(FsError::InvalidPath(format!(
            "cannot place '{}' inside itself",
            src.locator()
        )));
    }

    let occupant = match backend.child(&dest, slot_name).await {
        Ok(node) => node,
        Err(e) if e.is_not_found() => {
            debug!(dest = %dest.locator(), slot = slot_name, "Landing slot is free");
            return Ok(dest);
        }
        Err(e) => return Err(e),
    };

    evict(backend, container, src, &occupant).await?;
    Ok(dest)
}

async fn evict<B: StorageBackend>(
    backend: &B,
    container: &NodeOf<B>,
    src: &NodeOf<B>,
    occupant: &NodeOf<B>,
) -> Result<()> {
    if occupant.handle() == src.handle() {
        debug!(slot = %occupant.locator(), "Source already sits in the landing slot; nothing to evict");
        return Ok(());
    }
    if backend.contains(occupant, src) {
        return Err(FsError::InvalidPath(format!(
            "'{}' lies inside '{}'; refusing to evict it",
            src.locator(),
            occupant.locator()
        )));
    }
    ensure_outside_container(backend, container, occupant)?;

    if occupant.is_file() {
        remove_file_entry(backend, occupant).await?;
    } else {
        remove_directory_entry(backend, occupant, Removal::Tree).await?;
    }
    info!(slot = %occupant.locator(), kind = %occupant.kind(), "Evicted existing entry");
    Ok(())
}

/// Refuse to touch the bound container or anything that holds it.
pub(crate) fn ensure_outside_container<B: StorageBackend>(
    backend: &B,
    container: &NodeOf<B>,
    node: &NodeOf<B>,
) -> Result<()> {
    if node.handle() == container.handle() || backend.contains(node, container) {
        return Err(FsError::InvalidPath(format!(
            "'{}' is or contains the bound root",
            node.locator()
        )));
    }
    Ok(())
}
