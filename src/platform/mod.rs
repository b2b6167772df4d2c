//! Platform-specific helpers for the config and log files.
//! Hides Unix/Windows differences (file modes, atomic replace) behind one API.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod windows;

#[cfg(unix)]
pub use unix::{open_log_file_secure_append, set_dir_mode_0700, write_config_secure_new_0600};

#[cfg(not(unix))]
pub use windows::{open_log_file_secure_append, set_dir_mode_0700, write_config_secure_new_0600};

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Unique hidden sibling used for write-then-rename.
/// Pattern: .fs_manager.config.tmp.<pid>.<nanos>.<seq>
fn tmp_config_sibling_name(target: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    let name = format!(".fs_manager.config.tmp.{pid}.{nanos}.{seq}");
    target.parent().unwrap_or_else(|| Path::new(".")).join(name)
}
