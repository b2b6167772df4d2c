//! Default path helpers and symlink checks.
//! Determines OS-appropriate config/log paths and detects symlinked ancestors for safety.

use dirs::{config_dir, data_dir};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "FS_MANAGER_CONFIG";

const APP_DIR: &str = "fs_manager";

/// Config file location: `$FS_MANAGER_CONFIG` when set and non-empty, else the
/// OS config directory.
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(p));
    }
    if let Some(base) = config_dir() {
        return Some(base.join(APP_DIR).join("config.xml"));
    }
    env::var_os("HOME").map(|h| PathBuf::from(h).join(".config").join(APP_DIR).join("config.xml"))
}

/// OS-appropriate default log file path (data dir).
pub fn default_log_path() -> Option<PathBuf> {
    if let Some(base) = data_dir() {
        return Some(base.join(APP_DIR).join("fs_manager.log"));
    }
    env::var_os("HOME").map(|h| {
        PathBuf::from(h)
            .join(".local")
            .join("share")
            .join(APP_DIR)
            .join("fs_manager.log")
    })
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}
