//! Core configuration types.
//! - Config names the root to bind and where logs go.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::paths;
use crate::backend::{RootSelector, StorageArea};

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Completed operations (default)
    #[default]
    Normal,
    /// Adds resolution and read/write detail
    Info,
    /// Everything
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration for the `fs_manager` binary and `FileSystemManager::from_config`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Explicit root directory; wins over `root_area` when both are set
    pub root_path: Option<PathBuf>,
    /// Well-known storage area to bind when no path is given
    pub root_area: Option<StorageArea>,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_path: None,
            root_area: None,
            log_level: LogLevel::Normal,
            log_file: paths::default_log_path(),
        }
    }
}

impl Config {
    /// Config bound to an explicit directory; other fields use defaults.
    pub fn with_root(path: impl Into<PathBuf>) -> Self {
        Self {
            root_path: Some(path.into()),
            ..Default::default()
        }
    }

    /// Config bound to a storage area; other fields use defaults.
    pub fn with_area(area: StorageArea) -> Self {
        Self {
            root_area: Some(area),
            ..Default::default()
        }
    }

    /// Which root this config selects. Neither path nor area is `MissingConfiguration`.
    pub fn root_selector(&self) -> crate::Result<RootSelector> {
        RootSelector::from_parts(self.root_path.clone(), self.root_area)
    }
}
