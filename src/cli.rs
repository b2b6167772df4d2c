//! CLI definition and parsing.
//! Defines Args (global flags plus one subcommand per facade operation).
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug.
//! - --root / --area override the root named in config.xml.

use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::backend::StorageArea;
use crate::config::types::{Config, LogLevel};
use crate::flags::{RemoveDirectoryFlags, RemoveFileFlags, TransferFlags, WriteOptions};
use crate::fs_ops::FileFormat;

/// CLI over the fs_manager library.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Root-bound file and directory operations")]
pub struct Args {
    /// Directory every path is relative to (overrides config).
    #[arg(long, global = true, value_hint = ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Storage area to bind when no root directory is given.
    #[arg(
        long,
        global = true,
        help = "Storage area: private_www, private_doc, public_documents, public_downloads"
    )]
    pub area: Option<StorageArea>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        global = true,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, global = true, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Print where fs_manager will look for the config file, then exit.
    #[arg(long, help = "Print the config file location used by fs_manager and exit")]
    pub print_config: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create a directory (and missing parents).
    Mkdir {
        path: String,
        /// Fail if something already exists there.
        #[arg(long)]
        exclusive: bool,
    },
    /// List a directory (the root when PATH is omitted).
    Ls {
        #[arg(default_value = "")]
        path: String,
        /// Show kind and size.
        #[arg(short = 'l', long)]
        long: bool,
    },
    /// Print a file's contents.
    Read {
        path: String,
        #[arg(long, default_value = "text")]
        format: FileFormat,
    },
    /// Write DATA to a file, creating it if missing.
    Write {
        path: String,
        data: String,
        #[arg(long, default_value = "text")]
        format: FileFormat,
        /// Fail if the file already exists.
        #[arg(long)]
        exclusive: bool,
        /// Only overwrite an existing file.
        #[arg(long)]
        no_create: bool,
    },
    /// Move a file (DEST names the new file) or a directory (DEST is the parent).
    Mv {
        src: String,
        dest: String,
        #[command(flatten)]
        transfer: TransferArgs,
    },
    /// Copy a file (DEST names the new file) or a directory tree (DEST is the parent).
    Cp {
        src: String,
        dest: String,
        #[command(flatten)]
        transfer: TransferArgs,
    },
    /// Remove a file.
    Rm {
        path: String,
        /// A missing file is not an error.
        #[arg(short, long)]
        force: bool,
    },
    /// Remove a directory.
    Rmdir {
        path: String,
        /// Remove contents too.
        #[arg(short, long)]
        recursive: bool,
        /// A missing directory is not an error.
        #[arg(short, long)]
        force: bool,
    },
    /// Show size, modification time and child counts.
    Stat {
        path: String,
        /// Count all descendants of a directory, not just its children.
        #[arg(short, long)]
        recursive: bool,
    },
    /// Lexical path helpers (no storage access).
    #[command(subcommand)]
    Path(PathCommand),
}

#[derive(Subcommand, Debug, Clone)]
pub enum PathCommand {
    Normalize { path: String },
    Join {
        #[arg(required = true)]
        segments: Vec<String>,
    },
    Dirname { path: String },
    Basename {
        path: String,
        /// Extension to strip, with or without its dot.
        #[arg(long)]
        ext: Option<String>,
    },
    Extname { path: String },
}

/// Flags shared by `mv` and `cp`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct TransferArgs {
    /// Replace whatever already occupies the destination slot.
    #[arg(short, long)]
    pub force: bool,
    /// Create the destination directory if missing.
    #[arg(long)]
    pub create: bool,
    /// With --create: the destination directory must not exist yet.
    #[arg(long, requires = "create")]
    pub exclusive: bool,
}

impl From<&TransferArgs> for TransferFlags {
    fn from(a: &TransferArgs) -> Self {
        TransferFlags {
            create: a.create,
            exclusive: a.exclusive,
            force: a.force,
        }
    }
}

impl Command {
    /// Write options for `write`; None for other subcommands.
    pub fn write_options(&self) -> Option<WriteOptions> {
        match self {
            Command::Write {
                format,
                exclusive,
                no_create,
                ..
            } => Some(WriteOptions {
                format: *format,
                create: !no_create,
                exclusive: *exclusive,
            }),
            _ => None,
        }
    }

    pub fn remove_file_flags(&self) -> Option<RemoveFileFlags> {
        match self {
            Command::Rm { force, .. } => Some(RemoveFileFlags { force: *force }),
            _ => None,
        }
    }

    pub fn remove_directory_flags(&self) -> Option<RemoveDirectoryFlags> {
        match self {
            Command::Rmdir { recursive, force, .. } => Some(RemoveDirectoryFlags {
                recursive: *recursive,
                force: *force,
            }),
            _ => None,
        }
    }
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// True when the command line names a root on its own.
    pub fn has_root_override(&self) -> bool {
        self.root.is_some() || self.area.is_some()
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    /// A CLI area replaces a configured path, since the CLI wins.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(root) = &self.root {
            cfg.root_path = Some(root.clone());
        } else if self.area.is_some() {
            cfg.root_path = None;
        }
        if let Some(area) = self.area {
            cfg.root_area = Some(area);
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
