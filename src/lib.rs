//! Core library for `fs_manager`.
//!
//! Directory and file operations (create, read, write, move, copy, remove) against a
//! root directory, reached through an async `StorageBackend`. Moves and copies may
//! `force` their way past an occupied destination: the conflicting entry is evicted
//! first. Paths are `/`-separated strings resolved lexically (see `path`).
//!
//! ```no_run
//! use fs_manager::{FileFormat, FileSystemManager, LocalBackend, RootSelector, TransferFlags};
//!
//! # async fn demo() -> fs_manager::Result<()> {
//! let fsm = FileSystemManager::new(LocalBackend::new(), &RootSelector::Path("/srv/files".into())).await?;
//! fsm.write_file("notes/todo.txt", "hello", FileFormat::Text).await?;
//! fsm.copy_file("notes/todo.txt", "archive/todo.txt", TransferFlags { create: true, ..Default::default() }).await?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod cli;
pub mod config;
pub mod errors;
pub mod flags;
pub mod fs_ops;
pub mod manager;
pub mod node;
pub mod output;
pub mod path;
pub mod platform;

pub use backend::{LocalBackend, NodeOf, RootSelector, StorageArea, StorageBackend};
pub use config::{default_config_path, default_log_path, path_has_symlink_ancestor, Config, LogLevel, CONFIG_ENV};
pub use errors::{FsError, FsErrorKind, Result};
pub use flags::{RemoveDirectoryFlags, RemoveFileFlags, Removal, ResolveFlags, TransferFlags, WriteOptions};
pub use fs_ops::FileFormat;
pub use manager::FileSystemManager;
pub use node::{Metadata, Node, NodeKind};
