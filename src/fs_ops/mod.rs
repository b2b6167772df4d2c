//! Filesystem operations over a `StorageBackend`.
//! Every function takes the backend and a container node explicitly; the
//! `FileSystemManager` facade binds both once.

pub mod arbiter;
pub mod directory;
pub mod entry;
pub mod file;
pub mod format;
pub mod resolve;
pub mod transfer;

pub use arbiter::destination_directory;
pub use directory::{copy_directory, create_directory, move_directory, read_directory, remove_directory};
pub use entry::{copy_path, move_path};
pub use file::{copy_file, move_file, read_file, remove_file, write_file};
pub use format::FileFormat;
pub use resolve::{resolve_directory, resolve_entry, resolve_file, resolve_non_directory};
