//! I/O error adapters for the local backend.
//!
//! Converts `io::Error` into a kind-preserving `FsError` whose message names the
//! operation and path and adds a platform-aware hint.
//!
//! Usage:
//!   // in functions returning fs_manager::Result<_>
//!   tokio::fs::create_dir_all(dir).await.map_err(io_error_with_help("create directory", dir))?;
//!
//!   // in blocking helpers returning io::Result<_>
//!   std::fs::copy(src, dst).map_err(io_error_with_help_io("copy file", dst))?;

use std::io;
use std::path::Path;

use crate::errors::FsError;

/// Format a human-friendly message with op/path plus platform-aware hints.
fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            match code {
                libc::EACCES | libc::EPERM => {
                    msg.push_str("; permission denied; check ownership and write permissions.");
                }
                libc::EXDEV => {
                    msg.push_str("; cross-filesystem; atomic rename not possible.");
                }
                libc::EBUSY => {
                    msg.push_str("; resource busy; ensure no other process is writing.");
                }
                libc::ENOENT => {
                    msg.push_str("; path not found; verify it exists.");
                }
                libc::EEXIST => {
                    msg.push_str("; already exists; use force or remove the target.");
                }
                libc::ENOTEMPTY => {
                    msg.push_str("; directory not empty; remove recursively.");
                }
                libc::ENOSPC => {
                    msg.push_str("; insufficient space on device.");
                }
                libc::EROFS => {
                    msg.push_str("; read-only filesystem; cannot write here.");
                }
                libc::ELOOP => {
                    msg.push_str("; too many symbolic link levels (ELOOP); possible symlink cycle.");
                }
                libc::ENAMETOOLONG => {
                    msg.push_str("; filename or path too long; shorten path segments.");
                }
                _ => {}
            }
        }
        #[cfg(windows)]
        {
            match code {
                5 => msg.push_str("; access denied; check permissions."), // ERROR_ACCESS_DENIED
                17 => msg.push_str("; not same device; cross-filesystem move."), // ERROR_NOT_SAME_DEVICE
                32 => msg.push_str("; sharing violation; file is in use."), // ERROR_SHARING_VIOLATION
                2 | 3 => msg.push_str("; path not found; verify it exists."), // FILE/ PATH NOT FOUND
                80 | 183 => msg.push_str("; already exists; use force or remove the target."),
                145 => msg.push_str("; directory not empty; remove recursively."), // ERROR_DIR_NOT_EMPTY
                112 => msg.push_str("; insufficient disk space."), // ERROR_DISK_FULL
                _ => {}
            }
        }
        msg.push_str(&format!(" [os code: {}]", code));
    } else {
        match e.kind() {
            io::ErrorKind::PermissionDenied => {
                msg.push_str("; permission denied; check ownership and write permissions.");
            }
            io::ErrorKind::NotFound => {
                msg.push_str("; path not found; verify it exists.");
            }
            io::ErrorKind::AlreadyExists => {
                msg.push_str("; already exists; use force or remove the target.");
            }
            _ => {}
        }
    }

    msg
}

/// Map an io::Error onto the error taxonomy, keeping the enriched message.
fn classify(op: &str, path: &Path, e: io::Error) -> FsError {
    let message = build_message(op, path, &e);
    match e.kind() {
        io::ErrorKind::NotFound => FsError::NotFound(message),
        io::ErrorKind::AlreadyExists => FsError::AlreadyExists(message),
        io::ErrorKind::PermissionDenied => FsError::PermissionDenied(message),
        io::ErrorKind::DirectoryNotEmpty => FsError::NotEmpty(message),
        io::ErrorKind::NotADirectory | io::ErrorKind::IsADirectory => FsError::TypeMismatch(message),
        _ => FsError::Io { message, source: e },
    }
}

/// EXDEV / ERROR_NOT_SAME_DEVICE: a rename cannot cross filesystems.
pub(super) fn is_cross_device(e: &io::Error) -> bool {
    match e.raw_os_error() {
        #[cfg(unix)]
        Some(code) => code == libc::EXDEV,
        #[cfg(windows)]
        Some(code) => code == 17,
        #[cfg(not(any(unix, windows)))]
        Some(_) => false,
        None => false,
    }
}

/// Returns a closure suitable for `.map_err(...)` that converts io::Error -> FsError.
pub fn io_error_with_help<'a>(op: &'a str, path: &'a Path) -> impl FnOnce(io::Error) -> FsError + 'a {
    move |e: io::Error| classify(op, path, e)
}

/// Adapter for io::Result code: enriches the message while preserving the ErrorKind.
pub fn io_error_with_help_io<'a>(op: &'a str, path: &'a Path) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| io::Error::new(e.kind(), build_message(op, path, &e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FsErrorKind;

    #[test]
    fn not_found_maps_kind_and_names_path() {
        let p = Path::new("/nonexistent/path/for/test");
        let err = io_error_with_help("open", p)(io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(err.kind(), FsErrorKind::NotFound);
        let msg = err.to_string();
        assert!(msg.contains("open"));
        assert!(msg.contains("/nonexistent/path/for/test"));
        assert!(msg.contains("path not found"));
    }

    #[test]
    fn directory_not_empty_maps_to_not_empty() {
        let err = io_error_with_help("remove", Path::new("/d"))(io::Error::from(io::ErrorKind::DirectoryNotEmpty));
        assert_eq!(err.kind(), FsErrorKind::NotEmpty);
    }

    #[test]
    fn other_errors_stay_io() {
        let err = io_error_with_help("write", Path::new("/x"))(io::Error::other("disk on fire"));
        assert_eq!(err.kind(), FsErrorKind::Io);
        assert!(err.to_string().contains("disk on fire"));
    }

    #[cfg(unix)]
    #[test]
    fn raw_os_hints_present() {
        let err = io_error_with_help("write", Path::new("/tmp"))(io::Error::from_raw_os_error(libc::ENOSPC));
        let msg = err.to_string();
        assert!(msg.contains("insufficient space"), "msg was: {msg}");
        assert!(msg.contains("os code"));
    }

    #[test]
    fn io_adapter_preserves_kind() {
        let wrapped = io_error_with_help_io("create", Path::new("/tmp/t.txt"))(io::Error::from(io::ErrorKind::AlreadyExists));
        assert_eq!(wrapped.kind(), io::ErrorKind::AlreadyExists);
        assert!(wrapped.to_string().contains("already exists"));
    }
}
