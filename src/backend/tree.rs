//! Blocking directory-tree helpers for the local backend.
//! Run these on `spawn_blocking`; they walk with walkdir and copy files in parallel.

use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::helpers::io_error_with_help_io;

/// Copy the tree rooted at `src` to `dest` (which must not exist yet).
///
/// Directories are created in walk order and symlinks recreated as links (never
/// followed), then regular files are copied in parallel. Any walk error, or an
/// entry that is none of those (fifo, socket, device), fails the whole copy and
/// the partial `dest` is removed again.
pub(super) fn copy_tree(src: &Path, dest: &Path) -> io::Result<()> {
    fs::create_dir(dest).map_err(io_error_with_help_io("create directory", dest))?;
    copy_contents(src, dest).inspect_err(|_| {
        let _ = fs::remove_dir_all(dest);
    })
}

fn copy_contents(src: &Path, dest: &Path) -> io::Result<()> {
    let mut files: Vec<(PathBuf, PathBuf)> = Vec::new();
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.map_err(io::Error::from)?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let target = dest.join(rel);
        let ftype = entry.file_type();
        if ftype.is_dir() {
            fs::create_dir(&target).map_err(io_error_with_help_io("create directory", &target))?;
        } else if ftype.is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else if ftype.is_file() {
            files.push((entry.into_path(), target));
        } else {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                format!("cannot copy special entry '{}'", entry.path().display()),
            ));
        }
    }

    files.par_iter().try_for_each(|(from, to)| -> io::Result<()> {
        fs::copy(from, to).map_err(io_error_with_help_io("copy file to destination", to))?;
        Ok(())
    })
}

#[cfg(unix)]
fn copy_symlink(link: &Path, target: &Path) -> io::Result<()> {
    let points_to = fs::read_link(link).map_err(io_error_with_help_io("read symlink", link))?;
    std::os::unix::fs::symlink(&points_to, target).map_err(io_error_with_help_io("create symlink", target))
}

#[cfg(windows)]
fn copy_symlink(link: &Path, target: &Path) -> io::Result<()> {
    use std::os::windows::fs::{symlink_dir, symlink_file};

    let points_to = fs::read_link(link).map_err(io_error_with_help_io("read symlink", link))?;
    // Dangling links are recreated as file links.
    let to_dir = fs::metadata(link).map(|m| m.is_dir()).unwrap_or(false);
    let made = if to_dir {
        symlink_dir(&points_to, target)
    } else {
        symlink_file(&points_to, target)
    };
    made.map_err(io_error_with_help_io("create symlink", target))
}

#[cfg(not(any(unix, windows)))]
fn copy_symlink(link: &Path, _target: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        format!("cannot copy symlink '{}' on this platform", link.display()),
    ))
}

/// Totals gathered by `measure_tree`.
#[derive(Debug, Default)]
pub(super) struct TreeTotals {
    pub size: u64,
    pub files: u64,
    pub directories: u64,
}

/// Count files/directories and sum file sizes below `dir`.
/// Without `recursive` only immediate children are visited.
pub(super) fn measure_tree(dir: &Path, recursive: bool) -> io::Result<TreeTotals> {
    let mut walker = WalkDir::new(dir).min_depth(1);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut totals = TreeTotals::default();
    for entry in walker {
        let entry = entry.map_err(io::Error::from)?;
        let ftype = entry.file_type();
        if ftype.is_dir() {
            totals.directories += 1;
        } else if ftype.is_file() {
            totals.files += 1;
            totals.size += entry.metadata().map_err(io::Error::from)?.len();
        }
    }
    Ok(totals)
}
