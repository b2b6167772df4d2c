//! Per-operation option records.

use crate::fs_ops::format::FileFormat;

/// How a path is turned into a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveFlags {
    /// Create the node (and missing parents) when absent.
    pub create: bool,
    /// With `create`: fail if the node already exists.
    pub exclusive: bool,
}

impl ResolveFlags {
    /// Resolve an existing node only.
    pub const EXISTING: Self = Self {
        create: false,
        exclusive: false,
    };

    /// Resolve, creating when absent.
    pub const CREATE: Self = Self {
        create: true,
        exclusive: false,
    };

    /// Create; fail when something is already there.
    pub const CREATE_NEW: Self = Self {
        create: true,
        exclusive: true,
    };
}

/// Options for move/copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferFlags {
    /// Create the destination directory when absent.
    pub create: bool,
    /// With `create`: the destination directory must not exist yet.
    pub exclusive: bool,
    /// Evict whatever occupies the landing slot before transferring.
    pub force: bool,
}

impl TransferFlags {
    pub fn forced() -> Self {
        Self {
            force: true,
            ..Self::default()
        }
    }

    /// Flags used to resolve the destination directory.
    pub fn resolve_flags(&self) -> ResolveFlags {
        ResolveFlags {
            create: self.create,
            exclusive: self.exclusive,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemoveFileFlags {
    /// A path that does not exist is not an error.
    pub force: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemoveDirectoryFlags {
    /// Remove children too; otherwise a non-empty directory fails.
    pub recursive: bool,
    /// A path that does not exist is not an error.
    pub force: bool,
}

/// How much a backend removal takes with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The node alone; a non-empty directory fails.
    Entry,
    /// The node and everything below it.
    Tree,
}

impl From<RemoveDirectoryFlags> for Removal {
    fn from(flags: RemoveDirectoryFlags) -> Self {
        if flags.recursive { Removal::Tree } else { Removal::Entry }
    }
}

/// Options for `write_file`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    pub format: FileFormat,
    pub create: bool,
    pub exclusive: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            format: FileFormat::Text,
            create: true,
            exclusive: false,
        }
    }
}

impl WriteOptions {
    pub fn resolve_flags(&self) -> ResolveFlags {
        ResolveFlags {
            create: self.create,
            exclusive: self.exclusive,
        }
    }
}

/// A bare format means "create if missing, write in this format".
impl From<FileFormat> for WriteOptions {
    fn from(format: FileFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }
}
