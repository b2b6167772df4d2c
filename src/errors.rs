//! Typed error definitions for fs_manager.
//! Every failure belongs to a small, stable taxonomy (`FsErrorKind`). Faults coming
//! back from a storage backend are wrapped with a short operation prefix at the
//! call site (`FsError::Op`), so a caller sees e.g. `move entry failed: ...` while
//! `kind()` still reports the underlying `AlreadyExists`.

use std::fmt;
use std::io;
use thiserror::Error;

use crate::node::NodeKind;

pub type Result<T, E = FsError> = std::result::Result<T, E>;

/// Classification of an `FsError`, independent of any operation prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FsErrorKind {
    NotFound,
    AlreadyExists,
    TypeMismatch,
    InvalidFormat,
    InvalidPath,
    InvalidData,
    NotEmpty,
    PermissionDenied,
    Io,
    MissingConfiguration,
}

impl FsErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FsErrorKind::NotFound => "not_found",
            FsErrorKind::AlreadyExists => "already_exists",
            FsErrorKind::TypeMismatch => "type_mismatch",
            FsErrorKind::InvalidFormat => "invalid_format",
            FsErrorKind::InvalidPath => "invalid_path",
            FsErrorKind::InvalidData => "invalid_data",
            FsErrorKind::NotEmpty => "not_empty",
            FsErrorKind::PermissionDenied => "permission_denied",
            FsErrorKind::Io => "io",
            FsErrorKind::MissingConfiguration => "missing_configuration",
        }
    }
}

impl fmt::Display for FsErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum FsError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    TypeMismatch(String),

    #[error("unknown format: {0}")]
    InvalidFormat(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("{0}")]
    NotEmpty(String),

    #[error("{0}")]
    PermissionDenied(String),

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
    },

    #[error("type or path is required")]
    MissingConfiguration,

    /// A failure re-raised with the name of the operation that hit it.
    #[error("{op} failed: {source}")]
    Op {
        op: &'static str,
        #[source]
        source: Box<FsError>,
    },
}

impl FsError {
    pub fn not_found(path: impl fmt::Display) -> Self {
        FsError::NotFound(format!("'{path}': no such file or directory"))
    }

    pub fn already_exists(path: impl fmt::Display) -> Self {
        FsError::AlreadyExists(format!("'{path}': already exists"))
    }

    pub fn type_mismatch(path: impl fmt::Display, expected: NodeKind) -> Self {
        FsError::TypeMismatch(format!("'{path}' is not a {expected}"))
    }

    pub fn not_empty(path: impl fmt::Display) -> Self {
        FsError::NotEmpty(format!("'{path}': directory not empty"))
    }

    /// Taxonomy kind, looking through any operation wrappers.
    pub fn kind(&self) -> FsErrorKind {
        match self {
            FsError::NotFound(_) => FsErrorKind::NotFound,
            FsError::AlreadyExists(_) => FsErrorKind::AlreadyExists,
            FsError::TypeMismatch(_) => FsErrorKind::TypeMismatch,
            FsError::InvalidFormat(_) => FsErrorKind::InvalidFormat,
            FsError::InvalidPath(_) => FsErrorKind::InvalidPath,
            FsError::InvalidData(_) => FsErrorKind::InvalidData,
            FsError::NotEmpty(_) => FsErrorKind::NotEmpty,
            FsError::PermissionDenied(_) => FsErrorKind::PermissionDenied,
            FsError::Io { .. } => FsErrorKind::Io,
            FsError::MissingConfiguration => FsErrorKind::MissingConfiguration,
            FsError::Op { source, .. } => source.kind(),
        }
    }

    /// Stable numeric code, logged alongside the kind.
    pub fn code(&self) -> i32 {
        match self.kind() {
            FsErrorKind::NotFound => 10,
            FsErrorKind::AlreadyExists => 11,
            FsErrorKind::TypeMismatch => 12,
            FsErrorKind::InvalidFormat => 13,
            FsErrorKind::InvalidPath => 14,
            FsErrorKind::InvalidData => 15,
            FsErrorKind::NotEmpty => 16,
            FsErrorKind::PermissionDenied => 17,
            FsErrorKind::Io => 18,
            FsErrorKind::MissingConfiguration => 19,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == FsErrorKind::NotFound
    }

    /// Innermost error, with every operation prefix peeled off.
    pub fn root_cause(&self) -> &FsError {
        match self {
            FsError::Op { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Adapter for `.map_err(...)`: wraps a failure with the operation that hit it.
///
///   backend.move_node(src, dir, None).await.map_err(op_failed("move entry"))?;
pub fn op_failed(op: &'static str) -> impl FnOnce(FsError) -> FsError {
    move |source| FsError::Op {
        op,
        source: Box::new(source),
    }
}
