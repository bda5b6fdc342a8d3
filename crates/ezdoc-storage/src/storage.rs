//! The [`Storage`] trait and its error type.
//!
//! Every path argument is a storage path: `/`-separated, relative to the docs
//! directory, never absolute:
//! - `""` - the storage root itself
//! - `"en"` - a locale root
//! - `"en/guide/intro.mdx"` - a content file
//! - `"en/docs.json"` - a navigation descriptor

use std::fmt;

/// What went wrong, independent of the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    NotFound,
    PermissionDenied,
    /// The path is malformed or escapes the storage root.
    InvalidPath,
    Other,
}

impl StorageErrorKind {
    fn from_io(kind: std::io::ErrorKind) -> Self {
        match kind {
            std::io::ErrorKind::NotFound => Self::NotFound,
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            std::io::ErrorKind::InvalidInput => Self::InvalidPath,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for StorageErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotFound => "not found",
            Self::PermissionDenied => "permission denied",
            Self::InvalidPath => "invalid path",
            Self::Other => "cannot access",
        })
    }
}

/// Failure of a [`Storage`] operation.
#[derive(Debug, thiserror::Error)]
#[error("{backend}: {kind} `{path}`{}", detail(.source.as_ref()))]
pub struct StorageError {
    pub kind: StorageErrorKind,
    /// Path the operation was given, or the backend location it mapped to.
    pub path: String,
    /// Short backend name, e.g. `fs`.
    pub backend: &'static str,
    #[source]
    source: Option<std::io::Error>,
}

fn detail(source: Option<&std::io::Error>) -> String {
    source.map(|err| format!(" ({err})")).unwrap_or_default()
}

impl StorageError {
    #[must_use]
    pub fn new(backend: &'static str, kind: StorageErrorKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            backend,
            source: None,
        }
    }

    /// Wrap an I/O failure, deriving the kind from it.
    #[must_use]
    pub fn io(backend: &'static str, path: impl Into<String>, err: std::io::Error) -> Self {
        Self {
            kind: StorageErrorKind::from_io(err.kind()),
            path: path.into(),
            backend,
            source: Some(err),
        }
    }

    /// Underlying I/O error, if the backend reported one.
    #[must_use]
    pub fn io_error(&self) -> Option<&std::io::Error> {
        self.source.as_ref()
    }
}

/// Filesystem capability used by the navigation core.
///
/// Implementations hold no state the core depends on between calls: every
/// operation reflects the backend as it is at call time.
pub trait Storage: Send + Sync {
    /// List every file below `dir`, recursively.
    ///
    /// Returned paths are relative to `dir`, `/`-separated, and sorted.
    /// Directories are traversed but never returned. A `dir` that does not
    /// exist yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if an existing directory cannot be read
    /// (e.g., permission denied).
    fn list_files(&self, dir: &str) -> Result<Vec<String>, StorageError>;

    /// Read the full text of a file.
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD rather than
    /// failing the read.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file doesn't exist or can't be read.
    fn read(&self, path: &str) -> Result<String, StorageError>;

    /// Check if a file exists at the given storage path.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn exists(&self, path: &str) -> bool;
}

/// Join two storage path fragments with `/`, skipping empty sides.
///
/// ```
/// use ezdoc_storage::join_path;
///
/// assert_eq!(join_path("en", "guide/intro.mdx"), "en/guide/intro.mdx");
/// assert_eq!(join_path("", "intro.md"), "intro.md");
/// assert_eq!(join_path("en", ""), "en");
/// ```
#[must_use]
pub fn join_path(base: &str, rest: &str) -> String {
    let base = base.trim_end_matches('/');
    let rest = rest.trim_start_matches('/');
    match (base.is_empty(), rest.is_empty()) {
        (true, _) => rest.to_owned(),
        (false, true) => base.to_owned(),
        (false, false) => format!("{base}/{rest}"),
    }
}
