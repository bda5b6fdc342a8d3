//! Error type for navigator operations.

use ezdoc_storage::StorageError;

/// Failure of a [`Navigator`](crate::Navigator) call.
///
/// Malformed descriptors and missing content are never errors; they show up
/// as empty trees or validation warnings instead.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// Locale code that cannot name a directory below the docs root.
    #[error("Invalid locale code: {0:?}")]
    InvalidLocale(String),
    /// Storage backend failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
