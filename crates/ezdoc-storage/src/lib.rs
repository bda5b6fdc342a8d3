//! Storage abstraction for the ezdoc navigation core.
//!
//! This crate provides a [`Storage`] trait that hides how content files are
//! listed and read. The navigation core only ever talks to a `Storage`, which
//! enables:
//!
//! - **Unit testing** against an in-memory fixture instead of a real directory
//! - **Backend flexibility** (local filesystem today, anything listable tomorrow)
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `list_files()`, `read()`, and `exists()` methods
//! - [`StorageError`] with a semantic [`StorageErrorKind`]
//! - [`MockStorage`] for testing (behind the `mock` feature flag)
//!
//! The filesystem backend lives in the `ezdoc-storage-fs` crate.
//!
//! # Example
//!
//! ```ignore
//! use ezdoc_storage::{MockStorage, Storage};
//!
//! let storage = MockStorage::new()
//!     .with_file("en/intro.mdx", "---\ntitle: Introduction\n---\n");
//! assert_eq!(storage.list_files("en")?, vec!["intro.mdx"]);
//! ```

#[cfg(feature = "mock")]
mod mock;
mod storage;

#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Storage, StorageError, StorageErrorKind, join_path};
