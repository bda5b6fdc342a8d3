//! Filesystem storage implementation for the ezdoc navigation core.
//!
//! This crate provides [`FsStorage`], a filesystem-based implementation of the
//! [`Storage`](ezdoc_storage::Storage) trait rooted at the docs directory.
//!
//! Nothing is cached: every call walks or reads the directory tree as it is
//! at call time, so edits are visible on the next call. Listings do not
//! follow symlinks.
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use ezdoc_storage::Storage;
//! use ezdoc_storage_fs::FsStorage;
//!
//! let storage = FsStorage::new(PathBuf::from("docs"));
//! for file in storage.list_files("en")? {
//!     println!("{file}");
//! }
//! ```

use std::fs;
use std::path::{Component, Path, PathBuf};

use ezdoc_storage::{Storage, StorageError, StorageErrorKind};

const BACKEND: &str = "fs";

/// Filesystem storage implementation.
///
/// Maps storage paths (`"en/guide/intro.mdx"`) onto files below `source_dir`.
pub struct FsStorage {
    /// Root directory for document storage.
    source_dir: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `source_dir`.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Root directory this storage reads from.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Resolve a storage path to a filesystem path.
    ///
    /// Rejects absolute paths and paths containing parent directory
    /// components (`..`) so no lookup can escape the source directory.
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let rel = Path::new(path);
        let escapes = rel
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));

        if escapes {
            return Err(StorageError::new(BACKEND, StorageErrorKind::InvalidPath, path));
        }
        Ok(self.source_dir.join(rel))
    }

    /// Walk `dir_path` recursively, pushing `/`-joined paths relative to the
    /// walk root into `files`.
    fn walk(dir_path: &Path, prefix: &str, files: &mut Vec<String>) -> Result<(), StorageError> {
        let fail = |e: std::io::Error| StorageError::io(BACKEND, dir_path.display().to_string(), e);

        for entry in fs::read_dir(dir_path).map_err(fail)? {
            let entry = entry.map_err(fail)?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let rel = if prefix.is_empty() {
                name
            } else {
                format!("{prefix}/{name}")
            };

            // Symlinks are not followed, so link cycles cannot recurse.
            let file_type = entry.file_type().map_err(fail)?;
            if file_type.is_dir() {
                Self::walk(&entry.path(), &rel, files)?;
            } else if file_type.is_file() {
                files.push(rel);
            }
        }

        Ok(())
    }
}

impl Storage for FsStorage {
    fn list_files(&self, dir: &str) -> Result<Vec<String>, StorageError> {
        let dir_path = self.resolve(dir)?;
        if !dir_path.is_dir() {
            tracing::debug!(dir = %dir_path.display(), "Directory missing, nothing to list");
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        Self::walk(&dir_path, "", &mut files)?;
        files.sort();
        Ok(files)
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        let file_path = self.resolve(path)?;
        let bytes = fs::read(&file_path).map_err(|e| StorageError::io(BACKEND, path, e))?;
        match String::from_utf8(bytes) {
            Ok(text) => Ok(text),
            Err(e) => {
                tracing::debug!(path, "File is not valid UTF-8, decoding lossily");
                Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
            }
        }
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_ok_and(|p| p.is_file())
    }
}
