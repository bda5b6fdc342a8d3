//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::{BTreeMap, BTreeSet};

use crate::storage::{Storage, StorageError, StorageErrorKind, join_path};

const BACKEND: &str = "mock";

/// Mock storage for testing.
///
/// Stores files in memory, keyed by storage path. Use the builder methods
/// to configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use ezdoc_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("en/guide/intro.mdx", "# Intro")
///     .with_file("en/docs.json", r#"{"navigation": []}"#);
///
/// let files = storage.list_files("en").unwrap();
/// let content = storage.read("en/guide/intro.mdx").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    files: BTreeMap<String, String>,
    unreadable_dirs: BTreeSet<String>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given content.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// Add several empty files at once.
    #[must_use]
    pub fn with_empty_files<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for path in paths {
            self.files.insert(path.into(), String::new());
        }
        self
    }

    /// Make listing `dir` fail with `PermissionDenied`.
    #[must_use]
    pub fn with_unreadable_dir(mut self, dir: impl Into<String>) -> Self {
        self.unreadable_dirs.insert(dir.into());
        self
    }
}

impl Storage for MockStorage {
    fn list_files(&self, dir: &str) -> Result<Vec<String>, StorageError> {
        if self.unreadable_dirs.contains(dir) {
            return Err(StorageError::new(
                BACKEND,
                StorageErrorKind::PermissionDenied,
                dir,
            ));
        }

        let prefix = join_path(dir, "");
        let files = self
            .files
            .keys()
            .filter_map(|path| {
                if prefix.is_empty() {
                    Some(path.clone())
                } else {
                    path.strip_prefix(&prefix)
                        .and_then(|rest| rest.strip_prefix('/'))
                        .map(str::to_owned)
                }
            })
            .collect();
        Ok(files)
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::new(BACKEND, StorageErrorKind::NotFound, path))
    }

    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    static_assertions::assert_impl_all!(super::MockStorage: Send, Sync);

    #[test]
    fn test_new_empty() {
        let storage = MockStorage::new();

        assert!(storage.list_files("").unwrap().is_empty());
    }

    #[test]
    fn test_list_files_is_relative_and_recursive() {
        let storage = MockStorage::new()
            .with_file("en/intro.mdx", "")
            .with_file("en/guide/setup.md", "")
            .with_file("zh/intro.mdx", "");

        let files = storage.list_files("en").unwrap();

        assert_eq!(files, vec!["guide/setup.md", "intro.mdx"]);
    }

    #[test]
    fn test_list_files_does_not_match_sibling_prefix() {
        let storage = MockStorage::new()
            .with_file("en/intro.mdx", "")
            .with_file("en-US/intro.mdx", "");

        assert_eq!(storage.list_files("en").unwrap(), vec!["intro.mdx"]);
    }

    #[test]
    fn test_list_files_missing_dir_is_empty() {
        let storage = MockStorage::new().with_file("en/intro.mdx", "");

        assert!(storage.list_files("fr").unwrap().is_empty());
    }

    #[test]
    fn test_list_files_root_lists_everything() {
        let storage = MockStorage::new().with_empty_files(["b.md", "a/c.md"]);

        assert_eq!(storage.list_files("").unwrap(), vec!["a/c.md", "b.md"]);
    }

    #[test]
    fn test_unreadable_dir_fails() {
        let storage = MockStorage::new().with_unreadable_dir("en");

        let err = storage.list_files("en").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::PermissionDenied);
        assert_eq!(err.backend, "mock");
    }

    #[test]
    fn test_read_content() {
        let storage = MockStorage::new().with_file("en/intro.mdx", "# Intro\n\nContent.");

        let content = storage.read("en/intro.mdx").unwrap();

        assert_eq!(content, "# Intro\n\nContent.");
    }

    #[test]
    fn test_read_missing() {
        let storage = MockStorage::new();

        let err = storage.read("missing.md").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, "mock");
        assert_eq!(err.path, "missing.md");
    }

    #[test]
    fn test_exists() {
        let storage = MockStorage::new().with_file("guide.md", "content");

        assert!(storage.exists("guide.md"));
        assert!(!storage.exists("missing.md"));
    }
}
