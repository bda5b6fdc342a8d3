//! Content discovery.
//!
//! Turns the file listing of a locale root into the set of addressable slugs.

use std::collections::BTreeSet;

use ezdoc_storage::{Storage, StorageError};

use crate::model::Slug;

/// Recognized content extensions, in lookup priority order.
///
/// When both `<slug>.mdx` and `<slug>.md` exist, the `.mdx` file wins and the
/// `.md` file is shadowed.
pub const CONTENT_EXTENSIONS: [&str; 2] = ["mdx", "md"];

/// Strip a recognized content extension from a relative file path.
///
/// Returns `None` for non-content files and for files with an empty stem
/// (e.g. `guide/.md`).
///
/// ```
/// use ezdoc_nav::scanner::slug_from_file;
///
/// assert_eq!(slug_from_file("guide/intro.mdx"), Some("guide/intro"));
/// assert_eq!(slug_from_file("intro.md"), Some("intro"));
/// assert_eq!(slug_from_file("docs.json"), None);
/// ```
#[must_use]
pub fn slug_from_file(rel_path: &str) -> Option<&str> {
    let (stem, ext) = rel_path.rsplit_once('.')?;
    if !CONTENT_EXTENSIONS.contains(&ext) || stem.is_empty() || stem.ends_with('/') {
        return None;
    }
    Some(stem)
}

/// Scan a locale root and return every content slug below it.
///
/// Directories are traversed but never emitted. A root that does not exist
/// yields an empty set. A slug backed by both `.mdx` and `.md` appears once.
///
/// # Errors
///
/// Returns [`StorageError`] if the backend fails to list an existing directory.
pub fn scan(storage: &dyn Storage, root: &str) -> Result<BTreeSet<Slug>, StorageError> {
    let files = storage.list_files(root)?;
    let slugs: BTreeSet<Slug> = files
        .iter()
        .filter_map(|file| slug_from_file(file))
        .map(str::to_owned)
        .collect();

    tracing::debug!(root, files = files.len(), slugs = slugs.len(), "Scanned content");
    Ok(slugs)
}
