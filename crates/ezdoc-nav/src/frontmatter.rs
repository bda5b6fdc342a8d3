//! Front-matter lookup for content documents.
//!
//! A document's backing file is found by trying each extension in
//! [`CONTENT_EXTENSIONS`] order. Its front-matter is an optional YAML block at
//! the very top of the file:
//!
//! ```text
//! ---
//! title: Introduction
//! description: What this project is about
//! ---
//!
//! # Introduction
//! ```
//!
//! Front-matter is always optional: a missing block, an unterminated block, or
//! invalid YAML all read as empty metadata.

use std::collections::BTreeMap;

use ezdoc_storage::{Storage, StorageError, join_path};
use serde::{Deserialize, Serialize};

use crate::scanner::CONTENT_EXTENSIONS;

/// Block delimiter line.
const DELIMITER: &str = "---";

/// Declared document metadata.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrontMatter {
    /// Document title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Short description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Icon name shown next to the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Any other keys, kept verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Title if declared and non-empty.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }
}

/// Split raw document text into its front-matter block and body.
///
/// Returns `None` when the text does not start with a `---` line or the block
/// is never closed.
#[must_use]
pub fn split_front_matter(text: &str) -> Option<(&str, &str)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.split_inclusive('\n');

    let first = lines.next()?;
    if first.trim_end() != DELIMITER {
        return None;
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            let body_start = offset + line.len();
            return Some((&text[yaml_start..offset], &text[body_start..]));
        }
        offset += line.len();
    }

    None
}

/// Parse the front-matter of raw document text.
///
/// Never fails: absent or malformed front-matter yields [`FrontMatter::default`].
#[must_use]
pub fn parse_front_matter(text: &str) -> FrontMatter {
    let Some((yaml, _)) = split_front_matter(text) else {
        return FrontMatter::default();
    };
    if yaml.trim().is_empty() {
        return FrontMatter::default();
    }

    serde_yaml::from_str(yaml).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Ignoring malformed front-matter");
        FrontMatter::default()
    })
}

/// Final `/`-separated segment of a slug.
///
/// ```
/// use ezdoc_nav::frontmatter::slug_basename;
///
/// assert_eq!(slug_basename("guide/intro"), "intro");
/// assert_eq!(slug_basename("intro"), "intro");
/// ```
#[must_use]
pub fn slug_basename(slug: &str) -> &str {
    slug.rsplit('/').next().unwrap_or(slug)
}

/// A slug resolved to its backing file.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedDoc {
    /// Storage path of the backing file (e.g. `"en/guide/intro.mdx"`).
    pub file_path: String,
    /// Parsed front-matter.
    pub metadata: FrontMatter,
    /// Full raw text, front-matter included.
    pub raw: String,
}

/// Resolves slugs of one locale root to files and metadata.
///
/// Holds no cache: every call reads storage again.
#[derive(Clone, Copy)]
pub struct FrontMatterReader<'a> {
    storage: &'a dyn Storage,
    root: &'a str,
}

impl<'a> FrontMatterReader<'a> {
    /// Create a reader for the locale root `root` (e.g. `"en"`).
    pub fn new(storage: &'a dyn Storage, root: &'a str) -> Self {
        Self { storage, root }
    }

    /// Locale root this reader resolves against.
    #[must_use]
    pub fn root(&self) -> &'a str {
        self.root
    }

    /// Storage backing this reader.
    #[must_use]
    pub fn storage(&self) -> &'a dyn Storage {
        self.storage
    }

    /// Storage path of the file backing `slug`, if any.
    ///
    /// `.mdx` is tried before `.md`; the first existing file wins.
    #[must_use]
    pub fn locate(&self, slug: &str) -> Option<String> {
        CONTENT_EXTENSIONS
            .iter()
            .map(|ext| join_path(self.root, &format!("{slug}.{ext}")))
            .find(|path| self.storage.exists(path))
    }

    /// Resolve `slug` to its backing file and front-matter.
    ///
    /// Returns `Ok(None)` when no backing file exists.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing file exists but cannot be read.
    pub fn resolve(&self, slug: &str) -> Result<Option<ResolvedDoc>, StorageError> {
        let Some(file_path) = self.locate(slug) else {
            return Ok(None);
        };

        let raw = self.storage.read(&file_path)?;
        let metadata = parse_front_matter(&raw);
        Ok(Some(ResolvedDoc {
            file_path,
            metadata,
            raw,
        }))
    }

    /// Display title for `slug`.
    ///
    /// Uses the declared front-matter title, falling back to the slug's final
    /// path segment when the file, the block, or the title is missing.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing file exists but cannot be read.
    pub fn title(&self, slug: &str) -> Result<String, StorageError> {
        let declared = self
            .resolve(slug)?
            .and_then(|doc| doc.metadata.title().map(str::to_owned));
        Ok(declared.unwrap_or_else(|| slug_basename(slug).to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use ezdoc_storage::MockStorage;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_split_front_matter() {
        let text = "---\ntitle: Intro\n---\n# Body\n";

        let (yaml, body) = split_front_matter(text).unwrap();

        assert_eq!(yaml, "title: Intro\n");
        assert_eq!(body, "# Body\n");
    }

    #[test]
    fn test_split_front_matter_crlf() {
        let text = "---\r\ntitle: Intro\r\n---\r\nBody";

        let (yaml, body) = split_front_matter(text).unwrap();

        assert_eq!(yaml, "title: Intro\r\n");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_front_matter_requires_leading_delimiter() {
        assert!(split_front_matter("# Title\n---\ntitle: x\n---\n").is_none());
        assert!(split_front_matter("").is_none());
    }

    #[test]
    fn test_split_front_matter_unterminated() {
        assert!(split_front_matter("---\ntitle: Intro\n# Body\n").is_none());
    }

    #[test]
    fn test_split_front_matter_closing_at_eof() {
        let (yaml, body) = split_front_matter("---\ntitle: Intro\n---").unwrap();

        assert_eq!(yaml, "title: Intro\n");
        assert_eq!(body, "");
    }

    #[test]
    fn test_parse_front_matter_fields() {
        let text = "---\ntitle: \"Getting Started\"\ndescription: |\n  Two\n  lines\nicon: rocket\norder: 3\n---\n";

        let fm = parse_front_matter(text);

        assert_eq!(fm.title.as_deref(), Some("Getting Started"));
        assert_eq!(fm.description.as_deref(), Some("Two\nlines\n"));
        assert_eq!(fm.icon.as_deref(), Some("rocket"));
        assert_eq!(fm.extra.get("order"), Some(&serde_yaml::Value::from(3)));
    }

    #[test]
    fn test_parse_front_matter_malformed_is_empty() {
        let fm = parse_front_matter("---\ntitle: [unclosed\n---\n");

        assert_eq!(fm, FrontMatter::default());
    }

    #[test]
    fn test_parse_front_matter_non_mapping_is_empty() {
        assert_eq!(parse_front_matter("---\n- a\n- b\n---\n"), FrontMatter::default());
    }

    #[test]
    fn test_parse_front_matter_empty_block() {
        assert_eq!(parse_front_matter("---\n---\nBody"), FrontMatter::default());
    }

    #[test]
    fn test_empty_title_counts_as_absent() {
        let fm = parse_front_matter("---\ntitle: \"\"\n---\n");

        assert!(fm.title().is_none());
    }

    #[test]
    fn test_locate_prefers_mdx() {
        let storage = MockStorage::new()
            .with_file("en/intro.md", "---\ntitle: From MD\n---\n")
            .with_file("en/intro.mdx", "---\ntitle: From MDX\n---\n");
        let reader = FrontMatterReader::new(&storage, "en");

        assert_eq!(reader.locate("intro").as_deref(), Some("en/intro.mdx"));
        assert_eq!(reader.title("intro").unwrap(), "From MDX");
    }

    #[test]
    fn test_locate_falls_back_to_md() {
        let storage = MockStorage::new().with_file("en/guide/setup.md", "");
        let reader = FrontMatterReader::new(&storage, "en");

        assert_eq!(reader.locate("guide/setup").as_deref(), Some("en/guide/setup.md"));
    }

    #[test]
    fn test_resolve_missing_is_none() {
        let storage = MockStorage::new();
        let reader = FrontMatterReader::new(&storage, "en");

        assert!(reader.resolve("intro").unwrap().is_none());
    }

    #[test]
    fn test_resolve_returns_metadata_and_raw() {
        let raw = "---\ntitle: Intro\ndescription: Start here\n---\n# Intro\n";
        let storage = MockStorage::new().with_file("en/intro.mdx", raw);
        let reader = FrontMatterReader::new(&storage, "en");

        let doc = reader.resolve("intro").unwrap().unwrap();

        assert_eq!(doc.file_path, "en/intro.mdx");
        assert_eq!(doc.metadata.title.as_deref(), Some("Intro"));
        assert_eq!(doc.metadata.description.as_deref(), Some("Start here"));
        assert_eq!(doc.raw, raw);
    }

    #[test]
    fn test_title_from_front_matter() {
        let storage =
            MockStorage::new().with_file("zh/intro.mdx", "---\ntitle: Introduction\n---\n");
        let reader = FrontMatterReader::new(&storage, "zh");

        assert_eq!(reader.title("intro").unwrap(), "Introduction");
    }

    #[test]
    fn test_title_without_front_matter_uses_basename() {
        let storage = MockStorage::new()
            .with_file("zh/intro.mdx", "# Heading only\n")
            .with_file("zh/guide/setup.md", "---\ndescription: no title\n---\n");
        let reader = FrontMatterReader::new(&storage, "zh");

        assert_eq!(reader.title("intro").unwrap(), "intro");
        assert_eq!(reader.title("guide/setup").unwrap(), "setup");
    }

    #[test]
    fn test_title_for_missing_file_uses_basename() {
        let storage = MockStorage::new();
        let reader = FrontMatterReader::new(&storage, "zh");

        assert_eq!(reader.title("guide/missing").unwrap(), "missing");
    }

    #[test]
    fn test_titles_are_locale_scoped() {
        let storage = MockStorage::new()
            .with_file("en/intro.mdx", "---\ntitle: Introduction\n---\n")
            .with_file("zh/intro.mdx", "---\ntitle: 介绍\n---\n");

        assert_eq!(
            FrontMatterReader::new(&storage, "en").title("intro").unwrap(),
            "Introduction"
        );
        assert_eq!(
            FrontMatterReader::new(&storage, "zh").title("intro").unwrap(),
            "介绍"
        );
    }
}
