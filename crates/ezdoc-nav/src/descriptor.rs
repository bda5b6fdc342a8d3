//! Navigation descriptor parsing and validation.
//!
//! A descriptor is a JSON document with a single `navigation` array of groups:
//!
//! ```json
//! {
//!   "navigation": [
//!     {
//!       "group": "Getting Started",
//!       "pages": [
//!         "intro",
//!         { "title": "Install", "path": "guide/install" },
//!         { "group": "Advanced", "pages": ["guide/tuning"] }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Parsing happens in two steps. [`Descriptor::parse`] turns JSON into a typed
//! tree of [`GroupEntry`] / [`PageEntry`] values and records a
//! [`SchemaViolation`] for every entry it has to drop or degrade, so one
//! malformed page never sinks its siblings. [`Descriptor::resolve`] then reads
//! front-matter to fill in the titles of slug shorthand entries.

use std::collections::HashMap;
use std::fmt;

use ezdoc_storage::StorageError;
use serde_json::{Map, Value};

use crate::frontmatter::FrontMatterReader;
use crate::model::{NavEntry, NavGroup, NavItem, NavigationTree};

/// Top-level key holding the group list.
const NAVIGATION_KEY: &str = "navigation";

/// A descriptor entry that does not match any recognized shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Location of the offending value (e.g. `navigation[0].pages[2].group`).
    pub path: String,
    /// What was wrong with it.
    pub message: String,
}

impl SchemaViolation {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Structural descriptor failure.
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    /// Not valid JSON.
    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// Valid JSON, but no `navigation` array at the top level.
    #[error("{0}")]
    Schema(SchemaViolation),
}

/// A group as declared in the descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupEntry {
    /// Group label.
    pub group: String,
    /// Entries in declared order.
    pub pages: Vec<PageEntry>,
}

/// A page entry as declared in the descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageEntry {
    /// Bare slug; the title comes from front-matter.
    Slug(String),
    /// Page with an explicit title.
    Explicit {
        /// Declared title, used as-is.
        title: String,
        /// Slug of the backing document.
        path: String,
    },
    /// Nested group.
    Group(GroupEntry),
}

/// Parsed navigation descriptor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Descriptor {
    /// Top-level groups in declared order.
    pub groups: Vec<GroupEntry>,
    /// Entries that were dropped or degraded while parsing.
    pub violations: Vec<SchemaViolation>,
}

impl Descriptor {
    /// Parse descriptor JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::Parse`] for malformed JSON and
    /// [`DescriptorError::Schema`] when the document has no top-level
    /// `navigation` array. Problems below that level are collected into
    /// [`Descriptor::violations`] instead.
    pub fn parse(json: &str) -> Result<Self, DescriptorError> {
        let value: Value = serde_json::from_str(json)?;
        let Some(entries) = value.get(NAVIGATION_KEY).and_then(Value::as_array) else {
            return Err(DescriptorError::Schema(SchemaViolation::new(
                NAVIGATION_KEY,
                "expected an array of groups",
            )));
        };

        let mut violations = Vec::new();
        let groups = entries
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| {
                let path = format!("{NAVIGATION_KEY}[{i}]");
                match entry.as_object() {
                    Some(obj) => Some(parse_group(obj, &path, &mut violations)),
                    None => {
                        violations.push(SchemaViolation::new(path, "expected a group object"));
                        None
                    }
                }
            })
            .collect();

        Ok(Self { groups, violations })
    }

    /// Every page path referenced anywhere in the descriptor, in depth-first
    /// declaration order, duplicates included.
    #[must_use]
    pub fn referenced_paths(&self) -> Vec<&str> {
        fn collect<'a>(pages: &'a [PageEntry], out: &mut Vec<&'a str>) {
            for page in pages {
                match page {
                    PageEntry::Slug(path) | PageEntry::Explicit { path, .. } => out.push(path),
                    PageEntry::Group(group) => collect(&group.pages, out),
                }
            }
        }

        let mut paths = Vec::new();
        for group in &self.groups {
            collect(&group.pages, &mut paths);
        }
        paths
    }

    /// Resolve into a navigation tree, reading titles for slug shorthand
    /// entries through `reader`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if a backing file exists but cannot be read.
    pub fn resolve(&self, reader: &FrontMatterReader<'_>) -> Result<NavigationTree, StorageError> {
        self.groups.iter().map(|group| resolve_group(group, reader)).collect()
    }
}

fn parse_group(
    obj: &Map<String, Value>,
    path: &str,
    violations: &mut Vec<SchemaViolation>,
) -> GroupEntry {
    let group = match obj.get("group").and_then(Value::as_str) {
        Some(label) => label.to_owned(),
        None => {
            violations.push(SchemaViolation::new(
                format!("{path}.group"),
                "expected a string label",
            ));
            String::new()
        }
    };

    let pages = match obj.get("pages").and_then(Value::as_array) {
        Some(pages) => pages
            .iter()
            .enumerate()
            .filter_map(|(i, page)| parse_page(page, &format!("{path}.pages[{i}]"), violations))
            .collect(),
        None => {
            violations.push(SchemaViolation::new(
                format!("{path}.pages"),
                "expected an array of pages",
            ));
            Vec::new()
        }
    };

    GroupEntry { group, pages }
}

fn parse_page(
    value: &Value,
    path: &str,
    violations: &mut Vec<SchemaViolation>,
) -> Option<PageEntry> {
    let obj = match value {
        Value::String(slug) => return Some(PageEntry::Slug(slug.clone())),
        Value::Object(obj) => obj,
        _ => {
            violations.push(SchemaViolation::new(
                path,
                "expected a slug, a {title, path} object or a nested group",
            ));
            return None;
        }
    };

    // An object carrying `path` is always a leaf.
    if let Some(page_path) = obj.get("path") {
        let Some(page_path) = page_path.as_str() else {
            violations.push(SchemaViolation::new(format!("{path}.path"), "expected a string"));
            return None;
        };
        return match obj.get("title").and_then(Value::as_str) {
            Some(title) => Some(PageEntry::Explicit {
                title: title.to_owned(),
                path: page_path.to_owned(),
            }),
            None => {
                violations.push(SchemaViolation::new(
                    format!("{path}.title"),
                    "expected a string, using the front-matter title",
                ));
                Some(PageEntry::Slug(page_path.to_owned()))
            }
        };
    }

    if obj.contains_key("group") || obj.contains_key("pages") {
        return Some(PageEntry::Group(parse_group(obj, path, violations)));
    }

    violations.push(SchemaViolation::new(
        path,
        "expected a {title, path} object or a nested group",
    ));
    None
}

fn resolve_group(
    group: &GroupEntry,
    reader: &FrontMatterReader<'_>,
) -> Result<NavGroup, StorageError> {
    let pages = group
        .pages
        .iter()
        .map(|page| resolve_page(page, reader))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NavGroup::new(group.group.as_str(), pages))
}

fn resolve_page(page: &PageEntry, reader: &FrontMatterReader<'_>) -> Result<NavEntry, StorageError> {
    let entry: NavEntry = match page {
        PageEntry::Slug(path) => NavItem::new(reader.title(path)?, path.as_str()).into(),
        PageEntry::Explicit { title, path } => NavItem::new(title.as_str(), path.as_str()).into(),
        PageEntry::Group(nested) => resolve_group(nested, reader)?.into(),
    };
    Ok(entry)
}

/// Outcome of validating one locale's descriptor.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ValidationReport {
    /// `false` when the descriptor is structurally broken.
    pub valid: bool,
    /// Human-readable findings, already formatted.
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Report for a locale without a descriptor.
    #[must_use]
    pub fn clean() -> Self {
        Self {
            valid: true,
            warnings: Vec::new(),
        }
    }
}

/// Validate descriptor source against the content of `reader`'s locale root.
///
/// Parse failures and schema violations make the report invalid. Duplicate
/// and dangling page references only add warnings.
#[must_use]
pub fn validate(source: &str, reader: &FrontMatterReader<'_>) -> ValidationReport {
    let descriptor = match Descriptor::parse(source) {
        Ok(descriptor) => descriptor,
        Err(e) => {
            return ValidationReport {
                valid: false,
                warnings: vec![e.to_string()],
            };
        }
    };

    let mut warnings: Vec<String> = descriptor.violations.iter().map(ToString::to_string).collect();
    let valid = warnings.is_empty();

    let paths = descriptor.referenced_paths();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut unique = Vec::new();
    for path in paths {
        let count = counts.entry(path).or_insert(0);
        if *count == 0 {
            unique.push(path);
        }
        *count += 1;
    }

    for path in &unique {
        let count = counts[path];
        if count > 1 {
            warnings.push(format!("Duplicate path `{path}` referenced {count} times"));
        }
    }

    for path in &unique {
        if reader.locate(path).is_none() {
            warnings.push(format!(
                "Page `{path}` has no content file (expected {root}/{path}.mdx or {root}/{path}.md)",
                root = reader.root(),
            ));
        }
    }

    ValidationReport { valid, warnings }
}
