//! Navigation data model.
//!
//! A locale's navigation is an ordered list of [`NavGroup`]s. Each group holds
//! [`NavEntry`] values that are either leaf pages ([`NavItem`]) or nested
//! groups, to any depth. Ordering is significant everywhere: it is the display
//! order and the prev/next order.
//!
//! All types serialize to the same JSON shape the navigation descriptor uses,
//! so a resolved tree can be written back out as a descriptor.

use serde::Serialize;

/// Content document identifier relative to its locale root.
///
/// `/`-separated, no extension (e.g. `"guide/intro"`).
pub type Slug = String;

/// One navigable page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display title (explicit, from front-matter, or the last slug segment).
    pub title: String,
    /// Slug of the backing document.
    pub path: Slug,
}

impl NavItem {
    /// Create a navigation item.
    pub fn new(title: impl Into<String>, path: impl Into<Slug>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
        }
    }
}

/// A named collection of pages and/or nested groups.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavGroup {
    /// Group label.
    pub group: String,
    /// Entries in display order.
    pub pages: Vec<NavEntry>,
}

impl NavGroup {
    /// Create a group from its label and entries.
    pub fn new(group: impl Into<String>, pages: Vec<NavEntry>) -> Self {
        Self {
            group: group.into(),
            pages,
        }
    }
}

/// Entry inside a [`NavGroup`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NavEntry {
    /// Leaf page.
    Page(NavItem),
    /// Nested group.
    Group(NavGroup),
}

impl From<NavItem> for NavEntry {
    fn from(item: NavItem) -> Self {
        Self::Page(item)
    }
}

impl From<NavGroup> for NavEntry {
    fn from(group: NavGroup) -> Self {
        Self::Group(group)
    }
}

/// Ordered top-level groups for one locale.
pub type NavigationTree = Vec<NavGroup>;

/// One heading extracted from a document for its table of contents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TocItem {
    /// Heading depth, always 2, 3 or 4.
    pub depth: u8,
    /// Heading text with surrounding whitespace trimmed.
    pub text: String,
    /// Anchor identifier.
    pub id: String,
}

/// One segment of a breadcrumb trail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BreadcrumbItem {
    /// Display label.
    pub label: String,
    /// Link target, if the segment is navigable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl BreadcrumbItem {
    /// Breadcrumb segment without a link.
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: None,
        }
    }

    /// Breadcrumb segment linking to `href`.
    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: Some(href.into()),
        }
    }
}
