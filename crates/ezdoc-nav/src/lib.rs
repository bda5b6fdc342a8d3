//! Navigation tree resolution and content addressing for ezdoc.
//!
//! Turns a docs directory (one sub-directory per locale) into queryable,
//! locale-aware navigation:
//!
//! - [`scanner`]: content files to slugs
//! - [`frontmatter`]: slug to backing file and declared metadata
//! - [`descriptor`]: `docs.json` parsing, title resolution and validation
//! - [`fallback`]: navigation synthesized from the directory layout
//! - [`query`]: flatten, prev/next, breadcrumbs, missing translations, orphans
//! - [`toc`]: heading extraction for tables of contents
//!
//! [`Navigator`] combines them over a [`Storage`](ezdoc_storage::Storage)
//! backend. All operations are synchronous and stateless.

pub mod check;
pub mod descriptor;
mod error;
pub mod fallback;
pub mod frontmatter;
pub mod model;
mod navigator;
pub mod query;
pub mod scanner;
pub mod toc;

pub use check::{CheckReport, LocaleReport, LocaleSlug};
pub use descriptor::{Descriptor, DescriptorError, SchemaViolation, ValidationReport};
pub use error::NavError;
pub use frontmatter::{FrontMatter, FrontMatterReader, ResolvedDoc};
pub use model::{BreadcrumbItem, NavEntry, NavGroup, NavItem, NavigationTree, Slug, TocItem};
pub use navigator::{DocPage, Navigator, NavigatorConfig, Neighbours};
