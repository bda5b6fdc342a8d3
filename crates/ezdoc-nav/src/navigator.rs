//! Locale-aware navigation over a storage backend.
//!
//! [`Navigator`] ties the pieces together: it picks the descriptor or the
//! directory fallback for a locale, resolves titles, and answers page-level
//! queries. It holds no cache, so every call sees the files as they are now.
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use ezdoc_nav::{Navigator, NavigatorConfig};
//! use ezdoc_storage_fs::FsStorage;
//!
//! let storage = Arc::new(FsStorage::new(PathBuf::from("docs")));
//! let navigator = Navigator::new(storage, NavigatorConfig::default());
//!
//! let tree = navigator.navigation("en")?;
//! let crumbs = navigator.breadcrumbs("guide/intro", "en")?;
//! ```

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Instant;

use ezdoc_storage::{Storage, join_path};
use serde::Serialize;

use crate::check::{CheckReport, LocaleReport, LocaleSlug};
use crate::descriptor::{self, Descriptor, ValidationReport};
use crate::error::NavError;
use crate::fallback::build_from_directory;
use crate::frontmatter::{FrontMatter, FrontMatterReader, slug_basename};
use crate::model::{BreadcrumbItem, NavItem, NavigationTree, Slug, TocItem};
use crate::query;
use crate::scanner::scan;
use crate::toc::extract_headings;

/// Convert Duration to milliseconds as f64.
fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Configuration for [`Navigator`].
#[derive(Clone, Debug)]
pub struct NavigatorConfig {
    /// Descriptor file name inside each locale root.
    pub nav_file: String,
    /// Group label for top-level pages in directory fallback mode.
    pub fallback_group: String,
    /// Label of the root breadcrumb.
    pub root_label: String,
    /// URL prefix the site is served under (empty or starting with `/`).
    pub base_path: String,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            nav_file: "docs.json".to_owned(),
            fallback_group: "文档".to_owned(),
            root_label: "文档".to_owned(),
            base_path: String::new(),
        }
    }
}

/// Owned neighbours of a page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Neighbours {
    /// Page shown before, if any.
    pub prev: Option<NavItem>,
    /// Page shown after, if any.
    pub next: Option<NavItem>,
}

impl From<query::PrevNext<'_>> for Neighbours {
    fn from(links: query::PrevNext<'_>) -> Self {
        Self {
            prev: links.prev.cloned(),
            next: links.next.cloned(),
        }
    }
}

/// Everything a renderer needs for one page.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DocPage {
    /// Locale code.
    pub locale: String,
    /// Page slug.
    pub slug: Slug,
    /// Storage path of the backing file.
    pub file_path: String,
    /// Display title.
    pub title: String,
    /// Parsed front-matter.
    pub metadata: FrontMatter,
    /// Headings for the table of contents.
    pub toc: Vec<TocItem>,
    /// Trail from the locale root to this page.
    pub breadcrumbs: Vec<BreadcrumbItem>,
    /// Previous and next pages.
    #[serde(flatten)]
    pub neighbours: Neighbours,
    /// Raw file text, front-matter included.
    #[serde(skip)]
    pub raw: String,
}

/// Resolves navigation for every locale of one docs root.
pub struct Navigator {
    storage: Arc<dyn Storage>,
    config: NavigatorConfig,
}

impl Navigator {
    /// Create a navigator over `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, config: NavigatorConfig) -> Self {
        Self { storage, config }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// Storage path of a locale's descriptor.
    #[must_use]
    pub fn descriptor_path(&self, locale: &str) -> String {
        join_path(locale, &self.config.nav_file)
    }

    /// Root breadcrumb linking to the locale index.
    #[must_use]
    pub fn root_crumb(&self, locale: &str) -> BreadcrumbItem {
        BreadcrumbItem::link(
            self.config.root_label.as_str(),
            format!("{}/docs/{locale}", self.config.base_path.trim_end_matches('/')),
        )
    }

    /// Resolve the navigation tree of `locale`.
    ///
    /// Uses the descriptor when present and the directory layout otherwise.
    /// A descriptor that cannot be parsed logs a warning and yields an empty
    /// tree.
    ///
    /// # Errors
    ///
    /// Returns [`NavError`] for an invalid locale code or a storage failure.
    pub fn navigation(&self, locale: &str) -> Result<NavigationTree, NavError> {
        check_locale(locale)?;
        let start = Instant::now();
        let reader = FrontMatterReader::new(self.storage.as_ref(), locale);

        let tree = match self.read_descriptor(locale)? {
            Some(source) => match Descriptor::parse(&source) {
                Ok(descriptor) => {
                    for violation in &descriptor.violations {
                        tracing::warn!(locale, %violation, "Navigation entry ignored or degraded");
                    }
                    descriptor.resolve(&reader)?
                }
                Err(e) => {
                    tracing::warn!(
                        locale,
                        file = %self.descriptor_path(locale),
                        error = %e,
                        "Navigation descriptor rejected"
                    );
                    Vec::new()
                }
            },
            None => {
                tracing::debug!(locale, "No navigation descriptor, using directory layout");
                build_from_directory(self.storage.as_ref(), locale, &self.config.fallback_group)?
            }
        };

        tracing::debug!(locale, groups = tree.len(), elapsed_ms = elapsed_ms(start), "Navigation resolved");
        Ok(tree)
    }

    /// Validate the descriptor of `locale`.
    ///
    /// A locale without a descriptor is valid and has no warnings.
    ///
    /// # Errors
    ///
    /// Returns [`NavError`] for an invalid locale code or a storage failure.
    pub fn validate(&self, locale: &str) -> Result<ValidationReport, NavError> {
        check_locale(locale)?;
        let Some(source) = self.read_descriptor(locale)? else {
            return Ok(ValidationReport::clean());
        };
        let reader = FrontMatterReader::new(self.storage.as_ref(), locale);
        Ok(descriptor::validate(&source, &reader))
    }

    /// Previous and next pages around `slug`.
    ///
    /// # Errors
    ///
    /// Returns [`NavError`] for an invalid locale code or a storage failure.
    pub fn prev_next(&self, slug: &str, locale: &str) -> Result<Neighbours, NavError> {
        let tree = self.navigation(locale)?;
        Ok(query::prev_next(slug, &tree).into())
    }

    /// Breadcrumb trail for `slug`, always starting at the locale root.
    ///
    /// # Errors
    ///
    /// Returns [`NavError`] for an invalid locale code or a storage failure.
    pub fn breadcrumbs(&self, slug: &str, locale: &str) -> Result<Vec<BreadcrumbItem>, NavError> {
        let tree = self.navigation(locale)?;
        Ok(query::breadcrumbs(slug, &tree, self.root_crumb(locale)))
    }

    /// Load one page with its navigation context.
    ///
    /// Returns `Ok(None)` when `slug` has no backing file in `locale`.
    ///
    /// # Errors
    ///
    /// Returns [`NavError`] for an invalid locale code or a storage failure.
    pub fn document(&self, slug: &str, locale: &str) -> Result<Option<DocPage>, NavError> {
        check_locale(locale)?;
        let reader = FrontMatterReader::new(self.storage.as_ref(), locale);
        let Some(doc) = reader.resolve(slug)? else {
            return Ok(None);
        };

        let tree = self.navigation(locale)?;
        let title = doc
            .metadata
            .title()
            .map_or_else(|| slug_basename(slug).to_owned(), str::to_owned);

        Ok(Some(DocPage {
            locale: locale.to_owned(),
            slug: slug.to_owned(),
            file_path: doc.file_path,
            title,
            toc: extract_headings(&doc.raw),
            breadcrumbs: query::breadcrumbs(slug, &tree, self.root_crumb(locale)),
            neighbours: query::prev_next(slug, &tree).into(),
            metadata: doc.metadata,
            raw: doc.raw,
        }))
    }

    /// Every addressable page of every locale, in locale order then slug
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`NavError`] for an invalid locale code or a storage failure.
    pub fn all_slugs(&self, locales: &[&str]) -> Result<Vec<LocaleSlug>, NavError> {
        let mut all = Vec::new();
        for &locale in locales {
            check_locale(locale)?;
            all.extend(
                scan(self.storage.as_ref(), locale)?
                    .into_iter()
                    .map(|slug| LocaleSlug::new(locale, slug)),
            );
        }
        Ok(all)
    }

    /// Check descriptors, translations and page coverage of all locales.
    ///
    /// Missing translations are only looked for when more than one locale is
    /// configured. Unreferenced pages are only reported for locales whose
    /// descriptor exists and parses.
    ///
    /// # Errors
    ///
    /// Returns [`NavError`] for an invalid locale code or a storage failure.
    pub fn check(&self, default_locale: &str, locales: &[&str]) -> Result<CheckReport, NavError> {
        let mut scanned: BTreeMap<&str, BTreeSet<Slug>> = BTreeMap::new();
        for &locale in locales.iter().chain([&default_locale]) {
            check_locale(locale)?;
            if let Entry::Vacant(entry) = scanned.entry(locale) {
                entry.insert(scan(self.storage.as_ref(), locale)?);
            }
        }
        let slugs_of = |locale: &str| scanned.get(locale).cloned().unwrap_or_default();

        let mut report = CheckReport::default();
        for &locale in locales {
            let source = self.read_descriptor(locale)?;
            let validation = match &source {
                Some(source) => {
                    let reader = FrontMatterReader::new(self.storage.as_ref(), locale);
                    descriptor::validate(source, &reader)
                }
                None => ValidationReport::clean(),
            };

            if let Some(Ok(parsed)) = source.as_deref().map(Descriptor::parse) {
                let slugs = slugs_of(locale);
                report.unreferenced.extend(
                    query::unreferenced(&parsed.referenced_paths(), &slugs)
                        .into_iter()
                        .map(|slug| LocaleSlug::new(locale, slug.as_str())),
                );
            }

            report.locales.push(LocaleReport {
                locale: locale.to_owned(),
                has_descriptor: source.is_some(),
                validation,
            });
        }

        if locales.len() > 1 {
            let default_slugs = slugs_of(default_locale);
            for &locale in locales.iter().filter(|l| **l != default_locale) {
                let target = slugs_of(locale);
                report.missing_translations.extend(
                    query::missing_translations(&default_slugs, &target)
                        .into_iter()
                        .map(|slug| LocaleSlug::new(locale, slug.as_str())),
                );
            }
        }

        tracing::info!(
            errors = report.errors(),
            warnings = report.warnings(),
            infos = report.infos(),
            "Content check completed"
        );
        Ok(report)
    }

    fn read_descriptor(&self, locale: &str) -> Result<Option<String>, NavError> {
        let path = self.descriptor_path(locale);
        if !self.storage.exists(&path) {
            return Ok(None);
        }
        Ok(Some(self.storage.read(&path)?))
    }
}

/// Reject locale codes that do not name a single directory.
fn check_locale(locale: &str) -> Result<(), NavError> {
    let valid = !locale.is_empty()
        && locale != "."
        && locale != ".."
        && !locale.contains(['/', '\\']);
    if valid {
        Ok(())
    } else {
        Err(NavError::InvalidLocale(locale.to_owned()))
    }
}
