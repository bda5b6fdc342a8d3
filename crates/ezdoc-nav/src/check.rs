//! Project-wide content check results.

use serde::Serialize;

use crate::descriptor::ValidationReport;
use crate::model::Slug;

/// A slug qualified by its locale.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct LocaleSlug {
    /// Locale code.
    pub locale: String,
    /// Slug within that locale.
    pub slug: Slug,
}

impl LocaleSlug {
    /// Create a locale-qualified slug.
    pub fn new(locale: impl Into<String>, slug: impl Into<Slug>) -> Self {
        Self {
            locale: locale.into(),
            slug: slug.into(),
        }
    }
}

/// Descriptor status of one locale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LocaleReport {
    /// Locale code.
    pub locale: String,
    /// Whether the locale has a descriptor file.
    pub has_descriptor: bool,
    /// Descriptor validation outcome.
    pub validation: ValidationReport,
}

/// Result of checking every configured locale.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Per-locale descriptor status, in configured order.
    pub locales: Vec<LocaleReport>,
    /// Default-locale pages with no translation.
    pub missing_translations: Vec<LocaleSlug>,
    /// Pages no descriptor references.
    pub unreferenced: Vec<LocaleSlug>,
}

impl CheckReport {
    /// Number of locales with a broken descriptor.
    #[must_use]
    pub fn errors(&self) -> usize {
        self.locales.iter().filter(|l| !l.validation.valid).count()
    }

    /// Warnings of valid descriptors plus missing translations.
    ///
    /// Findings of an invalid descriptor are counted as its error instead.
    #[must_use]
    pub fn warnings(&self) -> usize {
        let validation: usize = self
            .locales
            .iter()
            .filter(|l| l.validation.valid)
            .map(|l| l.validation.warnings.len())
            .sum();
        validation + self.missing_translations.len()
    }

    /// Number of unreferenced pages.
    #[must_use]
    pub fn infos(&self) -> usize {
        self.unreferenced.len()
    }

    /// `true` when no locale has a broken descriptor.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors() == 0
    }
}
