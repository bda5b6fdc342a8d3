//! `ezdoc new` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;

use super::project::ProjectArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the new command.
#[derive(Args)]
pub(crate) struct NewArgs {
    /// Page slug to create, e.g. `guide/setup`.
    path: String,

    #[command(flatten)]
    project: ProjectArgs,
}

/// Result of scaffolding one locale.
#[derive(Debug, PartialEq, Eq)]
enum Scaffolded {
    Created(PathBuf),
    Exists(PathBuf),
}

impl NewArgs {
    /// Execute the new command.
    ///
    /// # Errors
    ///
    /// Returns an error if the slug is invalid or a file cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.project.load()?;
        let slug = normalize_slug(&self.path)?;

        let mut created = 0;
        for locale in config.i18n.codes() {
            match scaffold(&config.docs_resolved.locale_dir(locale), &slug)? {
                Scaffolded::Created(path) => {
                    created += 1;
                    output.success(&format!("  ✓ created {}", path.display()));
                }
                Scaffolded::Exists(path) => {
                    output.note(&format!("  ℹ {} already exists, skipped", path.display()));
                }
            }
        }

        if created > 0 {
            output.info(&format!(
                "Add `{slug}` to {} to place it in the navigation.",
                config.docs_resolved.nav
            ));
        }
        Ok(())
    }
}

/// Strip slashes and a content extension, rejecting paths that escape the locale.
fn normalize_slug(path: &str) -> Result<String, CliError> {
    let trimmed = path.trim().trim_matches('/');
    let slug = trimmed
        .strip_suffix(".mdx")
        .or_else(|| trimmed.strip_suffix(".md"))
        .unwrap_or(trimmed);

    if slug.is_empty() {
        return Err(CliError::Validation("Page path must not be empty".to_owned()));
    }
    if slug
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(CliError::Validation(format!("Invalid page path: {path}")));
    }
    Ok(slug.to_owned())
}

fn template(slug: &str) -> String {
    let title = slug.rsplit('/').next().unwrap_or(slug);
    format!("---\ntitle: {title}\ndescription: \"\"\n---\n\n# {title}\n")
}

/// Write `<locale_dir>/<slug>.mdx` unless a page already backs the slug.
fn scaffold(locale_dir: &Path, slug: &str) -> Result<Scaffolded, CliError> {
    let md = locale_dir.join(format!("{slug}.md"));
    if md.exists() {
        return Ok(Scaffolded::Exists(md));
    }
    let target = locale_dir.join(format!("{slug}.mdx"));
    if target.exists() {
        return Ok(Scaffolded::Exists(target));
    }

    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&target, template(slug))?;
    tracing::info!(path = %target.display(), "Created page");
    Ok(Scaffolded::Created(target))
}
