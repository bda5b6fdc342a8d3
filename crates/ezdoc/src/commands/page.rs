//! `ezdoc page` command implementation.

use clap::Args;
use ezdoc_nav::{BreadcrumbItem, DocPage};

use super::project::{ProjectArgs, navigator, resolve_locale};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the page command.
#[derive(Args)]
pub(crate) struct PageArgs {
    /// Page slug, e.g. `guide/intro`.
    slug: String,

    #[command(flatten)]
    project: ProjectArgs,

    /// Locale to resolve (default: configured default locale).
    #[arg(short, long)]
    locale: Option<String>,

    /// Print the page context as JSON.
    #[arg(long)]
    json: bool,
}

impl PageArgs {
    /// Execute the page command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or the page does not exist.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.project.load()?;
        let locale = resolve_locale(&config, self.locale)?;
        let slug = self.slug.trim_matches('/');

        let Some(page) = navigator(&config).document(slug, &locale)? else {
            return Err(CliError::Validation(format!(
                "Page not found: {slug} (locale {locale})"
            )));
        };

        if self.json {
            output.data(&serde_json::to_string_pretty(&page)?);
        } else {
            for line in describe(&page) {
                output.data(&line);
            }
        }
        Ok(())
    }
}

fn trail(crumbs: &[BreadcrumbItem]) -> String {
    crumbs
        .iter()
        .map(|c| c.label.as_str())
        .collect::<Vec<_>>()
        .join(" › ")
}

fn describe(page: &DocPage) -> Vec<String> {
    let mut lines = vec![
        page.title.clone(),
        format!("  file:   {}", page.file_path),
        format!("  trail:  {}", trail(&page.breadcrumbs)),
    ];
    if let Some(prev) = &page.neighbours.prev {
        lines.push(format!("  prev:   {} ({})", prev.title, prev.path));
    }
    if let Some(next) = &page.neighbours.next {
        lines.push(format!("  next:   {} ({})", next.title, next.path));
    }
    if !page.toc.is_empty() {
        lines.push("  toc:".to_owned());
        for item in &page.toc {
            let indent = "  ".repeat(usize::from(item.depth.saturating_sub(1)));
            lines.push(format!("  {indent}{} #{}", item.text, item.id));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use ezdoc_nav::{FrontMatter, NavItem, Neighbours, TocItem};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_describe() {
        let page = DocPage {
            locale: "en".to_owned(),
            slug: "guide/setup".to_owned(),
            file_path: "en/guide/setup.mdx".to_owned(),
            title: "Setup".to_owned(),
            metadata: FrontMatter::default(),
            toc: vec![
                TocItem {
                    depth: 2,
                    text: "Install".to_owned(),
                    id: "install".to_owned(),
                },
                TocItem {
                    depth: 3,
                    text: "From source".to_owned(),
                    id: "from-source".to_owned(),
                },
            ],
            breadcrumbs: vec![
                BreadcrumbItem::link("Docs", "/docs/en"),
                BreadcrumbItem::label("Guide"),
                BreadcrumbItem::label("Setup"),
            ],
            neighbours: Neighbours {
                prev: Some(NavItem::new("Intro", "intro")),
                next: None,
            },
            raw: String::new(),
        };

        assert_eq!(
            describe(&page),
            vec![
                "Setup",
                "  file:   en/guide/setup.mdx",
                "  trail:  Docs › Guide › Setup",
                "  prev:   Intro (intro)",
                "  toc:",
                "    Install #install",
                "      From source #from-source",
            ]
        );
    }
}
