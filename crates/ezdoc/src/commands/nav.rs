//! `ezdoc nav` command implementation.

use clap::Args;
use ezdoc_nav::{NavEntry, NavGroup};

use super::project::{ProjectArgs, navigator, resolve_locale};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// Locale to resolve (default: configured default locale).
    #[arg(short, long)]
    locale: Option<String>,

    /// Print the tree as descriptor-shaped JSON.
    #[arg(long)]
    json: bool,
}

impl NavArgs {
    /// Execute the nav command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading or resolution fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.project.load()?;
        let locale = resolve_locale(&config, self.locale)?;

        let tree = navigator(&config).navigation(&locale)?;

        if self.json {
            let json = serde_json::json!({ "navigation": tree });
            output.data(&serde_json::to_string_pretty(&json)?);
            return Ok(());
        }

        if tree.is_empty() {
            output.warning(&format!("No navigation for locale `{locale}`"));
            return Ok(());
        }
        for line in render_tree(&tree) {
            output.data(&line);
        }
        Ok(())
    }
}

/// Indented outline of a tree, one line per group or page.
fn render_tree(tree: &[NavGroup]) -> Vec<String> {
    fn walk(group: &NavGroup, depth: usize, lines: &mut Vec<String>) {
        lines.push(format!("{}{}", "  ".repeat(depth), group.group));
        for entry in &group.pages {
            match entry {
                NavEntry::Page(item) => lines.push(format!(
                    "{}- {} ({})",
                    "  ".repeat(depth + 1),
                    item.title,
                    item.path
                )),
                NavEntry::Group(nested) => walk(nested, depth + 1, lines),
            }
        }
    }

    let mut lines = Vec::new();
    for group in tree {
        walk(group, 0, &mut lines);
    }
    lines
}

#[cfg(test)]
mod tests {
    use ezdoc_nav::NavItem;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_render_tree() {
        let tree = vec![NavGroup::new(
            "Guide",
            vec![
                NavItem::new("Intro", "intro").into(),
                NavGroup::new("Advanced", vec![NavItem::new("Tuning", "guide/tuning").into()])
                    .into(),
            ],
        )];

        assert_eq!(
            render_tree(&tree),
            vec![
                "Guide",
                "  - Intro (intro)",
                "  Advanced",
                "    - Tuning (guide/tuning)",
            ]
        );
    }
}
