//! `ezdoc toc` command implementation.

use std::path::PathBuf;

use clap::Args;
use ezdoc_nav::frontmatter::split_front_matter;
use ezdoc_nav::toc::extract_headings;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the toc command.
#[derive(Args)]
pub(crate) struct TocArgs {
    /// Markdown or MDX file to read.
    file: PathBuf,

    /// Print headings as JSON.
    #[arg(long)]
    json: bool,
}

impl TocArgs {
    /// Execute the toc command.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let raw = std::fs::read_to_string(&self.file)?;
        let body = split_front_matter(&raw).map_or(raw.as_str(), |(_, body)| body);
        let headings = extract_headings(body);

        if self.json {
            output.data(&serde_json::to_string_pretty(&headings)?);
            return Ok(());
        }

        if headings.is_empty() {
            output.note(&format!("No headings in {}", self.file.display()));
        }
        for item in headings {
            let indent = "  ".repeat(usize::from(item.depth.saturating_sub(2)));
            output.data(&format!("{indent}{} #{}", item.text, item.id));
        }
        Ok(())
    }
}
