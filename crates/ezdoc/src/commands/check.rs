//! `ezdoc check` command implementation.

use clap::Args;
use ezdoc_nav::CheckReport;

use super::project::{ProjectArgs, navigator};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// Print the report as JSON on stdout.
    #[arg(long)]
    json: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or any descriptor is invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.project.load()?;
        let docs = config.docs_resolved.dir.display().to_string();
        let nav_file = config.docs_resolved.nav.clone();

        if !self.json {
            output.highlight("Checking project...");
            match &config.config_path {
                Some(path) => output.success(&format!("  ✓ {} is valid", path.display())),
                None => output.note("  ℹ no ezdoc.toml found, using defaults"),
            }
        }

        let navigator = navigator(&config);
        let report = navigator.check(&config.i18n.default_locale, &config.i18n.codes())?;

        if self.json {
            output.data(&serde_json::to_string_pretty(&report)?);
        } else {
            print_report(&output, &report, &docs, &nav_file);
        }

        match report.errors() {
            0 => Ok(()),
            1 => Err(CliError::Validation("1 navigation descriptor is invalid".to_owned())),
            n => Err(CliError::Validation(format!("{n} navigation descriptors are invalid"))),
        }
    }
}

fn print_report(output: &Output, report: &CheckReport, docs: &str, nav_file: &str) {
    for locale in &report.locales {
        let file = format!("{docs}/{}/{nav_file}", locale.locale);
        if !locale.has_descriptor {
            output.note(&format!("  ℹ {file} not found, navigation follows the directory layout"));
        } else if locale.validation.valid {
            output.success(&format!("  ✓ {file} is valid"));
            for warning in &locale.validation.warnings {
                output.warning(&format!("  ⚠ {warning}"));
            }
        } else {
            output.error(&format!("  ✗ {file} is invalid"));
            for warning in &locale.validation.warnings {
                output.error(&format!("    {warning}"));
            }
        }
    }

    for missing in &report.missing_translations {
        output.warning(&format!(
            "  ⚠ {docs}/{}: missing translation of {}",
            missing.locale, missing.slug
        ));
    }

    for orphan in &report.unreferenced {
        output.note(&format!(
            "  ℹ {docs}/{}/{} is not referenced by navigation",
            orphan.locale, orphan.slug
        ));
    }

    output.info("");
    output.info(&summary(report));
}

fn summary(report: &CheckReport) -> String {
    let plural = |n: usize, word: &str| {
        if n == 1 {
            format!("{n} {word}")
        } else {
            format!("{n} {word}s")
        }
    };

    let mut parts = Vec::new();
    if report.errors() > 0 {
        parts.push(plural(report.errors(), "error"));
    }
    if report.warnings() > 0 {
        parts.push(plural(report.warnings(), "warning"));
    }
    if report.infos() > 0 {
        parts.push(format!("{} info", report.infos()));
    }

    if parts.is_empty() {
        "  All good!".to_owned()
    } else {
        format!("  {}", parts.join(", "))
    }
}
