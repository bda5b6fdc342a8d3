//! Options shared by every command that reads the docs tree.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use ezdoc_config::{CliSettings, Config};
use ezdoc_nav::{Navigator, NavigatorConfig};
use ezdoc_storage::Storage;
use ezdoc_storage_fs::FsStorage;

use crate::error::CliError;

/// Project location options.
#[derive(Args)]
pub(crate) struct ProjectArgs {
    /// Path to configuration file (default: auto-discover ezdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Docs directory (overrides config).
    #[arg(short, long)]
    docs_dir: Option<PathBuf>,

    /// Default locale (overrides config).
    #[arg(long)]
    default_locale: Option<String>,

    /// URL prefix the site is served under (overrides config).
    #[arg(long, env = "EZDOC_BASE_PATH")]
    base_path: Option<String>,
}

impl ProjectArgs {
    /// Load the configuration with command line overrides applied.
    pub(crate) fn load(&self) -> Result<Config, CliError> {
        Ok(Config::load(self.config.as_deref(), Some(&self.settings()))?)
    }

    fn settings(&self) -> CliSettings {
        CliSettings {
            docs_dir: self.docs_dir.clone(),
            default_locale: self.default_locale.clone(),
            base_path: self.base_path.clone(),
        }
    }
}

/// Build a navigator over the configured docs directory.
pub(crate) fn navigator(config: &Config) -> Navigator {
    let storage: Arc<dyn Storage> = Arc::new(FsStorage::new(config.docs_resolved.dir.clone()));
    Navigator::new(
        storage,
        NavigatorConfig {
            nav_file: config.docs_resolved.nav.clone(),
            fallback_group: config.navigation.fallback_group.clone(),
            root_label: config.navigation.root_label.clone(),
            base_path: config.deploy.base_path.clone(),
        },
    )
}

/// Resolve `--locale`, defaulting to the configured default locale.
///
/// Only configured locales are accepted.
pub(crate) fn resolve_locale(config: &Config, requested: Option<String>) -> Result<String, CliError> {
    let locale = requested.unwrap_or_else(|| config.i18n.default_locale.clone());
    if config.i18n.locales.iter().any(|l| l.code == locale) {
        Ok(locale)
    } else {
        Err(CliError::Validation(format!(
            "Unknown locale `{locale}` (configured: {})",
            config.i18n.codes().join(", ")
        )))
    }
}
