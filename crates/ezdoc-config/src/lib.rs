//! `ezdoc.toml` loading.
//!
//! The file is found by walking up from the working directory. Relative paths
//! in it resolve against the file's directory, and [`CliSettings`] override
//! whatever it says.
//!
//! `site.url` and `deploy.base_path` may reference environment variables as
//! `${VAR}` (required) or `${VAR:-fallback}`.

mod expand;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Command line overrides; `None` keeps the file's value.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs directory.
    pub docs_dir: Option<PathBuf>,
    /// Override default locale.
    pub default_locale: Option<String>,
    /// Override deploy base path.
    pub base_path: Option<String>,
}

const CONFIG_FILENAME: &str = "ezdoc.toml";

/// Project configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site metadata.
    pub site: SiteConfig,
    /// Docs configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Locale configuration.
    pub i18n: I18nConfig,
    /// Deployment configuration.
    pub deploy: DeployConfig,
    /// Navigation labels.
    pub navigation: NavigationConfig,

    /// Docs location with `dir` made absolute.
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// File the configuration came from, if any.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site metadata.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
    /// Public site URL.
    pub url: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "ezdoc".to_owned(),
            url: None,
        }
    }
}

/// Raw docs configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    dir: Option<String>,
    nav: Option<String>,
}

/// Resolved docs configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Docs root holding one directory per locale.
    pub dir: PathBuf,
    /// Navigation descriptor file name inside each locale directory.
    pub nav: String,
}

impl DocsConfig {
    /// Directory of one locale.
    #[must_use]
    pub fn locale_dir(&self, locale: &str) -> PathBuf {
        self.dir.join(locale)
    }
}

/// Locale configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Locale whose content is the translation source.
    pub default_locale: String,
    /// Configured locales, in display order.
    pub locales: Vec<Locale>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: "zh".to_owned(),
            locales: vec![Locale::from_code("zh")],
        }
    }
}

impl I18nConfig {
    /// Locale codes in configured order.
    #[must_use]
    pub fn codes(&self) -> Vec<&str> {
        self.locales.iter().map(|l| l.code.as_str()).collect()
    }
}

/// One configured locale.
///
/// Written either as a bare code (`"en"`) or as `{ code = "en", label = "English" }`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "LocaleRaw")]
pub struct Locale {
    /// Locale code, also the directory name under the docs root.
    pub code: String,
    /// Human-readable name.
    pub label: String,
}

impl Locale {
    /// Locale labelled with its own code.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        Self {
            code: code.to_owned(),
            label: code.to_owned(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LocaleRaw {
    Code(String),
    Full { code: String, label: Option<String> },
}

impl From<LocaleRaw> for Locale {
    fn from(raw: LocaleRaw) -> Self {
        match raw {
            LocaleRaw::Code(code) => Self::from_code(&code),
            LocaleRaw::Full { code, label } => Self {
                label: label.unwrap_or_else(|| code.clone()),
                code,
            },
        }
    }
}

/// Deployment configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    /// URL prefix the site is served under.
    pub base_path: String,
}

/// Navigation labels.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Group label for top-level pages when no descriptor exists.
    pub fallback_group: String,
    /// Label of the root breadcrumb.
    pub root_label: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            fallback_group: "文档".to_owned(),
            root_label: "文档".to_owned(),
        }
    }
}

/// Errors raised while loading `ezdoc.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An explicitly requested file does not exist.
    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("Cannot read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid ezdoc.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is well-formed TOML but not acceptable.
    #[error("Invalid configuration: {0}")]
    Validation(String),
    /// `${VAR}` reference that could not be expanded.
    #[error("Cannot expand {field}: {message}")]
    EnvVar {
        /// Dotted field path, e.g. `site.url`.
        field: String,
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load `ezdoc.toml`, then layer command line overrides on top.
    ///
    /// An explicit `config_path` must exist. Without one, the nearest
    /// `ezdoc.toml` in the working directory or an ancestor is used, and with
    /// none found the defaults apply relative to the working directory.
    /// Validation runs last so overrides are checked too.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing, reading or parsing
    /// fails, or the merged configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let source = match config_path {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => std::env::current_dir()
                .ok()
                .and_then(|cwd| Self::discover_config(&cwd)),
        };
        let mut config = match source {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::default_with_base(&std::env::current_dir().unwrap_or_default()),
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }
        config.validate()?;
        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(dir) = &settings.docs_dir {
            self.docs_resolved.dir.clone_from(dir);
        }
        if let Some(locale) = &settings.default_locale {
            self.i18n.default_locale.clone_from(locale);
        }
        if let Some(prefix) = &settings.base_path {
            self.deploy.base_path.clone_from(prefix);
        }
    }

    /// Nearest `ezdoc.toml` in `start` or one of its ancestors.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
    }

    /// Defaults with the docs root at `<base>/docs`.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            docs: DocsConfigRaw::default(),
            i18n: I18nConfig::default(),
            deploy: DeployConfig::default(),
            navigation: NavigationConfig::default(),
            docs_resolved: DocsConfig {
                dir: base.join("docs"),
                nav: "docs.json".to_owned(),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&text)?;

        // Variables may expand into relative paths, so expand first.
        config.expand_env_vars()?;
        config.resolve_paths(path.parent().unwrap_or(Path::new(".")));
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Check the merged configuration, as [`Config::load`] does.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_docs()?;
        self.validate_i18n()?;
        self.validate_deploy()?;
        Ok(())
    }

    fn validate_docs(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.docs_resolved.nav, "docs.nav")?;
        if self.docs_resolved.nav.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "docs.nav must be a file name, not a path".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_i18n(&self) -> Result<(), ConfigError> {
        if self.i18n.locales.is_empty() {
            return Err(ConfigError::Validation(
                "i18n.locales must list at least one locale".to_owned(),
            ));
        }

        let mut seen = HashSet::new();
        for locale in &self.i18n.locales {
            require_non_empty(&locale.code, "i18n.locales code")?;
            if locale.code.contains(['/', '\\']) || locale.code.starts_with('.') {
                return Err(ConfigError::Validation(format!(
                    "i18n.locales code `{}` must be a plain directory name",
                    locale.code
                )));
            }
            if !seen.insert(locale.code.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "i18n.locales lists `{}` more than once",
                    locale.code
                )));
            }
        }

        if !seen.contains(self.i18n.default_locale.as_str()) {
            return Err(ConfigError::Validation(format!(
                "i18n.default_locale `{}` is not one of i18n.locales",
                self.i18n.default_locale
            )));
        }
        Ok(())
    }

    fn validate_deploy(&self) -> Result<(), ConfigError> {
        let base_path = &self.deploy.base_path;
        if !base_path.is_empty() && !base_path.starts_with('/') {
            return Err(ConfigError::Validation(
                "deploy.base_path must be empty or start with /".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref url) = self.site.url {
            self.site.url = Some(expand::expand_env(url, "site.url")?);
        }
        self.deploy.base_path = expand::expand_env(&self.deploy.base_path, "deploy.base_path")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.docs_resolved = DocsConfig {
            dir: config_dir.join(self.docs.dir.as_deref().unwrap_or("docs")),
            nav: self.docs.nav.clone().unwrap_or_else(|| "docs.json".to_owned()),
        };
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(toml: &str) -> Config {
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        config
    }

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));

        assert_eq!(config.site.title, "ezdoc");
        assert_eq!(config.docs_resolved.dir, PathBuf::from("/test/docs"));
        assert_eq!(config.docs_resolved.nav, "docs.json");
        assert_eq!(config.i18n.default_locale, "zh");
        assert_eq!(config.i18n.codes(), vec!["zh"]);
        assert_eq!(config.deploy.base_path, "");
        assert_eq!(config.navigation.fallback_group, "文档");
        assert_eq!(config.navigation.root_label, "文档");
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = parse("");

        assert_eq!(config.docs_resolved.dir, PathBuf::from("/project/docs"));
        assert_eq!(config.i18n.codes(), vec!["zh"]);
    }

    #[test]
    fn test_parse_full_config() {
        let config = parse(
            r#"
[site]
title = "Handbook"
url = "https://docs.example.com"

[docs]
dir = "content"
nav = "nav.json"

[i18n]
default_locale = "en"
locales = ["en", { code = "zh", label = "中文" }, { code = "ja" }]

[deploy]
base_path = "/handbook"

[navigation]
fallback_group = "Docs"
root_label = "Home"
"#,
        );

        assert_eq!(config.site.title, "Handbook");
        assert_eq!(config.site.url.as_deref(), Some("https://docs.example.com"));
        assert_eq!(config.docs_resolved.dir, PathBuf::from("/project/content"));
        assert_eq!(config.docs_resolved.nav, "nav.json");
        assert_eq!(
            config.i18n.locales,
            vec![
                Locale::from_code("en"),
                Locale {
                    code: "zh".to_owned(),
                    label: "中文".to_owned(),
                },
                Locale::from_code("ja"),
            ]
        );
        assert_eq!(config.deploy.base_path, "/handbook");
        assert_eq!(config.navigation.fallback_group, "Docs");
        assert_eq!(config.navigation.root_label, "Home");
        config.validate().unwrap();
    }

    #[test]
    fn test_locale_dir() {
        let config = parse("");

        assert_eq!(config.docs_resolved.locale_dir("en"), PathBuf::from("/project/docs/en"));
    }

    #[test]
    fn test_validate_empty_locales() {
        let config = parse("[i18n]\nlocales = []\n");

        let err = config.validate().unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("at least one locale"));
    }

    #[test]
    fn test_validate_duplicate_locale() {
        let config = parse("[i18n]\nlocales = [\"zh\", { code = \"zh\", label = \"Chinese\" }]\n");

        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_validate_empty_locale_code() {
        let config = parse("[i18n]\nlocales = [\"\"]\ndefault_locale = \"\"\n");

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_locale_code_with_separator() {
        let config = parse("[i18n]\nlocales = [\"zh\", \"../en\"]\n");

        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("../en"));
    }

    #[test]
    fn test_validate_default_locale_not_listed() {
        let config = parse("[i18n]\ndefault_locale = \"en\"\nlocales = [\"zh\"]\n");

        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("i18n.default_locale"));
    }

    #[test]
    fn test_validate_empty_nav() {
        let config = parse("[docs]\nnav = \"\"\n");

        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("docs.nav cannot be empty"));
    }

    #[test]
    fn test_validate_base_path_without_slash() {
        let config = parse("[deploy]\nbase_path = \"handbook\"\n");

        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("deploy.base_path"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            docs_dir: Some(PathBuf::from("/custom/docs")),
            default_locale: Some("en".to_owned()),
            base_path: Some("/preview".to_owned()),
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.docs_resolved.dir, PathBuf::from("/custom/docs"));
        assert_eq!(config.i18n.default_locale, "en");
        assert_eq!(config.deploy.base_path, "/preview");
        assert_eq!(config.docs_resolved.nav, "docs.json"); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.docs_resolved.dir, PathBuf::from("/test/docs"));
        assert_eq!(config.i18n.default_locale, "zh");
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: variable names are unique to this test
        unsafe {
            std::env::set_var("EZDOC_TEST_CFG_HOST", "docs.example.com");
            std::env::remove_var("EZDOC_TEST_CFG_BASE");
        }
        let mut config: Config = toml::from_str(
            r#"
[site]
url = "https://${EZDOC_TEST_CFG_HOST}"
[deploy]
base_path = "${EZDOC_TEST_CFG_BASE:-/docs-site}"
"#,
        )
        .unwrap();

        config.expand_env_vars().unwrap();

        assert_eq!(config.site.url.as_deref(), Some("https://docs.example.com"));
        assert_eq!(config.deploy.base_path, "/docs-site");
        unsafe {
            std::env::remove_var("EZDOC_TEST_CFG_HOST");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("EZDOC_TEST_CFG_MISSING");
        }
        let mut config: Config =
            toml::from_str("[site]\nurl = \"${EZDOC_TEST_CFG_MISSING}\"\n").unwrap();

        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { ref field, .. } if field == "site.url"));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/ezdoc.toml")), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_resolves_relative_to_config_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("ezdoc.toml");
        fs::write(
            &config_path,
            "[docs]\ndir = \"content\"\n[i18n]\ndefault_locale = \"en\"\nlocales = [\"en\", \"zh\"]\n",
        )
        .unwrap();

        let config = Config::load(Some(&config_path), None).unwrap();

        assert_eq!(config.docs_resolved.dir, temp_dir.path().join("content"));
        assert_eq!(config.config_path.as_deref(), Some(config_path.as_path()));
        assert_eq!(config.i18n.codes(), vec!["en", "zh"]);
    }

    #[test]
    fn test_load_validates_after_overrides() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("ezdoc.toml");
        fs::write(&config_path, "[i18n]\nlocales = [\"zh\"]\n").unwrap();
        let overrides = CliSettings {
            default_locale: Some("fr".to_owned()),
            ..Default::default()
        };

        let err = Config::load(Some(&config_path), Some(&overrides)).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("ezdoc.toml");
        fs::write(&config_path, "[site\ntitle = 1").unwrap();

        let err = Config::load(Some(&config_path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_discover_config_walks_up() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("docs/zh/guide");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp_dir.path().join("ezdoc.toml"), "").unwrap();

        let found = Config::discover_config(&nested);

        assert_eq!(found, Some(temp_dir.path().join("ezdoc.toml")));
    }

    #[test]
    fn test_discover_config_ignores_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::create_dir(temp_dir.path().join("ezdoc.toml")).unwrap();

        let found = Config::discover_config(temp_dir.path());

        assert_ne!(found, Some(temp_dir.path().join("ezdoc.toml")));
    }
}
