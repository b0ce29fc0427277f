//! Configuration management for the DBOS docs post-build toolkit.
//!
//! Parses `dbos-docs.toml` with serde and auto-discovers the file in the
//! current directory or its parents. CLI settings can be applied during load
//! via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.url`
//! - `search.app_id`
//! - `search.api_key`
//! - `analytics.gtag_tracking_id`
//! - `analytics.plausible_domain`
//! - `analytics.posthog_key`

mod expand;
mod theme;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub use theme::{
    AnalyticsConfig, FooterColumn, FooterConfig, FooterStyle, LinkItem, NavPosition,
    NavbarConfig, SearchConfig,
};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override build output directory.
    pub out_dir: Option<PathBuf>,
    /// Override the public site URL.
    pub site_url: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "dbos-docs.toml";

/// Route plugin name of the docs content plugin.
pub const DEFAULT_DOCS_PLUGIN: &str = "docusaurus-plugin-content-docs";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site identity.
    pub site: SiteConfig,
    /// Docs paths as relative strings from TOML.
    docs: DocsConfigRaw,
    pub markdown_mirror: MarkdownMirrorConfig,
    pub llms: LlmsConfig,
    /// Exact-match redirects.
    pub redirects: Vec<RedirectConfig>,
    /// Prefix-rewrite redirect rule (optional section).
    pub redirect_prefix: Option<PrefixRedirectConfig>,
    pub redirect_stubs: RedirectStubsConfig,
    pub navbar: NavbarConfig,
    pub footer: FooterConfig,
    /// Algolia search (optional section).
    pub search: Option<SearchConfig>,
    pub analytics: AnalyticsConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site identity.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    /// Public base URL, used for absolute links.
    pub url: String,
    pub organization: String,
    pub project: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "DBOS Docs".to_owned(),
            url: "https://docs.dbos.dev".to_owned(),
            organization: "dbos-inc".to_owned(),
            project: "dbos-docs".to_owned(),
        }
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    out_dir: Option<String>,
    plugin_name: Option<String>,
}

/// Resolved docs configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Markdown content root.
    pub source_dir: PathBuf,
    /// Build output root written by the site generator.
    pub out_dir: PathBuf,
    /// Name of the docs plugin in the route manifest.
    pub plugin_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MarkdownMirrorConfig {
    pub enabled: bool,
}

impl Default for MarkdownMirrorConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// `llms.txt` generation settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LlmsConfig {
    pub enabled: bool,
    /// Output filename, relative to the output root.
    pub filename: String,
    /// Top-level heading.
    pub heading: String,
    /// Section heading above the page list.
    pub section: String,
}

impl Default for LlmsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            filename: "llms.txt".to_owned(),
            heading: "DBOS Documentation".to_owned(),
            section: "Docs".to_owned(),
        }
    }
}

/// An exact-match redirect.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RedirectConfig {
    pub from: String,
    pub to: String,
}

/// A prefix-rewrite redirect: `from + rest` becomes `to + rest`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PrefixRedirectConfig {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RedirectStubsConfig {
    pub enabled: bool,
}

impl Default for RedirectStubsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`search.api_key`").
        field: String,
        /// Error message (e.g., "${`ALGOLIA_API_KEY`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
pub(crate) fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
pub(crate) fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Require a site path: non-empty, absolute, no `..` segments.
fn require_site_path(path: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(path, field)?;
    if !path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "{field} must start with / (got {path:?})"
        )));
    }
    if path.split('/').any(|segment| segment == "..") {
        return Err(ConfigError::Validation(format!(
            "{field} cannot contain .. segments"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `dbos-docs.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(out_dir) = &settings.out_dir {
            self.docs_resolved.out_dir.clone_from(out_dir);
        }
        if let Some(site_url) = &settings.site_url {
            self.site.url.clone_from(site_url);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    pub fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            docs: DocsConfigRaw::default(),
            markdown_mirror: MarkdownMirrorConfig::default(),
            llms: LlmsConfig::default(),
            redirects: Vec::new(),
            redirect_prefix: None,
            redirect_stubs: RedirectStubsConfig::default(),
            navbar: NavbarConfig::default(),
            footer: FooterConfig::default(),
            search: None,
            analytics: AnalyticsConfig::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                out_dir: base.join("build"),
                plugin_name: DEFAULT_DOCS_PLUGIN.to_owned(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_llms()?;
        self.validate_redirects()?;
        theme::validate_links(&self.navbar, &self.footer)?;
        if let Some(search) = &self.search {
            search.validate()?;
        }
        Ok(())
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.url, "site.url")?;
        require_http_url(&self.site.url, "site.url")?;
        if let Some(plugin_name) = &self.docs.plugin_name {
            require_non_empty(plugin_name, "docs.plugin_name")?;
        }
        Ok(())
    }

    fn validate_llms(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.llms.filename, "llms.filename")?;
        if self.llms.filename.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "llms.filename must be a bare file name".to_owned(),
            ));
        }
        Ok(())
    }

    /// Validate the redirect table.
    ///
    /// A repeated `from` is rejected rather than letting the last entry win.
    fn validate_redirects(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for (i, redirect) in self.redirects.iter().enumerate() {
            require_site_path(&redirect.from, &format!("redirects[{i}].from"))?;
            require_site_path(&redirect.to, &format!("redirects[{i}].to"))?;
            if !seen.insert(redirect.from.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate redirect source {} (redirects[{i}])",
                    redirect.from
                )));
            }
        }

        if let Some(prefix) = &self.redirect_prefix {
            require_site_path(&prefix.from, "redirect_prefix.from")?;
            require_site_path(&prefix.to, "redirect_prefix.to")?;
            if prefix.from == prefix.to {
                return Err(ConfigError::Validation(
                    "redirect_prefix.from and redirect_prefix.to must differ".to_owned(),
                ));
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.url = expand::expand_env(&self.site.url, "site.url")?;

        if let Some(ref mut search) = self.search {
            search.app_id = expand::expand_env(&search.app_id, "search.app_id")?;
            search.api_key = expand::expand_env(&search.api_key, "search.api_key")?;
        }

        let analytics = &mut self.analytics;
        expand::expand_opt(&mut analytics.gtag_tracking_id, "analytics.gtag_tracking_id")?;
        expand::expand_opt(&mut analytics.plausible_domain, "analytics.plausible_domain")?;
        expand::expand_opt(&mut analytics.posthog_key, "analytics.posthog_key")?;

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), "docs"),
            out_dir: resolve(self.docs.out_dir.as_deref(), "build"),
            plugin_name: self
                .docs
                .plugin_name
                .clone()
                .unwrap_or_else(|| DEFAULT_DOCS_PLUGIN.to_owned()),
        };
    }
}
