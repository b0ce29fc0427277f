//! Declarative site chrome: navbar, footer, search and analytics.
//!
//! These sections carry no behavior of their own. They are parsed and
//! validated so a broken link or an empty search key fails the build early
//! instead of shipping.

use serde::Deserialize;

use crate::{ConfigError, require_http_url, require_non_empty};

/// Which side of the navbar an item sits on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavPosition {
    #[default]
    Left,
    Right,
}

/// A labelled link, either internal (`to`) or external (`href`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LinkItem {
    pub label: String,
    /// External URL.
    pub href: Option<String>,
    /// Site-internal path.
    pub to: Option<String>,
    #[serde(default)]
    pub position: NavPosition,
}

impl LinkItem {
    /// Validate that the item has a label and exactly one target.
    pub fn validate(&self, field: &str) -> Result<(), ConfigError> {
        require_non_empty(&self.label, &format!("{field}.label"))?;
        match (&self.href, &self.to) {
            (Some(href), None) => require_http_url(href, &format!("{field}.href")),
            (None, Some(to)) => {
                if to.starts_with('/') {
                    Ok(())
                } else {
                    Err(ConfigError::Validation(format!(
                        "{field}.to must start with /"
                    )))
                }
            }
            _ => Err(ConfigError::Validation(format!(
                "{field} needs exactly one of href or to"
            ))),
        }
    }
}

/// Navbar configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NavbarConfig {
    pub title: Option<String>,
    pub items: Vec<LinkItem>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FooterStyle {
    #[default]
    Dark,
    Light,
}

/// One titled column of footer links.
#[derive(Debug, Deserialize)]
pub struct FooterColumn {
    pub title: String,
    #[serde(default)]
    pub items: Vec<LinkItem>,
}

/// Footer configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    pub style: FooterStyle,
    pub links: Vec<FooterColumn>,
    pub copyright: Option<String>,
}

/// Algolia search configuration.
///
/// The API key is the public search-only key; it is stored as a plain string.
#[derive(Debug, Deserialize)]
pub struct SearchConfig {
    pub app_id: String,
    pub api_key: String,
    pub index_name: String,
    #[serde(default = "default_true")]
    pub contextual_search: bool,
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.app_id, "search.app_id")?;
        require_non_empty(&self.api_key, "search.api_key")?;
        require_non_empty(&self.index_name, "search.index_name")?;
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

/// Analytics site identifiers. All optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub gtag_tracking_id: Option<String>,
    pub plausible_domain: Option<String>,
    pub posthog_key: Option<String>,
}

impl AnalyticsConfig {
    /// Whether any analytics provider is configured.
    pub fn is_enabled(&self) -> bool {
        !self.providers().is_empty()
    }

    /// Names of the configured providers.
    pub fn providers(&self) -> Vec<&'static str> {
        [
            ("gtag", &self.gtag_tracking_id),
            ("plausible", &self.plausible_domain),
            ("posthog", &self.posthog_key),
        ]
        .into_iter()
        .filter(|(_, id)| id.is_some())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Validate navbar and footer links.
pub(crate) fn validate_links(
    navbar: &NavbarConfig,
    footer: &FooterConfig,
) -> Result<(), ConfigError> {
    for (i, item) in navbar.items.iter().enumerate() {
        item.validate(&format!("navbar.items[{i}]"))?;
    }
    for (c, column) in footer.links.iter().enumerate() {
        require_non_empty(&column.title, &format!("footer.links[{c}].title"))?;
        for (i, item) in column.items.iter().enumerate() {
            item.validate(&format!("footer.links[{c}].items[{i}]"))?;
        }
    }
    Ok(())
}
