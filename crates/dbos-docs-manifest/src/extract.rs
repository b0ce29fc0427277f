//! Typed extraction of the docs collection from a route manifest.
//!
//! The lookup chain is: docs plugin route → its root sub-route (`"/"`) →
//! `props.version` → `docs`. Each missing link is a distinct
//! [`ExtractError`] so callers can decide what a missing collection means.

use serde_json::Value;

use crate::route::{RouteConfig, RouteManifest, VersionMetadata};

/// One documentation page as seen after the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord {
    /// Site path without leading slash, e.g. `"guide/setup"`.
    pub path: String,
    pub title: String,
    /// May be empty.
    pub description: String,
}

/// Why the docs collection could not be located.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("no route registered by plugin {0}")]
    PluginNotFound(String),
    #[error("docs plugin has no root route (path \"/\")")]
    RootRouteNotFound,
    #[error("docs root route has no version props")]
    VersionMissing,
    #[error("docs version props are malformed: {0}")]
    MalformedVersion(#[source] serde_json::Error),
}

/// Locate the docs plugin's current version metadata.
pub fn find_current_version(
    manifest: &RouteManifest,
    plugin_name: &str,
) -> Result<VersionMetadata, ExtractError> {
    let plugin_route = manifest
        .routes
        .iter()
        .find(|route| route.is_from_plugin(plugin_name))
        .ok_or_else(|| ExtractError::PluginNotFound(plugin_name.to_owned()))?;

    let docs_root = find_root(plugin_route).ok_or(ExtractError::RootRouteNotFound)?;

    let version: Value = docs_root
        .props
        .get("version")
        .cloned()
        .ok_or(ExtractError::VersionMissing)?;

    serde_json::from_value(version).map_err(ExtractError::MalformedVersion)
}

fn find_root(plugin_route: &RouteConfig) -> Option<&RouteConfig> {
    plugin_route.routes.iter().find(|route| route.path == "/")
}

/// Flatten the current version's docs into route records.
///
/// Records keep the order of the docs map. Documents without a title or a
/// path are skipped.
pub fn extract_doc_records(
    manifest: &RouteManifest,
    plugin_name: &str,
) -> Result<Vec<RouteRecord>, ExtractError> {
    let version = find_current_version(manifest, plugin_name)?;

    let records = version
        .docs
        .into_iter()
        .filter_map(|(doc_id, doc)| {
            let path = doc
                .path
                .as_deref()
                .unwrap_or(&doc_id)
                .trim_start_matches('/')
                .to_owned();
            let Some(title) = doc.title.filter(|t| !t.is_empty() && !path.is_empty()) else {
                tracing::debug!(doc_id = %doc_id, "Skipping doc without title or path");
                return None;
            };
            Some(RouteRecord {
                path,
                title,
                description: doc.description.unwrap_or_default(),
            })
        })
        .collect();

    Ok(records)
}
