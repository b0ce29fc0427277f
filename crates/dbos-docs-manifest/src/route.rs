//! Route manifest model.
//!
//! Mirrors the route table the site generator holds after its build: a tree
//! of route configs, each optionally tagged with the plugin that registered
//! it. Route `props` stay untyped here because every plugin puts something
//! different in them; the docs plugin's props are decoded by
//! [`extract`](crate::extract).

use std::collections::HashSet;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ManifestError;

/// Plugin that registered a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginIdentifier {
    pub name: String,
    #[serde(default = "default_plugin_id")]
    pub id: String,
}

fn default_plugin_id() -> String {
    "default".to_owned()
}

/// One node of the route tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// URL path, e.g. `"/"` or `"/guide/setup"`.
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin: Option<PluginIdentifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<RouteConfig>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub props: Map<String, Value>,
}

impl RouteConfig {
    /// Create a bare route with only a path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            component: None,
            exact: None,
            plugin: None,
            routes: Vec::new(),
            props: Map::new(),
        }
    }

    /// Whether this route was registered by the named plugin.
    pub fn is_from_plugin(&self, name: &str) -> bool {
        self.plugin.as_ref().is_some_and(|p| p.name == name)
    }
}

/// Immutable snapshot of the generator's route table.
///
/// Serialized as a plain JSON array of route configs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteManifest {
    pub routes: Vec<RouteConfig>,
}

impl RouteManifest {
    #[must_use]
    pub fn new(routes: Vec<RouteConfig>) -> Self {
        Self { routes }
    }

    /// Parse a manifest from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ManifestError> {
        serde_json::from_str(json).map_err(ManifestError::Json)
    }

    /// Load a manifest exported by the site generator.
    pub fn from_json_file(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, ManifestError> {
        serde_json::to_string_pretty(self).map_err(ManifestError::Json)
    }

    /// Every route path in the tree, depth-first, without duplicates.
    pub fn page_paths(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut paths = Vec::new();
        collect_paths(&self.routes, &mut seen, &mut paths);
        paths
    }
}

fn collect_paths<'a>(
    routes: &'a [RouteConfig],
    seen: &mut HashSet<&'a str>,
    paths: &mut Vec<String>,
) {
    for route in routes {
        if seen.insert(route.path.as_str()) {
            paths.push(route.path.clone());
        }
        collect_paths(&route.routes, seen, paths);
    }
}

/// Props of the docs plugin's root route, as far as this toolkit reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionMetadata {
    /// Version name (`"current"` for the unversioned docs).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Document id → metadata, in the generator's order.
    pub docs: IndexMap<String, DocMetadata>,
}

/// Per-document metadata inside [`VersionMetadata::docs`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Missing, `null` and empty titles all decode; extraction skips them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Source-relative path without extension. Falls back to the doc id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_ignores_unknown_route_fields() {
        let json = r#"[
            {
                "path": "/",
                "component": "@theme/DocsRoot",
                "modules": {"x": "y"},
                "plugin": {"name": "docusaurus-plugin-content-docs", "id": "default"},
                "routes": [{"path": "/intro", "exact": true}]
            }
        ]"#;
        let manifest = RouteManifest::from_json_str(json).unwrap();

        assert_eq!(manifest.routes.len(), 1);
        assert!(manifest.routes[0].is_from_plugin("docusaurus-plugin-content-docs"));
        assert_eq!(manifest.routes[0].routes[0].exact, Some(true));
    }

    #[test]
    fn test_plugin_id_defaults() {
        let json = r#"[{"path": "/", "plugin": {"name": "p"}}]"#;
        let manifest = RouteManifest::from_json_str(json).unwrap();
        assert_eq!(manifest.routes[0].plugin.as_ref().unwrap().id, "default");
    }

    #[test]
    fn test_invalid_json_is_error() {
        let err = RouteManifest::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ManifestError::Json(_)));
    }

    #[test]
    fn test_page_paths_flatten_and_dedupe() {
        let mut root = RouteConfig::new("/");
        let mut docs_root = RouteConfig::new("/");
        docs_root.routes = vec![RouteConfig::new("/intro"), RouteConfig::new("/guide/setup")];
        root.routes = vec![docs_root];
        let manifest = RouteManifest::new(vec![root, RouteConfig::new("/blog")]);

        assert_eq!(
            manifest.page_paths(),
            vec!["/", "/intro", "/guide/setup", "/blog"]
        );
    }

    #[test]
    fn test_json_round_trip_keeps_shape() {
        let json = r#"[{"path":"/","props":{"version":{"docs":{"b":{"title":"B"},"a":{"title":"A"}}}}}]"#;
        let manifest = RouteManifest::from_json_str(json).unwrap();
        let pretty = manifest.to_json_pretty().unwrap();

        // Key order of the docs map survives serialization.
        let b = pretty.find("\"b\"").unwrap();
        let a = pretty.find("\"a\"").unwrap();
        assert!(b < a);
    }
}
