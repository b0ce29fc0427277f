//! Route manifest synthesis from a Markdown source tree.
//!
//! Produces the same shape the site generator exposes after its build, so
//! post-build steps can run without the generator in the loop.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_json::Value;

use crate::ManifestError;
use crate::front_matter::{first_heading, first_paragraph, parse_page};
use crate::route::{DocMetadata, PluginIdentifier, RouteConfig, RouteManifest, VersionMetadata};
use crate::scanner::{Scanner, rel_path_to_url};

/// Component the generator uses for individual doc pages.
const DOC_ITEM_COMPONENT: &str = "@theme/DocItem";

/// A page read from the source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDoc {
    /// Doc id (relative path, last segment replaced by front matter `id`).
    pub id: String,
    /// Source-relative path without extension.
    pub source_path: String,
    /// Route path with leading `/`.
    pub route_path: String,
    pub title: String,
    pub description: String,
}

/// Builds a [`RouteManifest`] by reading a docs source directory.
pub struct ManifestBuilder {
    source_dir: PathBuf,
    plugin_name: String,
}

impl ManifestBuilder {
    /// # Arguments
    ///
    /// * `source_dir` - Markdown content root
    /// * `plugin_name` - plugin name to tag the docs routes with
    #[must_use]
    pub fn new(source_dir: &Path, plugin_name: &str) -> Self {
        Self {
            source_dir: source_dir.to_path_buf(),
            plugin_name: plugin_name.to_owned(),
        }
    }

    /// Read every published page in scan order.
    ///
    /// Drafts are left out. Two pages resolving to the same doc id is an error.
    pub fn documents(&self) -> Result<Vec<SourceDoc>, ManifestError> {
        let refs = Scanner::new(&self.source_dir).scan()?;
        let mut docs = Vec::with_capacity(refs.len());
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        for page in refs {
            let content = fs::read_to_string(&page.file_path).map_err(|source| {
                ManifestError::Io {
                    path: page.file_path.clone(),
                    source,
                }
            })?;
            let (front_matter, body) = parse_page(&content);
            if front_matter.draft {
                tracing::debug!(path = %page.rel_path, "Skipping draft");
                continue;
            }

            let id = doc_id(&page.rel_path, front_matter.id.as_deref());
            if let Some(first) = seen.get(&id) {
                return Err(ManifestError::DuplicateDocId {
                    id,
                    first: first.clone(),
                    second: page.file_path,
                });
            }
            seen.insert(id.clone(), page.file_path.clone());

            let url = rel_path_to_url(&page.rel_path);
            let title = front_matter
                .title
                .or_else(|| first_heading(body))
                .unwrap_or_else(|| title_from_url(url));
            let description = front_matter
                .description
                .map(|d| d.trim().to_owned())
                .or_else(|| first_paragraph(body))
                .unwrap_or_default();

            docs.push(SourceDoc {
                route_path: route_path(url, front_matter.slug.as_deref()),
                source_path: page.rel_path,
                id,
                title,
                description,
            });
        }

        Ok(docs)
    }

    /// Build the manifest: one docs plugin route whose root sub-route carries
    /// the current version's docs and a leaf route per page.
    pub fn build(&self) -> Result<RouteManifest, ManifestError> {
        let docs = self.documents()?;

        let leaf_routes = docs
            .iter()
            .map(|doc| {
                let mut route = RouteConfig::new(doc.route_path.clone());
                route.component = Some(DOC_ITEM_COMPONENT.to_owned());
                route.exact = Some(true);
                route
            })
            .collect();

        let version = VersionMetadata {
            version: Some("current".to_owned()),
            label: Some("Next".to_owned()),
            docs: docs
                .into_iter()
                .map(|doc| {
                    let meta = DocMetadata {
                        id: Some(doc.id.clone()),
                        title: Some(doc.title),
                        description: Some(doc.description),
                        path: Some(doc.source_path),
                    };
                    (doc.id, meta)
                })
                .collect::<IndexMap<_, _>>(),
        };

        let mut docs_root = RouteConfig::new("/");
        docs_root.routes = leaf_routes;
        docs_root
            .props
            .insert("version".to_owned(), version_value(&version)?);

        let mut plugin_route = RouteConfig::new("/");
        plugin_route.plugin = Some(PluginIdentifier {
            name: self.plugin_name.clone(),
            id: "default".to_owned(),
        });
        plugin_route.routes = vec![docs_root];

        Ok(RouteManifest::new(vec![plugin_route]))
    }
}

fn version_value(version: &VersionMetadata) -> Result<Value, ManifestError> {
    serde_json::to_value(version).map_err(ManifestError::Json)
}

/// Doc id: the relative path with its last segment optionally replaced.
fn doc_id(rel_path: &str, front_matter_id: Option<&str>) -> String {
    match (front_matter_id, rel_path.rsplit_once('/')) {
        (Some(id), Some((dir, _))) => format!("{dir}/{id}"),
        (Some(id), None) => id.to_owned(),
        (None, _) => rel_path.to_owned(),
    }
}

/// Route path for a page: an absolute slug wins, a relative slug replaces
/// the last segment, otherwise the URL derived from the file location.
fn route_path(url: &str, slug: Option<&str>) -> String {
    match slug {
        Some(slug) if slug.starts_with('/') => slug.to_owned(),
        Some(slug) => match url.rsplit_once('/') {
            Some((dir, _)) => format!("/{dir}/{slug}"),
            None => format!("/{slug}"),
        },
        None => format!("/{url}"),
    }
}

/// Derive a title from the last URL segment, falling back to "Home" for the root.
fn title_from_url(url: &str) -> String {
    match url.rsplit_once('/').map_or(url, |(_, last)| last) {
        "" => "Home".to_owned(),
        slug => titlecase_from_slug(slug),
    }
}

/// Convert a slug (kebab-case or `snake_case`) to title case.
fn titlecase_from_slug(slug: &str) -> String {
    let mut result = String::with_capacity(slug.len());
    for word in slug.split(['-', '_', ' ']).filter(|w| !w.is_empty()) {
        if !result.is_empty() {
            result.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }
    result
}
