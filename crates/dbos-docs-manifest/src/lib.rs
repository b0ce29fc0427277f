//! Route manifest handling for the DBOS docs post-build toolkit.
//!
//! The site generator keeps a route table in memory after its build. This
//! crate models that table as an immutable [`RouteManifest`] and provides:
//!
//! - [`extract_doc_records`]: typed lookup of the docs plugin's current
//!   version collection, with a named [`ExtractError`] for every way the
//!   expected shape can be missing
//! - [`ManifestBuilder`]: synthesis of the same shape from a Markdown tree,
//!   for runs without the generator
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use dbos_docs_manifest::{ManifestBuilder, extract_doc_records};
//!
//! let plugin = "docusaurus-plugin-content-docs";
//! let manifest = ManifestBuilder::new(Path::new("docs"), plugin).build()?;
//! for record in extract_doc_records(&manifest, plugin)? {
//!     println!("{}: {}", record.path, record.title);
//! }
//! ```

mod builder;
mod extract;
mod front_matter;
mod route;
mod scanner;

use std::path::PathBuf;

pub use builder::{ManifestBuilder, SourceDoc};
pub use extract::{ExtractError, RouteRecord, extract_doc_records, find_current_version};
pub use route::{DocMetadata, PluginIdentifier, RouteConfig, RouteManifest, VersionMetadata};

/// Error reading or building a manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Docs source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid manifest JSON: {0}")]
    Json(#[source] serde_json::Error),
    #[error("Duplicate doc id {id} ({} and {})", first.display(), second.display())]
    DuplicateDocId {
        id: String,
        first: PathBuf,
        second: PathBuf,
    },
}
