//! `llms.txt` generation from the docs collection.

use std::fs;
use std::path::{Path, PathBuf};

use dbos_docs_manifest::{RouteManifest, RouteRecord, extract_doc_records};

use crate::plugin::{Plugin, PluginError, PostBuildContext};

/// Text fixed around the page list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmsIndexOptions {
    /// Base URL the page links are built on.
    pub site_url: String,
    pub heading: String,
    pub section: String,
}

impl Default for LlmsIndexOptions {
    fn default() -> Self {
        Self {
            site_url: "https://docs.dbos.dev".to_owned(),
            heading: "DBOS Documentation".to_owned(),
            section: "Docs".to_owned(),
        }
    }
}

/// Render the index document.
///
/// One bullet per record, in input order, linking to the mirrored Markdown
/// file. There is no trailing newline after the last bullet.
#[must_use]
pub fn render_llms_index(options: &LlmsIndexOptions, records: &[RouteRecord]) -> String {
    let site_url = options.site_url.trim_end_matches('/');
    let lines: Vec<String> = records
        .iter()
        .map(|record| {
            format!(
                "- [{}]({site_url}/{}.md): {}",
                record.title, record.path, record.description
            )
        })
        .collect();

    format!(
        "# {}\n\n## {}\n\n{}",
        options.heading,
        options.section,
        lines.join("\n")
    )
}

/// Post-build adapter writing the index into the output root.
pub struct LlmsIndexPlugin {
    options: LlmsIndexOptions,
    filename: String,
    plugin_name: String,
}

impl LlmsIndexPlugin {
    /// # Arguments
    ///
    /// * `options` - heading, section and site URL
    /// * `filename` - file name written at the output root
    /// * `plugin_name` - docs plugin whose routes carry the collection
    #[must_use]
    pub fn new(options: LlmsIndexOptions, filename: &str, plugin_name: &str) -> Self {
        Self {
            options,
            filename: filename.to_owned(),
            plugin_name: plugin_name.to_owned(),
        }
    }

    /// Write the index under `out_dir`.
    ///
    /// Returns the written path, or `None` when the manifest has no docs
    /// collection. A file left by an earlier run is not touched in that case.
    ///
    /// # Errors
    ///
    /// Fails only if the file cannot be written.
    pub fn generate(
        &self,
        manifest: &RouteManifest,
        out_dir: &Path,
    ) -> Result<Option<PathBuf>, PluginError> {
        let records = match extract_doc_records(manifest, &self.plugin_name) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(reason = %e, "Skipping {}", self.filename);
                return Ok(None);
            }
        };

        let path = out_dir.join(&self.filename);
        let content = render_llms_index(&self.options, &records);
        fs::write(&path, content).map_err(|source| PluginError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::info!(
            path = %path.display(),
            pages = records.len(),
            "Generated LLM index"
        );
        Ok(Some(path))
    }
}

impl Plugin for LlmsIndexPlugin {
    fn name(&self) -> &'static str {
        "llms-index"
    }

    fn post_build(&self, ctx: &PostBuildContext<'_>) -> Result<(), PluginError> {
        self.generate(ctx.manifest, ctx.out_dir)?;
        Ok(())
    }
}
