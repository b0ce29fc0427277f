//! `dbos-docs llms` command implementation.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use dbos_docs_config::{CliSettings, Config};
use dbos_docs_manifest::extract_doc_records;
use dbos_docs_plugins::{LlmsIndexPlugin, PostBuildError, render_llms_index};

use super::{llms_options, load_manifest};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the llms command.
#[derive(Args)]
pub(crate) struct LlmsArgs {
    /// Path to configuration file (default: auto-discover dbos-docs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Build output directory (overrides config).
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Route manifest JSON exported by the site generator
    /// (default: synthesize from the source directory).
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Print the index to stdout instead of writing it.
    #[arg(long)]
    print: bool,
}

impl LlmsArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            out_dir: self.out_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        if self.print {
            let text = render_index(&config, self.manifest.as_deref())?;
            writeln!(io::stdout(), "{text}")?;
            return Ok(());
        }

        match write_index(&config, self.manifest.as_deref())? {
            Some(path) => output.success(&format!("Wrote {}", path.display())),
            None => output.warning("No docs collection in the route manifest, nothing written"),
        }
        Ok(())
    }
}

/// Write the index into the output directory, returning the written path.
fn write_index(config: &Config, manifest_path: Option<&Path>) -> Result<Option<PathBuf>, CliError> {
    let out_dir = &config.docs_resolved.out_dir;
    if !out_dir.is_dir() {
        return Err(PostBuildError::OutDirMissing(out_dir.clone()).into());
    }
    let manifest = load_manifest(manifest_path, config)?;
    let plugin = LlmsIndexPlugin::new(
        llms_options(config),
        &config.llms.filename,
        &config.docs_resolved.plugin_name,
    );
    Ok(plugin.generate(&manifest, out_dir)?)
}

/// Render the index text, failing if the docs collection cannot be found.
fn render_index(config: &Config, manifest_path: Option<&Path>) -> Result<String, CliError> {
    let manifest = load_manifest(manifest_path, config)?;
    let records = extract_doc_records(&manifest, &config.docs_resolved.plugin_name)?;
    Ok(render_llms_index(&llms_options(config), &records))
}
