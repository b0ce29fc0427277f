//! `dbos-docs manifest` command implementation.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use dbos_docs_config::{CliSettings, Config};

use super::load_manifest;
use crate::error::CliError;

/// Arguments for the manifest command.
#[derive(Args)]
pub(crate) struct ManifestArgs {
    /// Path to configuration file (default: auto-discover dbos-docs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,
}

impl ManifestArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let manifest = load_manifest(None, &config)?;
        writeln!(io::stdout(), "{}", manifest.to_json_pretty()?)?;
        Ok(())
    }
}
