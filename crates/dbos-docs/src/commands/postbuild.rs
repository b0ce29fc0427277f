//! `dbos-docs postbuild` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use dbos_docs_config::{CliSettings, Config};
use dbos_docs_plugins::PostBuildContext;

use super::{build_host, load_manifest};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the postbuild command.
#[derive(Args)]
pub(crate) struct PostbuildArgs {
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

    /// Public site URL (overrides config).
    #[arg(long, env = "DBOS_DOCS_SITE_URL")]
    site_url: Option<String>,
}

impl PostbuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            out_dir: self.out_dir,
            site_url: self.site_url,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Source: {}",
            config.docs_resolved.source_dir.display()
        ));
        output.info(&format!("Output: {}", config.docs_resolved.out_dir.display()));
        for line in site_summary(&config) {
            output.info(&line);
        }

        let ran = run_postbuild(&config, self.manifest.as_deref())?;
        if ran.is_empty() {
            output.warning("No post-build plugins enabled");
        } else {
            output.success(&format!("Post-build finished: {}", ran.join(", ")));
        }
        Ok(())
    }
}

/// Status lines describing the site integrations in `config`.
fn site_summary(config: &Config) -> Vec<String> {
    let mut lines = vec![format!("Site: {} ({})", config.site.title, config.site.url)];
    if let Some(search) = &config.search {
        lines.push(format!("Search: Algolia index {}", search.index_name));
    }
    if config.analytics.is_enabled() {
        lines.push(format!(
            "Analytics: {}",
            config.analytics.providers().join(", ")
        ));
    }
    lines
}

/// Run every enabled plugin and return the names of those that ran.
fn run_postbuild(
    config: &Config,
    manifest_path: Option<&Path>,
) -> Result<Vec<&'static str>, CliError> {
    let manifest = load_manifest(manifest_path, config)?;
    let ctx = PostBuildContext {
        out_dir: &config.docs_resolved.out_dir,
        manifest: &manifest,
    };
    Ok(build_host(config).run(&ctx)?)
}
