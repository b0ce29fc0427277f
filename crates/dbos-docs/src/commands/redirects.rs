//! `dbos-docs redirects` subcommand group.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use dbos_docs_config::Config;

use super::redirect_table;
use crate::error::CliError;
use crate::output::Output;

/// Redirect table commands.
#[derive(Subcommand)]
pub(crate) enum RedirectsCommand {
    /// List static redirects and the prefix rule.
    List(ListArgs),
    /// Show where a path redirects to.
    Resolve(ResolveArgs),
}

impl RedirectsCommand {
    /// Execute the redirects subcommand.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        match self {
            Self::List(args) => args.execute(),
            Self::Resolve(args) => args.execute(),
        }
    }
}

/// Arguments for `redirects list`.
#[derive(Args)]
pub(crate) struct ListArgs {
    /// Path to configuration file (default: auto-discover dbos-docs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ListArgs {
    fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let table = redirect_table(&config);

        if table.is_empty() {
            output.warning("No redirects configured");
            return Ok(());
        }
        output.info(&format!("{} static redirects", table.static_len()));
        for redirect in table.redirects() {
            output.info(&format!("{} -> {}", redirect.from, redirect.to));
        }
        if let Some(rule) = table.prefix_rule() {
            output.info(&format!("{}* -> {}*", rule.from_prefix, rule.to_prefix));
        }
        Ok(())
    }
}

/// Arguments for `redirects resolve`.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Site path to look up, e.g. `/production/dbos-cloud/deploy`.
    path: String,

    /// Path to configuration file (default: auto-discover dbos-docs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ResolveArgs {
    fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;

        match redirect_table(&config).resolve(&self.path) {
            Some(to) => output.success(&format!("{} -> {to}", self.path)),
            None => output.warning(&format!("{}: no redirect", self.path)),
        }
        Ok(())
    }
}
