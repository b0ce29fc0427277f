//! DBOS docs CLI - post-build toolkit.
//!
//! Provides commands for:
//! - `postbuild`: Run the post-build plugins against a finished build
//! - `llms`: Generate or print `llms.txt`
//! - `redirects list` / `redirects resolve`: Inspect the redirect table
//! - `manifest`: Print the route manifest synthesized from the docs tree

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{LlmsArgs, ManifestArgs, PostbuildArgs, RedirectsCommand};
use output::Output;

/// DBOS docs - post-build toolkit.
#[derive(Parser)]
#[command(name = "dbos-docs", version, about)]
struct Cli {
    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the post-build plugins against the build output.
    Postbuild(PostbuildArgs),
    /// Generate the LLM index.
    Llms(LlmsArgs),
    /// Redirect table commands.
    #[command(subcommand)]
    Redirects(RedirectsCommand),
    /// Print the route manifest synthesized from the docs source tree.
    Manifest(ManifestArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Postbuild(args) => args.execute(),
        Commands::Llms(args) => args.execute(),
        Commands::Redirects(cmd) => cmd.execute(),
        Commands::Manifest(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
