//! Post-build plugin trait and host.
//!
//! The site generator calls each registered plugin once after it has written
//! the output directory. [`PostBuildHost`] plays that role here: plugins run
//! in registration order and the first failure stops the run.

use std::io;
use std::path::{Path, PathBuf};

use dbos_docs_manifest::RouteManifest;

use crate::mirror::MirrorError;

/// What a plugin sees after the main build.
///
/// Both fields are read-only; plugins communicate only through files they
/// write under `out_dir`.
#[derive(Debug, Clone, Copy)]
pub struct PostBuildContext<'a> {
    /// Build output root.
    pub out_dir: &'a Path,
    /// Route table of the finished build.
    pub manifest: &'a RouteManifest,
}

/// A step that runs once after the main build.
pub trait Plugin: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Run the step.
    ///
    /// # Errors
    ///
    /// Any error is fatal for the build.
    fn post_build(&self, ctx: &PostBuildContext<'_>) -> Result<(), PluginError>;
}

/// Error returned by a plugin.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error(transparent)]
    Mirror(#[from] MirrorError),
    #[error("Failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("Invalid redirect source {0:?}")]
    InvalidRedirect(String),
}

/// Error returned by [`PostBuildHost::run`].
#[derive(Debug, thiserror::Error)]
pub enum PostBuildError {
    #[error("Output directory not found: {}", .0.display())]
    OutDirMissing(PathBuf),
    #[error("Plugin {plugin} failed: {source}")]
    Plugin {
        plugin: &'static str,
        source: PluginError,
    },
}

/// Runs post-build plugins in registration order.
#[derive(Default)]
pub struct PostBuildHost {
    plugins: Vec<Box<dyn Plugin>>,
}

impl PostBuildHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin after the ones already registered.
    #[must_use]
    pub fn with_plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Names of registered plugins, in run order.
    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// Run every plugin against the finished build.
    ///
    /// Returns the names of the plugins that ran.
    ///
    /// # Errors
    ///
    /// Fails before running anything if `out_dir` does not exist, and stops
    /// at the first plugin error.
    pub fn run(&self, ctx: &PostBuildContext<'_>) -> Result<Vec<&'static str>, PostBuildError> {
        if !ctx.out_dir.is_dir() {
            return Err(PostBuildError::OutDirMissing(ctx.out_dir.to_path_buf()));
        }

        let mut ran = Vec::with_capacity(self.plugins.len());
        for plugin in &self.plugins {
            let name = plugin.name();
            tracing::debug!(plugin = name, "Running post-build plugin");
            plugin
                .post_build(ctx)
                .map_err(|source| PostBuildError::Plugin {
                    plugin: name,
                    source,
                })?;
            ran.push(name);
        }
        Ok(ran)
    }
}
