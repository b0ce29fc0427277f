//! Markdown mirror: copies `*.md` sources next to the generated HTML.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::plugin::{Plugin, PluginError, PostBuildContext};

/// Counts of what a mirror run wrote.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MirrorStats {
    /// Directories created below the destination root.
    pub directories: usize,
    /// Markdown files copied.
    pub files: usize,
}

/// Error returned by [`mirror_markdown`].
#[derive(Debug, thiserror::Error)]
pub enum MirrorError {
    #[error("Markdown source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    #[error("Failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("Failed to copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
}

fn is_markdown(name: &std::ffi::OsStr) -> bool {
    name.to_str().is_some_and(|n| n.ends_with(".md"))
}

/// Copy every `*.md` file under `source` to the same relative path under `dest`.
///
/// Directories are recreated as they are walked; any other file is skipped.
/// Existing destination files are overwritten, so repeated runs converge on
/// the same tree. If `dest` lies inside `source` it is not walked; both roots
/// are canonicalized first, so this holds however the paths are spelled.
///
/// # Errors
///
/// Fails if `source` is not a directory or on the first filesystem error.
pub fn mirror_markdown(source: &Path, dest: &Path) -> Result<MirrorStats, MirrorError> {
    if !source.is_dir() {
        return Err(MirrorError::SourceNotFound(source.to_path_buf()));
    }
    let source = fs::canonicalize(source)
        .map_err(|_| MirrorError::SourceNotFound(source.to_path_buf()))?;
    let create_err = |e| MirrorError::CreateDir {
        path: dest.to_path_buf(),
        source: e,
    };
    fs::create_dir_all(dest).map_err(create_err)?;
    let dest = fs::canonicalize(dest).map_err(create_err)?;

    let mut stats = MirrorStats::default();
    let walker = WalkDir::new(&source)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !entry.path().starts_with(&dest));

    for entry in walker {
        let entry = entry.map_err(|e| MirrorError::Walk {
            path: e.path().unwrap_or(&source).to_path_buf(),
            source: e,
        })?;
        let Ok(rel) = entry.path().strip_prefix(&source) else {
            continue;
        };
        let target = dest.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| MirrorError::CreateDir {
                path: target.clone(),
                source: e,
            })?;
            if entry.depth() > 0 {
                stats.directories += 1;
            }
        } else if is_markdown(entry.file_name()) {
            fs::copy(entry.path(), &target).map_err(|e| MirrorError::Copy {
                from: entry.path().to_path_buf(),
                to: target.clone(),
                source: e,
            })?;
            stats.files += 1;
        }
    }

    Ok(stats)
}

/// Post-build adapter for [`mirror_markdown`].
pub struct MarkdownMirrorPlugin {
    source_dir: PathBuf,
}

impl MarkdownMirrorPlugin {
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }
}

impl Plugin for MarkdownMirrorPlugin {
    fn name(&self) -> &'static str {
        "markdown-mirror"
    }

    fn post_build(&self, ctx: &PostBuildContext<'_>) -> Result<(), PluginError> {
        let stats = mirror_markdown(&self.source_dir, ctx.out_dir)?;
        tracing::info!(
            files = stats.files,
            directories = stats.directories,
            out_dir = %ctx.out_dir.display(),
            "Copied markdown files to build output"
        );
        Ok(())
    }
}
