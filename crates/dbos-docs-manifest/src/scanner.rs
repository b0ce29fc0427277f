//! Page discovery by filesystem walking.
//!
//! The scanner only finds Markdown pages and reports where they are; reading
//! and interpreting them is left to [`ManifestBuilder`](crate::ManifestBuilder).

use std::fs;
use std::path::{Path, PathBuf};

use crate::ManifestError;

/// Location of one Markdown page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PageRef {
    /// Path relative to the source root, with `/` separators and no extension
    /// (e.g. `"guide/setup"`).
    pub rel_path: String,
    /// Absolute path of the `.md` file.
    pub file_path: PathBuf,
}

/// Walks a docs source tree in a stable order.
///
/// Within a directory, pages come first (sorted by file name), then
/// subdirectories (sorted by name). Hidden entries and `_`-prefixed partials
/// are skipped.
pub(crate) struct Scanner {
    source_dir: PathBuf,
}

impl Scanner {
    pub fn new(source_dir: &Path) -> Self {
        Self {
            source_dir: source_dir.to_path_buf(),
        }
    }

    pub fn scan(&self) -> Result<Vec<PageRef>, ManifestError> {
        if !self.source_dir.is_dir() {
            return Err(ManifestError::SourceNotFound(self.source_dir.clone()));
        }
        let mut refs = Vec::new();
        self.scan_directory(&self.source_dir, "", &mut refs)?;
        Ok(refs)
    }

    fn scan_directory(
        &self,
        dir_path: &Path,
        rel_prefix: &str,
        refs: &mut Vec<PageRef>,
    ) -> Result<(), ManifestError> {
        let io_err = |source| ManifestError::Io {
            path: dir_path.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        let mut dirs = Vec::new();
        for entry in fs::read_dir(dir_path).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') || name.starts_with('_') {
                continue;
            }
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            if is_dir {
                dirs.push((name, entry.path()));
            } else if let Some(stem) = name.strip_suffix(".md") {
                files.push((stem.to_owned(), entry.path()));
            }
        }
        files.sort();
        dirs.sort();

        for (stem, file_path) in files {
            refs.push(PageRef {
                rel_path: join_rel(rel_prefix, &stem),
                file_path,
            });
        }
        for (name, path) in dirs {
            self.scan_directory(&path, &join_rel(rel_prefix, &name), refs)?;
        }
        Ok(())
    }
}

fn join_rel(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}/{name}")
    }
}

/// Convert a source-relative page path to its URL path (without leading `/`).
///
/// - `index` -> `""`
/// - `guide` -> `"guide"`
/// - `domain/index` -> `"domain"`
/// - `domain/setup` -> `"domain/setup"`
pub(crate) fn rel_path_to_url(rel_path: &str) -> &str {
    if rel_path == "index" {
        ""
    } else if let Some(dir) = rel_path.strip_suffix("/index") {
        dir
    } else {
        rel_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rel_paths(refs: &[PageRef]) -> Vec<&str> {
        refs.iter().map(|r| r.rel_path.as_str()).collect()
    }

    #[test]
    fn test_rel_path_to_url() {
        assert_eq!(rel_path_to_url("index"), "");
        assert_eq!(rel_path_to_url("guide"), "guide");
        assert_eq!(rel_path_to_url("domain/index"), "domain");
        assert_eq!(rel_path_to_url("domain/setup"), "domain/setup");
        assert_eq!(rel_path_to_url("a/b/c"), "a/b/c");
    }

    #[test]
    fn test_scan_orders_files_before_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("intro.md"), "# Intro").unwrap();
        let guide = temp_dir.path().join("guide");
        fs::create_dir(&guide).unwrap();
        fs::write(guide.join("setup.md"), "# Setup").unwrap();
        fs::write(temp_dir.path().join("about.md"), "# About").unwrap();

        let refs = Scanner::new(temp_dir.path()).scan().unwrap();

        assert_eq!(rel_paths(&refs), vec!["about", "intro", "guide/setup"]);
        assert!(refs[2].file_path.ends_with("guide/setup.md"));
    }

    #[test]
    fn test_scan_skips_hidden_partials_and_non_markdown() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join(".hidden.md"), "# Hidden").unwrap();
        fs::write(temp_dir.path().join("_partial.md"), "# Partial").unwrap();
        fs::write(temp_dir.path().join("logo.png"), [0u8; 4]).unwrap();
        fs::write(temp_dir.path().join("page.mdx"), "# Mdx").unwrap();
        fs::write(temp_dir.path().join("visible.md"), "# Visible").unwrap();
        let drafts = temp_dir.path().join("_drafts");
        fs::create_dir(&drafts).unwrap();
        fs::write(drafts.join("wip.md"), "# WIP").unwrap();

        let refs = Scanner::new(temp_dir.path()).scan().unwrap();

        assert_eq!(rel_paths(&refs), vec!["visible"]);
    }

    #[test]
    fn test_scan_nested_structure() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("index.md"), "# Home").unwrap();
        let l2 = temp_dir.path().join("level1").join("level2");
        fs::create_dir_all(&l2).unwrap();
        fs::write(temp_dir.path().join("level1").join("index.md"), "# L1").unwrap();
        fs::write(l2.join("deep.md"), "# Deep").unwrap();

        let refs = Scanner::new(temp_dir.path()).scan().unwrap();

        assert_eq!(
            rel_paths(&refs),
            vec!["index", "level1/index", "level1/level2/deep"]
        );
    }

    #[test]
    fn test_scan_empty_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let refs = Scanner::new(temp_dir.path()).scan().unwrap();
        assert!(refs.is_empty());
    }

    #[test]
    fn test_scan_missing_dir() {
        let err = Scanner::new(Path::new("/nonexistent/docs")).scan().unwrap_err();
        assert!(matches!(err, ManifestError::SourceNotFound(_)));
    }
}
