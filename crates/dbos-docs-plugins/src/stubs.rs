//! Client-side redirect pages for legacy paths.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::plugin::{Plugin, PluginError, PostBuildContext};
use crate::redirects::{Redirect, RedirectTable};

/// Render a page that sends the browser from a legacy path to `to`.
///
/// The query string and fragment of the original request are kept.
#[must_use]
pub fn render_redirect_page(to: &str, site_url: &str) -> String {
    let target = escape(to);
    let canonical = escape(&format!("{}{to}", site_url.trim_end_matches('/')));

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>Redirecting to {target}</title>");
    let _ = writeln!(html, "<meta http-equiv=\"refresh\" content=\"0; url={target}\">");
    let _ = writeln!(html, "<link rel=\"canonical\" href=\"{canonical}\">");
    html.push_str("<meta name=\"robots\" content=\"noindex\">\n");
    html.push_str("</head>\n<body>\n");
    let _ = writeln!(
        html,
        "<p>This page has moved to <a id=\"redirect-target\" href=\"{target}\">{target}</a>.</p>"
    );
    html.push_str("<script>\n");
    html.push_str("var target = document.getElementById(\"redirect-target\").getAttribute(\"href\");\n");
    html.push_str("window.location.replace(target + window.location.search + window.location.hash);\n");
    html.push_str("</script>\n");
    html.push_str("</body>\n</html>\n");
    html
}

/// File a redirect source is served from, relative to the output root.
///
/// `/old/page` becomes `old/page/index.html`; a source already ending in
/// `.html` is used as is.
///
/// # Errors
///
/// Rejects sources that name the root or climb out of it.
pub fn stub_path(from: &str) -> Result<PathBuf, PluginError> {
    let rel = from.trim_matches('/');
    let climbs = rel.split('/').any(|segment| matches!(segment, "." | ".."));
    if rel.is_empty() || climbs {
        return Err(PluginError::InvalidRedirect(from.to_owned()));
    }

    let rel_path = Path::new(rel);

    if rel.ends_with(".html") {
        Ok(rel_path.to_path_buf())
    } else {
        Ok(rel_path.join("index.html"))
    }
}

/// Post-build adapter writing one redirect page per stub.
pub struct RedirectStubPlugin {
    table: RedirectTable,
    site_url: String,
}

impl RedirectStubPlugin {
    #[must_use]
    pub fn new(table: RedirectTable, site_url: &str) -> Self {
        Self {
            table,
            site_url: site_url.to_owned(),
        }
    }

    fn write_stub(&self, out_dir: &Path, redirect: &Redirect) -> Result<bool, PluginError> {
        let path = out_dir.join(stub_path(&redirect.from)?);
        if path.exists() {
            tracing::warn!(
                from = %redirect.from,
                path = %path.display(),
                "Redirect stub would overwrite an existing file, skipping"
            );
            return Ok(false);
        }

        let write_err = |source| PluginError::Write {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(&path, render_redirect_page(&redirect.to, &self.site_url)).map_err(write_err)?;
        tracing::debug!(from = %redirect.from, to = %redirect.to, "Wrote redirect stub");
        Ok(true)
    }
}

impl Plugin for RedirectStubPlugin {
    fn name(&self) -> &'static str {
        "redirect-stubs"
    }

    fn post_build(&self, ctx: &PostBuildContext<'_>) -> Result<(), PluginError> {
        let stubs = self.table.stubs(&ctx.manifest.page_paths());

        let mut written = 0;
        for redirect in &stubs {
            if self.write_stub(ctx.out_dir, redirect)? {
                written += 1;
            }
        }

        tracing::info!(written, "Generated redirect stubs");
        Ok(())
    }
}

fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redirects::PrefixRule;
    use dbos_docs_manifest::{RouteConfig, RouteManifest};
    use pretty_assertions::assert_eq;

    fn manifest(paths: &[&str]) -> RouteManifest {
        RouteManifest::new(paths.iter().map(|p| RouteConfig::new(*p)).collect())
    }

    #[test]
    fn test_stub_path() {
        assert_eq!(stub_path("/old/page").unwrap(), PathBuf::from("old/page/index.html"));
        assert_eq!(stub_path("/old/page/").unwrap(), PathBuf::from("old/page/index.html"));
        assert_eq!(stub_path("/legacy.html").unwrap(), PathBuf::from("legacy.html"));
    }

    #[test]
    fn test_stub_path_rejects_root_and_parent_segments() {
        assert!(matches!(stub_path("/"), Err(PluginError::InvalidRedirect(_))));
        assert!(matches!(stub_path("/a/../../etc"), Err(PluginError::InvalidRedirect(_))));
        assert!(matches!(stub_path("/a/./b"), Err(PluginError::InvalidRedirect(_))));
    }

    #[test]
    fn test_render_redirect_page() {
        let html = render_redirect_page("/cloud-tutorials/deploy", "https://docs.dbos.dev/");

        assert!(html.contains("<meta http-equiv=\"refresh\" content=\"0; url=/cloud-tutorials/deploy\">"));
        assert!(html.contains(
            "<link rel=\"canonical\" href=\"https://docs.dbos.dev/cloud-tutorials/deploy\">"
        ));
        assert!(html.contains("window.location.search + window.location.hash"));
    }

    #[test]
    fn test_render_escapes_target() {
        let html = render_redirect_page("/a\"><script>", "https://docs.dbos.dev");
        assert!(!html.contains("\"><script>"));
        assert!(html.contains("/a&quot;&gt;&lt;script&gt;"));
    }

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(escape("<script>"), "&lt;script&gt;");
        assert_eq!(escape("a&b"), "a&amp;b");
        assert_eq!(escape("it's"), "it&#x27;s");
    }

    #[test]
    fn test_plugin_writes_static_and_prefix_stubs() {
        let out = tempfile::tempdir().unwrap();
        let table = RedirectTable::new(
            vec![Redirect::new("/a", "/b")],
            Some(PrefixRule::new("/production/dbos-cloud", "/cloud-tutorials")),
        );
        let manifest = manifest(&["/", "/b", "/cloud-tutorials/deploy"]);
        let plugin = RedirectStubPlugin::new(table, "https://docs.dbos.dev");

        plugin
            .post_build(&PostBuildContext {
                out_dir: out.path(),
                manifest: &manifest,
            })
            .unwrap();

        let a = fs::read_to_string(out.path().join("a/index.html")).unwrap();
        assert!(a.contains("url=/b\""));
        let legacy =
            fs::read_to_string(out.path().join("production/dbos-cloud/deploy/index.html")).unwrap();
        assert!(legacy.contains("url=/cloud-tutorials/deploy\""));
    }

    #[test]
    fn test_plugin_does_not_overwrite_existing_files() {
        let out = tempfile::tempdir().unwrap();
        fs::create_dir_all(out.path().join("a")).unwrap();
        fs::write(out.path().join("a/index.html"), "built").unwrap();
        let table = RedirectTable::new(vec![Redirect::new("/a", "/b")], None);
        let plugin = RedirectStubPlugin::new(table, "https://docs.dbos.dev");
        let manifest = manifest(&["/b"]);

        plugin
            .post_build(&PostBuildContext {
                out_dir: out.path(),
                manifest: &manifest,
            })
            .unwrap();

        assert_eq!(fs::read_to_string(out.path().join("a/index.html")).unwrap(), "built");
    }

    #[test]
    fn test_plugin_rejects_invalid_source() {
        let out = tempfile::tempdir().unwrap();
        let table = RedirectTable::new(vec![Redirect::new("/../escape", "/b")], None);
        let plugin = RedirectStubPlugin::new(table, "https://docs.dbos.dev");
        let manifest = manifest(&[]);

        let err = plugin
            .post_build(&PostBuildContext {
                out_dir: out.path(),
                manifest: &manifest,
            })
            .unwrap_err();

        assert!(matches!(err, PluginError::InvalidRedirect(ref from) if from == "/../escape"));
    }
}
