//! CLI command implementations.

mod llms;
mod manifest;
mod postbuild;
mod redirects;

use std::path::Path;

use dbos_docs_config::Config;
use dbos_docs_manifest::{ManifestBuilder, RouteManifest};
use dbos_docs_plugins::{
    LlmsIndexOptions, LlmsIndexPlugin, MarkdownMirrorPlugin, PostBuildHost, PrefixRule, Redirect,
    RedirectStubPlugin, RedirectTable,
};

pub(crate) use llms::LlmsArgs;
pub(crate) use manifest::ManifestArgs;
pub(crate) use postbuild::PostbuildArgs;
pub(crate) use redirects::RedirectsCommand;

use crate::error::CliError;

/// Route manifest for a run: an exported file when given, otherwise
/// synthesized from the docs source tree.
pub(crate) fn load_manifest(
    manifest_path: Option<&Path>,
    config: &Config,
) -> Result<RouteManifest, CliError> {
    let manifest = match manifest_path {
        Some(path) => RouteManifest::from_json_file(path)?,
        None => ManifestBuilder::new(
            &config.docs_resolved.source_dir,
            &config.docs_resolved.plugin_name,
        )
        .build()?,
    };
    Ok(manifest)
}

pub(crate) fn redirect_table(config: &Config) -> RedirectTable {
    RedirectTable::new(
        config
            .redirects
            .iter()
            .map(|r| Redirect::new(r.from.as_str(), r.to.as_str())),
        config
            .redirect_prefix
            .as_ref()
            .map(|p| PrefixRule::new(p.from.as_str(), p.to.as_str())),
    )
}

pub(crate) fn llms_options(config: &Config) -> LlmsIndexOptions {
    LlmsIndexOptions {
        site_url: config.site.url.clone(),
        heading: config.llms.heading.clone(),
        section: config.llms.section.clone(),
    }
}

/// Host with the plugins enabled in `config`, in build order:
/// Markdown mirror, LLM index, redirect stubs.
pub(crate) fn build_host(config: &Config) -> PostBuildHost {
    let mut host = PostBuildHost::new();
    if config.markdown_mirror.enabled {
        host = host.with_plugin(MarkdownMirrorPlugin::new(
            config.docs_resolved.source_dir.clone(),
        ));
    }
    if config.llms.enabled {
        host = host.with_plugin(LlmsIndexPlugin::new(
            llms_options(config),
            &config.llms.filename,
            &config.docs_resolved.plugin_name,
        ));
    }
    let table = redirect_table(config);
    if config.redirect_stubs.enabled && !table.is_empty() {
        host = host.with_plugin(RedirectStubPlugin::new(table, &config.site.url));
    }
    host
}
