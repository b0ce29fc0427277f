//! Post-build plugins for the DBOS docs site.
//!
//! Each step is a pure function plus a thin [`Plugin`] adapter:
//!
//! - [`mirror_markdown`] / [`MarkdownMirrorPlugin`]: copy `*.md` sources into
//!   the build output
//! - [`render_llms_index`] / [`LlmsIndexPlugin`]: write `llms.txt`
//! - [`RedirectTable`] / [`RedirectStubPlugin`]: legacy path redirects
//!
//! [`PostBuildHost`] runs registered plugins in order against a
//! [`PostBuildContext`].

mod llms;
mod mirror;
mod plugin;
mod redirects;
mod stubs;

pub use llms::{LlmsIndexOptions, LlmsIndexPlugin, render_llms_index};
pub use mirror::{MarkdownMirrorPlugin, MirrorError, MirrorStats, mirror_markdown};
pub use plugin::{Plugin, PluginError, PostBuildContext, PostBuildError, PostBuildHost};
pub use redirects::{PrefixRule, Redirect, RedirectTable};
pub use stubs::{RedirectStubPlugin, render_redirect_page, stub_path};
