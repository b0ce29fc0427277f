//! YAML front matter and heading extraction for Markdown pages.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

static FRONT_MATTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A\u{feff}?---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n|\z)")
        .expect("invalid front matter regex")
});

static H1: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+?)\s*#*\s*$").expect("invalid heading regex"));

/// Front matter fields this toolkit reads. Everything else is ignored.
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub id: Option<String>,
    pub slug: Option<String>,
    pub draft: bool,
}

/// Split a page into its front matter and body.
///
/// Pages without front matter, or with YAML that fails to parse, get the
/// default (empty) front matter. A parse failure is logged.
pub(crate) fn parse_page(content: &str) -> (FrontMatter, &str) {
    let Some(caps) = FRONT_MATTER.captures(content) else {
        return (FrontMatter::default(), content);
    };
    let body = &content[caps.get(0).map_or(0, |m| m.end())..];
    let yaml = caps.get(1).map_or("", |m| m.as_str()).trim();
    if yaml.is_empty() {
        return (FrontMatter::default(), body);
    }

    let front_matter = serde_yaml::from_str(yaml)
        .inspect_err(|e| tracing::warn!(error = %e, "Failed to parse front matter, ignoring"))
        .unwrap_or_default();
    (front_matter, body)
}

/// First `# Heading` in the body.
pub(crate) fn first_heading(body: &str) -> Option<String> {
    let caps = H1.captures(body)?;
    Some(caps[1].trim().to_owned())
}

/// First line of plain paragraph text in the body.
///
/// Skips headings, MDX import/export lines, HTML/JSX, admonition markers,
/// and fenced code blocks.
pub(crate) fn first_paragraph(body: &str) -> Option<String> {
    let mut in_fence = false;
    for line in body.lines().map(str::trim) {
        if line.starts_with("```") || line.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence || line.is_empty() {
            continue;
        }
        let is_markup = line.starts_with('#')
            || line.starts_with("import ")
            || line.starts_with("export ")
            || line.starts_with('<')
            || line.starts_with(":::")
            || line.starts_with('|')
            || line.starts_with("---");
        if !is_markup {
            return Some(line.to_owned());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_page_with_front_matter() {
        let content = "---\ntitle: Intro\ndescription: Start here\nsidebar_position: 1\n---\n# Welcome\n";
        let (fm, body) = parse_page(content);

        assert_eq!(fm.title.as_deref(), Some("Intro"));
        assert_eq!(fm.description.as_deref(), Some("Start here"));
        assert!(!fm.draft);
        assert_eq!(body, "# Welcome\n");
    }

    #[test]
    fn test_parse_page_without_front_matter() {
        let (fm, body) = parse_page("# Title\n\nText");
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, "# Title\n\nText");
    }

    #[test]
    fn test_parse_page_empty_front_matter() {
        let (fm, body) = parse_page("---\n---\nBody");
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_parse_page_crlf() {
        let (fm, body) = parse_page("---\r\ntitle: Win\r\n---\r\nBody");
        assert_eq!(fm.title.as_deref(), Some("Win"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_parse_page_invalid_yaml_is_default() {
        let (fm, body) = parse_page("---\ntitle: [unclosed\n---\nBody");
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_parse_page_quoted_and_block_values() {
        let (fm, _) = parse_page(
            "---\ntitle: \"Workflows: a tour\"\ndescription: >\n  Folded\n  text\nid: tour\nslug: /tour\ndraft: true\n---\n",
        );
        assert_eq!(fm.title.as_deref(), Some("Workflows: a tour"));
        assert_eq!(fm.description.as_deref(), Some("Folded text\n"));
        assert_eq!(fm.id.as_deref(), Some("tour"));
        assert_eq!(fm.slug.as_deref(), Some("/tour"));
        assert!(fm.draft);
    }

    #[test]
    fn test_first_heading() {
        assert_eq!(
            first_heading("intro\n# Getting Started\n## Sub").as_deref(),
            Some("Getting Started")
        );
        assert_eq!(first_heading("## Only H2"), None);
        assert_eq!(first_heading("# Closed #").as_deref(), Some("Closed"));
    }

    #[test]
    fn test_first_paragraph_skips_markup() {
        let body = "import Tabs from '@theme/Tabs';\n\n# Title\n\n:::tip\n```bash\nnpm i\n```\nDBOS is durable.\nMore.";
        assert_eq!(first_paragraph(body).as_deref(), Some("DBOS is durable."));
    }

    #[test]
    fn test_first_paragraph_none() {
        assert_eq!(first_paragraph("# Only a heading\n"), None);
    }
}
