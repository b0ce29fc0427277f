//! Redirect table: exact legacy paths plus one prefix rewrite.

use indexmap::IndexMap;

/// One legacy path and where it now lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub from: String,
    pub to: String,
}

impl Redirect {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Rewrites `from_prefix + rest` to `to_prefix + rest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixRule {
    pub from_prefix: String,
    pub to_prefix: String,
}

impl PrefixRule {
    pub fn new(from_prefix: impl Into<String>, to_prefix: impl Into<String>) -> Self {
        Self {
            from_prefix: from_prefix.into(),
            to_prefix: to_prefix.into(),
        }
    }

    /// New location of a legacy path, or `None` outside the prefix.
    #[must_use]
    pub fn rewrite(&self, path: &str) -> Option<String> {
        path.strip_prefix(self.from_prefix.as_str())
            .map(|rest| format!("{}{rest}", self.to_prefix))
    }

    /// Legacy location of a built page, or `None` outside the target prefix.
    #[must_use]
    pub fn source_for(&self, existing: &str) -> Option<String> {
        existing
            .strip_prefix(self.to_prefix.as_str())
            .map(|rest| format!("{}{rest}", self.from_prefix))
    }
}

/// Static redirects keyed by source path, plus an optional prefix rule.
///
/// Static pairs keep declaration order. A repeated source replaces the
/// earlier target in place.
#[derive(Debug, Clone, Default)]
pub struct RedirectTable {
    redirects: IndexMap<String, String>,
    prefix_rule: Option<PrefixRule>,
}

impl RedirectTable {
    pub fn new(redirects: impl IntoIterator<Item = Redirect>, prefix_rule: Option<PrefixRule>) -> Self {
        let redirects = redirects.into_iter().map(|r| (r.from, r.to)).collect();
        Self {
            redirects,
            prefix_rule,
        }
    }

    /// Resolve a path: exact match first, then the prefix rule.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<String> {
        if let Some(to) = self.redirects.get(path) {
            return Some(to.clone());
        }
        self.prefix_rule.as_ref().and_then(|rule| rule.rewrite(path))
    }

    /// Static pairs in declaration order.
    pub fn redirects(&self) -> impl Iterator<Item = Redirect> + '_ {
        self.redirects
            .iter()
            .map(|(from, to)| Redirect::new(from.as_str(), to.as_str()))
    }

    #[must_use]
    pub fn prefix_rule(&self) -> Option<&PrefixRule> {
        self.prefix_rule.as_ref()
    }

    /// Number of static pairs. The prefix rule is not counted.
    #[must_use]
    pub fn static_len(&self) -> usize {
        self.redirects.len()
    }

    /// True when there are no static pairs and no prefix rule.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.redirects.is_empty() && self.prefix_rule.is_none()
    }

    /// Redirect pages to emit for a build.
    ///
    /// Static pairs come first, then one redirect per built page under the
    /// prefix rule's target. A source already claimed keeps its first target.
    /// Sources that are themselves built pages are dropped.
    pub fn stubs(&self, existing_paths: &[String]) -> Vec<Redirect> {
        let pages: std::collections::HashSet<&str> =
            existing_paths.iter().map(|p| normalize(p)).collect();

        let mut stubs: IndexMap<String, String> = self.redirects.clone();
        if let Some(rule) = &self.prefix_rule {
            for existing in existing_paths {
                if let Some(from) = rule.source_for(existing) {
                    stubs.entry(from).or_insert_with(|| existing.clone());
                }
            }
        }

        stubs
            .into_iter()
            .filter(|(from, to)| {
                if pages.contains(normalize(from)) {
                    tracing::warn!(from = %from, to = %to, "Redirect source is a built page, skipping");
                    return false;
                }
                true
            })
            .map(|(from, to)| Redirect { from, to })
            .collect()
    }
}

fn normalize(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table() -> RedirectTable {
        RedirectTable::new(
            vec![Redirect::new("/a", "/b")],
            Some(PrefixRule::new("/production/dbos-cloud", "/cloud-tutorials")),
        )
    }

    #[test]
    fn test_resolve() {
        let table = table();

        assert_eq!(table.resolve("/a"), Some("/b".to_owned()));
        assert_eq!(
            table.resolve("/production/dbos-cloud/x/y"),
            Some("/cloud-tutorials/x/y".to_owned())
        );
        assert_eq!(table.resolve("/unrelated"), None);
    }

    #[test]
    fn test_exact_match_wins_over_prefix() {
        let table = RedirectTable::new(
            vec![Redirect::new("/production/dbos-cloud/old", "/elsewhere")],
            Some(PrefixRule::new("/production/dbos-cloud", "/cloud-tutorials")),
        );

        assert_eq!(
            table.resolve("/production/dbos-cloud/old"),
            Some("/elsewhere".to_owned())
        );
    }

    #[test]
    fn test_duplicate_source_last_write_wins() {
        let table = RedirectTable::new(
            vec![
                Redirect::new("/a", "/b"),
                Redirect::new("/c", "/d"),
                Redirect::new("/a", "/e"),
            ],
            None,
        );

        assert_eq!(table.static_len(), 2);
        assert_eq!(table.resolve("/a"), Some("/e".to_owned()));
        assert_eq!(
            table.redirects().collect::<Vec<_>>(),
            vec![Redirect::new("/a", "/e"), Redirect::new("/c", "/d")]
        );
    }

    #[test]
    fn test_prefix_rule_only_table_is_not_empty() {
        let table = RedirectTable::new(
            Vec::<Redirect>::new(),
            Some(PrefixRule::new("/production/dbos-cloud", "/cloud-tutorials")),
        );

        assert_eq!(table.static_len(), 0);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_prefix_rule_inverse() {
        let rule = PrefixRule::new("/production/dbos-cloud", "/cloud-tutorials");

        assert_eq!(
            rule.source_for("/cloud-tutorials/deploy"),
            Some("/production/dbos-cloud/deploy".to_owned())
        );
        assert_eq!(rule.source_for("/intro"), None);
    }

    #[test]
    fn test_empty_table() {
        let table = RedirectTable::default();
        assert!(table.is_empty());
        assert_eq!(table.resolve("/a"), None);
        assert!(table.stubs(&["/a".to_owned()]).is_empty());
    }

    #[test]
    fn test_stubs() {
        let existing = vec![
            "/".to_owned(),
            "/b".to_owned(),
            "/cloud-tutorials/deploy".to_owned(),
            "/intro".to_owned(),
        ];

        let stubs = table().stubs(&existing);

        assert_eq!(
            stubs,
            vec![
                Redirect::new("/a", "/b"),
                Redirect::new("/production/dbos-cloud/deploy", "/cloud-tutorials/deploy"),
            ]
        );
    }

    #[test]
    fn test_stubs_skip_sources_that_are_pages() {
        let table = RedirectTable::new(vec![Redirect::new("/intro/", "/start")], None);

        let stubs = table.stubs(&["/intro".to_owned(), "/start".to_owned()]);

        assert!(stubs.is_empty());
    }

    #[test]
    fn test_stubs_static_pair_keeps_its_target() {
        let table = RedirectTable::new(
            vec![Redirect::new("/production/dbos-cloud/deploy", "/custom")],
            Some(PrefixRule::new("/production/dbos-cloud", "/cloud-tutorials")),
        );

        let stubs = table.stubs(&["/cloud-tutorials/deploy".to_owned()]);

        assert_eq!(
            stubs,
            vec![Redirect::new("/production/dbos-cloud/deploy", "/custom")]
        );
    }
}
