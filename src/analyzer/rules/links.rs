//! Internal vs external link mix.
//!
//! The two counts come from independent scans of the raw markup. An anchor
//! whose first `href`-like attribute is a relative path but which also carries
//! an absolute `href` (e.g. `data-href="/a" href="https://b"`) is counted by
//! both scans. Callers depend on these numbers, so the quirk stays.

use super::{AnalysisRule, RuleReport};
use crate::{AnalysisInput, Finding, LinksReport, Rule, Status};
use regex::Regex;
use std::sync::LazyLock;

/// First `href=` in an anchor tag
static INTERNAL_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a\s[^>]*?href=["']([^"']*)["']"#).expect("valid internal link pattern")
});

/// Last absolute `href=` in an anchor tag
static EXTERNAL_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a\s[^>]*href=["'](https?://[^"']*)["']"#)
        .expect("valid external link pattern")
});

fn is_absolute(href: &str) -> bool {
    let lower = href.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn is_internal(href: &str) -> bool {
    href.contains('/') && (!is_absolute(href) || href.to_ascii_lowercase().contains("localhost"))
}

fn is_external(href: &str) -> bool {
    !href.to_ascii_lowercase().contains("localhost")
}

/// Rule for checking the link mix
pub struct LinkMixRule;

impl LinkMixRule {
    pub fn count_internal(content: &str) -> usize {
        INTERNAL_HREF
            .captures_iter(content)
            .filter(|caps| is_internal(&caps[1]))
            .count()
    }

    pub fn count_external(content: &str) -> usize {
        EXTERNAL_HREF
            .captures_iter(content)
            .filter(|caps| is_external(&caps[1]))
            .count()
    }
}

impl AnalysisRule for LinkMixRule {
    type Report = LinksReport;

    fn name(&self) -> &'static str {
        "link-mix"
    }

    fn analyze(&self, input: &AnalysisInput) -> LinksReport {
        let internal = Self::count_internal(&input.content);
        let external = Self::count_external(&input.content);

        LinksReport {
            internal,
            external,
            status: if internal == 0 || external == 0 {
                Status::Warning
            } else {
                Status::Good
            },
        }
    }
}

impl RuleReport for LinksReport {
    fn rule(&self) -> Rule {
        Rule::LinkMix
    }

    fn status(&self) -> Status {
        self.status
    }

    fn findings(&self) -> Vec<Finding> {
        let mut findings = Vec::new();
        if self.internal == 0 {
            findings.push(Finding::new(
                Rule::LinkMix,
                self.status,
                "No internal links found",
                "Link to related posts or pages on your own site",
            ));
        }
        if self.external == 0 {
            findings.push(Finding::new(
                Rule::LinkMix,
                self.status,
                "No external links found",
                "Cite at least one authoritative external source",
            ));
        }
        findings
    }
}
