//! Primary keyword placement and density.
//!
//! Without a keyword there is nothing to target, so the check passes with all
//! placements false and zero density. With one, it must appear in the title,
//! the meta description, the URL slug and the opening of the content, and make
//! up 1-2% of the words. This check never reports `bad`.

use super::{AnalysisRule, RuleReport};
use crate::parser::html::word_count;
use crate::{AnalysisInput, Finding, KeywordReport, Rule, Status};
use regex::RegexBuilder;

/// Characters of content treated as the opening paragraph
pub const FIRST_PARAGRAPH_CHARS: usize = 1000;
pub const DENSITY_MIN: f64 = 1.0;
pub const DENSITY_MAX: f64 = 2.0;

/// Rule for checking keyword usage
pub struct KeywordUsageRule;

impl KeywordUsageRule {
    /// Keyword as it would appear in a slug: lowercase, whitespace runs as `-`
    pub fn slugify(keyword: &str) -> String {
        keyword
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Case-insensitive literal occurrences of `keyword` in `content`
    pub fn count_occurrences(content: &str, keyword: &str) -> usize {
        RegexBuilder::new(&regex::escape(keyword))
            .case_insensitive(true)
            .build()
            .map(|re| re.find_iter(content).count())
            .unwrap_or(0)
    }

    /// Occurrences per hundred whitespace-delimited words
    pub fn density(content: &str, keyword: &str) -> f64 {
        let words = word_count(content);
        if words == 0 {
            return 0.0;
        }
        Self::count_occurrences(content, keyword) as f64 / words as f64 * 100.0
    }
}

impl AnalysisRule for KeywordUsageRule {
    type Report = KeywordReport;

    fn name(&self) -> &'static str {
        "keyword-usage"
    }

    fn analyze(&self, input: &AnalysisInput) -> KeywordReport {
        let Some(keyword) = input.keyword() else {
            return KeywordReport {
                keyword: None,
                in_title: false,
                in_meta_description: false,
                in_url: false,
                in_first_paragraph: false,
                density: 0.0,
                status: Status::Good,
            };
        };

        let needle = keyword.to_lowercase();
        let in_title = input.title.to_lowercase().contains(&needle);
        let in_meta_description = input.meta_description.to_lowercase().contains(&needle);
        let in_url = input
            .slug
            .as_deref()
            .map(|slug| slug.to_lowercase().contains(&Self::slugify(keyword)))
            .unwrap_or(false);
        let opening: String = input.content.chars().take(FIRST_PARAGRAPH_CHARS).collect();
        let in_first_paragraph = opening.to_lowercase().contains(&needle);
        let density = Self::density(&input.content, keyword);

        let placed = in_title && in_meta_description && in_url && in_first_paragraph;
        let density_ok = (DENSITY_MIN..=DENSITY_MAX).contains(&density);
        let status = if placed && density_ok {
            Status::Good
        } else {
            Status::Warning
        };

        KeywordReport {
            keyword: Some(keyword.to_string()),
            in_title,
            in_meta_description,
            in_url,
            in_first_paragraph,
            density,
            status,
        }
    }
}

impl RuleReport for KeywordReport {
    fn rule(&self) -> Rule {
        Rule::KeywordUsage
    }

    fn status(&self) -> Status {
        self.status
    }

    fn findings(&self) -> Vec<Finding> {
        let Some(ref keyword) = self.keyword else {
            return vec![];
        };
        if self.status == Status::Good {
            return vec![];
        }

        let finding = |issue: String, recommendation: String| {
            Finding::new(Rule::KeywordUsage, self.status, issue, recommendation)
        };
        let mut findings = Vec::new();

        if !self.in_title {
            findings.push(finding(
                format!("Primary keyword \"{}\" is missing from the title", keyword),
                format!("Work \"{}\" into the title, ideally near the start", keyword),
            ));
        }
        if !self.in_meta_description {
            findings.push(finding(
                format!(
                    "Primary keyword \"{}\" is missing from the meta description",
                    keyword
                ),
                format!("Mention \"{}\" in the meta description", keyword),
            ));
        }
        if !self.in_url {
            findings.push(finding(
                format!("Primary keyword \"{}\" is missing from the URL", keyword),
                format!(
                    "Include \"{}\" in the slug (e.g. .../{})",
                    keyword,
                    KeywordUsageRule::slugify(keyword)
                ),
            ));
        }
        if !self.in_first_paragraph {
            findings.push(finding(
                format!(
                    "Primary keyword \"{}\" does not appear in the first paragraph",
                    keyword
                ),
                format!("Use \"{}\" early in the introduction", keyword),
            ));
        }
        if self.density < DENSITY_MIN {
            findings.push(finding(
                format!(
                    "Keyword density is {:.2}% (recommended {}-{}%)",
                    self.density, DENSITY_MIN, DENSITY_MAX
                ),
                format!("Use \"{}\" a few more times throughout the body", keyword),
            ));
        } else if self.density > DENSITY_MAX {
            findings.push(finding(
                format!(
                    "Keyword density is {:.2}% (recommended {}-{}%)",
                    self.density, DENSITY_MIN, DENSITY_MAX
                ),
                format!(
                    "Repeat \"{}\" less often and use synonyms to avoid keyword stuffing",
                    keyword
                ),
            ));
        }

        findings
    }
}
