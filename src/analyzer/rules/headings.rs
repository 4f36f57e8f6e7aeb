//! Heading structure: exactly one H1 and at least one H2.

use super::{AnalysisRule, RuleReport};
use crate::{AnalysisInput, Finding, HeadingsReport, Rule, Status};
use regex::Regex;
use std::sync::LazyLock;

static H1_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<h1[^>]*>.*?</h1>").expect("valid h1 pattern"));
static H2_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<h2[^>]*>.*?</h2>").expect("valid h2 pattern"));
static H3_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<h3[^>]*>.*?</h3>").expect("valid h3 pattern"));

/// Rule for checking heading structure
pub struct HeadingStructureRule;

impl AnalysisRule for HeadingStructureRule {
    type Report = HeadingsReport;

    fn name(&self) -> &'static str {
        "heading-structure"
    }

    fn analyze(&self, input: &AnalysisInput) -> HeadingsReport {
        let content = &input.content;
        let h1_count = H1_PATTERN.find_iter(content).count();
        let h2_count = H2_PATTERN.find_iter(content).count();
        let h3_count = H3_PATTERN.find_iter(content).count();

        let status = if h1_count != 1 || h2_count == 0 {
            Status::Warning
        } else {
            Status::Good
        };

        HeadingsReport {
            h1_count,
            h2_count,
            h3_count,
            status,
        }
    }
}

impl RuleReport for HeadingsReport {
    fn rule(&self) -> Rule {
        Rule::HeadingStructure
    }

    fn status(&self) -> Status {
        self.status
    }

    fn findings(&self) -> Vec<Finding> {
        let mut findings = Vec::new();

        match self.h1_count {
            0 => findings.push(Finding::new(
                Rule::HeadingStructure,
                self.status,
                "No H1 heading found",
                "Add a single H1 heading that states the topic of the page",
            )),
            1 => {}
            n => findings.push(Finding::new(
                Rule::HeadingStructure,
                self.status,
                format!("Multiple H1 headings found ({})", n),
                "Keep one H1 for the page title and demote the others to H2",
            )),
        }

        if self.h2_count == 0 {
            findings.push(Finding::new(
                Rule::HeadingStructure,
                self.status,
                "No H2 subheadings found",
                "Break the content into sections with H2 subheadings",
            ));
        }

        findings
    }
}
