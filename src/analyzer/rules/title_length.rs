//! Title length: search results show roughly 50-60 characters of a title.

use super::{length_status, AnalysisRule, RuleReport};
use crate::{AnalysisInput, Finding, Rule, Status, TitleReport};

pub const IDEAL_MIN: usize = 50;
pub const IDEAL_MAX: usize = 60;
pub const ACCEPTABLE_MIN: usize = 30;
pub const ACCEPTABLE_MAX: usize = 70;

/// Rule for checking the title length
pub struct TitleLengthRule;

impl AnalysisRule for TitleLengthRule {
    type Report = TitleReport;

    fn name(&self) -> &'static str {
        "title-length"
    }

    fn analyze(&self, input: &AnalysisInput) -> TitleReport {
        let length = input.title.chars().count();
        TitleReport {
            length,
            status: length_status(
                length,
                IDEAL_MIN..=IDEAL_MAX,
                ACCEPTABLE_MIN..=ACCEPTABLE_MAX,
            ),
        }
    }
}

impl RuleReport for TitleReport {
    fn rule(&self) -> Rule {
        Rule::TitleLength
    }

    fn status(&self) -> Status {
        self.status
    }

    fn findings(&self) -> Vec<Finding> {
        if self.status == Status::Good {
            return vec![];
        }
        let finding = if self.length < IDEAL_MIN {
            Finding::new(
                Rule::TitleLength,
                self.status,
                format!(
                    "Title is too short ({} characters, recommended {}-{})",
                    self.length, IDEAL_MIN, IDEAL_MAX
                ),
                "Expand the title with descriptive words so it fills the search result headline",
            )
        } else {
            Finding::new(
                Rule::TitleLength,
                self.status,
                format!(
                    "Title is too long ({} characters, recommended {}-{})",
                    self.length, IDEAL_MIN, IDEAL_MAX
                ),
                "Shorten the title so search engines do not truncate it",
            )
        };
        vec![finding]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title_of(len: usize) -> AnalysisInput {
        AnalysisInput::new("x".repeat(len), "", "")
    }

    #[test]
    fn test_55_chars_is_good() {
        let report = TitleLengthRule.analyze(&title_of(55));
        assert_eq!(report.length, 55);
        assert_eq!(report.status, Status::Good);
        assert!(report.findings().is_empty());
    }

    #[test]
    fn test_10_chars_is_bad() {
        let report = TitleLengthRule.analyze(&title_of(10));
        assert_eq!(report.status, Status::Bad);
        let findings = report.findings();
        assert_eq!(findings.len(), 1);
        assert!(findings[0].issue.contains("too short"));
        assert!(findings[0].issue.contains("10 characters"));
    }

    #[test]
    fn test_65_chars_is_warning_too_long() {
        let report = TitleLengthRule.analyze(&title_of(65));
        assert_eq!(report.status, Status::Warning);
        assert!(report.findings()[0].issue.contains("too long"));
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let input = AnalysisInput::new("é".repeat(55), "", "");
        let report = TitleLengthRule.analyze(&input);
        assert_eq!(report.length, 55);
        assert_eq!(report.status, Status::Good);
    }
}
