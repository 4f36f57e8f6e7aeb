//! Meta description length.

use super::{length_status, AnalysisRule, RuleReport};
use crate::{AnalysisInput, Finding, MetaDescriptionReport, Rule, Status};

pub const IDEAL_MIN: usize = 120;
pub const IDEAL_MAX: usize = 160;
pub const ACCEPTABLE_MIN: usize = 100;
pub const ACCEPTABLE_MAX: usize = 180;

/// Rule for checking the meta description length
pub struct MetaDescriptionLengthRule;

impl AnalysisRule for MetaDescriptionLengthRule {
    type Report = MetaDescriptionReport;

    fn name(&self) -> &'static str {
        "meta-description-length"
    }

    fn analyze(&self, input: &AnalysisInput) -> MetaDescriptionReport {
        let length = input.meta_description.chars().count();
        MetaDescriptionReport {
            length,
            status: length_status(
                length,
                IDEAL_MIN..=IDEAL_MAX,
                ACCEPTABLE_MIN..=ACCEPTABLE_MAX,
            ),
        }
    }
}

impl RuleReport for MetaDescriptionReport {
    fn rule(&self) -> Rule {
        Rule::MetaDescriptionLength
    }

    fn status(&self) -> Status {
        self.status
    }

    fn findings(&self) -> Vec<Finding> {
        if self.status == Status::Good {
            return vec![];
        }
        let (issue, recommendation) = if self.length < IDEAL_MIN {
            (
                format!(
                    "Meta description is too short ({} characters, recommended {}-{})",
                    self.length, IDEAL_MIN, IDEAL_MAX
                ),
                "Summarize the post in a fuller sentence that gives searchers a reason to click",
            )
        } else {
            (
                format!(
                    "Meta description is too long ({} characters, recommended {}-{})",
                    self.length, IDEAL_MIN, IDEAL_MAX
                ),
                "Trim the meta description so it is not cut off in search results",
            )
        };
        vec![Finding::new(
            Rule::MetaDescriptionLength,
            self.status,
            issue,
            recommendation,
        )]
    }
}
