//! Image alt text coverage.

use super::{AnalysisRule, RuleReport};
use crate::{AnalysisInput, Finding, ImagesReport, Rule, Status};
use regex::Regex;
use std::sync::LazyLock;

static IMG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<img\b[^>]*>").expect("valid img pattern"));
static IMG_WITH_ALT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img\b[^>]*\balt=["'][^"']+["'][^>]*>"#).expect("valid img alt pattern")
});

/// Rule for checking image alt text
pub struct ImageAltTextRule;

impl AnalysisRule for ImageAltTextRule {
    type Report = ImagesReport;

    fn name(&self) -> &'static str {
        "image-alt-text"
    }

    fn analyze(&self, input: &AnalysisInput) -> ImagesReport {
        let total = IMG_PATTERN.find_iter(&input.content).count();
        let with_alt = IMG_WITH_ALT_PATTERN.find_iter(&input.content).count();
        let without_alt = total.saturating_sub(with_alt);

        ImagesReport {
            total,
            with_alt,
            without_alt,
            status: if without_alt > 0 {
                Status::Warning
            } else {
                Status::Good
            },
        }
    }
}

impl RuleReport for ImagesReport {
    fn rule(&self) -> Rule {
        Rule::ImageAltText
    }

    fn status(&self) -> Status {
        self.status
    }

    fn findings(&self) -> Vec<Finding> {
        if self.without_alt == 0 {
            return vec![];
        }
        vec![Finding::new(
            Rule::ImageAltText,
            self.status,
            format!(
                "{} of {} images are missing alt text",
                self.without_alt, self.total
            ),
            "Describe every image with an alt attribute for accessibility and image search",
        )]
    }
}
