//! Content checks. One module per check, reported in the order declared here.

pub mod headings;
pub mod images;
pub mod keyword;
pub mod links;
pub mod meta_description;
pub mod readability;
pub mod title_length;

pub use headings::HeadingStructureRule;
pub use images::ImageAltTextRule;
pub use keyword::KeywordUsageRule;
pub use links::LinkMixRule;
pub use meta_description::MetaDescriptionLengthRule;
pub use readability::ReadabilityRule;
pub use title_length::TitleLengthRule;

use crate::{AnalysisInput, Finding, Rule, Status};
use std::ops::RangeInclusive;

/// Trait for content checks
pub trait AnalysisRule {
    /// Measured facts produced by this check
    type Report: RuleReport;

    /// Name of the rule
    fn name(&self) -> &'static str;

    /// Measure the input
    fn analyze(&self, input: &AnalysisInput) -> Self::Report;
}

/// A check's measurements, able to explain themselves
pub trait RuleReport {
    /// Check this report belongs to
    fn rule(&self) -> Rule;

    fn status(&self) -> Status;

    /// Issue/recommendation pairs; empty when the check is good
    fn findings(&self) -> Vec<Finding>;
}

/// Length banding shared by the title and meta description checks:
/// good inside `ideal`, bad outside `acceptable`, warning in between.
pub(crate) fn length_status(
    length: usize,
    ideal: RangeInclusive<usize>,
    acceptable: RangeInclusive<usize>,
) -> Status {
    if ideal.contains(&length) {
        Status::Good
    } else if !acceptable.contains(&length) {
        Status::Bad
    } else {
        Status::Warning
    }
}
