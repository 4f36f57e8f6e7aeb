//! Analyzer module - content scoring engine

pub mod engine;
pub mod rules;
pub mod scoring;

pub use engine::{AggregateStats, AnalysisEngine};
pub use scoring::ScoreCalculator;

use crate::{AnalysisDetails, AnalysisInput, AnalysisResult};
use rules::{
    AnalysisRule, HeadingStructureRule, ImageAltTextRule, KeywordUsageRule, LinkMixRule,
    MetaDescriptionLengthRule, ReadabilityRule, TitleLengthRule,
};

/// Score a piece of content. Pure: the same input always yields the same result.
pub fn analyze(input: &AnalysisInput) -> AnalysisResult {
    let details = AnalysisDetails {
        title: TitleLengthRule.analyze(input),
        meta_description: MetaDescriptionLengthRule.analyze(input),
        keyword: KeywordUsageRule.analyze(input),
        headings: HeadingStructureRule.analyze(input),
        links: LinkMixRule.analyze(input),
        images: ImageAltTextRule.analyze(input),
        readability: ReadabilityRule.analyze(input),
    };

    let statuses = details.statuses().map(|(_, status)| status);
    let score = ScoreCalculator::calculate(&statuses);

    let (issues, recommendations) = details
        .findings()
        .into_iter()
        .map(|f| (f.issue, f.recommendation))
        .unzip();

    AnalysisResult {
        score,
        issues,
        recommendations,
        details,
    }
}
