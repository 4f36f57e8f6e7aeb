//! pagegrade: SEO content quality scorer
//!
//! This library scores a blog post or rendered page against a fixed rubric
//! (title and description length, keyword placement, heading structure, link
//! mix, image alt text, readability) and reports issues with actionable
//! recommendations.

pub mod analyzer;
pub mod cache;
pub mod config;
pub mod history;
pub mod mcp;
pub mod parser;
pub mod reporter;
pub mod watcher;

pub use analyzer::analyze;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Everything the scorer looks at for one piece of content
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisInput {
    /// Page or post title
    pub title: String,
    /// Meta description shown in search results
    #[serde(alias = "description")]
    pub meta_description: String,
    /// Body content (HTML)
    pub content: String,
    /// Target keyword (optional)
    #[serde(default, alias = "keyword", skip_serializing_if = "Option::is_none")]
    pub primary_keyword: Option<String>,
    /// URL slug (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl AnalysisInput {
    pub fn new(
        title: impl Into<String>,
        meta_description: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            meta_description: meta_description.into(),
            content: content.into(),
            primary_keyword: None,
            slug: None,
        }
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.primary_keyword = Some(keyword.into());
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// The keyword to score against. Blank keywords count as absent.
    pub fn keyword(&self) -> Option<&str> {
        self.primary_keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

/// Tri-state status of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Good,
    Warning,
    Bad,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Good => write!(f, "good"),
            Status::Warning => write!(f, "warning"),
            Status::Bad => write!(f, "bad"),
        }
    }
}

/// The seven checks, in the order they are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    TitleLength,
    MetaDescriptionLength,
    KeywordUsage,
    HeadingStructure,
    LinkMix,
    ImageAltText,
    Readability,
}

impl Rule {
    pub const ALL: [Rule; 7] = [
        Rule::TitleLength,
        Rule::MetaDescriptionLength,
        Rule::KeywordUsage,
        Rule::HeadingStructure,
        Rule::LinkMix,
        Rule::ImageAltText,
        Rule::Readability,
    ];

    /// Short human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Rule::TitleLength => "Title",
            Rule::MetaDescriptionLength => "Meta Description",
            Rule::KeywordUsage => "Keyword",
            Rule::HeadingStructure => "Headings",
            Rule::LinkMix => "Links",
            Rule::ImageAltText => "Images",
            Rule::Readability => "Readability",
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::TitleLength => write!(f, "title-length"),
            Rule::MetaDescriptionLength => write!(f, "meta-description-length"),
            Rule::KeywordUsage => write!(f, "keyword-usage"),
            Rule::HeadingStructure => write!(f, "heading-structure"),
            Rule::LinkMix => write!(f, "link-mix"),
            Rule::ImageAltText => write!(f, "image-alt-text"),
            Rule::Readability => write!(f, "readability"),
        }
    }
}

/// One issue with its matching recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Check that produced this finding
    pub rule: Rule,
    /// Status of that check
    pub status: Status,
    /// Human-readable problem, with the measured values
    pub issue: String,
    /// What to do about it
    pub recommendation: String,
}

impl Finding {
    pub fn new(
        rule: Rule,
        status: Status,
        issue: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            rule,
            status,
            issue: issue.into(),
            recommendation: recommendation.into(),
        }
    }
}

/// Title length check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleReport {
    /// Length in characters
    pub length: usize,
    pub status: Status,
}

/// Meta description length check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaDescriptionReport {
    /// Length in characters
    pub length: usize,
    pub status: Status,
}

/// Keyword placement and density
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordReport {
    /// Keyword that was checked (None when no keyword was given)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    pub in_title: bool,
    pub in_meta_description: bool,
    /// Present in the URL slug
    pub in_url: bool,
    /// Present in the opening of the content
    pub in_first_paragraph: bool,
    /// Occurrences per hundred words
    pub density: f64,
    pub status: Status,
}

/// Heading structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingsReport {
    pub h1_count: usize,
    pub h2_count: usize,
    pub h3_count: usize,
    pub status: Status,
}

/// Internal vs external link mix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinksReport {
    pub internal: usize,
    pub external: usize,
    pub status: Status,
}

/// Image alt text coverage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagesReport {
    pub total: usize,
    pub with_alt: usize,
    pub without_alt: usize,
    pub status: Status,
}

/// Flesch-Kincaid readability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadabilityReport {
    pub word_count: usize,
    pub sentence_count: usize,
    pub syllable_count: usize,
    /// Grade level, never negative
    pub score: f64,
    /// Grade label (e.g. "Plain English (9th-10th grade)")
    pub grade: String,
    pub status: Status,
}

/// All seven field reports, in canonical order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDetails {
    pub title: TitleReport,
    pub meta_description: MetaDescriptionReport,
    pub keyword: KeywordReport,
    pub headings: HeadingsReport,
    pub links: LinksReport,
    pub images: ImagesReport,
    pub readability: ReadabilityReport,
}

impl AnalysisDetails {
    /// Status of every check, in canonical order
    pub fn statuses(&self) -> [(Rule, Status); 7] {
        [
            (Rule::TitleLength, self.title.status),
            (Rule::MetaDescriptionLength, self.meta_description.status),
            (Rule::KeywordUsage, self.keyword.status),
            (Rule::HeadingStructure, self.headings.status),
            (Rule::LinkMix, self.links.status),
            (Rule::ImageAltText, self.images.status),
            (Rule::Readability, self.readability.status),
        ]
    }

    /// Findings for every non-good check, in canonical order.
    /// These are exactly the issues/recommendations of the result.
    pub fn findings(&self) -> Vec<Finding> {
        use crate::analyzer::rules::RuleReport;

        let mut findings = Vec::new();
        findings.extend(self.title.findings());
        findings.extend(self.meta_description.findings());
        findings.extend(self.keyword.findings());
        findings.extend(self.headings.findings());
        findings.extend(self.links.findings());
        findings.extend(self.images.findings());
        findings.extend(self.readability.findings());
        findings
    }
}

/// Result of scoring one piece of content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Overall score (0-100)
    pub score: u8,
    /// Problems found, in check order
    pub issues: Vec<String>,
    /// One recommendation per issue, same order
    pub recommendations: Vec<String>,
    /// Measured facts per check
    pub details: AnalysisDetails,
}

/// Letter grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=100 => Grade::A,
            80..=89 => Grade::B,
            70..=79 => Grade::C,
            60..=69 => Grade::D,
            _ => Grade::F,
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grade::A => write!(f, "A"),
            Grade::B => write!(f, "B"),
            Grade::C => write!(f, "C"),
            Grade::D => write!(f, "D"),
            Grade::F => write!(f, "F"),
        }
    }
}

/// Analysis of one document on disk (or stdin)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReport {
    /// Path to the analyzed document
    pub file_path: PathBuf,
    /// Letter grade for the score
    pub grade: Grade,
    /// Minimum score this document must reach (CLI, override or config)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u8>,
    /// The input that was scored, minus the body
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

impl DocumentReport {
    pub fn score(&self) -> u8 {
        self.result.score
    }

    /// Whether the score is below the effective threshold
    pub fn below_threshold(&self) -> bool {
        self.threshold
            .map(|t| self.result.score < t)
            .unwrap_or(false)
    }
}

/// Public API: analyze a single document. Used by the LSP and other programmatic consumers.
///
/// * `path` - path to the document (.html, .post.json, .md)
/// * `work_dir` - project root (for config lookup)
/// * `config_path` - optional path to .pagegraderc.json; if None, searches from work_dir
pub fn analyze_file(
    path: &std::path::Path,
    work_dir: &std::path::Path,
    config_path: Option<&std::path::Path>,
) -> anyhow::Result<DocumentReport> {
    let config = crate::config::load_config(work_dir, config_path).ok();
    let engine = crate::analyzer::AnalysisEngine::new();
    engine.analyze(path, config.as_ref())
}
