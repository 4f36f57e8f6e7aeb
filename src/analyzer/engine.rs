//! Analysis engine - loads documents, applies config and scores them

use crate::config::{Config, EffectiveConfig};
use crate::parser::{Document, DocumentKind};
use crate::{AnalysisInput, DocumentReport, Grade, Status};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main analysis engine. Holds the command-line overrides, which win over
/// config overrides, which win over values found in the document itself.
pub struct AnalysisEngine {
    keyword: Option<String>,
    slug: Option<String>,
    threshold: Option<u8>,
}

impl AnalysisEngine {
    /// Create a new analysis engine
    pub fn new() -> Self {
        Self {
            keyword: None,
            slug: None,
            threshold: None,
        }
    }

    /// Score every document against this keyword
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// Use this slug for every document
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Minimum score, taking precedence over config
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = Some(threshold);
        self
    }

    fn effective(&self, path: &Path, config: Option<&Config>) -> EffectiveConfig {
        let mut effective = config
            .map(|c| c.effective_for_file(path))
            .unwrap_or_default();
        if self.keyword.is_some() {
            effective.primary_keyword = self.keyword.clone();
        }
        if self.slug.is_some() {
            effective.slug = self.slug.clone();
        }
        if self.threshold.is_some() {
            effective.threshold = self.threshold;
        }
        effective
    }

    /// Fingerprint of everything besides the document text that affects a
    /// report. Cached reports are only reused when this matches.
    pub fn cache_context(&self, path: &Path, config: Option<&Config>) -> String {
        let effective = self.effective(path, config);
        format!(
            "keyword={:?};slug={:?};threshold={:?}",
            effective.primary_keyword, effective.slug, effective.threshold
        )
    }

    /// Analyze a document on disk
    pub fn analyze(&self, path: &Path, config: Option<&Config>) -> Result<DocumentReport> {
        debug!(path = %path.display(), "loading document");
        let document = Document::load(path)
            .with_context(|| format!("Failed to load document: {}", path.display()))?;
        Ok(self.analyze_input(&document.input, path, config))
    }

    /// Analyze document source from a string (e.g. stdin or an editor buffer).
    /// The virtual path picks the format and is matched against config overrides;
    /// unknown extensions are read as HTML.
    pub fn analyze_source(
        &self,
        source: &str,
        virtual_path: &Path,
        config: Option<&Config>,
    ) -> Result<DocumentReport> {
        let kind = DocumentKind::from_path(virtual_path).unwrap_or(DocumentKind::Html);
        let document = Document::parse(virtual_path, kind, source)
            .with_context(|| format!("Failed to parse {}", virtual_path.display()))?;
        Ok(self.analyze_input(&document.input, virtual_path, config))
    }

    /// Score an in-memory input as if it were found at `virtual_path`
    pub fn analyze_input(
        &self,
        input: &AnalysisInput,
        virtual_path: &Path,
        config: Option<&Config>,
    ) -> DocumentReport {
        let effective = self.effective(virtual_path, config);
        let mut input = input.clone();
        if effective.primary_keyword.is_some() {
            input.primary_keyword = effective.primary_keyword;
        }
        if effective.slug.is_some() {
            input.slug = effective.slug;
        }

        let result = crate::analyze(&input);
        debug!(
            path = %virtual_path.display(),
            score = result.score,
            issues = result.issues.len(),
            "scored document"
        );

        DocumentReport {
            file_path: virtual_path.to_path_buf(),
            grade: Grade::from_score(result.score),
            threshold: effective.threshold,
            primary_keyword: input.keyword().map(str::to_string),
            title: input.title,
            slug: input.slug,
            result,
        }
    }

    /// Analyze multiple documents sequentially
    pub fn analyze_many(
        &self,
        paths: &[&Path],
        config: Option<&Config>,
    ) -> Vec<Result<DocumentReport>> {
        paths.iter().map(|p| self.analyze(p, config)).collect()
    }

    /// Analyze multiple documents in parallel using rayon
    pub fn analyze_parallel(
        &self,
        paths: &[PathBuf],
        config: Option<&Config>,
    ) -> Vec<Result<DocumentReport>> {
        use rayon::prelude::*;

        paths.par_iter().map(|p| self.analyze(p, config)).collect()
    }

    /// Get aggregate stats from multiple reports
    pub fn aggregate_stats(reports: &[DocumentReport]) -> AggregateStats {
        if reports.is_empty() {
            return AggregateStats::default();
        }

        let total_score: u32 = reports.iter().map(|r| r.score() as u32).sum();
        let average_score = (total_score / reports.len() as u32) as u8;

        let mut status_counts = StatusCounts::default();
        for report in reports {
            for (_, status) in report.result.details.statuses() {
                status_counts.add(status);
            }
        }

        AggregateStats {
            files_analyzed: reports.len(),
            average_score,
            average_grade: Grade::from_score(average_score),
            total_issues: reports.iter().map(|r| r.result.issues.len()).sum(),
            below_threshold: reports.iter().filter(|r| r.below_threshold()).count(),
            status_counts,
        }
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of checks in each status across a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub good: usize,
    pub warning: usize,
    pub bad: usize,
}

impl StatusCounts {
    fn add(&mut self, status: Status) {
        match status {
            Status::Good => self.good += 1,
            Status::Warning => self.warning += 1,
            Status::Bad => self.bad += 1,
        }
    }
}

/// Aggregate statistics from multiple document analyses
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    /// Number of documents analyzed
    pub files_analyzed: usize,
    /// Average score across all documents (rounded down)
    pub average_score: u8,
    pub average_grade: Grade,
    /// Total number of issues found
    pub total_issues: usize,
    /// Documents scoring under their threshold
    pub below_threshold: usize,
    /// Per-check statuses summed over all documents
    pub status_counts: StatusCounts,
}

impl Default for AggregateStats {
    fn default() -> Self {
        Self {
            files_analyzed: 0,
            average_score: 0,
            average_grade: Grade::F,
            total_issues: 0,
            below_threshold: 0,
            status_counts: StatusCounts::default(),
        }
    }
}
