//! Document loading: file kind detection and extraction of an
//! [`AnalysisInput`] from each supported format.

use super::error::{DocumentError, Result};
use super::{front_matter, html};
use crate::AnalysisInput;
use std::path::{Path, PathBuf};

/// File suffixes analyzed when no config says otherwise
pub const DEFAULT_DOCUMENT_PATTERNS: &[&str] =
    &[".html", ".htm", ".post.json", ".md", ".markdown"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Serialized blog post (`*.post.json`)
    PostJson,
    /// Rendered page
    Html,
    /// Markdown with optional front matter
    Markdown,
}

impl DocumentKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        if name.ends_with(".json") {
            return name.ends_with(".post.json").then_some(DocumentKind::PostJson);
        }
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "html" | "htm" => Some(DocumentKind::Html),
            "md" | "markdown" => Some(DocumentKind::Markdown),
            _ => None,
        }
    }
}

/// Check if a path matches one of the document suffixes
pub fn is_document(path: &Path, patterns: &[String]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let name = name.to_ascii_lowercase();
    patterns
        .iter()
        .any(|p| name.ends_with(&p.to_ascii_lowercase()))
        && DocumentKind::from_path(path).is_some()
}

/// Slug implied by a file name: `how-to.html` -> `how-to`,
/// `how-to/index.html` -> `how-to`, `how-to.post.json` -> `how-to`
pub fn slug_from_path(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let stem = name
        .strip_suffix(".post.json")
        .or_else(|| name.rsplit_once('.').map(|(stem, _)| stem))
        .unwrap_or(name);
    if stem.eq_ignore_ascii_case("index") {
        return path
            .parent()?
            .file_name()?
            .to_str()
            .map(str::to_string);
    }
    (!stem.is_empty()).then(|| stem.to_string())
}

/// A parsed document ready to score
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub path: PathBuf,
    pub kind: DocumentKind,
    pub input: AnalysisInput,
}

impl Document {
    /// Read and parse a document from disk
    pub fn load(path: &Path) -> Result<Self> {
        let kind = DocumentKind::from_path(path)
            .ok_or_else(|| DocumentError::Unsupported(path.to_path_buf()))?;
        let source = std::fs::read_to_string(path)?;
        Self::parse(path, kind, &source)
    }

    /// Parse already-read source. `path` is used for the fallback slug.
    pub fn parse(path: &Path, kind: DocumentKind, source: &str) -> Result<Self> {
        let mut input = match kind {
            DocumentKind::PostJson => serde_json::from_str::<AnalysisInput>(source)?,
            DocumentKind::Html => parse_html(source),
            DocumentKind::Markdown => parse_markdown(source)?,
        };

        if input.slug.as_deref().map_or(true, |s| s.trim().is_empty()) {
            input.slug = slug_from_path(path);
        }

        Ok(Self {
            path: path.to_path_buf(),
            kind,
            input,
        })
    }
}

fn parse_html(source: &str) -> AnalysisInput {
    let title = html::extract_title(source).unwrap_or_default();
    let meta_description = html::extract_meta(source, "description").unwrap_or_default();
    let primary_keyword = html::extract_meta(source, "keywords").and_then(|keywords| {
        keywords
            .split(',')
            .map(str::trim)
            .find(|k| !k.is_empty())
            .map(str::to_string)
    });

    AnalysisInput {
        title,
        meta_description,
        content: html::extract_body(source).to_string(),
        primary_keyword,
        slug: None,
    }
}

fn parse_markdown(source: &str) -> Result<AnalysisInput> {
    let (front, body) = front_matter::split(source)?;
    let title = front
        .title
        .or_else(|| front_matter::first_heading(body))
        .unwrap_or_default();

    Ok(AnalysisInput {
        title,
        meta_description: front.description.unwrap_or_default(),
        content: body.to_string(),
        primary_keyword: front.keyword,
        slug: front.slug,
    })
}
