//! `.pagegraderc.json` schema

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings that apply to documents matching `files`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverride {
    /// Globs matched against the document path
    pub files: Vec<String>,

    /// Optional threshold override for matched documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u8>,

    /// Keyword to score matched documents against
    #[serde(default, alias = "keyword", skip_serializing_if = "Option::is_none")]
    pub primary_keyword: Option<String>,

    /// Slug to use for matched documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// Root config structure for .pagegraderc.json
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extend another config file (path relative to this config)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    /// Score every document must reach
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u8>,

    /// Globs for documents and directories to skip
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Document file suffixes (default: .html, .htm, .post.json, .md, .markdown)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub document_patterns: Vec<String>,

    /// Subdirectory to scan when a directory is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_root: Option<String>,

    /// Per-path configuration overrides, applied in order
    #[serde(default)]
    pub overrides: Vec<ConfigOverride>,
}

impl Config {
    /// Apply `--threshold`, which wins over the file
    pub fn merge_with_cli(mut self, cli_threshold: Option<u8>) -> Self {
        if cli_threshold.is_some() {
            self.threshold = cli_threshold;
        }
        self
    }

    /// Settings for one document after every matching override is applied in order
    pub fn effective_for_file(&self, file_path: &Path) -> EffectiveConfig {
        let mut effective = EffectiveConfig {
            threshold: self.threshold,
            primary_keyword: None,
            slug: None,
        };

        for override_cfg in &self.overrides {
            if Self::matches_override(file_path, &override_cfg.files) {
                if let Some(threshold) = override_cfg.threshold {
                    effective.threshold = Some(threshold);
                }
                if let Some(ref keyword) = override_cfg.primary_keyword {
                    effective.primary_keyword = Some(keyword.clone());
                }
                if let Some(ref slug) = override_cfg.slug {
                    effective.slug = Some(slug.clone());
                }
            }
        }

        effective
    }

    /// Whether the document matches one of the override globs
    fn matches_override(file_path: &Path, patterns: &[String]) -> bool {
        let path_str = file_path.to_string_lossy();
        patterns.iter().any(|pattern| {
            globset::Glob::new(pattern)
                .map(|glob| {
                    glob.compile_matcher().is_match(file_path)
                        || path_str.ends_with(pattern.trim_start_matches("**/"))
                })
                .unwrap_or(false)
        })
    }

    /// Fold in an `extends` base. Values set here win; lists are concatenated base first.
    pub fn merge_from(&mut self, base: Config) {
        if self.threshold.is_none() {
            self.threshold = base.threshold;
        }
        if self.extends.is_none() {
            self.extends = base.extends;
        }

        let mut all_ignores = base.ignore;
        all_ignores.append(&mut self.ignore);
        self.ignore = all_ignores;

        if self.document_patterns.is_empty() {
            self.document_patterns = base.document_patterns;
        }
        if self.content_root.is_none() {
            self.content_root = base.content_root;
        }

        // Base overrides first so ours win
        let mut all_overrides = base.overrides;
        all_overrides.append(&mut self.overrides);
        self.overrides = all_overrides;
    }

    /// Document suffixes, falling back to the defaults
    pub fn get_document_patterns(&self) -> Vec<String> {
        if self.document_patterns.is_empty() {
            crate::parser::DEFAULT_DOCUMENT_PATTERNS
                .iter()
                .map(|s| s.to_string())
                .collect()
        } else {
            self.document_patterns.clone()
        }
    }
}

/// Resolved settings for one document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectiveConfig {
    pub threshold: Option<u8>,
    pub primary_keyword: Option<String>,
    pub slug: Option<String>,
}
