//! Report caching for large content directories
//!
//! Reports are keyed by path and reused only while both the document text and
//! the effective keyword/slug/threshold are unchanged.

use crate::DocumentReport;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

const CACHE_VERSION: u32 = 1;
pub const CACHE_FILENAME: &str = ".pagegrade-cache.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheEntry {
    /// SHA256 of the document text
    content_hash: String,
    /// SHA256 of the analysis context (overrides in effect)
    context_hash: String,
    report: DocumentReport,
    /// Seconds since the epoch
    cached_at: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheData {
    version: u32,
    entries: HashMap<String, CacheEntry>,
}

impl Default for CacheData {
    fn default() -> Self {
        Self {
            version: CACHE_VERSION,
            entries: HashMap::new(),
        }
    }
}

/// Cache manager for document reports
pub struct AnalysisCache {
    cache_path: PathBuf,
    data: CacheData,
    dirty: bool,
    enabled: bool,
}

impl AnalysisCache {
    /// Open (or start) the cache in `project_root`
    pub fn new(project_root: &Path) -> Self {
        let cache_path = project_root.join(CACHE_FILENAME);
        let data = Self::load_cache(&cache_path).unwrap_or_default();

        Self {
            cache_path,
            data,
            dirty: false,
            enabled: true,
        }
    }

    /// Create a disabled cache (no-op)
    pub fn disabled() -> Self {
        Self {
            cache_path: PathBuf::new(),
            data: CacheData::default(),
            dirty: false,
            enabled: false,
        }
    }

    fn load_cache(path: &Path) -> Option<CacheData> {
        let content = fs::read_to_string(path).ok()?;
        let data: CacheData = serde_json::from_str(&content).ok()?;
        if data.version != CACHE_VERSION {
            tracing::debug!(found = data.version, "discarding cache from another version");
            return None;
        }
        Some(data)
    }

    /// Save cache to disk
    pub fn save(&self) -> Result<()> {
        if !self.enabled || !self.dirty {
            return Ok(());
        }

        let content =
            serde_json::to_string_pretty(&self.data).context("Failed to serialize cache")?;
        fs::write(&self.cache_path, content)
            .with_context(|| format!("Failed to write cache to {}", self.cache_path.display()))?;

        Ok(())
    }

    fn hash_content(content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Get cached report if still valid
    pub fn get(&self, path: &Path, content: &str, context: &str) -> Option<DocumentReport> {
        if !self.enabled {
            return None;
        }

        let entry = self.data.entries.get(path.to_string_lossy().as_ref())?;
        if entry.content_hash != Self::hash_content(content)
            || entry.context_hash != Self::hash_content(context)
        {
            return None;
        }

        Some(entry.report.clone())
    }

    /// Store a report in the cache
    pub fn set(&mut self, path: &Path, content: &str, context: &str, report: DocumentReport) {
        if !self.enabled {
            return;
        }

        let entry = CacheEntry {
            content_hash: Self::hash_content(content),
            context_hash: Self::hash_content(context),
            report,
            cached_at: SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        };

        self.data
            .entries
            .insert(path.to_string_lossy().to_string(), entry);
        self.dirty = true;
    }

    /// Remove stale entries for files that no longer exist
    pub fn cleanup(&mut self, existing_files: &[PathBuf]) {
        if !self.enabled {
            return;
        }

        let existing: HashSet<String> = existing_files
            .iter()
            .map(|p| p.to_string_lossy().to_string())
            .collect();

        let before = self.data.entries.len();
        self.data.entries.retain(|k, _| existing.contains(k));
        if self.data.entries.len() != before {
            self.dirty = true;
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.data.entries.len(),
            enabled: self.enabled,
        }
    }

    /// Clear all cached entries
    pub fn clear(&mut self) {
        self.data.entries.clear();
        self.dirty = true;
    }
}

#[derive(Debug)]
pub struct CacheStats {
    pub entries: usize,
    pub enabled: bool,
}
