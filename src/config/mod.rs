//! Configuration loading for pagegrade

mod schema;

pub use schema::{Config, ConfigOverride, EffectiveConfig};

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = ".pagegraderc.json";

/// Find and load config file with extends resolution. Searches current directory then parents.
pub fn load_config(work_dir: &Path, custom_path: Option<&Path>) -> Result<Config> {
    let path = match custom_path {
        Some(p) => {
            let path = if p.is_absolute() {
                p.to_path_buf()
            } else {
                work_dir.join(p)
            };
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Some(path)
        }
        None => find_config_in_parents(work_dir),
    };

    match path {
        Some(path) => {
            tracing::debug!(config = %path.display(), "loading config");
            load_config_with_extends(&path, &mut HashSet::new())
        }
        None => Ok(Config::default()),
    }
}

/// Load a config file and resolve extends chain
fn load_config_with_extends(config_path: &Path, visited: &mut HashSet<PathBuf>) -> Result<Config> {
    let canonical = config_path
        .canonicalize()
        .unwrap_or_else(|_| config_path.to_path_buf());
    if !visited.insert(canonical) {
        anyhow::bail!(
            "Circular extends detected in config: {}",
            config_path.display()
        );
    }

    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
    let mut config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in config: {}", config_path.display()))?;

    if let Some(extends) = config.extends.take() {
        let config_dir = config_path.parent().unwrap_or(Path::new("."));
        let mut extends_path = config_dir.join(&extends);
        if extends_path.extension().is_none() {
            extends_path.set_extension("json");
        }
        if !extends_path.exists() {
            anyhow::bail!(
                "Extended config not found: {} (referenced from {})",
                extends_path.display(),
                config_path.display()
            );
        }
        let base_config = load_config_with_extends(&extends_path, visited)?;
        config.merge_from(base_config);
    }

    Ok(config)
}

/// Search for .pagegraderc.json in directory and its parents
pub fn find_config_in_parents(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILENAME))
        .find(|candidate| candidate.exists())
}

/// Build a GlobSet from ignore patterns for path matching
pub fn build_ignore_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).with_context(|| format!("Invalid ignore pattern: {}", pattern))?;
        builder.add(glob);
    }
    builder.build().context("Failed to build ignore set")
}

/// Check if a path should be ignored based on config glob patterns
pub fn is_ignored(path: &Path, ignore_set: &GlobSet) -> bool {
    ignore_set.is_match(path)
}

pub const DEFAULT_THRESHOLD: u8 = 70;

/// Starter config written by `pagegrade init`
pub fn starter_config(threshold: Option<u8>) -> Config {
    Config {
        threshold: Some(threshold.unwrap_or(DEFAULT_THRESHOLD)),
        ignore: vec!["**/drafts/**".to_string(), "**/node_modules/**".to_string()],
        ..Config::default()
    }
}

/// Write the starter config into `dir`. Refuses to overwrite unless `force`.
pub fn write_starter_config(dir: &Path, threshold: Option<u8>, force: bool) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILENAME);
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    let json = serde_json::to_string_pretty(&starter_config(threshold))?;
    fs::write(&path, json + "\n")
        .with_context(|| format!("Failed to write config: {}", path.display()))?;
    Ok(path)
}
