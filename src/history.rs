//! Trend tracking - persist scores to .pagegrade-history.json

use crate::config::CONFIG_FILENAME;
use crate::DocumentReport;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const HISTORY_FILENAME: &str = ".pagegrade-history.json";
const MAX_RUNS: usize = 50;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct HistoryFile {
    pub runs: Vec<HistoryRun>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRun {
    /// RFC 3339
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    pub files: HashMap<String, FileScore>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileScore {
    pub score: u8,
    pub issues: usize,
}

/// Find project root: the first directory holding history, a config,
/// package.json or .git
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let start = if start.is_file() { start.parent()? } else { start };

    start
        .ancestors()
        .find(|dir| {
            [HISTORY_FILENAME, CONFIG_FILENAME, "package.json", ".git"]
                .iter()
                .any(|marker| dir.join(marker).exists())
        })
        .map(Path::to_path_buf)
}

/// Load history from project root (or create empty)
pub fn load_history(project_root: &Path) -> HistoryFile {
    fs::read_to_string(project_root.join(HISTORY_FILENAME))
        .ok()
        .and_then(|content| serde_json::from_str(&content).ok())
        .unwrap_or_default()
}

/// Save history to project root
pub fn save_history(project_root: &Path, history: &HistoryFile) -> std::io::Result<()> {
    let content = serde_json::to_string_pretty(history).unwrap_or_else(|_| "{}".to_string());
    fs::write(project_root.join(HISTORY_FILENAME), content)
}

/// Get the previous score for a document from the latest run
pub fn previous_score(history: &HistoryFile, file_path: &Path) -> Option<u8> {
    let run = history.runs.last()?;
    run.files
        .get(file_path.to_string_lossy().as_ref())
        .map(|f| f.score)
}

/// Short hash of HEAD, if `dir` is inside a git work tree
pub fn current_commit(dir: &Path) -> Option<String> {
    let output = std::process::Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .current_dir(dir)
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let commit = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!commit.is_empty()).then_some(commit)
}

/// Build a new run from document reports and append to history
pub fn append_run(history: &mut HistoryFile, reports: &[DocumentReport], commit: Option<String>) {
    let files = reports
        .iter()
        .map(|r| {
            (
                r.file_path.to_string_lossy().to_string(),
                FileScore {
                    score: r.score(),
                    issues: r.result.issues.len(),
                },
            )
        })
        .collect();

    history.runs.push(HistoryRun {
        timestamp: chrono::Utc::now().to_rfc3339(),
        commit,
        files,
    });
    if history.runs.len() > MAX_RUNS {
        history.runs.drain(0..history.runs.len() - MAX_RUNS);
    }
}

/// Format delta for console: "[was 82, down 4]" or "[was 82, up 2]" or ""
pub fn format_delta(previous: Option<u8>, current: u8) -> String {
    let Some(prev) = previous else {
        return String::new();
    };
    if prev == current {
        return format!(" [unchanged at {}]", current);
    }
    let diff = current as i16 - prev as i16;
    if diff > 0 {
        format!(" [was {}, up {}]", prev, diff)
    } else {
        format!(" [was {}, down {}]", prev, -diff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::AnalysisEngine;
    use crate::AnalysisInput;

    /// "Short"/"Too short"/"" scores 54 with six issues
    fn weak_report(path: &str) -> DocumentReport {
        AnalysisEngine::new().analyze_input(
            &AnalysisInput::new("Short", "Too short", ""),
            Path::new(path),
            None,
        )
    }

    fn run_with(file: &str, score: u8, timestamp: &str) -> HistoryRun {
        let mut files = HashMap::new();
        files.insert(file.to_string(), FileScore { score, issues: 1 });
        HistoryRun {
            timestamp: timestamp.to_string(),
            commit: None,
            files,
        }
    }

    #[test]
    fn format_delta_cases() {
        assert_eq!(format_delta(None, 85), "");
        assert_eq!(format_delta(Some(80), 83), " [was 80, up 3]");
        assert_eq!(format_delta(Some(90), 86), " [was 90, down 4]");
        assert_eq!(format_delta(Some(75), 75), " [unchanged at 75]");
        assert_eq!(format_delta(Some(0), 100), " [was 0, up 100]");
        assert_eq!(format_delta(Some(100), 0), " [was 100, down 100]");
    }

    #[test]
    fn previous_score_empty_history_returns_none() {
        let history = HistoryFile::default();
        assert_eq!(previous_score(&history, Path::new("blog/a.html")), None);
    }

    #[test]
    fn previous_score_uses_last_run_not_first() {
        let history = HistoryFile {
            runs: vec![
                run_with("blog/a.html", 70, "2026-01-01T00:00:00Z"),
                run_with("blog/a.html", 90, "2026-01-02T00:00:00Z"),
            ],
        };
        assert_eq!(previous_score(&history, Path::new("blog/a.html")), Some(90));
        assert_eq!(previous_score(&history, Path::new("blog/b.html")), None);
    }

    #[test]
    fn append_run_records_scores_and_issue_counts() {
        let mut history = HistoryFile::default();
        append_run(
            &mut history,
            &[weak_report("a.html"), weak_report("b.html")],
            Some("abc123".to_string()),
        );

        assert_eq!(history.runs.len(), 1);
        let run = &history.runs[0];
        assert_eq!(run.commit.as_deref(), Some("abc123"));
        assert_eq!(run.files.len(), 2);
        assert_eq!(run.files["a.html"].score, 54);
        assert_eq!(run.files["a.html"].issues, 6);
        assert!(chrono::DateTime::parse_from_rfc3339(&run.timestamp).is_ok());
    }

    #[test]
    fn append_run_truncates_to_max_runs() {
        let mut history = HistoryFile::default();
        let reports = vec![weak_report("a.html")];
        for _ in 0..55 {
            append_run(&mut history, &reports, None);
        }
        assert_eq!(history.runs.len(), MAX_RUNS);
    }

    #[test]
    fn save_and_load_history_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = HistoryFile::default();
        append_run(&mut history, &[weak_report("x.md")], Some("deadbeef".to_string()));

        save_history(dir.path(), &history).unwrap();
        let loaded = load_history(dir.path());

        assert_eq!(loaded.runs.len(), 1);
        assert_eq!(loaded.runs[0].commit.as_deref(), Some("deadbeef"));
        assert_eq!(loaded.runs[0].files["x.md"].score, 54);
    }

    #[test]
    fn load_history_tolerates_missing_and_corrupt_files() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_history(dir.path()).runs.is_empty());
        std::fs::write(dir.path().join(HISTORY_FILENAME), "not valid json {{{").unwrap();
        assert!(load_history(dir.path()).runs.is_empty());
    }

    #[test]
    fn find_project_root_with_config_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "{}").unwrap();
        let sub = dir.path().join("content").join("blog");
        std::fs::create_dir_all(&sub).unwrap();
        assert_eq!(find_project_root(&sub).unwrap(), dir.path());
    }

    #[test]
    fn find_project_root_from_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), "{}").unwrap();
        let post = dir.path().join("post.html");
        std::fs::write(&post, "<h1>x</h1>").unwrap();
        assert_eq!(find_project_root(&post).unwrap(), dir.path());
    }
}
