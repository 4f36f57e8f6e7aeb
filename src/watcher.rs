//! File system watcher for watch mode

use crate::parser::is_document;
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;

const DEBOUNCE_MS: u64 = 300;

/// Watches a directory for document changes and emits paths on a channel
pub struct DocumentWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<notify::Result<notify::Event>>,
    patterns: Vec<String>,
}

fn is_create_or_modify(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Create(_) | EventKind::Modify(_))
}

impl DocumentWatcher {
    /// Start watching the given path (file or directory) for documents
    /// matching `patterns`
    pub fn watch(path: &Path, patterns: Vec<String>) -> notify::Result<Self> {
        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default().with_poll_interval(Duration::from_millis(DEBOUNCE_MS)),
        )?;

        if path.is_dir() {
            watcher.watch(path, RecursiveMode::Recursive)?;
        } else if let Some(parent) = path.parent() {
            watcher.watch(parent, RecursiveMode::Recursive)?;
        }

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            patterns,
        })
    }

    /// Whether a changed path should trigger re-analysis
    pub fn is_watched(&self, p: &Path) -> bool {
        !p.components().any(|c| c.as_os_str() == "node_modules") && is_document(p, &self.patterns)
    }

    fn paths_from_event(&self, event: &notify::Event) -> Vec<PathBuf> {
        if !is_create_or_modify(&event.kind) {
            return vec![];
        }
        event
            .paths
            .iter()
            .filter(|p| self.is_watched(p))
            .cloned()
            .collect()
    }

    /// Wait for the next batch of changes. Blocks until at least one change,
    /// then drains for DEBOUNCE_MS. Editors often write a file several times
    /// per save; each path is reported once.
    pub fn next_changes(&self) -> Vec<PathBuf> {
        let mut all = HashSet::new();

        match self.receiver.recv_timeout(Duration::from_secs(3600)) {
            Ok(Ok(event)) => all.extend(self.paths_from_event(&event)),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "watch error");
                return vec![];
            }
            Err(_) => return vec![],
        }

        std::thread::sleep(Duration::from_millis(DEBOUNCE_MS));
        while let Ok(ev) = self.receiver.try_recv() {
            if let Ok(event) = ev {
                all.extend(self.paths_from_event(&event));
            }
        }

        let mut paths: Vec<PathBuf> = all.into_iter().collect();
        paths.sort();
        paths
    }
}
