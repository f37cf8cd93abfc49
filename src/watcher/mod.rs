//! Edit-triggered reindexing
//!
//! Watches a document on disk and feeds each debounced change into its
//! [`DocumentIndexer`]. Every change triggers a full rescan.

use anyhow::{Context, Result};
use notify::RecursiveMode;
use notify_debouncer_full::{new_debouncer, DebouncedEvent};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use crate::indexer::DocumentIndexer;

/// What happened to the watched document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeType {
    Modified,
    Deleted,
}

impl std::fmt::Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeType::Modified => write!(f, "modified"),
            ChangeType::Deleted => write!(f, "deleted"),
        }
    }
}

/// Counters for one watch session
#[derive(Debug, Default, Clone)]
pub struct WatchStats {
    pub reindexes: usize,
    pub deletions: usize,
    pub errors: usize,
}

/// Watches one document and reindexes it after each edit
pub struct DocumentWatcher {
    path: PathBuf,
    debounce_ms: u64,
}

impl DocumentWatcher {
    pub fn new(path: PathBuf, debounce_ms: u64) -> Self {
        Self { path, debounce_ms }
    }

    /// Run until `shutdown_rx` fires
    pub async fn run(
        self,
        indexer: &DocumentIndexer,
        mut shutdown_rx: oneshot::Receiver<()>,
    ) -> Result<WatchStats> {
        let (tx, mut rx) = mpsc::channel::<Vec<DebouncedEvent>>(100);

        let mut debouncer = new_debouncer(
            Duration::from_millis(self.debounce_ms),
            None,
            move |result: std::result::Result<Vec<DebouncedEvent>, Vec<notify::Error>>| {
                match result {
                    Ok(events) => {
                        if !events.is_empty() {
                            if let Err(e) = tx.blocking_send(events) {
                                error!("Failed to send debounced events: {}", e);
                            }
                        }
                    }
                    Err(errors) => {
                        for error in errors {
                            error!("Watch error: {}", error);
                        }
                    }
                }
            },
        )
        .with_context(|| "Failed to create file watcher debouncer")?;

        // Editors often save by renaming over the file, so watch the directory
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        debouncer
            .watch(dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch directory: {:?}", dir))?;

        info!(
            "Watching {:?} (debounce {}ms)",
            self.path, self.debounce_ms
        );

        let mut stats = WatchStats::default();
        loop {
            tokio::select! {
                _ = &mut shutdown_rx => {
                    info!("Shutdown signal received, stopping watcher");
                    break;
                }
                Some(events) = rx.recv() => {
                    match self.classify(&events) {
                        Some(ChangeType::Modified) => match self.reindex(indexer).await {
                            Ok(()) => stats.reindexes += 1,
                            Err(e) => {
                                warn!("Reindex failed: {:#}", e);
                                stats.errors += 1;
                            }
                        },
                        Some(ChangeType::Deleted) => {
                            warn!("{:?} was deleted, keeping last table", self.path);
                            stats.deletions += 1;
                        }
                        None => {}
                    }
                }
            }
        }

        Ok(stats)
    }

    /// Collapse a batch of events to the last change affecting the document
    fn classify(&self, events: &[DebouncedEvent]) -> Option<ChangeType> {
        let mut change = None;
        for event in events {
            if !event.paths.iter().any(|p| same_file(p, &self.path)) {
                continue;
            }
            change = match event.kind {
                notify::EventKind::Create(_) | notify::EventKind::Modify(_) => {
                    Some(ChangeType::Modified)
                }
                notify::EventKind::Remove(_) => Some(ChangeType::Deleted),
                _ => change,
            };
        }
        if let Some(change) = change {
            debug!("Document change detected: {}", change);
        }
        change
    }

    async fn reindex(&self, indexer: &DocumentIndexer) -> Result<()> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {:?}", self.path))?;
        indexer.reindex(text).await?;
        Ok(())
    }
}

fn same_file(event_path: &Path, document: &Path) -> bool {
    event_path == document || event_path.ends_with(document)
}
