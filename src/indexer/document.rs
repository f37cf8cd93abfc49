//! Single-writer indexing task for one document
//!
//! The task owns the document's [`SymbolTable`]. Edits arrive as commands;
//! each one bumps the generation, publishes the local scan immediately and
//! starts import resolution in the background. Resolution results are tagged
//! with the generation they were started for and dropped if a newer scan has
//! happened since. Readers get the last complete table from a watch channel.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::ResolverConfig;
use crate::resolver::{resolve_with_timeout, ImportResolver, ResolvedModule};
use crate::scanner::scan_imports;
use crate::symbol::SymbolTable;

const COMMAND_BUFFER: usize = 32;

#[derive(Error, Debug)]
pub enum IndexerError {
    /// The indexing task has stopped
    #[error("Document indexer is no longer running")]
    Closed,
}

/// Settings for a [`DocumentIndexer`]
#[derive(Debug, Clone)]
pub struct IndexerOptions {
    /// Base path the document's relative imports resolve against
    pub base: String,
    /// Whether imports are resolved at all
    pub resolve_imports: bool,
    /// Deadline for one resolver call
    pub resolve_timeout: Duration,
}

impl IndexerOptions {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            resolve_imports: true,
            resolve_timeout: Duration::from_millis(crate::config::DEFAULT_RESOLVE_TIMEOUT_MS),
        }
    }

    pub fn from_config(config: &ResolverConfig, base: impl Into<String>) -> Self {
        Self {
            base: config.base_path.clone().unwrap_or_else(|| base.into()),
            resolve_imports: config.enabled,
            resolve_timeout: Duration::from_millis(config.timeout_ms),
        }
    }
}

enum Command {
    Reindex(String),
    Shutdown,
}

struct MergeResult {
    generation: u64,
    modules: Vec<ResolvedModule>,
}

/// Handle to a running document indexing task
pub struct DocumentIndexer {
    commands: mpsc::Sender<Command>,
    tables: watch::Receiver<Arc<SymbolTable>>,
    task: JoinHandle<()>,
}

impl DocumentIndexer {
    /// Spawn the indexing task for a newly opened, still empty document
    pub fn spawn(resolver: Arc<dyn ImportResolver>, options: IndexerOptions) -> Self {
        let (commands_tx, commands_rx) = mpsc::channel(COMMAND_BUFFER);
        let (merge_tx, merge_rx) = mpsc::channel(COMMAND_BUFFER);
        let (table_tx, tables) = watch::channel(Arc::new(SymbolTable::new()));

        let task = IndexerTask {
            resolver,
            options,
            generation: 0,
            table_tx,
            merge_tx,
            pending_merge: None,
        };
        let task = tokio::spawn(task.run(commands_rx, merge_rx));

        Self {
            commands: commands_tx,
            tables,
            task,
        }
    }

    /// Queue a full reindex of the document text
    pub async fn reindex(&self, text: impl Into<String>) -> Result<(), IndexerError> {
        self.commands
            .send(Command::Reindex(text.into()))
            .await
            .map_err(|_| IndexerError::Closed)
    }

    /// The last complete table
    pub fn current(&self) -> Arc<SymbolTable> {
        self.tables.borrow().clone()
    }

    /// Receiver notified whenever a new table is published
    pub fn subscribe(&self) -> watch::Receiver<Arc<SymbolTable>> {
        self.tables.clone()
    }

    /// Stop the task and wait for it to finish
    pub async fn shutdown(self) {
        let _ = self.commands.send(Command::Shutdown).await;
        let _ = self.task.await;
    }
}

struct IndexerTask {
    resolver: Arc<dyn ImportResolver>,
    options: IndexerOptions,
    generation: u64,
    table_tx: watch::Sender<Arc<SymbolTable>>,
    merge_tx: mpsc::Sender<MergeResult>,
    pending_merge: Option<JoinHandle<()>>,
}

impl IndexerTask {
    async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        mut merges: mpsc::Receiver<MergeResult>,
    ) {
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Reindex(text)) => self.reindex(&text),
                    Some(Command::Shutdown) | None => break,
                },
                Some(result) = merges.recv() => self.apply_merge(result),
            }
        }

        if let Some(pending) = self.pending_merge.take() {
            pending.abort();
        }
        info!("Document indexer stopped at generation {}", self.generation);
    }

    fn reindex(&mut self, text: &str) {
        self.generation += 1;
        let generation = self.generation;

        if let Some(pending) = self.pending_merge.take() {
            pending.abort();
        }

        self.table_tx
            .send_replace(Arc::new(SymbolTable::scan(text, generation)));

        if !self.options.resolve_imports {
            return;
        }
        let imports = scan_imports(text);
        if imports.is_empty() {
            return;
        }

        let resolver = Arc::clone(&self.resolver);
        let base = self.options.base.clone();
        let timeout = self.options.resolve_timeout;
        let merge_tx = self.merge_tx.clone();

        self.pending_merge = Some(tokio::spawn(async move {
            let modules = resolve_with_timeout(resolver.as_ref(), &base, &imports, timeout).await;
            let _ = merge_tx.send(MergeResult { generation, modules }).await;
        }));
    }

    fn apply_merge(&mut self, result: MergeResult) {
        if result.generation != self.generation {
            debug!(
                "Discarding import merge for generation {} (current {})",
                result.generation, self.generation
            );
            return;
        }
        self.pending_merge = None;

        let current = self.table_tx.borrow().clone();
        match current.merged(&result.modules) {
            Some(table) => {
                self.table_tx.send_replace(Arc::new(table));
            }
            None => debug!("No import symbols resolved, keeping local table"),
        }
    }
}
