//! Watch command implementation
//!
//! Keeps a document indexed while it is being edited and prints each new
//! table as it is published.

use anyhow::{Context, Result};
use std::path::Path;
use tokio::signal;
use tokio::sync::oneshot;
use tracing::info;

use super::read_document;
use crate::config::Config;
use crate::indexer::{DocumentIndexer, IndexerOptions};
use crate::resolver::resolver_for;
use crate::watcher::DocumentWatcher;

pub async fn run(config: &Config, file: &Path, debounce_ms: u64) -> Result<()> {
    let (text, dir) = read_document(file)?;
    let path = file
        .canonicalize()
        .with_context(|| format!("Failed to resolve {:?}", file))?;

    let options = IndexerOptions::from_config(&config.resolver, dir.to_string_lossy());
    let indexer = DocumentIndexer::spawn(resolver_for(&config.resolver), options);

    // Print every table the indexer publishes
    let mut tables = indexer.subscribe();
    let printer = tokio::spawn(async move {
        while tables.changed().await.is_ok() {
            let table = tables.borrow_and_update().clone();
            println!(
                "[generation {}] {} symbols ({})",
                table.generation(),
                table.len(),
                table.state()
            );
        }
    });

    indexer.reindex(text).await?;

    println!("Watching {} (debounce {}ms)", path.display(), debounce_ms);
    println!("Press Ctrl+C to stop.");
    println!();

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            println!();
            println!("Shutting down...");
            let _ = shutdown_tx.send(());
        }
    });

    let watcher = DocumentWatcher::new(path, debounce_ms);
    let stats = watcher.run(&indexer, shutdown_rx).await?;

    indexer.shutdown().await;
    let _ = printer.await;

    println!();
    println!("Watch session complete!");
    println!("----------------------------------------");
    println!("  Reindexes: {}", stats.reindexes);
    if stats.deletions > 0 {
        println!("  Deletions: {}", stats.deletions);
    }
    if stats.errors > 0 {
        println!("  Errors:    {}", stats.errors);
    }
    println!("----------------------------------------");

    info!("Watch session ended");

    Ok(())
}
