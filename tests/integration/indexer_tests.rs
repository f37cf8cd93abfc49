use anyhow::Result;
use std::fs;
use std::sync::Arc;
use std::time::Duration;

use xqoutline::resolver::StaticResolver;
use xqoutline::{DocumentIndexer, FsResolver, IndexState, IndexerOptions};

use crate::helpers::test_utils::{create_sample_app, names, write_file, CONTROLLER};

#[tokio::test]
async fn test_indexer_publishes_local_then_merged_table() -> Result<()> {
    let app = create_sample_app();
    let options = IndexerOptions::new(app.path().to_string_lossy());
    let indexer = DocumentIndexer::spawn(Arc::new(FsResolver::new()), options);
    let mut tables = indexer.subscribe();

    assert_eq!(indexer.current().state(), IndexState::Unindexed);
    assert!(indexer.current().is_empty());

    indexer.reindex(CONTROLLER).await?;
    let merged = tables
        .wait_for(|t| t.state() == IndexState::MergedIndexed)
        .await?
        .clone();

    assert_eq!(merged.generation(), 1);
    assert_eq!(merged.len(), 5);

    indexer.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_edit_picks_up_module_changes() -> Result<()> {
    let app = create_sample_app();
    let options = IndexerOptions::new(app.path().to_string_lossy());
    let indexer = DocumentIndexer::spawn(Arc::new(FsResolver::new()), options);
    let mut tables = indexer.subscribe();

    indexer.reindex(CONTROLLER).await?;
    tables
        .wait_for(|t| t.state() == IndexState::MergedIndexed)
        .await?;

    write_file(
        app.path(),
        "modules/app.xqm",
        r#"module namespace app="http://example.com/app";
declare function app:list() { () };
declare function app:count($items) { count($items) };
"#,
    );
    indexer.reindex(CONTROLLER).await?;
    let table = tables
        .wait_for(|t| t.generation() == 2 && t.state() == IndexState::MergedIndexed)
        .await?
        .clone();

    assert_eq!(
        names(table.symbols()),
        vec![
            "$local:title",
            "local:page",
            "$config:app-root",
            "app:count",
            "app:list",
            "config:resolve",
        ]
    );

    indexer.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_slow_resolver_never_blocks_local_table() -> Result<()> {
    let resolver = Arc::new(StaticResolver::new(vec![]).with_delay(Duration::from_secs(10)));
    let mut options = IndexerOptions::new("/db/apps/demo");
    options.resolve_timeout = Duration::from_millis(50);
    let indexer = DocumentIndexer::spawn(resolver.clone(), options);
    let mut tables = indexer.subscribe();

    indexer.reindex(CONTROLLER).await?;
    let table = tables.wait_for(|t| t.generation() == 1).await?.clone();
    assert_eq!(table.state(), IndexState::LocallyIndexed);
    assert_eq!(table.len(), 2);

    // The timed out merge leaves the local table in place
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(indexer.current().state(), IndexState::LocallyIndexed);
    assert_eq!(resolver.call_count(), 1);

    indexer.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_rapid_edits_end_on_latest_text() -> Result<()> {
    let app = create_sample_app();
    let options = IndexerOptions::new(app.path().to_string_lossy());
    let indexer = DocumentIndexer::spawn(Arc::new(FsResolver::new()), options);
    let mut tables = indexer.subscribe();

    let final_text = fs::read_to_string(app.path().join("modules/app.xqm"))?;
    for _ in 0..5 {
        indexer.reindex(CONTROLLER).await?;
    }
    indexer.reindex(final_text).await?;

    let table = tables.wait_for(|t| t.generation() == 6).await?.clone();
    assert_eq!(names(table.symbols()), vec!["app:list"]);

    // No earlier merge may replace the latest table
    tokio::time::sleep(Duration::from_millis(100)).await;
    let current = indexer.current();
    assert_eq!(current.generation(), 6);
    assert_eq!(names(current.symbols()), vec!["app:list"]);

    indexer.shutdown().await;
    Ok(())
}
