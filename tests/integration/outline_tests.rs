use anyhow::Result;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

use xqoutline::config::IndexerConfig;
use xqoutline::indexer::Walker;
use xqoutline::{outline_document, FsResolver, IndexState, SymbolKind, SymbolTable};

use crate::helpers::test_utils::{create_sample_app, names, CONTROLLER};

const TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn test_outline_merges_imported_modules() -> Result<()> {
    let app = create_sample_app();
    let base = app.path().to_string_lossy().to_string();

    let table = outline_document(CONTROLLER, &base, &FsResolver::new(), TIMEOUT).await;

    assert_eq!(table.state(), IndexState::MergedIndexed);
    assert_eq!(
        names(table.symbols()),
        vec![
            "$local:title",
            "local:page",
            "$config:app-root",
            "app:list",
            "config:resolve",
        ]
    );

    let resolve = table
        .find_by_name("config:resolve")
        .next()
        .expect("imported function");
    assert_eq!(resolve.source.as_deref(), Some("modules/config.xqm"));
    assert_eq!(
        resolve.signature.as_deref(),
        Some("config:resolve($path as xs:string)")
    );

    // Private functions are not exported
    assert_eq!(table.find_by_name("config:helper").count(), 0);

    Ok(())
}

#[tokio::test]
async fn test_missing_module_is_skipped() -> Result<()> {
    let app = create_sample_app();
    fs::remove_file(app.path().join("modules/app.xqm"))?;
    let base = app.path().to_string_lossy().to_string();

    let table = outline_document(CONTROLLER, &base, &FsResolver::new(), TIMEOUT).await;

    assert_eq!(table.state(), IndexState::MergedIndexed);
    assert_eq!(table.find_by_name("app:list").count(), 0);
    assert_eq!(table.find_by_name("config:resolve").count(), 1);

    Ok(())
}

#[tokio::test]
async fn test_unresolvable_imports_keep_local_table() -> Result<()> {
    let empty = TempDir::new()?;
    let base = empty.path().to_string_lossy().to_string();

    let table = outline_document(CONTROLLER, &base, &FsResolver::new(), TIMEOUT).await;

    assert_eq!(table.state(), IndexState::LocallyIndexed);
    assert_eq!(names(table.symbols()), vec!["$local:title", "local:page"]);
    assert_eq!(table.local().count(), table.len());

    Ok(())
}

#[test]
fn test_local_scan_matches_outline_order() {
    let table = SymbolTable::scan(CONTROLLER, 7);

    assert_eq!(table.generation(), 7);
    assert_eq!(table.of_kind(SymbolKind::Function).count(), 1);
    assert_eq!(table.of_kind(SymbolKind::Variable).count(), 1);
    assert_eq!(
        table.symbols()[1].signature.as_deref(),
        Some("local:page($title as xs:string)")
    );
}

#[test]
fn test_walker_finds_sample_app_files() {
    let app = create_sample_app();
    let walker = Walker::new(app.path().to_path_buf(), &IndexerConfig::default());

    let files: Vec<_> = walker
        .collect_files()
        .iter()
        .map(|p| p.strip_prefix(app.path()).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();

    assert_eq!(
        files,
        vec!["controller.xql", "modules/app.xqm", "modules/config.xqm"]
    );
}
