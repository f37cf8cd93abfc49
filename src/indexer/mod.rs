pub mod document;
pub mod walker;

use std::time::Duration;

use crate::resolver::{resolve_with_timeout, ImportResolver};
use crate::scanner::scan_imports;
use crate::symbol::SymbolTable;

pub use document::{DocumentIndexer, IndexerError, IndexerOptions};
pub use walker::Walker;

/// Index a document in one go: local scan, then a merge of whatever the
/// resolver returns within `timeout`.
pub async fn outline_document(
    text: &str,
    base: &str,
    resolver: &dyn ImportResolver,
    timeout: Duration,
) -> SymbolTable {
    let table = SymbolTable::scan(text, 1);
    let imports = scan_imports(text);
    let modules = resolve_with_timeout(resolver, base, &imports, timeout).await;
    table.merged(&modules).unwrap_or(table)
}
