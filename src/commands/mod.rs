pub mod complete;
pub mod init;
pub mod locate;
pub mod outline;
pub mod scan;
pub mod watch;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::Config;
use crate::indexer::outline_document;
use crate::resolver::resolver_for;
use crate::symbol::SymbolTable;

/// Read a document and return its text with the directory its imports resolve against
pub(crate) fn read_document(path: &Path) -> Result<(String, PathBuf)> {
    let path = path
        .canonicalize()
        .with_context(|| format!("Failed to resolve {:?}", path))?;
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {:?}", path))?;
    let dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    Ok((text, dir))
}

/// Index `text` with the configured resolver, or locally only when imports
/// are disabled
pub(crate) async fn index_text(
    config: &Config,
    text: &str,
    dir: &Path,
    resolve_imports: bool,
) -> SymbolTable {
    if !(resolve_imports && config.resolver.enabled) {
        return SymbolTable::scan(text, 1);
    }

    let base = config
        .resolver
        .base_path
        .clone()
        .unwrap_or_else(|| dir.to_string_lossy().to_string());
    let timeout = Duration::from_millis(config.resolver.timeout_ms);
    let resolver = resolver_for(&config.resolver);
    outline_document(text, &base, resolver.as_ref(), timeout).await
}
