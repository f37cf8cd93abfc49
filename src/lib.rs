//! Symbol outline indexing for XQuery documents.
//!
//! Local `declare function` / `declare variable` statements are scanned from
//! the document text, symbols of imported modules are merged in from an
//! [`ImportResolver`], and the result is kept as one sorted
//! [`SymbolTable`] per document for completion and navigation.

pub mod cli;
pub mod commands;
pub mod completion;
pub mod config;
pub mod indexer;
pub mod locate;
pub mod logging;
pub mod resolver;
pub mod scanner;
pub mod symbol;
pub mod watcher;

pub use config::Config;
pub use indexer::{outline_document, DocumentIndexer, IndexerOptions};
pub use resolver::{FsResolver, ImportResolver, ResolvedModule};
pub use scanner::ImportDecl;
pub use symbol::{IndexState, Symbol, SymbolKind, SymbolTable, Visibility};
