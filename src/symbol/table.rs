//! Per-document symbol table

use serde::Serialize;
use tracing::debug;

use super::model::{Symbol, SymbolKind};
use super::sort::sort_symbols;
use crate::resolver::ResolvedModule;
use crate::scanner;

/// How far indexing of a document has progressed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexState {
    /// Nothing scanned yet
    #[default]
    Unindexed,
    /// Local declarations scanned, imports not merged
    LocallyIndexed,
    /// Local declarations plus resolved import symbols
    MergedIndexed,
}

impl std::fmt::Display for IndexState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexState::Unindexed => write!(f, "unindexed"),
            IndexState::LocallyIndexed => write!(f, "locally indexed"),
            IndexState::MergedIndexed => write!(f, "merged"),
        }
    }
}

/// Sorted symbols of one document. Tables are immutable once built; every
/// reindex or merge produces a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SymbolTable {
    generation: u64,
    state: IndexState,
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    /// Empty table for a freshly opened document
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan `text` for local declarations and build a sorted table
    pub fn scan(text: &str, generation: u64) -> Self {
        let mut symbols = scanner::scan_declarations(text);
        sort_symbols(&mut symbols);

        debug!(
            "Indexed {} local symbols (generation {})",
            symbols.len(),
            generation
        );

        Self {
            generation,
            state: IndexState::LocallyIndexed,
            symbols,
        }
    }

    /// Extend this table with symbols from resolved modules.
    ///
    /// Returns `None` when there is nothing to merge, leaving the caller's
    /// table as it is.
    pub fn merged(&self, modules: &[ResolvedModule]) -> Option<Self> {
        if modules.is_empty() {
            return None;
        }

        let mut symbols = self.symbols.clone();
        for module in modules {
            symbols.extend(module.symbols());
        }
        sort_symbols(&mut symbols);

        debug!(
            "Merged {} modules, table now holds {} symbols",
            modules.len(),
            symbols.len()
        );

        Some(Self {
            generation: self.generation,
            state: IndexState::MergedIndexed,
            symbols,
        })
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> IndexState {
        self.state
    }

    /// All symbols in completion order
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols of one kind, in completion order
    pub fn of_kind(&self, kind: SymbolKind) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter().filter(move |s| s.kind == kind)
    }

    /// Symbols with exactly this name
    pub fn find_by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Symbol> {
        self.symbols.iter().filter(move |s| s.name == name)
    }

    /// Local symbols only
    pub fn local(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter().filter(|s| !s.is_imported())
    }
}
