//! Symbol model, ordering and per-document tables
//!
//! Documents own one [`SymbolTable`] each. Tables are rebuilt wholesale from
//! a local scan and later extended with symbols resolved from imported
//! modules; both steps end with a full re-sort.

pub mod model;
pub mod sort;
pub mod table;

pub use model::{Symbol, SymbolKind, Visibility};
pub use sort::{compare_symbols, sort_symbols, variable_sort_key};
pub use table::{IndexState, SymbolTable};
