//! Sort keys and the completion ordering over symbol tables

use std::cmp::Ordering;

use super::model::{Symbol, SymbolKind};

/// Separator inserted after the namespace segment of a variable key
const NAMESPACE_MARKER: &str = ":$";

/// Build the sort key for a variable name (with or without its `$` sigil).
///
/// The name is split on `:` and [`NAMESPACE_MARKER`] is inserted after the
/// first segment: `$ns:var` becomes `ns:$var`, `$x` becomes `x:$`.
pub fn variable_sort_key(name: &str) -> String {
    let bare = name.strip_prefix('$').unwrap_or(name);
    let mut segments = bare.split(':');
    let mut key = String::with_capacity(bare.len() + NAMESPACE_MARKER.len());
    if let Some(first) = segments.next() {
        key.push_str(first);
    }
    key.push_str(NAMESPACE_MARKER);
    for segment in segments {
        key.push_str(segment);
    }
    key
}

/// Split a variable name into `(namespace, local name)` at the first `:`
fn variable_segments(name: &str) -> (&str, &str) {
    let bare = name.strip_prefix('$').unwrap_or(name);
    bare.split_once(':').unwrap_or((bare, ""))
}

fn kind_rank(kind: SymbolKind) -> u8 {
    match kind {
        SymbolKind::Variable => 0,
        SymbolKind::Function => 1,
    }
}

/// Completion ordering between two symbols.
///
/// Local symbols come before imported ones. Within an origin class variables
/// precede functions, functions compare by name and variables by namespace
/// segment first, then local name. The sort key breaks remaining ties.
pub fn compare_symbols(a: &Symbol, b: &Symbol) -> Ordering {
    a.is_imported()
        .cmp(&b.is_imported())
        .then_with(|| kind_rank(a.kind).cmp(&kind_rank(b.kind)))
        .then_with(|| match a.kind {
            SymbolKind::Function => a.name.cmp(&b.name),
            SymbolKind::Variable => variable_segments(&a.name).cmp(&variable_segments(&b.name)),
        })
        .then_with(|| a.sort_key.cmp(&b.sort_key))
}

/// Full stable re-sort of a symbol list
pub fn sort_symbols(symbols: &mut [Symbol]) {
    symbols.sort_by(compare_symbols);
}
