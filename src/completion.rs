//! Completion lookups over a document's symbol table

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::symbol::{Symbol, SymbolKind};

lazy_static! {
    /// `let $v`, `for $v` or a parameter `$v)`
    static ref BINDING: Regex =
        Regex::new(r"let \$[\w\-_:]+|for \$[\w\-_:]+|\$[\w\-_:]+\)").expect("binding pattern");
    static ref BINDING_NAME: Regex = Regex::new(r"\$[\w\-_:]+").expect("binding name pattern");
    /// Lines that end the enclosing function body when scanning upwards
    static ref SCOPE_BOUNDARY: Regex = Regex::new(r"declare function|\};").expect("scope pattern");
}

/// One entry of a completion list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionItem {
    /// Signature for functions, name for variables
    pub label: String,
    pub kind: SymbolKind,
    /// Module the symbol was imported from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl From<&Symbol> for CompletionItem {
    fn from(symbol: &Symbol) -> Self {
        Self {
            label: symbol.label().to_string(),
            kind: symbol.kind,
            source: symbol.source.clone(),
        }
    }
}

/// The word being completed and its column range on the line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '-' | '.')
}

/// Symbols whose name starts with `prefix`, in table order.
///
/// A prefix starting with `$` only matches variables.
pub fn complete<'a>(symbols: &'a [Symbol], prefix: &str) -> Vec<&'a Symbol> {
    let variables_only = prefix.starts_with('$');
    symbols
        .iter()
        .filter(|s| !variables_only || s.is_variable())
        .filter(|s| s.name.starts_with(prefix))
        .collect()
}

/// Full completion list: in-scope local bindings first, then table matches
pub fn completion_items(
    symbols: &[Symbol],
    text: &str,
    row: usize,
    prefix: &str,
) -> Vec<CompletionItem> {
    let mut items = Vec::new();
    if prefix.starts_with('$') {
        items.extend(
            local_variables(text, row, prefix)
                .into_iter()
                .map(|label| CompletionItem {
                    label,
                    kind: SymbolKind::Variable,
                    source: None,
                }),
        );
    }
    items.extend(complete(symbols, prefix).into_iter().map(CompletionItem::from));
    items
}

/// Variables bound by `let`, `for` or a parameter list on lines at or above
/// `row`, nearest first. Scanning stops at the line that opens or closes the
/// enclosing function.
pub fn local_variables(text: &str, row: usize, prefix: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.is_empty() {
        return Vec::new();
    }

    let mut variables = Vec::new();
    for line in lines[..=row.min(lines.len() - 1)].iter().rev() {
        if let Some(binding) = BINDING.find(line) {
            if let Some(name) = BINDING_NAME.find(binding.as_str()) {
                if name.as_str().starts_with(prefix) {
                    variables.push(name.as_str().to_string());
                }
            }
        }
        if SCOPE_BOUNDARY.is_match(line) {
            break;
        }
    }
    variables
}

/// The token ending at `column`: a run of name characters, extended by a
/// leading `$` when there is one.
pub fn token_at(line: &str, column: usize) -> Token {
    let chars: Vec<char> = line.chars().collect();
    let end = column.min(chars.len());

    let mut start = end;
    while start > 0 && is_name_char(chars[start - 1]) {
        start -= 1;
    }
    if start < end && start > 0 && chars[start - 1] == '$' {
        start -= 1;
    }

    Token {
        start,
        end,
        text: chars[start..end].iter().collect(),
    }
}

/// The function or variable name surrounding `column`
pub fn function_at(line: &str, column: usize) -> String {
    let chars: Vec<char> = line.chars().collect();
    let is_func_char = |c: char| c == '$' || is_name_char(c);
    let column = column.min(chars.len());

    let mut start = column;
    while start > 0 && is_func_char(chars[start - 1]) {
        start -= 1;
    }
    let mut end = column;
    while end < chars.len() && is_func_char(chars[end]) {
        end += 1;
    }

    chars[start..end].iter().collect()
}
