//! Regex-based declaration scanning for XQuery source text
//!
//! Every function here is pure: the compiled patterns are shared statics but
//! carry no cursor state, so scans never observe each other.

pub mod imports;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use crate::symbol::{Symbol, Visibility};

pub use imports::{module_namespace_prefix, scan_imports, ImportDecl};

lazy_static! {
    /// Optional `%annotation(...)` list, then `function name(`
    static ref FUNCTION_DECL: Regex =
        Regex::new(r"declare\s+((?:%[\w:\-]+(?:\([^)]*\))?\s*)*)function\s+([^(]+)\(")
            .expect("function declaration pattern");
    static ref VARIABLE_DECL: Regex =
        Regex::new(r"declare\s+(?:%\w+\s+)*variable\s+(\$[^\s;]+)")
            .expect("variable declaration pattern");
}

const PRIVATE_ANNOTATION: &str = "%private";

/// Whitespace stripped from declared names. Fixed set, independent of the
/// Unicode `White_Space` property (it includes U+180E).
const NAME_WHITESPACE: &[char] = &[
    '\u{09}', '\u{0a}', '\u{0b}', '\u{0c}', '\u{0d}', '\u{20}', '\u{a0}', '\u{1680}', '\u{180e}',
    '\u{2000}', '\u{2001}', '\u{2002}', '\u{2003}', '\u{2004}', '\u{2005}', '\u{2006}',
    '\u{2007}', '\u{2008}', '\u{2009}', '\u{200a}', '\u{2028}', '\u{2029}', '\u{202f}',
    '\u{205f}', '\u{3000}',
];

/// Trim leading and trailing whitespace from a declared name
pub fn trim_name(name: &str) -> &str {
    name.trim_matches(NAME_WHITESPACE)
}

/// Find the parenthesis closing a list whose opening paren sits just before `offset`.
///
/// Depth starts at 1 and every `(` / `)` from `offset` on moves it. Returns
/// the byte index of the `)` bringing depth to 0, or `None` if the text ends
/// first.
pub fn find_matching_paren(text: &str, offset: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 1usize;
    for (i, &b) in bytes.iter().enumerate().skip(offset) {
        match b {
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            b'(' => depth += 1,
            _ => {}
        }
    }
    None
}

/// Scan `text` for `declare function` statements.
///
/// An unterminated parameter list yields a signature running to the end of
/// the text.
pub fn scan_functions(text: &str) -> Vec<Symbol> {
    let mut functions = Vec::new();

    for caps in FUNCTION_DECL.captures_iter(text) {
        let (Some(whole), Some(raw_name)) = (caps.get(0), caps.get(2)) else {
            continue;
        };
        let annotations = caps.get(1).map(|m| m.as_str()).unwrap_or_default();

        let offset = whole.end();
        let end = find_matching_paren(text, offset).unwrap_or_else(|| {
            debug!("Unterminated parameter list at byte {}, truncating", offset);
            text.len()
        });

        let name = trim_name(raw_name.as_str()).to_string();
        let signature = format!("{}({})", name, &text[offset..end]);
        let visibility = if annotations.contains(PRIVATE_ANNOTATION) {
            Visibility::Private
        } else {
            Visibility::Public
        };

        trace!("Found function {}", signature);
        functions.push(Symbol::local_function(name, signature, visibility));
    }

    functions
}

/// Scan `text` for `declare variable` statements. Names keep the `$` sigil.
pub fn scan_variables(text: &str) -> Vec<Symbol> {
    VARIABLE_DECL
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| {
            trace!("Found variable {}", m.as_str());
            Symbol::local_variable(m.as_str().to_string())
        })
        .collect()
}

/// Scan all local declarations, functions first, in document order
pub fn scan_declarations(text: &str) -> Vec<Symbol> {
    let mut symbols = scan_functions(text);
    symbols.extend(scan_variables(text));
    symbols
}
