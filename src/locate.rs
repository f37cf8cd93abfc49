//! Go-to-declaration lookups by line scanning

use regex::Regex;
use tracing::debug;

use crate::symbol::SymbolKind;

/// Replace everything up to the first `:` of `name` with `replacement`
fn rewrite_prefix(name: &str, replacement: &str) -> String {
    match name.find(':') {
        Some(idx) if idx > 0 => format!("{}{}", replacement, &name[idx + 1..]),
        _ => name.to_string(),
    }
}

fn first_matching_line(text: &str, pattern: &Regex) -> Option<usize> {
    text.lines().position(|line| pattern.is_match(line))
}

/// Line (0-based) declaring function `name`.
///
/// Inside a library module the name's prefix is replaced by the module's own
/// prefix, so `local:f` and `app:f` both find `app:f`.
pub fn find_function(text: &str, name: &str, module_prefix: Option<&str>) -> Option<usize> {
    let name = match module_prefix {
        Some(prefix) => rewrite_prefix(name, &format!("{}:", prefix)),
        None => name.to_string(),
    };
    debug!("Locating function {}", name);

    let escaped = regex::escape(&name);
    let with_params = Regex::new(&format!(r"function\s+{}\s*\(", escaped)).ok()?;
    if let Some(line) = first_matching_line(text, &with_params) {
        return Some(line);
    }
    // Parameter list on the following line
    let name_only = Regex::new(&format!(r"function\s+{}$", escaped)).ok()?;
    first_matching_line(text, &name_only)
}

/// Line (0-based) declaring variable `name` (given with its `$`)
pub fn find_variable(text: &str, name: &str, module_prefix: Option<&str>) -> Option<usize> {
    let name = match module_prefix {
        Some(prefix) => rewrite_prefix(name, &format!("${}:", prefix)),
        None => name.to_string(),
    };
    debug!("Locating variable declaration {}", name);

    let pattern = Regex::new(&format!(r"variable\s+{}", regex::escape(&name))).ok()?;
    first_matching_line(text, &pattern)
}

/// Dispatch on symbol kind
pub fn locate(
    text: &str,
    kind: SymbolKind,
    name: &str,
    module_prefix: Option<&str>,
) -> Option<usize> {
    match kind {
        SymbolKind::Function => find_function(text, name, module_prefix),
        SymbolKind::Variable => find_variable(text, name, module_prefix),
    }
}
