//! Symbol types shared by the scanner, the resolver and the table

use serde::{Deserialize, Serialize};

use super::sort::variable_sort_key;

/// Kind of a declared symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Function,
    Variable,
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolKind::Function => f.pad("function"),
            SymbolKind::Variable => f.pad("variable"),
        }
    }
}

/// Visibility of a declaration, taken from its `%private` annotation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

/// A function or variable declaration tracked for completion and navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    /// Function or variable
    pub kind: SymbolKind,
    /// Declared name; variables keep their `$` sigil
    pub name: String,
    /// Visibility modifier
    pub visibility: Visibility,
    /// Function signature, e.g. `local:f($a)`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// Location of the module the symbol was imported from; `None` for local symbols
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Derived key used to order completion entries
    pub sort_key: String,
}

impl Symbol {
    /// A function declared in the document being indexed
    pub fn local_function(name: String, signature: String, visibility: Visibility) -> Self {
        let sort_key = format!("$${}", signature);
        Self {
            kind: SymbolKind::Function,
            name,
            visibility,
            signature: Some(signature),
            source: None,
            sort_key,
        }
    }

    /// A variable declared in the document being indexed; `name` includes the `$`
    pub fn local_variable(name: String) -> Self {
        let sort_key = format!("$${}", variable_sort_key(&name));
        Self {
            kind: SymbolKind::Variable,
            name,
            visibility: Visibility::Public,
            signature: None,
            source: None,
            sort_key,
        }
    }

    /// A function exported by an imported module
    pub fn imported_function(
        name: String,
        signature: String,
        visibility: Visibility,
        source: String,
    ) -> Self {
        Self {
            kind: SymbolKind::Function,
            name,
            visibility,
            sort_key: signature.clone(),
            signature: Some(signature),
            source: Some(source),
        }
    }

    /// A variable exported by an imported module.
    ///
    /// Resolvers report bare names; the `$` sigil is added here so imported
    /// and local variables look the same to completion.
    pub fn imported_variable(bare_name: &str, source: String) -> Self {
        let name = if bare_name.starts_with('$') {
            bare_name.to_string()
        } else {
            format!("${}", bare_name)
        };
        Self {
            kind: SymbolKind::Variable,
            sort_key: variable_sort_key(&name),
            name,
            visibility: Visibility::Public,
            signature: None,
            source: Some(source),
        }
    }

    /// Whether the symbol came from an imported module
    pub fn is_imported(&self) -> bool {
        self.source.is_some()
    }

    pub fn is_variable(&self) -> bool {
        self.kind == SymbolKind::Variable
    }

    /// Text shown in a completion list: the signature for functions, the name otherwise
    pub fn label(&self) -> &str {
        self.signature.as_deref().unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_function_sort_key() {
        let sym = Symbol::local_function(
            "local:f".to_string(),
            "local:f($a)".to_string(),
            Visibility::Public,
        );
        assert_eq!(sym.sort_key, "$$local:f($a)");
        assert!(!sym.is_imported());
        assert_eq!(sym.label(), "local:f($a)");
    }

    #[test]
    fn test_local_variable_sort_key() {
        let sym = Symbol::local_variable("$config:app-root".to_string());
        assert_eq!(sym.sort_key, "$$config:$app-root");
        assert_eq!(sym.label(), "$config:app-root");
    }

    #[test]
    fn test_imported_variable_gets_sigil() {
        let sym = Symbol::imported_variable("config:app-root", "config.xqm".to_string());
        assert_eq!(sym.name, "$config:app-root");
        assert_eq!(sym.sort_key, "config:$app-root");
        assert_eq!(sym.source.as_deref(), Some("config.xqm"));

        let already = Symbol::imported_variable("$x", "m.xqm".to_string());
        assert_eq!(already.name, "$x");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(SymbolKind::Function.to_string(), "function");
        assert_eq!(Visibility::Private.to_string(), "private");
    }
}
