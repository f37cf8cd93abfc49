//! Module import and module declaration scanning

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref MODULE_IMPORT: Regex = Regex::new(
        r#"import\s+module\s+namespace\s+([^=\s]+)\s*=\s*["']([^"']+)["']\s*at\s+["']([^"']+)["']\s*;"#
    )
    .expect("module import pattern");
    static ref MODULE_DECL: Regex =
        Regex::new(r"^\s*module\s+namespace\s+([^=\s]+)\s*=").expect("module declaration pattern");
}

/// Scheme prefix for locations inside the database
pub const DB_SCHEME: &str = "xmldb:exist://";

/// An `import module namespace prefix = "uri" at "location";` statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportDecl {
    pub prefix: String,
    pub uri: String,
    pub location: String,
}

impl ImportDecl {
    pub fn new(
        prefix: impl Into<String>,
        uri: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            uri: uri.into(),
            location: location.into(),
        }
    }

    /// Render the import statement for insertion into a document under `base`.
    ///
    /// Locations below `base` become relative; anything else is addressed
    /// through the database scheme.
    pub fn to_statement(&self, base: &str) -> String {
        let location = match self.location.strip_prefix(base) {
            Some(rest) if !base.is_empty() && rest.starts_with('/') => rest[1..].to_string(),
            _ => format!("{}{}", DB_SCHEME, self.location),
        };
        format!(
            "import module namespace {}=\"{}\" at \"{}\";\n",
            self.prefix, self.uri, location
        )
    }
}

/// All module imports that carry a location hint, in document order
pub fn scan_imports(text: &str) -> Vec<ImportDecl> {
    MODULE_IMPORT
        .captures_iter(text)
        .map(|caps| ImportDecl::new(&caps[1], &caps[2], &caps[3]))
        .collect()
}

/// Prefix of the `module namespace` declaration if the document is a library module
pub fn module_namespace_prefix(text: &str) -> Option<String> {
    text.lines()
        .find_map(|line| MODULE_DECL.captures(line))
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_imports() {
        let text = r#"
xquery version "3.1";
import module namespace config="http://exist-db.org/apps/demo/config" at "config.xqm";
import module namespace templates = 'http://exist-db.org/xquery/templates' at 'templates.xql' ;
import module namespace kwic="http://exist-db.org/xquery/kwic";
"#;
        let imports = scan_imports(text);
        assert_eq!(
            imports,
            vec![
                ImportDecl::new("config", "http://exist-db.org/apps/demo/config", "config.xqm"),
                ImportDecl::new("templates", "http://exist-db.org/xquery/templates", "templates.xql"),
            ]
        );
    }

    #[test]
    fn test_module_namespace_prefix() {
        let text = "xquery version \"3.1\";\n  module namespace app=\"http://example.com/app\";\n";
        assert_eq!(module_namespace_prefix(text).as_deref(), Some("app"));
        assert_eq!(module_namespace_prefix("xquery version \"3.1\";\n1"), None);
    }

    #[test]
    fn test_to_statement_relative_to_base() {
        let decl = ImportDecl::new("app", "http://example.com/app", "/db/apps/demo/modules/app.xqm");
        assert_eq!(
            decl.to_statement("/db/apps/demo"),
            "import module namespace app=\"http://example.com/app\" at \"modules/app.xqm\";\n"
        );
    }

    #[test]
    fn test_to_statement_outside_base() {
        let decl = ImportDecl::new("lib", "http://example.com/lib", "/db/system/lib.xqm");
        assert_eq!(
            decl.to_statement("/db/apps/demo"),
            "import module namespace lib=\"http://example.com/lib\" at \"xmldb:exist:///db/system/lib.xqm\";\n"
        );
    }
}
