use xqoutline::completion::{completion_items, function_at, token_at};
use xqoutline::locate::locate;
use xqoutline::scanner::{module_namespace_prefix, ImportDecl};
use xqoutline::{SymbolKind, SymbolTable};

use crate::helpers::test_utils::{CONFIG_MODULE, CONTROLLER};

#[test]
fn test_completion_at_cursor() {
    let table = SymbolTable::scan(CONTROLLER, 1);
    let lines: Vec<&str> = CONTROLLER.lines().collect();
    let row = lines
        .iter()
        .position(|l| l.trim_start().starts_with("return"))
        .unwrap();

    let line = "    return $it";
    let token = token_at(line, line.len());
    assert_eq!(token.text, "$it");

    let items = completion_items(table.symbols(), CONTROLLER, row, &token.text);
    let labels: Vec<_> = items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["$item"]);

    let items = completion_items(table.symbols(), CONTROLLER, row, "local:");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].label, "local:page($title as xs:string)");
    assert_eq!(items[0].kind, SymbolKind::Function);
}

#[test]
fn test_locate_declaration_under_cursor() {
    let line = "    for $item in app:list()";
    let name = function_at(line, 20);
    assert_eq!(name, "app:list");

    let found = locate(CONTROLLER, SymbolKind::Function, "local:page", None);
    assert_eq!(found, Some(7));
    let found = locate(CONTROLLER, SymbolKind::Variable, "$local:title", None);
    assert_eq!(found, Some(5));
}

#[test]
fn test_locate_in_library_module_uses_own_prefix() {
    let prefix = module_namespace_prefix(CONFIG_MODULE);
    assert_eq!(prefix.as_deref(), Some("config"));

    let found = locate(
        CONFIG_MODULE,
        SymbolKind::Function,
        "local:resolve",
        prefix.as_deref(),
    );
    assert_eq!(found, Some(5));

    let found = locate(
        CONFIG_MODULE,
        SymbolKind::Variable,
        "$local:app-root",
        prefix.as_deref(),
    );
    assert_eq!(found, Some(3));

    assert_eq!(
        locate(CONFIG_MODULE, SymbolKind::Function, "config:missing", None),
        None
    );
}

#[test]
fn test_import_statement_for_new_module() {
    let import = ImportDecl::new(
        "config",
        "http://example.com/config",
        "/db/apps/demo/modules/config.xqm",
    );
    assert_eq!(
        import.to_statement("/db/apps/demo"),
        "import module namespace config=\"http://example.com/config\" at \"modules/config.xqm\";\n"
    );
}
