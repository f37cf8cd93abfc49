use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Main query of the sample app
pub const CONTROLLER: &str = r#"xquery version "3.1";

import module namespace config="http://example.com/config" at "modules/config.xqm";
import module namespace app="http://example.com/app" at "modules/app.xqm";

declare variable $local:title := "Demo";

declare function local:page($title as xs:string) {
    let $root := $config:app-root
    for $item in app:list()
    return $item
};
"#;

pub const CONFIG_MODULE: &str = r#"xquery version "3.1";
module namespace config="http://example.com/config";

declare variable $config:app-root := "/db/apps/demo";

declare function config:resolve($path as xs:string) {
    $config:app-root || "/" || $path
};

declare %private function config:helper() { () };
"#;

pub const APP_MODULE: &str = r#"xquery version "3.1";
module namespace app="http://example.com/app";

declare function app:list() {
    ()
};
"#;

/// Write `content` to `relative` below `root`, creating parent directories
pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Temp directory holding the sample app: a controller and two modules
pub fn create_sample_app() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "controller.xql", CONTROLLER);
    write_file(dir.path(), "modules/config.xqm", CONFIG_MODULE);
    write_file(dir.path(), "modules/app.xqm", APP_MODULE);
    dir
}

/// Names of the given symbols, in order
pub fn names(symbols: &[xqoutline::Symbol]) -> Vec<&str> {
    symbols.iter().map(|s| s.name.as_str()).collect()
}
