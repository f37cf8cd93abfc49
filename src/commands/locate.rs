//! Locate command: find where a function or variable is declared.

use anyhow::{bail, Result};
use std::path::Path;

use super::read_document;
use crate::locate::locate;
use crate::scanner::module_namespace_prefix;
use crate::symbol::SymbolKind;

pub fn run(file: &Path, name: &str) -> Result<()> {
    let (text, _) = read_document(file)?;

    let kind = if name.starts_with('$') {
        SymbolKind::Variable
    } else {
        SymbolKind::Function
    };
    let prefix = module_namespace_prefix(&text);

    match locate(&text, kind, name, prefix.as_deref()) {
        Some(line) => {
            println!("{}:{}", file.display(), line + 1);
            Ok(())
        }
        None => bail!("No declaration of {} {} in {}", kind, name, file.display()),
    }
}
