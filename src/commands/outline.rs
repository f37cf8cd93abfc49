//! Outline command: print a document's sorted symbol table.

use anyhow::Result;
use std::path::Path;

use super::{index_text, read_document};
use crate::config::Config;
use crate::symbol::{Symbol, Visibility};

pub async fn run(config: &Config, file: &Path, no_imports: bool, json: bool) -> Result<()> {
    let (text, dir) = read_document(file)?;
    let table = index_text(config, &text, &dir, !no_imports).await;

    if json {
        println!("{}", serde_json::to_string_pretty(table.symbols())?);
        return Ok(());
    }

    println!(
        "{} ({}, {} symbols)",
        file.display(),
        table.state(),
        table.len()
    );
    for symbol in table.symbols() {
        println!("  {}", format_symbol(symbol));
    }

    Ok(())
}

fn format_symbol(symbol: &Symbol) -> String {
    let mut line = format!("{:<9} {}", symbol.kind, symbol.label());
    if symbol.visibility == Visibility::Private {
        line.push_str(" (private)");
    }
    if let Some(ref source) = symbol.source {
        line.push_str(&format!("  [{}]", source));
    }
    line
}
