//! Complete command: completion candidates for a prefix.

use anyhow::Result;
use std::path::Path;

use super::{index_text, read_document};
use crate::completion::completion_items;
use crate::config::Config;

pub async fn run(
    config: &Config,
    file: &Path,
    prefix: &str,
    row: Option<usize>,
    json: bool,
) -> Result<()> {
    let (text, dir) = read_document(file)?;
    let table = index_text(config, &text, &dir, true).await;

    // Without a cursor row only the table is consulted
    let items = match row {
        Some(row) => completion_items(table.symbols(), &text, row, prefix),
        None => completion_items(table.symbols(), "", 0, prefix),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if items.is_empty() {
        println!("No completions for '{}'", prefix);
        return Ok(());
    }
    for item in &items {
        match item.source {
            Some(ref source) => println!("{:<9} {}  [{}]", item.kind, item.label, source),
            None => println!("{:<9} {}", item.kind, item.label),
        }
    }

    Ok(())
}
