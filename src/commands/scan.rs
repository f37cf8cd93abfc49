//! Scan command: declaration counts for every XQuery file below a directory.

use anyhow::Result;
use std::path::Path;
use tracing::{info, warn};

use crate::config::Config;
use crate::indexer::Walker;
use crate::scanner::{scan_functions, scan_imports, scan_variables};

pub fn run(config: &Config, dir: &Path) -> Result<()> {
    let walker = Walker::new(dir.to_path_buf(), &config.indexer);
    let files = walker.collect_files();
    info!("Scanning {} files below {}", files.len(), dir.display());

    let mut totals = (0usize, 0usize, 0usize);
    for path in &files {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        let functions = scan_functions(&text).len();
        let variables = scan_variables(&text).len();
        let imports = scan_imports(&text).len();
        totals.0 += functions;
        totals.1 += variables;
        totals.2 += imports;

        let shown = path.strip_prefix(dir).unwrap_or(path);
        println!(
            "{:>5} functions {:>5} variables {:>3} imports  {}",
            functions,
            variables,
            imports,
            shown.display()
        );
    }

    println!("----------------------------------------");
    println!(
        "{} files: {} functions, {} variables, {} imports",
        files.len(),
        totals.0,
        totals.1,
        totals.2
    );

    Ok(())
}
