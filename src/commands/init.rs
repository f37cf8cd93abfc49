use anyhow::{bail, Result};
use std::path::Path;
use tracing::info;

use crate::Config;

pub fn run(root: &Path, force: bool) -> Result<()> {
    if Config::is_initialized(root) && !force {
        bail!(
            "xqoutline is already initialized in {:?} (use --force to overwrite)",
            Config::config_dir(root)
        );
    }

    Config::default().save(root)?;

    info!("Initialized configuration in {:?}", Config::config_dir(root));
    println!(
        "✓ Created {} with default configuration",
        Config::config_dir(root).display()
    );
    println!("\nNext steps:");
    println!("  1. Edit .xqoutline/config.toml to set the resolver base path");
    println!("  2. Run 'xqoutline outline <file>' to list a document's symbols");

    Ok(())
}
