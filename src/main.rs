use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use xqoutline::cli::{Cli, Commands};
use xqoutline::config::Config;
use xqoutline::logging::{init_early_logging, init_logging};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let project_root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    // Held until exit so buffered log lines get flushed
    let (config, _logging_guard) = match Config::load(&project_root) {
        Ok(config) => {
            let guard = init_logging(&config.logging, &project_root)?;
            (config, Some(guard))
        }
        Err(e) => {
            init_early_logging();
            tracing::warn!("Using default configuration: {:#}", e);
            (Config::default(), None)
        }
    };

    tracing::debug!("Project root: {}", project_root.display());

    match cli.command {
        Commands::Init { force } => {
            xqoutline::commands::init::run(&project_root, force)?;
        }
        Commands::Outline {
            file,
            no_imports,
            json,
        } => {
            xqoutline::commands::outline::run(&config, &file, no_imports, json).await?;
        }
        Commands::Complete {
            file,
            prefix,
            row,
            json,
        } => {
            xqoutline::commands::complete::run(&config, &file, &prefix, row, json).await?;
        }
        Commands::Locate { file, name } => {
            xqoutline::commands::locate::run(&file, &name)?;
        }
        Commands::Scan { dir } => {
            xqoutline::commands::scan::run(&config, &dir)?;
        }
        Commands::Watch { file, debounce_ms } => {
            let debounce_ms = debounce_ms.unwrap_or(config.watch.debounce_ms);
            xqoutline::commands::watch::run(&config, &file, debounce_ms).await?;
        }
    }

    Ok(())
}
