use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xqoutline")]
#[command(author, version, about = "XQuery symbol outline for completion and navigation")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default configuration to .xqoutline/config.toml
    Init {
        /// Overwrite an existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Print the sorted symbol table of a document
    Outline {
        /// XQuery file to index
        file: PathBuf,

        /// Skip resolving imported modules
        #[arg(long)]
        no_imports: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List completions for a prefix
    Complete {
        /// XQuery file to index
        file: PathBuf,

        /// Name prefix; start with `$` for variables
        prefix: String,

        /// Cursor row (0-based) for in-scope `let`/`for` bindings
        #[arg(short, long)]
        row: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find the line declaring a function or variable
    Locate {
        /// XQuery file to search
        file: PathBuf,

        /// Function or variable name (variables with `$`)
        name: String,
    },

    /// Count declarations in every XQuery file below a directory
    Scan {
        /// Directory to scan
        #[arg(default_value = ".")]
        dir: PathBuf,
    },

    /// Reindex a document whenever it changes on disk
    Watch {
        /// XQuery file to watch
        file: PathBuf,

        /// Debounce delay in milliseconds (default from config)
        #[arg(short, long)]
        debounce_ms: Option<u64>,
    },
}
