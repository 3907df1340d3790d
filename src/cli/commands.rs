use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::cli::output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "karte2json",
    version,
    about = "Convert clinical chart text (SOAP progress notes) into structured JSON",
    after_help = "Input is read from PATH, or from stdin when PATH is omitted or '-'. \
                  Settings are read from ./karte2json.toml unless --config is given."
)]
pub struct Cli {
    /// Config file (default: ./karte2json.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert chart text into one JSON record per encounter.
    ///
    /// Records are grouped by date, department and time, with SOAP sections
    /// folded into named fields, and sorted by timestamp.
    Convert {
        /// Chart text file ('-' or omitted for stdin)
        path: Option<PathBuf>,
        /// Output format (default from config: pretty)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
        /// Write JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the flat section records recognized in chart text, before grouping
    Flat {
        /// Chart text file ('-' or omitted for stdin)
        path: Option<PathBuf>,
        /// Output format (default from config: pretty)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Convert every chart file under a directory, writing JSON next to each.
    ///
    /// Respects .gitignore. Files are converted in parallel.
    Batch {
        /// Directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Report what would be converted without writing files
        #[arg(long)]
        dry_run: bool,
    },

    /// Count lines, characters and recognized records in chart text
    Stats {
        /// Chart text file ('-' or omitted for stdin)
        path: Option<PathBuf>,
    },

    /// Write a default karte2json.toml to the current directory
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}
