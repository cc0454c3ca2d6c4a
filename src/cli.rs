use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "cronograma")]
#[command(about = "Schedule progress rollups from MS-Project style CSV exports", long_about = None)]
pub struct Cli {
    /// Snapshot file (overrides configuration)
    #[arg(long, global = true, env = "CRONOGRAMA_SNAPSHOT")]
    pub snapshot: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Auto,
    Named,
    Fixed,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Import a schedule export and print its summary
    Import {
        file: PathBuf,
        /// Date treated as "today" (YYYY-MM-DD or DD/MM/YYYY); defaults to the local date
        #[arg(long)]
        reference_date: Option<String>,
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
        /// Field delimiter; auto-detected when omitted
        #[arg(long)]
        delimiter: Option<String>,
        /// Store the result as the current snapshot
        #[arg(long)]
        save: bool,
        /// Print the full result as JSON instead of a report
        #[arg(long)]
        json: bool,
    },
    /// Print the stored snapshot
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Print metadata about the stored snapshot
    Info,
    /// Delete the stored snapshot
    Clear,
    /// Print chart series for a schedule export
    Evolution {
        file: PathBuf,
        #[arg(long)]
        reference_date: Option<String>,
    },
    /// Print configuration values
    PrintConfig,
}
