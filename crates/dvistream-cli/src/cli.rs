use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Inspect the command structure of DVI, pTeX, and XDV files.
#[derive(Debug, Parser)]
#[command(name = "dvistream", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show document summary: version, pages, fonts
    Info {
        /// Path to the DVI file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List every command in the document in stream order
    Commands {
        /// Path to the DVI file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

/// Output format for subcommands.
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON
    Json,
}
