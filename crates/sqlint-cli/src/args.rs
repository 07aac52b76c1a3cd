//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "sqlint")]
#[command(author, version, about = "SQL Linter - check SQL files for syntax and style issues")]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Lint SQL files
    Check {
        /// SQL files to lint (supports glob patterns)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Path to configuration file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// SQL dialect (overrides the configuration file)
        #[arg(short, long)]
        dialect: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "stylish", value_enum)]
        format: OutputFormat,
    },

    /// Create a default configuration file in the current directory
    Init,

    /// List available rules
    Rules,

    /// Parse SQL and print it back (for debugging)
    Parse {
        /// SQL file to parse
        file: PathBuf,

        /// SQL dialect
        #[arg(short, long, default_value = "mysql")]
        dialect: String,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable output grouped by file
    #[default]
    Stylish,
    /// JSON array of lint results
    Json,
}
