//! CLI argument definitions using clap
//!
//! This module contains the clap structs for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Sift - Normalize bank and UPI statement exports
#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "Bank/UPI statement normalizer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Column keyword config (TOML)
    ///
    /// Defaults to ~/.local/share/sift/config/columns.toml when present,
    /// otherwise the built-in keywords.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize a statement into date, merchant, amount, type, category
    Normalize {
        /// Statement file (.csv, .tsv, .txt or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Output format: csv, json
        #[arg(long, default_value = "csv")]
        format: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Seed categories from a "Category" column in the source
        #[arg(long)]
        keep_category: bool,
    },

    /// Summarize a statement: totals, top merchants, categories
    Summary {
        /// Statement file (.csv, .tsv, .txt or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Start date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        to: Option<String>,

        /// Only transactions matching this text
        #[arg(short, long)]
        search: Option<String>,

        /// Number of top merchants to show
        #[arg(long, default_value = "15")]
        top: usize,
    },

    /// Show which column was picked for each role
    Columns {
        /// Statement file (.csv, .tsv, .txt or .json)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Extract the merchant from a narration string
    Merchant {
        /// Narration text, e.g. "UPI-AMAZON-payment@hdfc-REF123-UPI"
        narration: String,
    },
}
