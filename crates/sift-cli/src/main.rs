//! Sift CLI - Bank/UPI statement normalizer
//!
//! Usage:
//!   sift normalize --file stmt.csv          Normalized CSV to stdout
//!   sift summary --file stmt.csv --top 10   Totals and top merchants
//!   sift columns --file stmt.csv            Resolved column roles
//!   sift merchant "UPI-AMAZON-x@hdfc-UPI"   Merchant for one narration

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so normalized output on stdout stays clean
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Normalize {
            file,
            format,
            output,
            keep_category,
        } => commands::cmd_normalize(config, &file, &format, output.as_deref(), keep_category),
        Commands::Summary {
            file,
            from,
            to,
            search,
            top,
        } => commands::cmd_summary(
            config,
            &file,
            from.as_deref(),
            to.as_deref(),
            search.as_deref(),
            top,
        ),
        Commands::Columns { file } => commands::cmd_columns(config, &file),
        Commands::Merchant { narration } => commands::cmd_merchant(&narration),
    }
}
