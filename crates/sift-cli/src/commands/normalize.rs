//! Normalize command implementation

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use sift_core::{export::export, ExportFormat, NormalizeOptions, Normalizer};
use tracing::info;

use super::{load_config, load_statement};

pub fn cmd_normalize(
    config_path: Option<&Path>,
    file: &Path,
    format: &str,
    output: Option<&Path>,
    keep_category: bool,
) -> Result<()> {
    let format: ExportFormat = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let config = load_config(config_path)?;
    let table = load_statement(file)?;

    let normalizer = Normalizer::for_table(
        &table,
        config.patterns(),
        NormalizeOptions {
            keep_source_category: keep_category,
        },
    );
    let transactions = normalizer.normalize_table(&table);

    let unknown_dates = transactions
        .iter()
        .filter(|tx| tx.date().is_unknown())
        .count();
    if unknown_dates > 0 {
        info!("{} rows have no recognizable date", unknown_dates);
    }

    let rendered = export(&transactions, format).context("Failed to render output")?;

    match output {
        Some(path) => {
            let mut out = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            out.write_all(rendered.as_bytes())?;
            if format == ExportFormat::Json {
                out.write_all(b"\n")?;
            }

            println!(
                "✅ Normalized {} transactions to {}",
                transactions.len(),
                path.display()
            );
        }
        None => match format {
            ExportFormat::Csv => print!("{}", rendered),
            ExportFormat::Json => println!("{}", rendered),
        },
    }

    Ok(())
}
