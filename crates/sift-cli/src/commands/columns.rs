//! Column role inspection

use std::path::Path;

use anyhow::Result;
use sift_core::{NormalizeOptions, Normalizer, Role};

use super::{load_config, load_statement, truncate};

pub fn cmd_columns(config_path: Option<&Path>, file: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let table = load_statement(file)?;
    let normalizer = Normalizer::for_table(&table, config.patterns(), NormalizeOptions::default());

    println!();
    println!("🔎 Column Roles: {}", file.display());
    match config.config_path().filter(|p| p.exists()) {
        Some(path) => println!("   Keywords: {}", path.display()),
        None => println!("   Keywords: built-in"),
    }
    println!("   ─────────────────────────────────────────────");

    for role in Role::all() {
        let column = normalizer.roles().get(*role);
        println!(
            "   {:10} │ {}",
            role.as_str(),
            column.map(|c| truncate(c, 30)).unwrap_or_else(|| "-".into())
        );
    }

    println!();
    match normalizer.merchant_column() {
        Some(column) if normalizer.roles().narration().is_none() => {
            println!("   Merchant source: {} (first text column)", column)
        }
        Some(column) => println!("   Merchant source: {}", column),
        None => println!("   Merchant source: none"),
    }
    println!("   Amount shape:    {}", normalizer.amount_shape());
    println!("   Rows:            {}", table.len());

    Ok(())
}
