//! Summary report command implementation

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sift_core::{normalize::normalize, StatementSummary, TransactionFilter};

use super::{load_config, load_statement, truncate};

/// Parse an optional YYYY-MM-DD flag value
pub fn parse_date_flag(value: Option<&str>, flag: &str) -> Result<Option<NaiveDate>> {
    value
        .map(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d"))
        .transpose()
        .with_context(|| format!("Invalid {} date format (use YYYY-MM-DD)", flag))
}

pub fn cmd_summary(
    config_path: Option<&Path>,
    file: &Path,
    from: Option<&str>,
    to: Option<&str>,
    search: Option<&str>,
    top: usize,
) -> Result<()> {
    let from = parse_date_flag(from, "--from")?;
    let to = parse_date_flag(to, "--to")?;
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            anyhow::bail!("--from ({}) is after --to ({})", from, to);
        }
    }

    let config = load_config(config_path)?;
    let table = load_statement(file)?;
    let transactions = normalize(&table, config.patterns());

    let filtered = TransactionFilter::new()
        .from(from)
        .to(to)
        .search(search)
        .apply(&transactions);

    let summary = StatementSummary::from_transactions(&filtered, top);

    println!();
    println!("📊 Statement Summary");
    println!("   File: {}", file.display());
    if from.is_some() || to.is_some() {
        println!(
            "   Period: {} to {}",
            from.map(|d| d.to_string()).unwrap_or_else(|| "start".into()),
            to.map(|d| d.to_string()).unwrap_or_else(|| "end".into())
        );
    }
    if let Some(search) = search {
        println!("   Search: \"{}\"", search);
    }
    println!("   ─────────────────────────────────────────────────────────────");

    if summary.transaction_count == 0 {
        println!("   No transactions found.");
        return Ok(());
    }

    println!(
        "   Transactions: {} (of {})",
        summary.transaction_count,
        transactions.len()
    );
    println!("   Debits:  {:>12.2}", summary.total_debit);
    println!("   Credits: {:>12.2}", summary.total_credit);
    println!("   Net:     {:>12.2}", summary.net);

    println!();
    println!("🏪 Top Merchants");
    println!("   {:30} │ {:>12} │ {:>5}", "Merchant", "Amount", "Count");
    println!("   ───────────────────────────────┼──────────────┼───────");
    for merchant in &summary.top_merchants {
        let name = if merchant.merchant.is_empty() {
            "(none)"
        } else {
            merchant.merchant.as_str()
        };
        println!(
            "   {:30} │ {:>12.2} │ {:>5}",
            truncate(name, 30),
            merchant.amount,
            merchant.transaction_count
        );
    }

    println!();
    println!("🏷️  Categories");
    for category in &summary.by_category {
        let name = if category.category.is_empty() {
            "(uncategorized)"
        } else {
            category.category.as_str()
        };
        println!(
            "   {:30} │ {:>12.2} │ {:>5}",
            truncate(name, 30),
            category.amount,
            category.transaction_count
        );
    }

    println!();
    println!("💸 Largest Transactions");
    for tx in &summary.largest {
        println!(
            "   {:10}  {:30} {:>12.2} {}",
            tx.date().to_string(),
            truncate(tx.merchant(), 30),
            tx.amount(),
            tx.kind()
        );
    }

    if !summary.daily_totals.is_empty() {
        let first = &summary.daily_totals[0];
        let last = &summary.daily_totals[summary.daily_totals.len() - 1];
        println!();
        println!(
            "   {} days with activity, {} to {}",
            summary.daily_totals.len(),
            first.date,
            last.date
        );
    }

    Ok(())
}
