//! Statement summary
//!
//! Aggregates over a normalized batch: totals, top merchants, category
//! and per-day sums, and the largest transactions.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{NormalizedTransaction, TransactionType};

/// Default number of merchants in `top_merchants`
pub const DEFAULT_TOP_MERCHANTS: usize = 15;

/// Number of transactions kept in `largest`
pub const LARGEST_COUNT: usize = 6;

/// Summed amount per merchant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MerchantTotal {
    pub merchant: String,
    pub amount: f64,
    pub transaction_count: usize,
}

/// Summed amount per category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
    pub transaction_count: usize,
}

/// Summed amount per known date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub amount: f64,
}

/// Summary of a normalized statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementSummary {
    pub total_debit: f64,
    pub total_credit: f64,
    pub net: f64,
    pub transaction_count: usize,
    pub top_merchants: Vec<MerchantTotal>,
    pub by_category: Vec<CategoryTotal>,
    pub daily_totals: Vec<DailyTotal>,
    pub largest: Vec<NormalizedTransaction>,
}

impl StatementSummary {
    pub fn from_transactions(transactions: &[NormalizedTransaction], top_n: usize) -> Self {
        let mut total_debit = 0.0;
        let mut total_credit = 0.0;
        let mut merchants: HashMap<&str, (f64, usize)> = HashMap::new();
        let mut categories: HashMap<&str, (f64, usize)> = HashMap::new();
        let mut daily: HashMap<NaiveDate, f64> = HashMap::new();

        for tx in transactions {
            match tx.kind() {
                TransactionType::Debit => total_debit += tx.amount(),
                TransactionType::Credit => total_credit += tx.amount(),
            }

            let entry = merchants.entry(tx.merchant()).or_default();
            entry.0 += tx.amount();
            entry.1 += 1;

            let entry = categories.entry(tx.category()).or_default();
            entry.0 += tx.amount();
            entry.1 += 1;

            if let Some(date) = tx.date().known() {
                *daily.entry(date).or_default() += tx.amount();
            }
        }

        let mut top_merchants: Vec<MerchantTotal> = merchants
            .into_iter()
            .map(|(merchant, (amount, transaction_count))| MerchantTotal {
                merchant: merchant.to_string(),
                amount,
                transaction_count,
            })
            .collect();
        top_merchants.sort_by(|a, b| {
            b.amount
                .total_cmp(&a.amount)
                .then_with(|| a.merchant.cmp(&b.merchant))
        });
        top_merchants.truncate(top_n);

        let mut by_category: Vec<CategoryTotal> = categories
            .into_iter()
            .map(|(category, (amount, transaction_count))| CategoryTotal {
                category: category.to_string(),
                amount,
                transaction_count,
            })
            .collect();
        by_category.sort_by(|a, b| {
            b.amount
                .total_cmp(&a.amount)
                .then_with(|| a.category.cmp(&b.category))
        });

        let mut daily_totals: Vec<DailyTotal> = daily
            .into_iter()
            .map(|(date, amount)| DailyTotal { date, amount })
            .collect();
        daily_totals.sort_by_key(|d| d.date);

        // sort_by is stable, so equal amounts keep input order
        let mut largest = transactions.to_vec();
        largest.sort_by(|a, b| b.amount().total_cmp(&a.amount()));
        largest.truncate(LARGEST_COUNT);

        Self {
            total_debit,
            total_credit,
            net: total_credit - total_debit,
            transaction_count: transactions.len(),
            top_merchants,
            by_category,
            daily_totals,
            largest,
        }
    }
}
