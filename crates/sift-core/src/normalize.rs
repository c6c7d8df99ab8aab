//! Statement normalization pipeline
//!
//! Column roles are resolved once per table, then every row is mapped
//! independently to a `NormalizedTransaction`:
//! date → merchant → amount/type. Row order is preserved and no row is
//! ever rejected; each step has its own fallback.

use tracing::debug;

use crate::amount::{reconcile, AmountShape};
use crate::columns::{classify_columns, RolePatterns};
use crate::dates::{normalize_date, parse_date_text};
use crate::merchant::MerchantExtractor;
use crate::models::{CellValue, ColumnRoles, NormalizedTransaction, RawRow, RawTable};

/// Knobs for a normalization pass
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeOptions {
    /// Seed `category` from a source column literally named "category".
    /// Off by default: categories start empty.
    pub keep_source_category: bool,
}

/// Per-table normalizer. Holds the resolved roles; read-only once built.
#[derive(Debug, Clone)]
pub struct Normalizer {
    roles: ColumnRoles,
    merchant_column: Option<String>,
    category_column: Option<String>,
}

impl Normalizer {
    /// Resolve roles (and fallbacks) for a table
    pub fn for_table(table: &RawTable, patterns: &RolePatterns, options: NormalizeOptions) -> Self {
        let roles = classify_columns(&table.columns, patterns);

        let merchant_column = match roles.narration() {
            Some(column) => Some(column.to_string()),
            None => {
                let fallback = first_text_column(table);
                debug!(column = ?fallback, "No narration column, using first text column");
                fallback
            }
        };

        let category_column = if options.keep_source_category {
            table
                .columns
                .iter()
                .find(|c| c.trim().eq_ignore_ascii_case("category"))
                .cloned()
        } else {
            None
        };

        Self {
            roles,
            merchant_column,
            category_column,
        }
    }

    pub fn roles(&self) -> &ColumnRoles {
        &self.roles
    }

    /// Column the merchant is extracted from (narration or its fallback)
    pub fn merchant_column(&self) -> Option<&str> {
        self.merchant_column.as_deref()
    }

    pub fn amount_shape(&self) -> AmountShape {
        AmountShape::detect(&self.roles)
    }

    /// Normalize a single row
    pub fn normalize_row(&self, row: &RawRow) -> NormalizedTransaction {
        let date = match self.roles.date() {
            Some(column) => normalize_date(row.get(column)),
            None => parse_date_text(&row.joined_text()),
        };

        let narration = self
            .merchant_column
            .as_deref()
            .and_then(|column| row.get(column))
            .and_then(|cell| match cell {
                CellValue::Null => None,
                other => Some(other.as_text()),
            });
        let merchant = MerchantExtractor::shared().extract(narration.as_deref());

        let (amount, kind) = reconcile(&self.roles, row);

        let category = self
            .category_column
            .as_deref()
            .and_then(|column| row.get(column))
            .map(|cell| cell.as_text().trim().to_string())
            .unwrap_or_default();

        NormalizedTransaction::new(date, merchant, amount, kind, category)
    }

    /// Normalize every row, preserving order
    pub fn normalize_table(&self, table: &RawTable) -> Vec<NormalizedTransaction> {
        let transactions: Vec<NormalizedTransaction> =
            table.rows.iter().map(|row| self.normalize_row(row)).collect();

        let unknown_dates = transactions.iter().filter(|t| t.date().is_unknown()).count();
        let zero_amounts = transactions.iter().filter(|t| t.amount() == 0.0).count();
        debug!(
            rows = transactions.len(),
            unknown_dates,
            zero_amounts,
            shape = %self.amount_shape(),
            "Normalized statement"
        );

        transactions
    }
}

/// Resolve roles and normalize a whole table in one call
pub fn normalize(table: &RawTable, patterns: &RolePatterns) -> Vec<NormalizedTransaction> {
    Normalizer::for_table(table, patterns, NormalizeOptions::default()).normalize_table(table)
}

/// First column (original order) holding any non-blank, non-numeric text
fn first_text_column(table: &RawTable) -> Option<String> {
    table
        .columns
        .iter()
        .find(|column| {
            table.rows.iter().any(|row| match row.get(column) {
                Some(CellValue::Text(s)) => {
                    let s = s.trim();
                    !s.is_empty() && s.replace(',', "").parse::<f64>().is_err()
                }
                _ => false,
            })
        })
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TransactionDate, TransactionType};
    use chrono::NaiveDate;

    fn table(columns: &[&str], rows: &[&[&str]]) -> RawTable {
        let mut t = RawTable::new(columns.iter().map(|c| c.to_string()).collect());
        for r in rows {
            t.push_values(
                r.iter()
                    .map(|v| {
                        if v.is_empty() {
                            CellValue::Null
                        } else {
                            CellValue::from(*v)
                        }
                    })
                    .collect(),
            );
        }
        t
    }

    fn ymd(y: i32, m: u32, d: u32) -> TransactionDate {
        TransactionDate::Known(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_signed_amount_statement() {
        let t = table(
            &["Txn Date", "Description", "Amount"],
            &[
                &["01/15/2024", "UPI-AMAZON-payment@hdfc-REF123-UPI", "-1,234.50"],
                &["01/16/2024", "FT-REF789-AC001-John Doe - Salary", "2,000 INR"],
            ],
        );
        let out = normalize(&t, &RolePatterns::default());

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].date(), ymd(2024, 1, 15));
        assert_eq!(out[0].merchant(), "AMAZON");
        assert_eq!(out[0].amount(), 1234.50);
        assert_eq!(out[0].kind(), TransactionType::Debit);
        assert_eq!(out[0].category(), "");

        assert_eq!(out[1].merchant(), "John Doe");
        assert_eq!(out[1].amount(), 2000.0);
        assert_eq!(out[1].kind(), TransactionType::Credit);
    }

    #[test]
    fn test_split_statement() {
        let t = table(
            &["Date", "Narration", "Withdrawal Amt.", "Deposit Amt."],
            &[
                &["15/01/24", "REV-UPI-REF456-FLIPKART@icici-UPI", "", "1,500.00"],
                &["16/01/24", "Payment @upi:merchant_store123", "500", "0"],
            ],
        );
        let out = normalize(&t, &RolePatterns::default());

        assert_eq!(out[0].date(), ymd(2024, 1, 15));
        assert_eq!(out[0].merchant(), "FLIPKART");
        assert_eq!(out[0].amount(), 1500.0);
        assert_eq!(out[0].kind(), TransactionType::Credit);

        assert_eq!(out[1].merchant(), "merchant_store123");
        assert_eq!(out[1].amount(), 500.0);
        assert_eq!(out[1].kind(), TransactionType::Debit);
    }

    #[test]
    fn test_no_recognizable_columns() {
        let t = table(&["col1", "col2"], &[&["2024-03-05", "Coffee shop"]]);
        let n = Normalizer::for_table(&t, &RolePatterns::default(), NormalizeOptions::default());
        assert!(n.roles().is_empty());
        // First text column is col1 (dates are text)
        assert_eq!(n.merchant_column(), Some("col1"));

        let out = n.normalize_table(&t);
        // Date comes from the joined row text
        assert_eq!(out[0].date(), ymd(2024, 3, 5));
        assert_eq!(out[0].amount(), 0.0);
        assert_eq!(out[0].kind(), TransactionType::Debit);
    }

    #[test]
    fn test_numeric_only_table_has_empty_merchant() {
        let t = table(&["a", "b"], &[&["1", "2,000"], &["3", ""]]);
        let n = Normalizer::for_table(&t, &RolePatterns::default(), NormalizeOptions::default());
        assert_eq!(n.merchant_column(), None);
        let out = n.normalize_table(&t);
        assert!(out.iter().all(|tx| tx.merchant().is_empty()));
        assert!(out.iter().all(|tx| tx.date().is_unknown()));
    }

    #[test]
    fn test_missing_narration_cell_is_empty_merchant() {
        let t = table(&["Date", "Remarks", "Amount"], &[&["2024-01-01", "", "10"]]);
        let out = normalize(&t, &RolePatterns::default());
        assert_eq!(out[0].merchant(), "");
    }

    #[test]
    fn test_unparsable_date_is_unknown() {
        let t = table(&["Value Date", "Details", "Amt"], &[&["N/A", "Tea stall", "20"]]);
        let out = normalize(&t, &RolePatterns::default());
        assert_eq!(out[0].date(), TransactionDate::Unknown);
        assert_eq!(out[0].merchant(), "Tea stall");
    }

    #[test]
    fn test_keep_source_category() {
        let t = table(
            &["Date", "Description", "Amount", "Category"],
            &[&["2024-01-01", "Groceries store", "-40", " Food "]],
        );

        let out = normalize(&t, &RolePatterns::default());
        assert_eq!(out[0].category(), "");

        let opts = NormalizeOptions {
            keep_source_category: true,
        };
        let out = Normalizer::for_table(&t, &RolePatterns::default(), opts).normalize_table(&t);
        assert_eq!(out[0].category(), "Food");
    }

    #[test]
    fn test_row_order_preserved_and_amounts_non_negative() {
        let rows: Vec<Vec<String>> = (0..20)
            .map(|i| vec![format!("Shop number {}", i), format!("-{}.5", i)])
            .collect();
        let mut t = RawTable::new(vec!["Description".into(), "Amount".into()]);
        for r in &rows {
            t.push_values(r.iter().map(|v| CellValue::from(v.as_str())).collect());
        }
        let out = normalize(&t, &RolePatterns::default());
        for (i, tx) in out.iter().enumerate() {
            assert_eq!(tx.merchant(), format!("Shop number {}", i));
            assert!(tx.amount() >= 0.0);
        }
    }
}
