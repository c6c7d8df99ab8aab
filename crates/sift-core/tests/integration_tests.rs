//! Integration tests for sift-core
//!
//! These tests exercise the full import → normalize → export/summary workflow.

use sift_core::{
    export::{export, to_csv},
    import::{read_csv, read_delimited_text, read_json, read_path},
    normalize::normalize,
    summary::StatementSummary,
    ColumnConfig, ExportFormat, NormalizeOptions, Normalizer, Role, RolePatterns, TransactionDate,
    TransactionFilter, TransactionType,
};

use chrono::NaiveDate;

/// Signed-amount export with a single "Amount" column
fn signed_statement_csv() -> &'static str {
    r#"Txn Date,Value Date,Description,Amount
15/01/2024,16/01/2024,UPI-AMAZON-payment@hdfc-REF123-UPI,"-1,234.50"
16/01/2024,16/01/2024,FT-REF789-AC001-John Doe - Salary,"2,000 INR"
17/01/2024,17/01/2024,Payment @upi:merchant_store123,-99
not a date,,random text with no pattern,abc
"#
}

/// Split debit/credit export, HDFC style headers
fn split_statement_csv() -> &'static str {
    r#"Date,Narration,Chq./Ref.No.,Withdrawal Amt.,Deposit Amt.,Closing Balance
15/02/24,REV-UPI-REF456-FLIPKART@icici-UPI,0000123,,1500,10500.00
16/02/24,UPI/SWIGGY@icici/Food,0000124,500,0,10000.00
17/02/24,NEFT CR-SBIN0001-ACME CORP,0000125,0,0,10000.00
"#
}

fn ymd(y: i32, m: u32, d: u32) -> TransactionDate {
    TransactionDate::Known(NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

// =============================================================================
// Normalization Workflow Tests
// =============================================================================

#[test]
fn test_signed_statement_workflow() {
    let table = read_csv(signed_statement_csv().as_bytes()).expect("Failed to read CSV");
    assert_eq!(table.len(), 4);

    let normalizer =
        Normalizer::for_table(&table, &RolePatterns::default(), NormalizeOptions::default());
    // First match by original order
    assert_eq!(normalizer.roles().date(), Some("Txn Date"));
    assert_eq!(normalizer.roles().narration(), Some("Description"));
    assert_eq!(normalizer.roles().amount(), Some("Amount"));

    let out = normalizer.normalize_table(&table);
    assert_eq!(out.len(), 4);

    assert_eq!(out[0].date(), ymd(2024, 1, 15));
    assert_eq!(out[0].merchant(), "AMAZON");
    assert_eq!(out[0].amount(), 1234.50);
    assert_eq!(out[0].kind(), TransactionType::Debit);

    assert_eq!(out[1].merchant(), "John Doe");
    assert_eq!(out[1].amount(), 2000.0);
    assert_eq!(out[1].kind(), TransactionType::Credit);

    assert_eq!(out[2].merchant(), "merchant_store123");
    assert_eq!(out[2].amount(), 99.0);
    assert_eq!(out[2].kind(), TransactionType::Debit);

    // Every step falls back instead of failing the row
    assert_eq!(out[3].date(), TransactionDate::Unknown);
    assert_eq!(out[3].merchant(), "random text with no pattern");
    assert_eq!(out[3].amount(), 0.0);
    assert_eq!(out[3].kind(), TransactionType::Credit);

    assert!(out.iter().all(|tx| tx.category().is_empty()));
}

#[test]
fn test_split_statement_workflow() {
    let table = read_csv(split_statement_csv().as_bytes()).expect("Failed to read CSV");
    let out = normalize(&table, &RolePatterns::default());
    assert_eq!(out.len(), 3);

    assert_eq!(out[0].date(), ymd(2024, 2, 15));
    assert_eq!(out[0].merchant(), "FLIPKART");
    assert_eq!(out[0].amount(), 1500.0);
    assert_eq!(out[0].kind(), TransactionType::Credit);

    assert_eq!(out[1].merchant(), "SWIGGY");
    assert_eq!(out[1].amount(), 500.0);
    assert_eq!(out[1].kind(), TransactionType::Debit);

    // All-zero split row
    assert_eq!(out[2].amount(), 0.0);
    assert_eq!(out[2].kind(), TransactionType::Debit);
}

#[test]
fn test_semicolon_text_export() {
    let text = "Value Date;Particulars;Amt\n2024-03-01;UPI-BIGBASKET-bb@axis-991-UPI;-2500\n";
    let table = read_delimited_text(text).expect("Failed to read text export");
    let out = normalize(&table, &RolePatterns::default());
    assert_eq!(out[0].date(), ymd(2024, 3, 1));
    assert_eq!(out[0].merchant(), "BIGBASKET");
    assert_eq!(out[0].amount(), 2500.0);
    assert_eq!(out[0].kind(), TransactionType::Debit);
}

#[test]
fn test_json_table_with_numeric_cells() {
    let json = r#"[
        {"Date": "2024-04-10", "Remarks": "UPI-ZOMATO-z@ybl-1-UPI", "Amount": -450.0},
        {"Date": "2024-04-11", "Remarks": "Interest credit", "Amount": 12.5}
    ]"#;
    let table = read_json(json.as_bytes()).expect("Failed to read JSON");
    let out = normalize(&table, &RolePatterns::default());
    assert_eq!(out[0].merchant(), "ZOMATO");
    assert_eq!(out[0].amount(), 450.0);
    assert_eq!(out[0].kind(), TransactionType::Debit);
    assert_eq!(out[1].amount(), 12.5);
    assert_eq!(out[1].kind(), TransactionType::Credit);
}

#[test]
fn test_workbook_statement_uses_typed_dates() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("statement.xlsx");
    let table = read_path(&path).expect("Failed to read workbook");
    let out = normalize(&table, &RolePatterns::default());
    assert_eq!(out.len(), 3);

    assert_eq!(out[0].date(), ymd(2024, 1, 15));
    assert_eq!(out[0].merchant(), "AMAZON");
    assert_eq!(out[0].amount(), 1234.5);
    assert_eq!(out[0].kind(), TransactionType::Debit);

    assert_eq!(out[1].date(), ymd(2024, 1, 16));
    assert_eq!(out[1].merchant(), "FLIPKART");
    assert_eq!(out[1].amount(), 1500.0);
    assert_eq!(out[1].kind(), TransactionType::Credit);

    assert_eq!(out[2].date(), TransactionDate::Unknown);
    assert_eq!(out[2].merchant(), "Cash deposit");
    assert_eq!(out[2].amount(), 500.0);
    assert_eq!(out[2].kind(), TransactionType::Credit);
}

#[test]
fn test_localized_column_keywords() {
    let csv = "Fecha,Concepto,Importe\n2024-05-01,Mercadona,-30\n";
    let table = read_csv(csv.as_bytes()).unwrap();

    let mut patterns = RolePatterns::default();
    patterns.set_keywords(Role::Date, vec!["fecha".into()]);
    patterns.set_keywords(Role::Narration, vec!["concepto".into()]);
    patterns.set_keywords(Role::Amount, vec!["importe".into()]);
    let config = ColumnConfig::with_patterns(patterns);

    let out = normalize(&table, config.patterns());
    assert_eq!(out[0].date(), ymd(2024, 5, 1));
    assert_eq!(out[0].merchant(), "Mercadona");
    assert_eq!(out[0].amount(), 30.0);
    assert_eq!(out[0].kind(), TransactionType::Debit);
}

// =============================================================================
// Output Tests
// =============================================================================

#[test]
fn test_reconciliation_is_idempotent_on_own_output() {
    let mut transactions = Vec::new();
    for csv in [signed_statement_csv(), split_statement_csv()] {
        let table = read_csv(csv.as_bytes()).unwrap();
        transactions.extend(normalize(&table, &RolePatterns::default()));
    }

    let exported = to_csv(&transactions).expect("Failed to export");
    let reimported = read_csv(exported.as_bytes()).expect("Failed to re-read export");
    let again = normalize(&reimported, &RolePatterns::default());

    assert_eq!(again.len(), transactions.len());
    for (first, second) in transactions.iter().zip(&again) {
        assert_eq!(first.amount(), second.amount());
        assert_eq!(first.kind(), second.kind());
        assert_eq!(first.date(), second.date());
    }
}

#[test]
fn test_json_export_columns() {
    let table = read_csv(split_statement_csv().as_bytes()).unwrap();
    let out = normalize(&table, &RolePatterns::default());
    let json = export(&out, ExportFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let first = &value.as_array().unwrap()[0];
    assert_eq!(first["date"], "2024-02-15");
    assert_eq!(first["merchant"], "FLIPKART");
    assert_eq!(first["amount"], 1500.0);
    assert_eq!(first["type"], "Credit");
    assert_eq!(first["category"], "");
}

#[test]
fn test_filter_and_summary() {
    let table = read_csv(signed_statement_csv().as_bytes()).unwrap();
    let out = normalize(&table, &RolePatterns::default());

    let january = TransactionFilter::new()
        .from(NaiveDate::from_ymd_opt(2024, 1, 1))
        .to(NaiveDate::from_ymd_opt(2024, 1, 31))
        .apply(&out);
    // The unknown-date row drops out once a bound is set
    assert_eq!(january.len(), 3);

    let summary = StatementSummary::from_transactions(&january, 2);
    assert_eq!(summary.transaction_count, 3);
    assert_eq!(summary.total_debit, 1333.5);
    assert_eq!(summary.total_credit, 2000.0);
    assert_eq!(summary.net, 666.5);
    assert_eq!(summary.top_merchants.len(), 2);
    assert_eq!(summary.top_merchants[0].merchant, "John Doe");
    assert_eq!(summary.daily_totals.len(), 3);
    assert_eq!(summary.largest[0].amount(), 2000.0);
}
