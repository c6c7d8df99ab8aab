//! Sift Core Library
//!
//! Statement normalization for bank and UPI transaction exports:
//! - Column role detection over unlabeled, heterogeneous headers
//! - Lenient statement date parsing
//! - Merchant extraction from narration text via an ordered rule cascade
//! - Amount / debit-credit reconciliation
//! - Thin table import and export wrappers, filtering and summaries

pub mod amount;
pub mod columns;
pub mod config;
pub mod dates;
pub mod error;
pub mod export;
pub mod filter;
pub mod import;
pub mod merchant;
pub mod models;
pub mod normalize;
pub mod summary;

pub use columns::{classify_columns, RolePatterns};
pub use config::ColumnConfig;
pub use error::{Error, Result};
pub use export::ExportFormat;
pub use filter::TransactionFilter;
pub use merchant::{extract_merchant, MerchantExtractor};
pub use models::{
    CellValue, ColumnRoles, NormalizedTransaction, RawRow, RawTable, Role, TransactionDate,
    TransactionType,
};
pub use normalize::{NormalizeOptions, Normalizer};
pub use summary::StatementSummary;
