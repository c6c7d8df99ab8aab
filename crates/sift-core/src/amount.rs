//! Amount and debit/credit reconciliation
//!
//! Exports come in two conventions: one signed amount column ("-1,234.50",
//! "2,000 INR") or separate debit and credit columns. The shape is chosen
//! from the resolved column roles, once per batch. The amount is always
//! returned non-negative; direction lives in `TransactionType`.

use crate::models::{CellValue, ColumnRoles, RawRow, TransactionType};

/// Currency markers stripped from signed amount cells
const CURRENCY_MARKERS: &[&str] = &["INR", "Rs."];

/// Which amount convention a batch uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountShape {
    /// Separate debit and credit columns
    Split,
    /// A single amount column; sign inferred from the text or a type column
    Signed,
    /// No usable amount column
    Missing,
}

impl AmountShape {
    /// Split wins whenever both debit and credit resolved, even if an
    /// amount column also resolved.
    pub fn detect(roles: &ColumnRoles) -> Self {
        if roles.debit().is_some() && roles.credit().is_some() {
            Self::Split
        } else if roles.amount().is_some() {
            Self::Signed
        } else {
            Self::Missing
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Split => "split debit/credit",
            Self::Signed => "signed amount",
            Self::Missing => "none",
        }
    }
}

impl std::fmt::Display for AmountShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Produce `(amount, type)` for one row
pub fn reconcile(roles: &ColumnRoles, row: &RawRow) -> (f64, TransactionType) {
    match AmountShape::detect(roles) {
        AmountShape::Split => {
            let debit = parse_amount(&cell_text(row, roles.debit()), &[]);
            let credit = parse_amount(&cell_text(row, roles.credit()), &[]);
            reconcile_split(debit, credit)
        }
        AmountShape::Signed => {
            let raw = cell_text(row, roles.amount());
            let explicit = roles
                .kind()
                .and_then(|column| row.get(column))
                .and_then(|cell| cell.as_text().parse::<TransactionType>().ok());
            reconcile_signed(&raw, explicit)
        }
        AmountShape::Missing => (0.0, TransactionType::Debit),
    }
}

/// Single amount column. An explicit type wins; otherwise any `-` in the
/// raw cell text marks a debit.
pub fn reconcile_signed(raw: &str, explicit: Option<TransactionType>) -> (f64, TransactionType) {
    let amount = parse_amount(raw, CURRENCY_MARKERS).abs();
    let kind = explicit.unwrap_or(if raw.contains('-') {
        TransactionType::Debit
    } else {
        TransactionType::Credit
    });
    (amount, kind)
}

/// Separate debit/credit values: a positive credit wins, otherwise the debit.
pub fn reconcile_split(debit: f64, credit: f64) -> (f64, TransactionType) {
    if credit > 0.0 {
        (credit.abs(), TransactionType::Credit)
    } else {
        (debit.abs(), TransactionType::Debit)
    }
}

/// Parse an amount cell: thousands separators and the given markers are
/// removed. Anything unparsable or non-finite is 0.
pub fn parse_amount(raw: &str, markers: &[&str]) -> f64 {
    let mut cleaned = raw.replace(',', "");
    for marker in markers {
        cleaned = cleaned.replace(marker, "");
    }
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

fn cell_text(row: &RawRow, column: Option<&str>) -> String {
    column
        .and_then(|c| row.get(c))
        .map(CellValue::as_text)
        .unwrap_or_default()
}
