//! Domain models for sift

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single cell of an uploaded statement, as handed over by the ingestion layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Null,
}

impl CellValue {
    /// Render the cell as text. `Null` renders as an empty string.
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Date(d) => d.format("%Y-%m-%d").to_string(),
            Self::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            Self::Null => String::new(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

/// One unvalidated input row: ordered (column name, cell) pairs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: Vec<(String, CellValue)>,
}

impl RawRow {
    pub fn new(cells: Vec<(String, CellValue)>) -> Self {
        Self { cells }
    }

    /// Look up a cell by exact column name
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// All cell texts joined by single spaces, in column order
    pub fn joined_text(&self) -> String {
        self.cells
            .iter()
            .map(|(_, value)| value.as_text())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A generic table of rows with named columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row of positional values. Short rows are padded with `Null`,
    /// values beyond the known columns are dropped.
    pub fn push_values(&mut self, values: Vec<CellValue>) {
        let mut values = values.into_iter();
        let cells = self
            .columns
            .iter()
            .map(|name| (name.clone(), values.next().unwrap_or(CellValue::Null)))
            .collect();
        self.rows.push(RawRow::new(cells));
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Semantic meaning assigned to an input column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Date,
    Narration,
    Amount,
    Debit,
    Credit,
    /// Explicit debit/credit indicator column (e.g. "Dr/Cr", "Type")
    Type,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Narration => "narration",
            Self::Amount => "amount",
            Self::Debit => "debit",
            Self::Credit => "credit",
            Self::Type => "type",
        }
    }

    pub fn all() -> &'static [Role] {
        &[
            Self::Date,
            Self::Narration,
            Self::Amount,
            Self::Debit,
            Self::Credit,
            Self::Type,
        ]
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "narration" => Ok(Self::Narration),
            "amount" => Ok(Self::Amount),
            "debit" => Ok(Self::Debit),
            "credit" => Ok(Self::Credit),
            "type" => Ok(Self::Type),
            _ => Err(format!("Unknown column role: {}", s)),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which column (if any) serves each role for the current batch.
///
/// Built once per batch and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnRoles {
    date: Option<String>,
    narration: Option<String>,
    amount: Option<String>,
    debit: Option<String>,
    credit: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl ColumnRoles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy with `role` assigned to `column`
    pub fn with(mut self, role: Role, column: impl Into<String>) -> Self {
        let column = Some(column.into());
        match role {
            Role::Date => self.date = column,
            Role::Narration => self.narration = column,
            Role::Amount => self.amount = column,
            Role::Debit => self.debit = column,
            Role::Credit => self.credit = column,
            Role::Type => self.kind = column,
        }
        self
    }

    pub fn get(&self, role: Role) -> Option<&str> {
        match role {
            Role::Date => self.date.as_deref(),
            Role::Narration => self.narration.as_deref(),
            Role::Amount => self.amount.as_deref(),
            Role::Debit => self.debit.as_deref(),
            Role::Credit => self.credit.as_deref(),
            Role::Type => self.kind.as_deref(),
        }
    }

    pub fn date(&self) -> Option<&str> {
        self.get(Role::Date)
    }

    pub fn narration(&self) -> Option<&str> {
        self.get(Role::Narration)
    }

    pub fn amount(&self) -> Option<&str> {
        self.get(Role::Amount)
    }

    pub fn debit(&self) -> Option<&str> {
        self.get(Role::Debit)
    }

    pub fn credit(&self) -> Option<&str> {
        self.get(Role::Credit)
    }

    pub fn kind(&self) -> Option<&str> {
        self.get(Role::Type)
    }

    /// True when no role resolved at all
    pub fn is_empty(&self) -> bool {
        Role::all().iter().all(|role| self.get(*role).is_none())
    }
}

/// Direction of money movement. Sign lives here, never in the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TransactionType {
    #[default]
    Debit,
    Credit,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "Debit",
            Self::Credit => "Credit",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debit" | "dr" | "d" | "withdrawal" => Ok(Self::Debit),
            "credit" | "cr" | "c" | "deposit" => Ok(Self::Credit),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A calendar date, or the "unknown" sentinel when nothing could be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum TransactionDate {
    Known(NaiveDate),
    #[default]
    Unknown,
}

impl TransactionDate {
    pub fn known(&self) -> Option<NaiveDate> {
        match self {
            Self::Known(d) => Some(*d),
            Self::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl From<Option<NaiveDate>> for TransactionDate {
    fn from(date: Option<NaiveDate>) -> Self {
        date.map(Self::Known).unwrap_or(Self::Unknown)
    }
}

impl std::fmt::Display for TransactionDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Known(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::str::FromStr for TransactionDate {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("unknown") {
            return Ok(Self::Unknown);
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self::Known)
            .map_err(|_| format!("Invalid transaction date: {}", s))
    }
}

impl Serialize for TransactionDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TransactionDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The canonical output unit: one per input row.
///
/// Everything except `category` is fixed at creation time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedTransaction {
    date: TransactionDate,
    merchant: String,
    amount: f64,
    #[serde(rename = "type")]
    kind: TransactionType,
    category: String,
}

impl NormalizedTransaction {
    /// Build a record. Negative or non-finite amounts are folded into
    /// a non-negative value so `amount >= 0` always holds.
    pub fn new(
        date: TransactionDate,
        merchant: impl Into<String>,
        amount: f64,
        kind: TransactionType,
        category: impl Into<String>,
    ) -> Self {
        let amount = if amount.is_finite() { amount.abs() } else { 0.0 };
        Self {
            date,
            merchant: merchant.into(),
            amount,
            kind,
            category: category.into(),
        }
    }

    pub fn date(&self) -> TransactionDate {
        self.date
    }

    pub fn merchant(&self) -> &str {
        &self.merchant
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Overwrite the user-editable category
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }
}
