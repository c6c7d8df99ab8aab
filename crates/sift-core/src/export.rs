//! Export of normalized transactions (CSV and JSON)

use crate::error::{Error, Result};
use crate::models::NormalizedTransaction;

/// Canonical output column order
pub const OUTPUT_COLUMNS: [&str; 5] = ["date", "merchant", "amount", "type", "category"];

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown export format: {} (use csv or json)", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Render transactions in the requested format
pub fn export(transactions: &[NormalizedTransaction], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Csv => to_csv(transactions),
        ExportFormat::Json => to_json(transactions),
    }
}

/// CSV with header `date,merchant,amount,type,category`, two-decimal amounts
pub fn to_csv(transactions: &[NormalizedTransaction]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(OUTPUT_COLUMNS)?;

    for tx in transactions {
        wtr.write_record([
            tx.date().to_string(),
            tx.merchant().to_string(),
            format!("{:.2}", tx.amount()),
            tx.kind().to_string(),
            tx.category().to_string(),
        ])?;
    }

    let bytes = wtr.into_inner().map_err(|e| Error::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| Error::InvalidData(format!("Non-UTF-8 output: {}", e)))
}

/// Pretty-printed JSON array of transaction objects
pub fn to_json(transactions: &[NormalizedTransaction]) -> Result<String> {
    Ok(serde_json::to_string_pretty(transactions)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TransactionDate, TransactionType};
    use chrono::NaiveDate;

    fn sample() -> Vec<NormalizedTransaction> {
        vec![
            NormalizedTransaction::new(
                TransactionDate::Known(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
                "AMAZON, INC",
                1234.5,
                TransactionType::Debit,
                "",
            ),
            NormalizedTransaction::new(
                TransactionDate::Unknown,
                "John Doe",
                2000.0,
                TransactionType::Credit,
                "Salary",
            ),
        ]
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("xlsx".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_to_csv() {
        let csv = to_csv(&sample()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "date,merchant,amount,type,category");
        assert_eq!(lines[1], "2024-01-15,\"AMAZON, INC\",1234.50,Debit,");
        assert_eq!(lines[2], "unknown,John Doe,2000.00,Credit,Salary");
    }

    #[test]
    fn test_to_csv_empty() {
        let csv = to_csv(&[]).unwrap();
        assert_eq!(csv, "date,merchant,amount,type,category\n");
    }

    #[test]
    fn test_to_json() {
        let json = to_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["date"], "2024-01-15");
        assert_eq!(rows[0]["type"], "Debit");
        assert_eq!(rows[1]["date"], "unknown");
        assert_eq!(rows[1]["category"], "Salary");
        let keys: Vec<&str> = rows[0]
            .as_object()
            .unwrap()
            .keys()
            .map(|k| k.as_str())
            .collect();
        assert_eq!(keys, OUTPUT_COLUMNS);
    }
}
