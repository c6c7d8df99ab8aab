//! Table readers for uploaded statements
//!
//! These only turn bytes into a `RawTable` (named columns, string/number
//! cells). No column meaning is assumed here; that is the classifier's job.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{CellValue, RawTable};

/// Delimiters tried when sniffing free-form text exports
const CANDIDATE_DELIMITERS: &[u8] = b",;|\t";

/// Read a comma-separated statement with a header row
pub fn read_csv<R: Read>(reader: R) -> Result<RawTable> {
    read_delimited(reader, b',')
}

/// Read a delimited statement, using the given single-byte delimiter
pub fn read_delimited<R: Read>(reader: R, delimiter: u8) -> Result<RawTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let mut table = RawTable::new(headers.iter().map(|h| h.trim().to_string()).collect());

    for result in rdr.records() {
        let record = result?;
        // Skip fully blank lines that some banks append
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        table.push_values(record.iter().map(text_cell).collect());
    }

    debug!(
        "Read {} rows with {} columns",
        table.len(),
        table.columns.len()
    );
    Ok(table)
}

/// Read a text export whose delimiter is unknown (`,` `;` `|` or tab)
pub fn read_delimited_text(text: &str) -> Result<RawTable> {
    let delimiter = sniff_delimiter(text);
    debug!("Sniffed delimiter {:?}", delimiter as char);
    read_delimited(text.as_bytes(), delimiter)
}

/// Read an array of JSON objects. Column order follows first appearance.
pub fn read_json<R: Read>(reader: R) -> Result<RawTable> {
    let value: Value = serde_json::from_reader(reader)?;
    let records = match value {
        Value::Array(records) => records,
        _ => {
            return Err(Error::Import(
                "Expected a JSON array of row objects".into(),
            ))
        }
    };

    let mut columns: Vec<String> = Vec::new();
    for record in &records {
        let object = record
            .as_object()
            .ok_or_else(|| Error::Import("Expected every JSON row to be an object".into()))?;
        for key in object.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let mut table = RawTable::new(columns.clone());
    for record in &records {
        let values = columns
            .iter()
            .map(|column| json_cell(record.get(column)))
            .collect();
        table.push_values(values);
    }

    Ok(table)
}

/// Read the first sheet of a spreadsheet (xlsx, xls, xlsb, ods).
/// Row 0 holds the headers; typed cells keep their type.
pub fn read_workbook(path: &Path) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| Error::Import(format!("Workbook has no sheets: {}", path.display())))?;
    let range = workbook.worksheet_range(&sheet_name)?;

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header) => header.iter().map(header_text).collect(),
        None => return Ok(RawTable::default()),
    };
    let mut table = RawTable::new(headers);

    for row in rows {
        let values: Vec<CellValue> = row.iter().map(workbook_cell).collect();
        if values.iter().all(|v| *v == CellValue::Null) {
            continue;
        }
        table.push_values(values);
    }

    debug!(
        "Read {} rows with {} columns from sheet '{}'",
        table.len(),
        table.columns.len(),
        sheet_name
    );
    Ok(table)
}

/// Read a statement file, dispatching on its extension
pub fn read_path(path: &Path) -> Result<RawTable> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => read_csv(File::open(path)?),
        "tsv" => read_delimited(File::open(path)?, b'\t'),
        "txt" => {
            let text = std::fs::read_to_string(path)?;
            read_delimited_text(&text)
        }
        "json" => read_json(File::open(path)?),
        "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => read_workbook(path),
        _ => Err(Error::Import(format!(
            "Unsupported file type: {}",
            path.display()
        ))),
    }
}

/// Pick the candidate delimiter that occurs most often in the header line.
/// Comma wins ties and the no-delimiter case.
fn sniff_delimiter(text: &str) -> u8 {
    let header = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let mut best = (b',', 0usize);
    for &delimiter in CANDIDATE_DELIMITERS {
        let count = header.bytes().filter(|b| *b == delimiter).count();
        if count > best.1 {
            best = (delimiter, count);
        }
    }
    best.0
}

fn text_cell(field: &str) -> CellValue {
    if field.trim().is_empty() {
        CellValue::Null
    } else {
        CellValue::Text(field.to_string())
    }
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn workbook_cell(cell: &Data) -> CellValue {
    match cell {
        Data::String(s) => text_cell(s),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(CellValue::DateTime)
            .unwrap_or(CellValue::Number(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => text_cell(s),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::Error(_) | Data::Empty => CellValue::Null,
    }
}

fn json_cell(value: Option<&Value>) -> CellValue {
    match value {
        None | Some(Value::Null) => CellValue::Null,
        Some(Value::String(s)) => text_cell(s),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(CellValue::Number)
            .unwrap_or_else(|| CellValue::Text(n.to_string())),
        Some(Value::Bool(b)) => CellValue::Text(b.to_string()),
        Some(other) => CellValue::Text(other.to_string()),
    }
}
