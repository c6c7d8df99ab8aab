//! Lenient statement date parsing
//!
//! Banks export dates in every format imaginable, often with extra text
//! around them ("15/01/2024 10:32:11", "Txn on 15-Jan-24", ...). Parsing is
//! fuzzy: the earliest date-looking token in the text wins. Ambiguous numeric
//! dates are read month-first, unless the first field cannot be a month.
//! Anything unparsable becomes `TransactionDate::Unknown`; this module
//! never returns an error.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};

use crate::models::{CellValue, TransactionDate};

const MONTH_NAMES: &str = r"(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";

struct DatePatterns {
    numeric: Regex,
    day_month_year: Regex,
    month_day_year: Regex,
}

fn patterns() -> &'static DatePatterns {
    static PATTERNS: OnceLock<DatePatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| DatePatterns {
        numeric: Regex::new(r"(\d{1,4})([/.\-])(\d{1,2})([/.\-])(\d{1,4})").expect("valid regex"),
        day_month_year: Regex::new(&format!(
            r"(?i)\b(\d{{1,2}})(?:st|nd|rd|th)?[\s\-/.,]*{}\b[\s\-/.,']*(\d{{4}}|\d{{2}})\b",
            MONTH_NAMES
        ))
        .expect("valid regex"),
        month_day_year: Regex::new(&format!(
            r"(?i)\b{}\b[\s\-/.]*(\d{{1,2}})(?:st|nd|rd|th)?,?[\s\-/.]*(\d{{4}}|\d{{2}})\b",
            MONTH_NAMES
        ))
        .expect("valid regex"),
    })
}

/// Normalize a date cell.
///
/// Structured dates are taken as-is; numbers and text go through the
/// lenient text parser.
pub fn normalize_date(cell: Option<&CellValue>) -> TransactionDate {
    match cell {
        None | Some(CellValue::Null) => TransactionDate::Unknown,
        Some(CellValue::Date(d)) => TransactionDate::Known(*d),
        Some(CellValue::DateTime(dt)) => TransactionDate::Known(dt.date()),
        Some(CellValue::Number(n)) => parse_date_text(&n.to_string()),
        Some(CellValue::Text(s)) => parse_date_text(s),
    }
}

/// Parse free text into a date, tolerating surrounding noise
pub fn parse_date_text(text: &str) -> TransactionDate {
    let text = text.trim();
    if text.is_empty() {
        return TransactionDate::Unknown;
    }

    // Bare YYYYMMDD only when it is the whole value; inside text it is
    // far more likely to be a reference number.
    if text.len() == 8 && text.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(date) = NaiveDate::parse_from_str(text, "%Y%m%d") {
            return TransactionDate::Known(date);
        }
    }

    let p = patterns();
    let mut candidates: Vec<(usize, NaiveDate)> = Vec::new();

    for caps in p.numeric.captures_iter(text) {
        if let Some(found) = numeric_candidate(text, &caps) {
            candidates.push(found);
        }
    }

    for caps in p.day_month_year.captures_iter(text) {
        let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
        if let Some(date) = build_date(&caps[3], month_from_name(&caps[2]), &caps[1]) {
            candidates.push((start, date));
        }
    }

    for caps in p.month_day_year.captures_iter(text) {
        let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
        if let Some(date) = build_date(&caps[3], month_from_name(&caps[1]), &caps[2]) {
            candidates.push((start, date));
        }
    }

    candidates
        .into_iter()
        .min_by_key(|(start, _)| *start)
        .map(|(_, date)| TransactionDate::Known(date))
        .unwrap_or(TransactionDate::Unknown)
}

/// Interpret an `a<sep>b<sep>c` token
fn numeric_candidate(text: &str, caps: &Captures) -> Option<(usize, NaiveDate)> {
    let whole = caps.get(0)?;

    // Reject tokens glued to more digits (account numbers, amounts)
    let before = text[..whole.start()].chars().next_back();
    let after = text[whole.end()..].chars().next();
    if before.is_some_and(|c| c.is_ascii_digit()) || after.is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }
    if caps[2] != caps[4] {
        return None;
    }

    let (a, b, c) = (&caps[1], &caps[3], &caps[5]);

    let date = if a.len() == 4 {
        build_date(a, b.parse().ok(), c)?
    } else {
        if c.len() != 2 && c.len() != 4 {
            return None;
        }
        let first: u32 = a.parse().ok()?;
        let second: u32 = b.parse().ok()?;
        // Month-first unless the first field cannot be a month
        let (month, day) = if first > 12 && second <= 12 {
            (second, first)
        } else {
            (first, second)
        };
        build_date(c, Some(month), &day.to_string())?
    };

    Some((whole.start(), date))
}

fn build_date(year: &str, month: Option<u32>, day: &str) -> Option<NaiveDate> {
    let year = expand_year(year)?;
    let day: u32 = day.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month?, day)
}

/// Two-digit years: 00-68 → 20xx, 69-99 → 19xx
fn expand_year(year: &str) -> Option<i32> {
    let value: i32 = year.parse().ok()?;
    match year.len() {
        4 => Some(value),
        2 if value < 69 => Some(2000 + value),
        2 => Some(1900 + value),
        _ => None,
    }
}

fn month_from_name(name: &str) -> Option<u32> {
    let month = match name.get(..3)?.to_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}
