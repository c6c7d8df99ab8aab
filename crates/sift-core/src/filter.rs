//! Transaction filter builder
//!
//! Pure, order-preserving filtering over a normalized batch. Used by the
//! CLI summary; rendering layers can reuse it instead of keeping their own
//! widget state.

use chrono::NaiveDate;

use crate::models::NormalizedTransaction;

/// Builder for filtering normalized transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter<'query> {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub search: Option<&'query str>,
}

impl<'query> TransactionFilter<'query> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inclusive lower date bound
    pub fn from(mut self, date: Option<NaiveDate>) -> Self {
        self.from = date;
        self
    }

    /// Inclusive upper date bound
    pub fn to(mut self, date: Option<NaiveDate>) -> Self {
        self.to = date;
        self
    }

    /// Case-insensitive search over merchant, category, amount and date
    pub fn search(mut self, query: Option<&'query str>) -> Self {
        self.search = query.map(str::trim).filter(|q| !q.is_empty());
        self
    }

    /// Does a single transaction pass every configured condition?
    ///
    /// Once a date bound is set, transactions with an unknown date are out.
    pub fn matches(&self, tx: &NormalizedTransaction) -> bool {
        if self.from.is_some() || self.to.is_some() {
            let Some(date) = tx.date().known() else {
                return false;
            };
            if self.from.is_some_and(|from| date < from) {
                return false;
            }
            if self.to.is_some_and(|to| date > to) {
                return false;
            }
        }

        if let Some(query) = self.search {
            let query = query.to_lowercase();
            let haystacks = [
                tx.merchant().to_lowercase(),
                tx.category().to_lowercase(),
                tx.amount().to_string(),
                tx.date().to_string(),
            ];
            if !haystacks.iter().any(|h| h.contains(&query)) {
                return false;
            }
        }

        true
    }

    /// Keep matching transactions, preserving order
    pub fn apply(&self, transactions: &[NormalizedTransaction]) -> Vec<NormalizedTransaction> {
        transactions
            .iter()
            .filter(|tx| self.matches(tx))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TransactionDate, TransactionType};

    fn tx(
        date: Option<(i32, u32, u32)>,
        merchant: &str,
        amount: f64,
        category: &str,
    ) -> NormalizedTransaction {
        let date = date
            .and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
            .into();
        NormalizedTransaction::new(date, merchant, amount, TransactionType::Debit, category)
    }

    fn sample() -> Vec<NormalizedTransaction> {
        vec![
            tx(Some((2024, 1, 5)), "AMAZON", 499.0, "Shopping"),
            tx(Some((2024, 1, 20)), "Swiggy", 250.5, "Food"),
            tx(None, "Mystery", 10.0, ""),
            tx(Some((2024, 2, 1)), "Rent", 15000.0, "Housing"),
        ]
    }

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let out = TransactionFilter::new().apply(&sample());
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn test_date_range_inclusive_and_drops_unknown() {
        let out = TransactionFilter::new()
            .from(date(2024, 1, 5))
            .to(date(2024, 1, 20))
            .apply(&sample());
        let merchants: Vec<&str> = out.iter().map(|t| t.merchant()).collect();
        assert_eq!(merchants, vec!["AMAZON", "Swiggy"]);

        let out = TransactionFilter::new().to(date(2030, 1, 1)).apply(&sample());
        assert!(out.iter().all(|t| t.date() != TransactionDate::Unknown));
    }

    #[test]
    fn test_search_fields() {
        let filter = TransactionFilter::new().search(Some("swig"));
        assert_eq!(filter.apply(&sample()).len(), 1);

        let filter = TransactionFilter::new().search(Some("HOUSING"));
        assert_eq!(filter.apply(&sample())[0].merchant(), "Rent");

        let filter = TransactionFilter::new().search(Some("250.5"));
        assert_eq!(filter.apply(&sample())[0].merchant(), "Swiggy");

        let filter = TransactionFilter::new().search(Some("2024-02"));
        assert_eq!(filter.apply(&sample())[0].merchant(), "Rent");

        let filter = TransactionFilter::new().search(Some("unknown"));
        assert_eq!(filter.apply(&sample())[0].merchant(), "Mystery");
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let filter = TransactionFilter::new().search(Some("   "));
        assert!(filter.search.is_none());
        assert_eq!(filter.apply(&sample()).len(), 4);
    }
}
