//! In-memory loan ledger.
//!
//! A [`RecordStore`] is built once from a validated source and never mutated
//! afterwards. Query resolution and aggregation borrow from it.

pub mod load;

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanRecord {
    pub date: NaiveDate,
    pub product_type: String,
    pub amount: Decimal,
}

impl LoanRecord {
    pub fn new(date: NaiveDate, product_type: impl Into<String>, amount: Decimal) -> Self {
        Self {
            date,
            product_type: product_type.into(),
            amount,
        }
    }
}

/// Inclusive range of calendar years covered by a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearSpan {
    pub min: i32,
    pub max: i32,
}

impl YearSpan {
    pub fn contains(self, year: i32) -> bool {
        year >= self.min && year <= self.max
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<LoanRecord>,
    vocabulary: Vec<String>,
}

impl RecordStore {
    pub fn new(records: Vec<LoanRecord>) -> Self {
        let mut vocabulary: Vec<String> = Vec::new();
        for record in &records {
            if !vocabulary.iter().any(|known| known == &record.product_type) {
                vocabulary.push(record.product_type.clone());
            }
        }

        Self {
            records,
            vocabulary,
        }
    }

    pub fn records(&self) -> &[LoanRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct product labels in order of first appearance.
    pub fn product_vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn year_span(&self) -> Option<YearSpan> {
        let min = self.records.iter().map(|record| record.date.year()).min()?;
        let max = self.records.iter().map(|record| record.date.year()).max()?;
        Some(YearSpan { min, max })
    }

    /// Distinct record dates, ascending.
    pub fn report_dates(&self) -> Vec<NaiveDate> {
        self.records
            .iter()
            .map(|record| record.date)
            .collect::<BTreeSet<NaiveDate>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::{LoanRecord, RecordStore, YearSpan};

    fn record(year: i32, month: u32, day: u32, product: &str, amount: i64) -> Option<LoanRecord> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        Some(LoanRecord::new(date, product, Decimal::from(amount)))
    }

    fn store(rows: Vec<Option<LoanRecord>>) -> RecordStore {
        RecordStore::new(rows.into_iter().flatten().collect())
    }

    #[test]
    fn vocabulary_keeps_first_seen_order_without_duplicates() {
        let store = store(vec![
            record(2025, 5, 24, "Gold Loan", 1000),
            record(2025, 5, 24, "Business Loan", 2000),
            record(2025, 5, 25, "Gold Loan", 500),
            record(2025, 5, 25, "Home Loan", 700),
        ]);

        assert_eq!(
            store.product_vocabulary(),
            ["Gold Loan", "Business Loan", "Home Loan"]
        );
    }

    #[test]
    fn year_span_covers_min_and_max_years() {
        let store = store(vec![
            record(2024, 12, 31, "Gold Loan", 1),
            record(2023, 1, 1, "Gold Loan", 1),
            record(2025, 6, 1, "Gold Loan", 1),
        ]);

        assert_eq!(store.year_span(), Some(YearSpan { min: 2023, max: 2025 }));
    }

    #[test]
    fn empty_store_has_no_span_or_vocabulary() {
        let store = RecordStore::new(Vec::new());
        assert!(store.is_empty());
        assert_eq!(store.year_span(), None);
        assert!(store.product_vocabulary().is_empty());
        assert!(store.report_dates().is_empty());
    }

    #[test]
    fn report_dates_are_sorted_and_distinct() {
        let store = store(vec![
            record(2025, 5, 25, "Gold Loan", 1),
            record(2025, 5, 24, "Gold Loan", 1),
            record(2025, 5, 25, "Home Loan", 1),
        ]);

        let dates = store
            .report_dates()
            .iter()
            .map(|date| date.format("%Y-%m-%d").to_string())
            .collect::<Vec<String>>();
        assert_eq!(dates, vec!["2025-05-24", "2025-05-25"]);
    }

    #[test]
    fn year_span_contains_is_inclusive() {
        let span = YearSpan {
            min: 2024,
            max: 2025,
        };
        assert!(span.contains(2024));
        assert!(span.contains(2025));
        assert!(!span.contains(2023));
        assert!(!span.contains(2026));
    }
}
