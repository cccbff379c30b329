use chrono::NaiveDate;

use crate::error::{Result, TrackerError};
use crate::models::{ExpenseRecord, RecordId, TableRow};

/// Parse a price typed by the user. Surrounding whitespace is ignored;
/// anything that is not a finite, non-negative number is rejected.
pub fn parse_amount(raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| TrackerError::InvalidAmount(raw.to_string()))?;
    if !value.is_finite() || value < 0.0 {
        return Err(TrackerError::InvalidAmount(raw.to_string()));
    }
    // Drop the sign of -0
    Ok(value + 0.0)
}

/// The expenses entered during this session, in the order they were added.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<ExpenseRecord>,
    /// Identifier handed to the next appended record.
    items: usize,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append one expense. Nothing is changed on error.
    pub fn append(
        &mut self,
        description: &str,
        category: &str,
        date: NaiveDate,
        raw_amount: &str,
    ) -> Result<RecordId> {
        if description.trim().is_empty() {
            return Err(TrackerError::MissingField("Description"));
        }
        let amount = parse_amount(raw_amount)?;

        let id = RecordId(self.items);
        self.records.push(ExpenseRecord {
            description: description.to_string(),
            category: category.to_string(),
            date,
            amount,
        });
        self.items += 1;
        tracing::debug!(id = id.0, description, amount, "expense recorded");
        Ok(id)
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.items = 0;
    }

    pub fn all(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn rows(&self) -> Vec<TableRow> {
        self.records.iter().map(ExpenseRecord::to_row).collect()
    }

    pub fn total(&self) -> f64 {
        self.records.iter().map(|r| r.amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32, month: u32, year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn sample_store() -> RecordStore {
        let mut store = RecordStore::new();
        store.append("Water", "Food", d(20, 2, 2024), "20").unwrap();
        store.append("Rent", "Rent", d(1, 2, 2024), "1000").unwrap();
        store.append("Coffee", "Food", d(10, 2, 2024), "30").unwrap();
        store
    }

    #[test]
    fn test_append_preserves_order_and_ids() {
        let mut store = RecordStore::new();
        let a = store.append("Water", "Food", d(20, 2, 2024), "20").unwrap();
        let b = store.append("Rent", "Rent", d(1, 2, 2024), "1000").unwrap();
        let c = store.append("Coffee", "Food", d(10, 2, 2024), "30").unwrap();
        assert_eq!((a, b, c), (RecordId(0), RecordId(1), RecordId(2)));

        let names: Vec<&str> = store.all().iter().map(|r| r.description.as_str()).collect();
        assert_eq!(names, ["Water", "Rent", "Coffee"]);
        assert_eq!(store.all()[1].amount, 1000.0);
        assert_eq!(store.all()[1].category, "Rent");
    }

    #[test]
    fn test_valid_amounts_format_with_two_digits() {
        let mut store = RecordStore::new();
        for raw in ["0", "20", "3.5", "1e2", " 7.126 ", "0.001", "12345.678"] {
            store.append("Thing", "", d(1, 1, 2024), raw).unwrap();
        }
        for row in store.rows() {
            let (_, frac) = row.amount.split_once('.').unwrap();
            assert_eq!(frac.len(), 2, "{}", row.amount);
        }
        let amounts: Vec<String> = store.rows().into_iter().map(|r| r.amount).collect();
        assert_eq!(
            amounts,
            ["0.00", "20.00", "3.50", "100.00", "7.13", "0.00", "12345.68"]
        );
    }

    #[test]
    fn test_invalid_amount_leaves_store_unchanged() {
        let mut store = sample_store();
        for raw in ["abc", "", "  ", "-1", "-0.01", "inf", "NaN", "12,50", "$5"] {
            let err = store.append("Thing", "Misc", d(1, 1, 2024), raw).unwrap_err();
            assert!(matches!(err, TrackerError::InvalidAmount(_)), "{raw}: {err}");
            assert_eq!(store.len(), 3);
        }
        let next = store.append("Thing", "Misc", d(1, 1, 2024), "1").unwrap();
        assert_eq!(next, RecordId(3));
    }

    #[test]
    fn test_blank_description_rejected() {
        let mut store = RecordStore::new();
        let err = store.append("  ", "Food", d(1, 1, 2024), "5").unwrap_err();
        assert!(matches!(err, TrackerError::MissingField(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_negative_zero_is_stored_as_zero() {
        assert_eq!(parse_amount("-0").unwrap().to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn test_clear_resets_records_and_counter() {
        let mut store = sample_store();
        store.clear();
        assert!(store.all().is_empty());
        assert_eq!(store.total(), 0.0);
        let id = store.append("Tea", "Food", d(1, 3, 2024), "2").unwrap();
        assert_eq!(id, RecordId(0));

        let mut empty = RecordStore::new();
        empty.clear();
        assert!(empty.all().is_empty());
    }

    #[test]
    fn test_total() {
        assert_eq!(sample_store().total(), 1050.0);
    }
}
