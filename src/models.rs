use chrono::NaiveDate;

use crate::fmt;

/// Position of a record in the store, counted from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRecord {
    pub description: String,
    pub category: String,
    pub date: NaiveDate,
    pub amount: f64,
}

impl ExpenseRecord {
    pub fn to_row(&self) -> TableRow {
        TableRow {
            description: self.description.clone(),
            category: self.category.clone(),
            date: fmt::date(self.date),
            amount: fmt::amount(self.amount),
        }
    }
}

/// What the table shows for one record: every column already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub description: String,
    pub category: String,
    pub date: String,
    pub amount: String,
}
