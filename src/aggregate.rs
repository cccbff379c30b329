use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::ExpenseRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct LabelTotal {
    pub label: String,
    pub total: f64,
}

/// Which record field names a pie slice.
///
/// `Description` is what the chart has always grouped by, even though the
/// chart is presented as a category breakdown. `Category` has to be asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    Description,
    Category,
}

impl GroupBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupBy::Description => "description",
            GroupBy::Category => "category",
        }
    }
}

/// Sum amounts per description. Labels keep the order they first appear in.
pub fn aggregate_by_label(records: &[ExpenseRecord]) -> Vec<LabelTotal> {
    sum_by(records, |r| r.description.as_str())
}

pub fn aggregate(records: &[ExpenseRecord], group_by: GroupBy) -> Vec<LabelTotal> {
    match group_by {
        GroupBy::Description => aggregate_by_label(records),
        GroupBy::Category => sum_by(records, |r| r.category.as_str()),
    }
}

fn sum_by<'a, F>(records: &'a [ExpenseRecord], key: F) -> Vec<LabelTotal>
where
    F: Fn(&'a ExpenseRecord) -> &'a str,
{
    let mut totals: Vec<LabelTotal> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let label = key(record);
        match index.get(label) {
            Some(&i) => totals[i].total += record.amount,
            None => {
                index.insert(label, totals.len());
                totals.push(LabelTotal {
                    label: label.to_string(),
                    total: record.amount,
                });
            }
        }
    }
    totals
}

pub fn grand_total(totals: &[LabelTotal]) -> f64 {
    totals.iter().map(|t| t.total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rec(description: &str, category: &str, amount: f64) -> ExpenseRecord {
        ExpenseRecord {
            description: description.into(),
            category: category.into(),
            date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            amount,
        }
    }

    fn pairs(totals: &[LabelTotal]) -> Vec<(&str, f64)> {
        totals.iter().map(|t| (t.label.as_str(), t.total)).collect()
    }

    #[test]
    fn test_sample_grouped_by_description() {
        let records = vec![
            rec("Water", "Food", 20.0),
            rec("Rent", "Rent", 1000.0),
            rec("Coffee", "Food", 30.0),
        ];
        let totals = aggregate_by_label(&records);
        assert_eq!(
            pairs(&totals),
            [("Water", 20.0), ("Rent", 1000.0), ("Coffee", 30.0)]
        );
    }

    #[test]
    fn test_repeated_labels_sum_in_first_occurrence_order() {
        let records = vec![
            rec("Coffee", "Food", 3.0),
            rec("Rent", "Housing", 900.0),
            rec("Coffee", "Food", 4.5),
            rec("Bus", "Travel", 2.0),
            rec("Rent", "Housing", 100.0),
        ];
        let totals = aggregate_by_label(&records);
        assert_eq!(
            pairs(&totals),
            [("Coffee", 7.5), ("Rent", 1000.0), ("Bus", 2.0)]
        );
    }

    #[test]
    fn test_group_by_category() {
        let records = vec![
            rec("Water", "Food", 20.0),
            rec("Rent", "Rent", 1000.0),
            rec("Coffee", "Food", 30.0),
        ];
        let totals = aggregate(&records, GroupBy::Category);
        assert_eq!(pairs(&totals), [("Food", 50.0), ("Rent", 1000.0)]);
    }

    #[test]
    fn test_totals_conserve_grand_total() {
        let records: Vec<ExpenseRecord> = (0..40)
            .map(|i| rec(&format!("item{}", i % 7), "x", i as f64 * 1.25))
            .collect();
        let direct: f64 = records.iter().map(|r| r.amount).sum();
        let totals = aggregate_by_label(&records);
        assert_eq!(totals.len(), 7);
        assert!((grand_total(&totals) - direct).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_by_label(&[]).is_empty());
        assert_eq!(grand_total(&[]), 0.0);
    }

    #[test]
    fn test_input_not_mutated() {
        let records = vec![rec("A", "x", 1.0), rec("A", "x", 2.0)];
        let before = records.clone();
        let _ = aggregate_by_label(&records);
        assert_eq!(records, before);
    }
}
