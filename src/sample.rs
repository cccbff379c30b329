use crate::error::Result;
use crate::filter::parse_dmy;
use crate::store::RecordStore;

/// Rows shown on first launch so the table and chart have something in them.
pub const SAMPLE_EXPENSES: &[(&str, &str, &str, &str)] = &[
    ("Water", "Food", "20/02/2024", "20"),
    ("Rent", "Rent", "01/02/2024", "1000"),
    ("Coffee", "Food", "10/02/2024", "30"),
];

pub fn seed(store: &mut RecordStore) -> Result<()> {
    for (description, category, date, amount) in SAMPLE_EXPENSES {
        store.append(description, category, parse_dmy(date)?, amount)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate_by_label;

    #[test]
    fn test_seed_loads_all_sample_rows() {
        let mut store = RecordStore::new();
        seed(&mut store).unwrap();
        assert_eq!(store.len(), SAMPLE_EXPENSES.len());
        let rows = store.rows();
        assert_eq!(rows[0].date, "20/02/2024");
        assert_eq!(rows[1].amount, "1000.00");
        assert_eq!(rows[2].description, "Coffee");

        let labels: Vec<String> = aggregate_by_label(store.all())
            .into_iter()
            .map(|t| t.label)
            .collect();
        assert_eq!(labels, ["Water", "Rent", "Coffee"]);
    }
}
