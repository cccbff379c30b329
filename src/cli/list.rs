use chrono::NaiveDate;
use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};

use super::{build_store, EntryArgs};
use crate::error::Result;
use crate::fmt;
use crate::models::TableRow;
use crate::settings::Settings;

pub fn expense_table(rows: &[TableRow], total: f64) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Description", "Category", "Date", "Price"]);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.description),
            Cell::new(&row.category),
            Cell::new(&row.date),
            Cell::new(&row.amount).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(""),
        Cell::new(""),
        Cell::new(fmt::amount(total)).set_alignment(CellAlignment::Right),
    ]);
    table
}

pub fn run(args: &EntryArgs, settings: &Settings, today: NaiveDate) -> Result<()> {
    let store = build_store(args, settings, today)?;
    if store.is_empty() {
        println!("No expenses.");
        return Ok(());
    }
    println!("Expenses\n{}", expense_table(&store.rows(), store.total()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;
    use crate::store::RecordStore;

    #[test]
    fn test_table_lists_rows_in_order_with_total() {
        let mut store = RecordStore::new();
        sample::seed(&mut store).unwrap();
        let out = expense_table(&store.rows(), store.total()).to_string();
        let water = out.find("Water").unwrap();
        let rent = out.find("Rent").unwrap();
        let coffee = out.find("Coffee").unwrap();
        assert!(water < rent && rent < coffee);
        assert!(out.contains("1000.00"));
        assert!(out.contains("1050.00"));
        assert!(out.contains("20/02/2024"));
    }
}
