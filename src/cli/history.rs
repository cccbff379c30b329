use chrono::NaiveDate;

use super::list::expense_table;
use super::{build_store, EntryArgs};
use crate::error::Result;
use crate::filter::{filter_by_date_range, parse_dmy};
use crate::fmt;
use crate::models::TableRow;
use crate::settings::Settings;

pub fn run(
    args: &EntryArgs,
    from: &str,
    to: &str,
    settings: &Settings,
    today: NaiveDate,
) -> Result<()> {
    let from = parse_dmy(from)?;
    let to = parse_dmy(to)?;
    let store = build_store(args, settings, today)?;

    let kept = filter_by_date_range(store.all(), from, to);
    println!("Date from: {}", fmt::date(from));
    println!("Date to:   {}", fmt::date(to));
    if kept.is_empty() {
        println!("No expenses in range.");
        return Ok(());
    }
    let rows: Vec<TableRow> = kept.iter().map(|r| r.to_row()).collect();
    let total = kept.iter().map(|r| r.amount).sum();
    println!("{}", expense_table(&rows, total));
    Ok(())
}
