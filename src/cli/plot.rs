use chrono::NaiveDate;
use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};

use super::{build_store, EntryArgs};
use crate::aggregate::{aggregate, grand_total, GroupBy, LabelTotal};
use crate::error::Result;
use crate::fmt;
use crate::settings::Settings;

const BAR_WIDTH: usize = 30;

fn bar(total: f64, largest: f64) -> String {
    if largest <= 0.0 {
        return String::new();
    }
    let len = ((total / largest) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(len)
}

pub fn breakdown_table(totals: &[LabelTotal], group_by: GroupBy) -> Table {
    let whole = grand_total(totals);
    let largest = totals.iter().map(|t| t.total).fold(0.0, f64::max);

    let heading = match group_by {
        GroupBy::Description => "Description",
        GroupBy::Category => "Category",
    };
    let mut table = Table::new();
    table.set_header(vec![heading, "Total", "Share", ""]);
    for t in totals {
        table.add_row(vec![
            Cell::new(&t.label),
            Cell::new(fmt::amount(t.total)).set_alignment(CellAlignment::Right),
            Cell::new(fmt::percent(t.total, whole)).set_alignment(CellAlignment::Right),
            Cell::new(bar(t.total, largest).cyan()),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(fmt::amount(whole)).set_alignment(CellAlignment::Right),
        Cell::new(""),
        Cell::new(""),
    ]);
    table
}

pub fn run(
    args: &EntryArgs,
    group_by: Option<GroupBy>,
    settings: &Settings,
    today: NaiveDate,
) -> Result<()> {
    let store = build_store(args, settings, today)?;
    let group_by = group_by.unwrap_or(settings.group_by);
    let totals = aggregate(store.all(), group_by);
    tracing::info!(slices = totals.len(), group_by = group_by.as_str(), "plot requested");
    if totals.is_empty() {
        println!("Nothing to plot.");
        return Ok(());
    }
    println!("Breakdown\n{}", breakdown_table(&totals, group_by));
    Ok(())
}
