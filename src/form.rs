//! The entry form and the actions that can be taken on it.
//!
//! Every button maps to a [`Command`]; [`dispatch`] turns the current form
//! state plus a command into a store mutation or a validation error. Nothing
//! here touches the terminal.

use chrono::{Days, Months, NaiveDate};

use crate::aggregate::{aggregate, GroupBy, LabelTotal};
use crate::error::{Result, TrackerError};
use crate::models::RecordId;
use crate::store::RecordStore;

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseForm {
    pub description: String,
    pub category: String,
    pub date: NaiveDate,
    pub amount: String,
}

impl ExpenseForm {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            description: String::new(),
            category: String::new(),
            date,
            amount: String::new(),
        }
    }

    /// Add stays disabled until both description and price have text.
    pub fn can_submit(&self) -> bool {
        !self.description.is_empty() && !self.amount.is_empty()
    }

    /// Empty the text fields after a successful add. The date is kept.
    fn reset_text(&mut self) {
        self.description.clear();
        self.category.clear();
        self.amount.clear();
    }

    pub fn shift_days(&mut self, days: i64) {
        let moved = if days >= 0 {
            self.date.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.date.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        if let Some(d) = moved {
            self.date = d;
        }
    }

    pub fn shift_months(&mut self, months: i32) {
        let moved = if months >= 0 {
            self.date.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            self.date.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        if let Some(d) = moved {
            self.date = d;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add,
    Plot,
    Clear,
    Quit,
}

impl Command {
    pub const ALL: [Command; 4] = [Command::Add, Command::Plot, Command::Clear, Command::Quit];

    pub fn label(&self) -> &'static str {
        match self {
            Command::Add => "Add",
            Command::Plot => "Plot",
            Command::Clear => "Clear",
            Command::Quit => "Quit",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Added(RecordId),
    Plotted(Vec<LabelTotal>),
    Cleared,
    Quit,
}

/// Run one command against the form and store.
///
/// On error neither the store nor the form has changed, so the user can fix
/// the offending field and try again.
pub fn dispatch(
    command: Command,
    form: &mut ExpenseForm,
    store: &mut RecordStore,
    group_by: GroupBy,
) -> Result<Outcome> {
    match command {
        Command::Add => {
            if form.description.is_empty() {
                return Err(TrackerError::MissingField("Description"));
            }
            if form.amount.is_empty() {
                return Err(TrackerError::MissingField("Price"));
            }
            let id = store.append(&form.description, &form.category, form.date, &form.amount)?;
            form.reset_text();
            Ok(Outcome::Added(id))
        }
        Command::Plot => {
            let totals = aggregate(store.all(), group_by);
            tracing::info!(slices = totals.len(), group_by = group_by.as_str(), "plot requested");
            Ok(Outcome::Plotted(totals))
        }
        Command::Clear => {
            store.clear();
            tracing::info!("table cleared");
            Ok(Outcome::Cleared)
        }
        Command::Quit => Ok(Outcome::Quit),
    }
}
