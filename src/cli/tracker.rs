use chrono::NaiveDate;
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::aggregate::{GroupBy, LabelTotal};
use crate::chart::render_pie;
use crate::error::{Result, TrackerError};
use crate::fmt;
use crate::form::{dispatch, Command, ExpenseForm, Outcome};
use crate::store::RecordStore;
use crate::tui::{
    run_view, View, ViewAction, AMOUNT_STYLE, BORDER_STYLE, ERROR_STYLE, FOCUSED_STYLE,
    FOOTER_STYLE, HEADER_STYLE, SELECTED_STYLE, STATUS_STYLE,
};

// Focus order: the four inputs, then one slot per button in Command::ALL
const DESCRIPTION_IDX: usize = 0;
const CATEGORY_IDX: usize = 1;
const DATE_IDX: usize = 2;
const PRICE_IDX: usize = 3;
const FIRST_BUTTON_IDX: usize = 4;
const FOCUS_SLOTS: usize = FIRST_BUTTON_IDX + Command::ALL.len();

const FIELD_LABELS: [&str; 4] = ["Description", "Category", "Date", "Price"];

struct Status {
    message: String,
    is_error: bool,
}

pub struct ExpenseTracker {
    store: RecordStore,
    form: ExpenseForm,
    group_by: GroupBy,
    focused: usize,
    /// Last plotted totals. Only replaced when Plot is pressed.
    plot: Option<Vec<LabelTotal>>,
    status: Option<Status>,
    /// Remaining keypresses before the status message is cleared.
    status_ttl: u8,
}

impl ExpenseTracker {
    pub fn new(store: RecordStore, today: NaiveDate, group_by: GroupBy) -> Self {
        Self {
            store,
            form: ExpenseForm::new(today),
            group_by,
            focused: DESCRIPTION_IDX,
            plot: None,
            status: None,
            status_ttl: 0,
        }
    }

    fn set_status(&mut self, message: String, is_error: bool) {
        self.status = Some(Status { message, is_error });
        self.status_ttl = 3;
    }

    fn focused_command(&self) -> Option<Command> {
        self.focused
            .checked_sub(FIRST_BUTTON_IDX)
            .and_then(|i| Command::ALL.get(i).copied())
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focused {
            DESCRIPTION_IDX => Some(&mut self.form.description),
            CATEGORY_IDX => Some(&mut self.form.category),
            PRICE_IDX => Some(&mut self.form.amount),
            _ => None,
        }
    }

    /// Run a command and turn its outcome into screen state.
    fn run_command(&mut self, command: Command) -> ViewAction {
        match dispatch(command, &mut self.form, &mut self.store, self.group_by) {
            Ok(Outcome::Added(id)) => {
                self.focused = DESCRIPTION_IDX;
                self.set_status(format!("Added expense #{}", id.0 + 1), false);
            }
            Ok(Outcome::Plotted(totals)) => {
                let message = if totals.is_empty() {
                    "Nothing to plot".to_string()
                } else {
                    format!("Plotted {} slices by {}", totals.len(), self.group_by.as_str())
                };
                self.plot = Some(totals);
                self.set_status(message, false);
            }
            Ok(Outcome::Cleared) => self.set_status("Table cleared".into(), false),
            Ok(Outcome::Quit) => return ViewAction::Close,
            Err(e) => self.report_error(e),
        }
        ViewAction::Continue
    }

    fn report_error(&mut self, e: TrackerError) {
        if e.is_validation() {
            tracing::warn!(error = %e, "input rejected");
        } else {
            tracing::error!(error = %e, "command failed");
        }
        self.set_status(e.to_string(), true);
    }

    fn draw_table(&self, frame: &mut Frame, area: Rect) {
        let rows = self.store.rows();
        let mut lines = vec![Line::from(Span::styled(
            format!(
                " {:<20} {:<14} {:<10} {:>10}",
                "Description", "Category", "Date", "Price"
            ),
            Style::default().add_modifier(Modifier::BOLD),
        ))];

        if rows.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                " No expenses yet. Fill in the form and press Enter.",
                FOOTER_STYLE,
            )));
        } else {
            // Keep the newest rows on screen
            let visible = area.height.saturating_sub(3) as usize;
            let skip = rows.len().saturating_sub(visible);
            for row in rows.iter().skip(skip) {
                lines.push(Line::from(vec![
                    Span::raw(format!(
                        " {:<20} {:<14} {:<10} ",
                        clip(&row.description, 20),
                        clip(&row.category, 14),
                        row.date
                    )),
                    Span::styled(format!("{:>10}", row.amount), AMOUNT_STYLE),
                ]));
            }
            lines.push(Line::from(Span::styled(
                format!(
                    " {:<46} {:>10}",
                    format!("{} expenses", rows.len()),
                    fmt::amount(self.store.total())
                ),
                FOOTER_STYLE,
            )));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![Line::from("")];
        let values = [
            self.form.description.clone(),
            self.form.category.clone(),
            fmt::date(self.form.date),
            self.form.amount.clone(),
        ];

        for (i, (label, value)) in FIELD_LABELS.iter().zip(values).enumerate() {
            let is_focused = i == self.focused;
            let label_style = if is_focused {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let shown = if i == DATE_IDX {
                let arrows = if is_focused { ("< ", " >") } else { ("  ", "  ") };
                format!("{}{value}{}", arrows.0, arrows.1)
            } else {
                let cursor = if is_focused { "_" } else { "" };
                format!("{value}{cursor}")
            };
            lines.push(Line::from(vec![
                Span::styled(format!(" {label:<12} "), label_style),
                Span::styled(
                    shown,
                    if is_focused {
                        FOCUSED_STYLE
                    } else {
                        Style::default()
                    },
                ),
            ]));
        }

        lines.push(Line::from(""));
        let mut buttons = vec![Span::raw(" ")];
        for (i, command) in Command::ALL.iter().enumerate() {
            let slot = FIRST_BUTTON_IDX + i;
            let style = if slot == self.focused {
                SELECTED_STYLE
            } else if *command == Command::Add && !self.form.can_submit() {
                FOOTER_STYLE
            } else {
                Style::default()
            };
            buttons.push(Span::styled(format!("[ {} ]", command.label()), style));
            buttons.push(Span::raw(" "));
        }
        lines.push(Line::from(buttons));

        if let Some(status) = &self.status {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!(" {}", status.message),
                if status.is_error {
                    ERROR_STYLE
                } else {
                    STATUS_STYLE
                },
            )));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }
}

impl View for ExpenseTracker {
    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let [header_area, sep, body_area, hints_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(" Expense Tracker").style(HEADER_STYLE),
            header_area,
        );
        let sep_line = "━".repeat(area.width as usize);
        frame.render_widget(Paragraph::new(sep_line.as_str()).style(BORDER_STYLE), sep);

        let [table_area, right_area] =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                .areas(body_area);
        self.draw_table(frame, table_area);

        let [form_area, chart_area] =
            Layout::vertical([Constraint::Length(10), Constraint::Fill(1)]).areas(right_area);
        self.draw_form(frame, form_area);

        match &self.plot {
            Some(totals) => render_pie(frame, chart_area, "Breakdown", totals),
            None => frame.render_widget(
                Paragraph::new(" Select Plot to chart the table.").style(FOOTER_STYLE),
                chart_area,
            ),
        }

        let hints = if self.focused == DATE_IDX {
            " Left/Right=day  PgUp/PgDn=month  Tab=next  Enter=add  Esc=quit"
        } else {
            " Tab=next field  Enter=add / press button  Esc=quit"
        };
        frame.render_widget(Paragraph::new(hints).style(FOOTER_STYLE), hints_area);
    }

    fn handle_key(&mut self, code: KeyCode) -> ViewAction {
        if self.status_ttl > 0 {
            self.status_ttl -= 1;
            if self.status_ttl == 0 {
                self.status = None;
            }
        }

        match code {
            KeyCode::Esc => return ViewAction::Close,
            KeyCode::Tab | KeyCode::Down => {
                self.focused = (self.focused + 1) % FOCUS_SLOTS;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focused = if self.focused == 0 {
                    FOCUS_SLOTS - 1
                } else {
                    self.focused - 1
                };
            }
            KeyCode::Left if self.focused == DATE_IDX => self.form.shift_days(-1),
            KeyCode::Right if self.focused == DATE_IDX => self.form.shift_days(1),
            KeyCode::PageUp if self.focused == DATE_IDX => self.form.shift_months(-1),
            KeyCode::PageDown if self.focused == DATE_IDX => self.form.shift_months(1),
            KeyCode::Left if self.focused >= FIRST_BUTTON_IDX => {
                self.focused = (self.focused - 1).max(FIRST_BUTTON_IDX);
            }
            KeyCode::Right if self.focused >= FIRST_BUTTON_IDX => {
                self.focused = (self.focused + 1).min(FOCUS_SLOTS - 1);
            }
            KeyCode::Enter => {
                let command = self.focused_command().unwrap_or(Command::Add);
                return self.run_command(command);
            }
            KeyCode::Char(' ') if self.focused_command().is_some() => {
                if let Some(command) = self.focused_command() {
                    return self.run_command(command);
                }
            }
            KeyCode::Char(c) => {
                if let Some(text) = self.focused_text() {
                    text.push(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(text) = self.focused_text() {
                    text.pop();
                }
            }
            _ => {}
        }
        ViewAction::Continue
    }
}

fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

pub fn run(store: RecordStore, group_by: GroupBy) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let mut tracker = ExpenseTracker::new(store, today, group_by);
    run_view(&mut tracker)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> ExpenseTracker {
        let day = NaiveDate::from_ymd_opt(2024, 2, 20).unwrap();
        ExpenseTracker::new(RecordStore::new(), day, GroupBy::Description)
    }

    fn type_text(t: &mut ExpenseTracker, text: &str) {
        for c in text.chars() {
            t.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn test_typing_and_enter_adds_expense() {
        let mut t = tracker();
        type_text(&mut t, "Water");
        t.handle_key(KeyCode::Tab);
        type_text(&mut t, "Food");
        t.handle_key(KeyCode::Tab);
        t.handle_key(KeyCode::Right);
        t.handle_key(KeyCode::Tab);
        type_text(&mut t, "20");
        t.handle_key(KeyCode::Enter);

        assert_eq!(t.store.len(), 1);
        let record = &t.store.all()[0];
        assert_eq!(record.description, "Water");
        assert_eq!(record.category, "Food");
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 2, 21).unwrap());
        assert!(t.form.description.is_empty() && t.form.amount.is_empty());
        assert_eq!(t.focused, DESCRIPTION_IDX);
    }

    #[test]
    fn test_bad_price_keeps_fields_and_shows_error() {
        let mut t = tracker();
        type_text(&mut t, "Water");
        t.focused = PRICE_IDX;
        type_text(&mut t, "abc");
        t.handle_key(KeyCode::Enter);

        assert!(t.store.is_empty());
        assert_eq!(t.form.description, "Water");
        assert_eq!(t.form.amount, "abc");
        assert!(t.status.as_ref().is_some_and(|s| s.is_error));
    }

    #[test]
    fn test_backspace_edits_focused_field() {
        let mut t = tracker();
        type_text(&mut t, "Teaa");
        t.handle_key(KeyCode::Backspace);
        assert_eq!(t.form.description, "Tea");
    }

    #[test]
    fn test_plot_button_snapshots_totals() {
        let mut t = tracker();
        t.store.append("Water", "Food", t.form.date, "20").unwrap();
        t.focused = FIRST_BUTTON_IDX + 1;
        assert_eq!(t.focused_command(), Some(Command::Plot));
        t.handle_key(KeyCode::Enter);
        assert_eq!(t.plot.as_ref().map(Vec::len), Some(1));

        // Adding more does not redraw the chart until Plot is pressed again
        t.store.append("Rent", "Rent", t.form.date, "1000").unwrap();
        assert_eq!(t.plot.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_clear_button_keeps_last_chart() {
        let mut t = tracker();
        t.store.append("Water", "Food", t.form.date, "20").unwrap();
        t.run_command(Command::Plot);
        t.focused = FIRST_BUTTON_IDX + 2;
        t.handle_key(KeyCode::Char(' '));
        assert!(t.store.is_empty());
        assert!(t.plot.is_some());
    }

    #[test]
    fn test_quit_button_and_escape_close() {
        let mut t = tracker();
        t.focused = FIRST_BUTTON_IDX + 3;
        assert!(matches!(t.handle_key(KeyCode::Enter), ViewAction::Close));
        assert!(matches!(tracker().handle_key(KeyCode::Esc), ViewAction::Close));
    }

    #[test]
    fn test_focus_wraps_around() {
        let mut t = tracker();
        t.handle_key(KeyCode::BackTab);
        assert_eq!(t.focused, FOCUS_SLOTS - 1);
        t.handle_key(KeyCode::Tab);
        assert_eq!(t.focused, DESCRIPTION_IDX);
    }

    #[test]
    fn test_date_field_ignores_typing() {
        let mut t = tracker();
        t.focused = DATE_IDX;
        type_text(&mut t, "12");
        t.handle_key(KeyCode::PageDown);
        assert_eq!(t.form.date, NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());
    }
}
