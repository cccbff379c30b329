pub mod config;
pub mod history;
pub mod list;
pub mod plot;
pub mod tracker;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;

use crate::aggregate::GroupBy;
use crate::error::{Result, TrackerError};
use crate::filter::parse_dmy;
use crate::sample;
use crate::settings::Settings;
use crate::store::RecordStore;

#[derive(Parser)]
#[command(
    name = "expense-tracker",
    version,
    about = "Record expenses by hand and see where the money went."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive tracker (the default).
    Run {
        /// Start with an empty table
        #[arg(long = "no-sample")]
        no_sample: bool,
        /// Field that names each pie slice
        #[arg(long = "group-by", value_enum)]
        group_by: Option<GroupBy>,
    },
    /// Print the expense table.
    List {
        #[command(flatten)]
        entries: EntryArgs,
    },
    /// Print the totals the pie chart is drawn from.
    Plot {
        #[command(flatten)]
        entries: EntryArgs,
        /// Field that names each slice
        #[arg(long = "group-by", value_enum)]
        group_by: Option<GroupBy>,
    },
    /// Print expenses dated strictly between two dates.
    History {
        #[command(flatten)]
        entries: EntryArgs,
        /// Lower bound, exclusive: DD/MM/YYYY
        #[arg(long, default_value = "01/12/2023")]
        from: String,
        /// Upper bound, exclusive: DD/MM/YYYY
        #[arg(long, default_value = "01/03/2024")]
        to: String,
    },
    /// Show or change saved preferences.
    Config {
        /// Pre-fill the table with sample expenses on start
        #[arg(long, conflicts_with = "no_sample")]
        sample: bool,
        /// Start with an empty table
        #[arg(long = "no-sample")]
        no_sample: bool,
        /// Default field that names each pie slice
        #[arg(long = "group-by", value_enum)]
        group_by: Option<GroupBy>,
        /// Log filter, e.g. warn, info, expense_tracker=debug
        #[arg(long = "log-level")]
        log_level: Option<String>,
        /// Append logs to this file (empty string turns it off)
        #[arg(long = "log-file")]
        log_file: Option<String>,
    },
    /// Print a shell completion script.
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Commands {
    /// Whether the command takes over the terminal.
    pub fn is_interactive(command: &Option<Commands>) -> bool {
        matches!(command, None | Some(Commands::Run { .. }))
    }
}

/// Expenses for one-shot commands. Records only live for the run.
#[derive(Args, Debug, Default)]
pub struct EntryArgs {
    /// An expense as "description,category,DD/MM/YYYY,price" (repeatable).
    /// An empty date means today.
    #[arg(long = "entry", value_name = "CSV")]
    pub entries: Vec<String>,
    /// CSV file with description,category,date,price rows
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,
    /// Leave out the sample expenses
    #[arg(long = "no-sample")]
    pub no_sample: bool,
}

/// One row of entry input before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub description: String,
    pub category: String,
    pub date: String,
    pub amount: String,
}

impl RawEntry {
    fn from_record(record: &csv::StringRecord) -> Result<Self> {
        if record.len() != 4 {
            return Err(TrackerError::InvalidEntry(format!(
                "expected 4 fields (description,category,date,price), got {}",
                record.len()
            )));
        }
        Ok(Self {
            description: record[0].trim().to_string(),
            category: record[1].trim().to_string(),
            date: record[2].trim().to_string(),
            amount: record[3].trim().to_string(),
        })
    }

    fn is_header(&self) -> bool {
        self.description.eq_ignore_ascii_case("description")
            && (self.amount.eq_ignore_ascii_case("price")
                || self.amount.eq_ignore_ascii_case("amount"))
    }
}

fn csv_reader<R: std::io::Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input)
}

/// Parse a single `--entry` value.
pub fn parse_entry(line: &str) -> Result<RawEntry> {
    let mut reader = csv_reader(line.as_bytes());
    match reader.records().next() {
        Some(record) => RawEntry::from_record(&record?),
        None => Err(TrackerError::InvalidEntry("empty entry".into())),
    }
}

/// Read every row of a CSV file. A leading header row is skipped.
pub fn read_entries(path: &Path) -> Result<Vec<Result<RawEntry>>> {
    let file = std::fs::File::open(path)?;
    let mut reader = csv_reader(file);
    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let entry = record.map_err(TrackerError::from).and_then(|r| RawEntry::from_record(&r));
        if i == 0 && entry.as_ref().is_ok_and(RawEntry::is_header) {
            continue;
        }
        rows.push(entry);
    }
    Ok(rows)
}

fn append_entry(store: &mut RecordStore, entry: &RawEntry, today: NaiveDate) -> Result<()> {
    let date = if entry.date.is_empty() {
        today
    } else {
        parse_dmy(&entry.date)?
    };
    store.append(&entry.description, &entry.category, date, &entry.amount)?;
    Ok(())
}

fn skip_entry(source: &str, e: &TrackerError) {
    tracing::warn!(source, error = %e, "entry skipped");
    eprintln!("{} {source}: {e}", "Skipped".yellow());
}

/// Build the store a one-shot command works on: sample rows (unless turned
/// off), then the input file, then `--entry` values. Bad entries are reported
/// and skipped.
pub fn build_store(args: &EntryArgs, settings: &Settings, today: NaiveDate) -> Result<RecordStore> {
    let mut store = RecordStore::new();
    if settings.seed_sample_data && !args.no_sample {
        sample::seed(&mut store)?;
    }

    if let Some(path) = &args.input {
        for (i, entry) in read_entries(path)?.into_iter().enumerate() {
            let source = format!("{} row {}", path.display(), i + 1);
            if let Err(e) = entry.and_then(|entry| append_entry(&mut store, &entry, today)) {
                skip_entry(&source, &e);
            }
        }
    }

    for line in &args.entries {
        if let Err(e) = parse_entry(line).and_then(|entry| append_entry(&mut store, &entry, today)) {
            skip_entry(&format!("entry {line:?}"), &e);
        }
    }
    Ok(store)
}

pub fn run_interactive(no_sample: bool, group_by: Option<GroupBy>, settings: &Settings) -> Result<()> {
    let mut store = RecordStore::new();
    if settings.seed_sample_data && !no_sample {
        sample::seed(&mut store)?;
    }
    tracker::run(store, group_by.unwrap_or(settings.group_by))
}

pub fn completions(shell: Shell) -> Result<()> {
    use clap::CommandFactory;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
    Ok(())
}
