mod aggregate;
mod chart;
mod cli;
mod error;
mod filter;
mod fmt;
mod form;
mod logging;
mod models;
mod sample;
mod settings;
mod store;
mod tui;

use clap::Parser;

use cli::config::ConfigChanges;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let settings = settings::load_settings();
    logging::init(&settings, Commands::is_interactive(&cli.command));
    let today = chrono::Local::now().date_naive();

    let result = match cli.command {
        None => cli::run_interactive(false, None, &settings),
        Some(Commands::Run {
            no_sample,
            group_by,
        }) => cli::run_interactive(no_sample, group_by, &settings),
        Some(Commands::List { entries }) => cli::list::run(&entries, &settings, today),
        Some(Commands::Plot { entries, group_by }) => {
            cli::plot::run(&entries, group_by, &settings, today)
        }
        Some(Commands::History { entries, from, to }) => {
            cli::history::run(&entries, &from, &to, &settings, today)
        }
        Some(Commands::Config {
            sample,
            no_sample,
            group_by,
            log_level,
            log_file,
        }) => cli::config::run(ConfigChanges {
            seed_sample_data: match (sample, no_sample) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            },
            group_by,
            log_level,
            log_file,
        }),
        Some(Commands::Completions { shell }) => cli::completions(shell),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
