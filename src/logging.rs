use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::settings::{shellexpand_path, Settings};

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
///
/// The terminal UI owns the screen, so without a log file it runs with no
/// subscriber at all.
pub fn init(settings: &Settings, interactive: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = &settings.log_file {
        let path = shellexpand_path(path);
        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => {
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .try_init();
                return;
            }
            Err(e) => {
                if interactive {
                    return;
                }
                eprintln!("Cannot open log file {path}: {e}");
            }
        }
    }

    if !interactive {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
}
