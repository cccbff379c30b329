use comfy_table::Table;

use crate::aggregate::GroupBy;
use crate::error::Result;
use crate::settings::{load_settings, save_settings, settings_path, Settings};

/// Requested changes; `None` leaves a setting alone.
#[derive(Debug, Default)]
pub struct ConfigChanges {
    pub seed_sample_data: Option<bool>,
    pub group_by: Option<GroupBy>,
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

impl ConfigChanges {
    pub fn is_empty(&self) -> bool {
        self.seed_sample_data.is_none()
            && self.group_by.is_none()
            && self.log_level.is_none()
            && self.log_file.is_none()
    }

    pub fn apply(self, settings: &mut Settings) {
        if let Some(seed) = self.seed_sample_data {
            settings.seed_sample_data = seed;
        }
        if let Some(group_by) = self.group_by {
            settings.group_by = group_by;
        }
        if let Some(level) = self.log_level {
            settings.log_level = level;
        }
        if let Some(file) = self.log_file {
            settings.log_file = if file.is_empty() { None } else { Some(file) };
        }
    }
}

pub fn settings_table(settings: &Settings) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Setting", "Value"]);
    table.add_row(vec!["seed_sample_data", if settings.seed_sample_data { "yes" } else { "no" }]);
    table.add_row(vec!["group_by", settings.group_by.as_str()]);
    table.add_row(vec!["log_level", settings.log_level.as_str()]);
    table.add_row(vec!["log_file", settings.log_file.as_deref().unwrap_or("(none)")]);
    table
}

pub fn run(changes: ConfigChanges) -> Result<()> {
    let mut settings = load_settings();
    if !changes.is_empty() {
        changes.apply(&mut settings);
        save_settings(&settings)?;
        println!("Saved {}", settings_path().display());
    }
    println!("{}", settings_table(&settings));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_only_touches_requested_settings() {
        let mut settings = Settings::default();
        ConfigChanges {
            group_by: Some(GroupBy::Category),
            ..ConfigChanges::default()
        }
        .apply(&mut settings);
        assert_eq!(settings.group_by, GroupBy::Category);
        assert!(settings.seed_sample_data);
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn test_empty_log_file_turns_logging_off() {
        let mut settings = Settings {
            log_file: Some("/tmp/x.log".into()),
            ..Settings::default()
        };
        ConfigChanges {
            log_file: Some(String::new()),
            ..ConfigChanges::default()
        }
        .apply(&mut settings);
        assert!(settings.log_file.is_none());
    }

    #[test]
    fn test_settings_table_shows_values() {
        let out = settings_table(&Settings::default()).to_string();
        assert!(out.contains("description"));
        assert!(out.contains("(none)"));
        assert!(ConfigChanges::default().is_empty());
    }
}
