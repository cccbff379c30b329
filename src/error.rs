use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("That is an invalid input: {0:?}. Make sure to enter a price!")]
    InvalidAmount(String),

    #[error("Invalid date format: {0:?} (expected DD/MM/YYYY)")]
    InvalidDateFormat(String),

    #[error("Not a calendar date: {0}")]
    InvalidDate(String),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Settings error: {0}")]
    Settings(String),
}

impl TrackerError {
    /// Errors the user can fix by editing their input. Everything else is an
    /// environment failure.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TrackerError::InvalidAmount(_)
                | TrackerError::InvalidDateFormat(_)
                | TrackerError::InvalidDate(_)
                | TrackerError::MissingField(_)
                | TrackerError::InvalidEntry(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
