use chrono::NaiveDate;

use crate::error::{Result, TrackerError};
use crate::models::ExpenseRecord;

/// Parse `DD/MM/YYYY`. The text must split on `/` into exactly three numbers.
pub fn parse_dmy(text: &str) -> Result<NaiveDate> {
    let parts: Vec<&str> = text.trim().split('/').collect();
    if parts.len() != 3 {
        return Err(TrackerError::InvalidDateFormat(text.to_string()));
    }
    let bad_format = || TrackerError::InvalidDateFormat(text.to_string());
    let day: u32 = parts[0].trim().parse().map_err(|_| bad_format())?;
    let month: u32 = parts[1].trim().parse().map_err(|_| bad_format())?;
    let year: i32 = parts[2].trim().parse().map_err(|_| bad_format())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| TrackerError::InvalidDate(text.to_string()))
}

/// Records dated strictly after `from` and strictly before `to`.
pub fn filter_by_date_range(
    records: &[ExpenseRecord],
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<&ExpenseRecord> {
    records
        .iter()
        .filter(|r| from < r.date && r.date < to)
        .collect()
}
