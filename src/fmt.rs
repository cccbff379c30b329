use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Fixed-point amount with exactly two fraction digits: 1234.5 -> "1234.50"
pub fn amount(val: f64) -> String {
    let s = format!("{val:.2}");
    // -0.004 rounds to "-0.00"
    if s == "-0.00" {
        "0.00".to_string()
    } else {
        s
    }
}

pub fn date(d: NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}

/// Share of `whole` as a percentage with one decimal.
pub fn percent(part: f64, whole: f64) -> String {
    if whole <= 0.0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", part / whole * 100.0)
}
