use crate::errors::TrackerError;
use chrono::{Datelike, Duration, Local, NaiveDate};

/// Short weekday labels indexed the same way as the schedule, Sunday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date_key(raw: &str) -> Result<NaiveDate, TrackerError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| TrackerError::InvalidDate(raw.to_string()))
}

/// 0 = Sunday .. 6 = Saturday.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Moves by whole days, staying put at the edges of the representable range.
pub fn shift_days(date: NaiveDate, delta: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(delta)).unwrap_or(date)
}

pub fn format_title(date: NaiveDate) -> String {
    format!(
        "{}, {}",
        WEEKDAY_LABELS[weekday_index(date) as usize],
        date.format("%-d %B %Y")
    )
}
