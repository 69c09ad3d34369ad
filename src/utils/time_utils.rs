use chrono::{Local, NaiveDate};

use crate::config::EXPORT_TIMESTAMP_FORMAT;

pub struct TimeUtils;

impl TimeUtils {
    pub const STANDARD_DATE_FORMAT: &str = "%Y-%m-%d";
    // const STANDARD_DATE_FORMAT: &str = "%d/%m/%Y";

    /// Whole calendar days from `earlier` to `later` (negative if reversed)
    pub fn days_between(earlier: NaiveDate, later: NaiveDate) -> i64 {
        (later - earlier).num_days()
    }

    pub fn format_date(date: NaiveDate) -> String {
        date.format(Self::STANDARD_DATE_FORMAT).to_string()
    }
}

/// Local wall-clock stamp used in export filenames
pub fn export_timestamp() -> String {
    Local::now().format(EXPORT_TIMESTAMP_FORMAT).to_string()
}
