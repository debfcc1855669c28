use chrono::{DateTime, Local, NaiveDate, Utc};
use std::time::SystemTime;

pub fn format_file_modified(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

/// ISO-8601 calendar date (UTC) used in export file names.
pub fn export_date_stamp() -> String {
    iso_date(Utc::now().date_naive())
}

pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_date_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).expect("valid date");
        assert_eq!(iso_date(date), "2024-03-07");
    }

    #[test]
    fn stamp_has_iso_shape() {
        let stamp = export_date_stamp();
        assert_eq!(stamp.len(), 10);
        assert!(NaiveDate::parse_from_str(&stamp, "%Y-%m-%d").is_ok());
    }
}
