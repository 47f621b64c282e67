//! Best-effort interpretation of registration date cells.
//!
//! Accepts native spreadsheet dates, Excel serial day numbers and the common
//! textual representations found in hand-edited customer lists. Anything else
//! (summary rows such as `TOTAL`, dashes, blanks) yields `None` and the row is
//! excluded upstream.

use crate::domain::model::CellValue;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

/// Largest serial Excel accepts (9999-12-31).
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%d %b %Y",
    "%d-%b-%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%b %d %Y",
];

// dd/mm/yyyy, mm-dd-yyyy, d.m.yyyy with an optional trailing time
static NUMERIC_YEAR_LAST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(\d{1,2})[/\-.](\d{1,2})[/\-.](\d{4})",
        r"(?:[ T]\d{1,2}:\d{2}(?::\d{2}(?:\.\d+)?)?)?$"
    ))
    .expect("numeric date pattern is valid")
});

/// Interprets a cell as a calendar date, discarding any time of day.
pub fn parse_date(cell: &CellValue) -> Option<NaiveDate> {
    let date = match cell {
        // 小於 1.0 的日期格式值只有時間部分，換算後落在 1899 年
        CellValue::DateTime(dt) => Some(dt.date()).filter(|d| d.year() >= 1900),
        CellValue::Int(serial) => excel_serial_to_date(*serial as f64),
        CellValue::Float(serial) => excel_serial_to_date(*serial),
        CellValue::Text(text) => parse_date_text(text),
        CellValue::Empty | CellValue::Bool(_) | CellValue::Error(_) => None,
    }?;

    // 只接受四位數年份，保證輸出永遠是 YYYY-MM-DD
    (1..=9999).contains(&date.year()).then_some(date)
}

/// Converts a serial day number from the 1900 date system.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || !(1.0..=MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }

    let days = serial.floor() as i64;
    // Excel counts the non-existent 1900-02-29 as day 60.
    let (epoch, days) = match days {
        60 => return None,
        d if d < 60 => (NaiveDate::from_ymd_opt(1899, 12, 31)?, d),
        d => (NaiveDate::from_ymd_opt(1899, 12, 30)?, d),
    };
    epoch.checked_add_signed(Duration::days(days))
}

pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }

    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    {
        return Some(dt.date());
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
    {
        return Some(date);
    }

    parse_numeric_year_last(text)
}

/// Month-first when ambiguous; day-first when the first number cannot be a month.
fn parse_numeric_year_last(text: &str) -> Option<NaiveDate> {
    let caps = NUMERIC_YEAR_LAST.captures(text)?;
    let first: u32 = caps[1].parse().ok()?;
    let second: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;

    NaiveDate::from_ymd_opt(year, first, second)
        .or_else(|| NaiveDate::from_ymd_opt(year, second, first))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_native_datetime_cells_keep_their_date() {
        let dt = ymd(2023, 4, 1).and_hms_opt(13, 45, 0).unwrap();
        assert_eq!(parse_date(&CellValue::DateTime(dt)), Some(ymd(2023, 4, 1)));
    }

    #[test]
    fn test_time_only_cells_are_not_dates() {
        let half_day = ymd(1899, 12, 30).and_hms_opt(12, 0, 0).unwrap();
        assert_eq!(parse_date(&CellValue::DateTime(half_day)), None);

        let early = ymd(1899, 12, 31).and_hms_opt(8, 30, 0).unwrap();
        assert_eq!(parse_date(&CellValue::DateTime(early)), None);

        let first_day = ymd(1900, 1, 1).and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(parse_date(&CellValue::DateTime(first_day)), Some(ymd(1900, 1, 1)));
    }

    #[test]
    fn test_iso_text() {
        assert_eq!(parse_date(&text("2023-04-01")), Some(ymd(2023, 4, 1)));
        assert_eq!(parse_date(&text(" 2023-04-01 ")), Some(ymd(2023, 4, 1)));
        assert_eq!(parse_date(&text("2023-04-01 00:00:00")), Some(ymd(2023, 4, 1)));
        assert_eq!(parse_date(&text("2023-04-01T08:30:00")), Some(ymd(2023, 4, 1)));
        assert_eq!(parse_date(&text("2023-04-01T08:30:00+02:00")), Some(ymd(2023, 4, 1)));
        assert_eq!(parse_date(&text("2023/04/01")), Some(ymd(2023, 4, 1)));
        assert_eq!(parse_date(&text("2023.04.01")), Some(ymd(2023, 4, 1)));
    }

    #[test]
    fn test_year_last_is_month_first_unless_impossible() {
        assert_eq!(parse_date(&text("04/01/2023")), Some(ymd(2023, 4, 1)));
        assert_eq!(parse_date(&text("25/04/2023")), Some(ymd(2023, 4, 25)));
        assert_eq!(parse_date(&text("25-04-2023 10:15")), Some(ymd(2023, 4, 25)));
        assert_eq!(parse_date(&text("31/31/2023")), None);
    }

    #[test]
    fn test_month_names() {
        assert_eq!(parse_date(&text("1 Apr 2023")), Some(ymd(2023, 4, 1)));
        assert_eq!(parse_date(&text("01-Apr-2023")), Some(ymd(2023, 4, 1)));
        assert_eq!(parse_date(&text("April 1, 2023")), Some(ymd(2023, 4, 1)));
        assert_eq!(parse_date(&text("Apr 1 2023")), Some(ymd(2023, 4, 1)));
    }

    #[test]
    fn test_excel_serials() {
        assert_eq!(parse_date(&CellValue::Int(45017)), Some(ymd(2023, 4, 1)));
        assert_eq!(parse_date(&CellValue::Float(45017.75)), Some(ymd(2023, 4, 1)));
        assert_eq!(parse_date(&CellValue::Int(1)), Some(ymd(1900, 1, 1)));
        assert_eq!(parse_date(&CellValue::Int(61)), Some(ymd(1900, 3, 1)));
        assert_eq!(parse_date(&CellValue::Int(2_958_465)), Some(ymd(9999, 12, 31)));
        assert_eq!(parse_date(&CellValue::Int(60)), None);
        assert_eq!(parse_date(&CellValue::Int(0)), None);
        assert_eq!(parse_date(&CellValue::Int(-5)), None);
        assert_eq!(parse_date(&CellValue::Float(f64::NAN)), None);
    }

    #[test]
    fn test_noise_is_rejected() {
        assert_eq!(parse_date(&text("TOTAL")), None);
        assert_eq!(parse_date(&text("—")), None);
        assert_eq!(parse_date(&text("")), None);
        assert_eq!(parse_date(&text("2023-02-30")), None);
        assert_eq!(parse_date(&CellValue::Empty), None);
        assert_eq!(parse_date(&CellValue::Bool(true)), None);
        assert_eq!(parse_date(&CellValue::Error("#N/A".to_string())), None);
    }
}
