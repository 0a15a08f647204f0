//! Spreadsheet Loader Module
//! Reads the job tracker workbook with calamine and builds the ApplicationTable.

use crate::data::table::{
    ApplicationRecord, ApplicationTable, APPLICATION_DATE, CAREER_ALIGNMENT, CURRENT_STATUS,
    FIT_SCORE, INTEREST_LEVEL, LOCATION, REQUIRED_COLUMNS, SOURCE_OF_POSTING,
};
use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use polars::prelude::PolarsError;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to open spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("Spreadsheet contains no worksheet")]
    NoWorksheet,
    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("Failed to build table: {0}")]
    Frame(#[from] PolarsError),
}

static EMPTY_CELL: Data = Data::Empty;

/// Serial of 9999-12-31, the last date a spreadsheet can hold.
const MAX_DATE_SERIAL: f64 = 2_958_465.0;

/// Text layouts accepted for the application date, tried in order.
const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
];

/// Loads a job tracker spreadsheet into an ApplicationTable.
pub struct DataLoader;

impl DataLoader {
    /// Load from a workbook on disk (xlsx, xlsm, xlsb, xls or ods).
    pub fn load_path(path: &Path) -> Result<ApplicationTable, LoadError> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(LoadError::NoWorksheet)??;
        Self::table_from_range(&range)
    }

    /// Load from workbook bytes already in memory.
    pub fn load_bytes(bytes: &[u8]) -> Result<ApplicationTable, LoadError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(LoadError::NoWorksheet)??;
        Self::table_from_range(&range)
    }

    /// Build the table from a worksheet whose first row is the header.
    /// Rows with an unparseable application date are dropped.
    pub fn table_from_range(range: &Range<Data>) -> Result<ApplicationTable, LoadError> {
        let mut rows = range.rows();
        let header: HashMap<String, usize> = rows
            .next()
            .map(|cells| {
                cells
                    .iter()
                    .enumerate()
                    .filter_map(|(i, cell)| match cell {
                        Data::String(name) => Some((name.clone(), i)),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| !header.contains_key(**name))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LoadError::MissingColumns(missing));
        }

        let idx = |name: &str| header[name];
        let date_idx = idx(APPLICATION_DATE);
        let fit_idx = idx(FIT_SCORE);
        let interest_idx = idx(INTEREST_LEVEL);
        let status_idx = idx(CURRENT_STATUS);
        let location_idx = idx(LOCATION);
        let source_idx = idx(SOURCE_OF_POSTING);
        let alignment_idx = idx(CAREER_ALIGNMENT);

        let records: Vec<ApplicationRecord> = rows
            .filter_map(|cells| {
                let cell = |i: usize| cells.get(i).unwrap_or(&EMPTY_CELL);
                let application_date = parse_date_cell(cell(date_idx))?;
                Some(ApplicationRecord {
                    application_date,
                    fit_score: parse_number_cell(cell(fit_idx)),
                    interest_level: parse_number_cell(cell(interest_idx)),
                    status: parse_text_cell(cell(status_idx)),
                    location: parse_text_cell(cell(location_idx)),
                    source: parse_text_cell(cell(source_idx)),
                    alignment: parse_text_cell(cell(alignment_idx)),
                })
            })
            .collect();

        Ok(ApplicationTable::from_records(records)?)
    }
}

/// Convert a spreadsheet date serial (days since 1899-12-30) to a date.
pub fn date_from_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || !(1.0..=MAX_DATE_SERIAL).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::try_days(serial.floor() as i64)?)
}

/// Parse date text; the time of day, if any, is dropped.
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        })
}

fn parse_date_cell(cell: &Data) -> Option<NaiveDate> {
    match cell {
        // as_datetime honours the workbook's 1900/1904 date system
        Data::DateTime(dt) if (1.0..=MAX_DATE_SERIAL).contains(&dt.as_f64()) => {
            dt.as_datetime().map(|d| d.date())
        }
        Data::Float(f) => date_from_serial(*f),
        Data::Int(i) => date_from_serial(*i as f64),
        Data::DateTimeIso(s) | Data::String(s) => parse_date_text(s),
        _ => None,
    }
}

fn parse_number_cell(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) if f.is_finite() => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

fn parse_text_cell(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) if !s.is_empty() => Some(s.clone()),
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{ExcelDateTime, ExcelDateTimeType};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn header() -> Vec<Data> {
        REQUIRED_COLUMNS
            .iter()
            .map(|name| Data::String(name.to_string()))
            .collect()
    }

    fn range_from_rows(rows: Vec<Vec<Data>>) -> Range<Data> {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(1) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in rows.into_iter().enumerate() {
            for (c, value) in row.into_iter().enumerate() {
                range.set_value((r as u32, c as u32), value);
            }
        }
        range
    }

    fn row(date: Data, status: &str) -> Vec<Data> {
        vec![
            date,
            Data::Float(4.0),
            Data::Int(5),
            Data::String(status.to_string()),
            Data::String("Tel Aviv".to_string()),
            Data::String("LinkedIn".to_string()),
            Data::String("Y".to_string()),
        ]
    }

    #[test]
    fn serial_dates_use_spreadsheet_epoch() {
        assert_eq!(date_from_serial(45292.0), Some(ymd(2024, 1, 1)));
        assert_eq!(date_from_serial(45292.75), Some(ymd(2024, 1, 1)));
        assert_eq!(date_from_serial(0.0), None);
        assert_eq!(date_from_serial(f64::NAN), None);
    }

    #[test]
    fn out_of_range_serials_are_not_dates() {
        assert_eq!(date_from_serial(1e15), None);
        assert_eq!(date_from_serial(i64::MAX as f64), None);
        assert_eq!(date_from_serial(MAX_DATE_SERIAL), Some(ymd(9999, 12, 31)));
        assert_eq!(parse_date_cell(&Data::Int(i64::MAX)), None);
    }

    #[test]
    fn huge_numeric_date_drops_the_row() {
        let range = range_from_rows(vec![
            header(),
            row(Data::Float(1e15), "Sent"),
            row(Data::Int(i64::MAX), "Sent"),
            row(Data::Float(45292.0), "on-going"),
        ]);

        let table = DataLoader::table_from_range(&range).unwrap();
        assert_eq!(table.dates(), vec![ymd(2024, 1, 1)]);
    }

    #[test]
    fn native_dates_follow_workbook_epoch() {
        let in_1900 = Data::DateTime(ExcelDateTime::new(45292.0, ExcelDateTimeType::DateTime, false));
        let in_1904 = Data::DateTime(ExcelDateTime::new(43830.0, ExcelDateTimeType::DateTime, true));

        assert_eq!(parse_date_cell(&in_1900), Some(ymd(2024, 1, 1)));
        assert_eq!(parse_date_cell(&in_1904), Some(ymd(2024, 1, 1)));
    }

    #[test]
    fn parses_common_date_text() {
        assert_eq!(parse_date_text("2024-03-05"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date_text("2024-03-05 14:30:00"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date_text("2024-03-05 14:30:00.123"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date_text("2024-03-05T14:30:00.5"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date_text("03/05/2024"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date_text("05.03.2024"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date_text("March 5, 2024"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date_text("2024-03-05T09:00:00+02:00"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date_text("soon"), None);
        assert_eq!(parse_date_text("  "), None);
    }

    #[test]
    fn drops_rows_with_unparseable_dates() {
        let range = range_from_rows(vec![
            header(),
            row(Data::String("2024-02-01".to_string()), "Sent"),
            row(Data::String("not a date".to_string()), "Sent"),
            row(Data::Empty, "Rejected"),
            row(Data::Float(45323.0), "on-going"),
        ]);

        let table = DataLoader::table_from_range(&range).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.dates(), vec![ymd(2024, 2, 1), ymd(2024, 2, 1)]);
        assert_eq!(
            table.present_categories(CURRENT_STATUS),
            vec!["Sent".to_string(), "on-going".to_string()]
        );
        assert_eq!(table.numeric_values(INTEREST_LEVEL), vec![5.0, 5.0]);
    }

    #[test]
    fn reports_every_missing_column() {
        let mut names = header();
        names.retain(|cell| {
            !matches!(cell, Data::String(s) if s == LOCATION || s == CAREER_ALIGNMENT)
        });
        let range = range_from_rows(vec![names]);

        match DataLoader::table_from_range(&range) {
            Err(LoadError::MissingColumns(missing)) => {
                assert_eq!(missing, vec![LOCATION.to_string(), CAREER_ALIGNMENT.to_string()]);
            }
            other => panic!("expected missing columns, got {:?}", other),
        }
    }

    #[test]
    fn column_names_are_case_sensitive() {
        let mut names = header();
        names[0] = Data::String("application date".to_string());
        let range = range_from_rows(vec![names]);

        assert!(matches!(
            DataLoader::table_from_range(&range),
            Err(LoadError::MissingColumns(m)) if m == vec![APPLICATION_DATE.to_string()]
        ));
    }

    #[test]
    fn cells_coerce_to_numbers_and_text() {
        assert_eq!(parse_number_cell(&Data::String(" 3 ".to_string())), Some(3.0));
        assert_eq!(parse_number_cell(&Data::String("high".to_string())), None);
        assert_eq!(parse_number_cell(&Data::Empty), None);
        assert_eq!(parse_text_cell(&Data::Empty), None);
        assert_eq!(parse_text_cell(&Data::Int(7)), Some("7".to_string()));
    }
}
