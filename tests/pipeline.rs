use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::NaiveDate;
use jobsearch_dashboard::config::DashboardTargets;
use jobsearch_dashboard::data::{DataLoader, LoadError, LOCATION, REQUIRED_COLUMNS};
use jobsearch_dashboard::pipeline;
use jobsearch_dashboard::stats::TipKind;
use rust_xlsxwriter::{Format, Workbook};
use std::io::Cursor;

struct Row {
    date: Cell,
    fit: f64,
    interest: f64,
    status: &'static str,
    location: &'static str,
    source: &'static str,
    alignment: Option<&'static str>,
}

enum Cell {
    Text(&'static str),
    Serial(f64),
    /// Serial written with a date number format, read back as a native date cell.
    Date(f64),
}

fn row(date: Cell, status: &'static str, location: &'static str) -> Row {
    Row {
        date,
        fit: 4.0,
        interest: 5.0,
        status,
        location,
        source: "LinkedIn",
        alignment: Some("Y"),
    }
}

fn workbook_bytes(columns: &[&str], rows: &[Row]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let sheet = workbook.add_worksheet();

    for (c, name) in columns.iter().enumerate() {
        sheet.write_string(0, c as u16, *name).unwrap();
    }

    for (i, r) in rows.iter().enumerate() {
        let line = i as u32 + 1;
        match r.date {
            Cell::Text(text) => sheet.write_string(line, 0, text).unwrap(),
            Cell::Serial(serial) => sheet.write_number(line, 0, serial).unwrap(),
            Cell::Date(serial) => sheet
                .write_number_with_format(line, 0, serial, &date_format)
                .unwrap(),
        };
        sheet.write_number(line, 1, r.fit).unwrap();
        sheet.write_number(line, 2, r.interest).unwrap();
        sheet.write_string(line, 3, r.status).unwrap();
        sheet.write_string(line, 4, r.location).unwrap();
        sheet.write_string(line, 5, r.source).unwrap();
        if let Some(answer) = r.alignment {
            sheet.write_string(line, 6, answer).unwrap();
        }
    }

    workbook.save_to_buffer().unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 6).unwrap()
}

#[test]
fn every_parseable_row_survives_loading() {
    // Serials 45352..=45360 are 2024-03-01..=2024-03-09
    let rows: Vec<Row> = (0..9)
        .map(|d| row(Cell::Serial(45352.0 + d as f64), "Sent", "Remote"))
        .collect();
    let bytes = workbook_bytes(&REQUIRED_COLUMNS, &rows);

    let report = pipeline::analyze_bytes(&bytes, today()).unwrap();

    assert_eq!(report.snapshot.total_applications, 9);
    assert_eq!(report.snapshot.timeline.len(), 9);
}

#[test]
fn date_formatted_cells_load_as_dates() {
    let rows = vec![
        row(Cell::Date(45355.0), "on-going", "Remote"),
        row(Cell::Date(45292.0), "Sent", "Haifa"),
    ];
    let bytes = workbook_bytes(&REQUIRED_COLUMNS, &rows);

    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.clone())).unwrap();
    let range = workbook.worksheet_range_at(0).unwrap().unwrap();
    assert!(matches!(range.get_value((1, 0)), Some(Data::DateTime(_))));

    let table = DataLoader::load_bytes(&bytes).unwrap();
    assert_eq!(
        table.dates(),
        vec![
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        ]
    );
}

#[test]
fn rows_without_dates_are_dropped() {
    let rows = vec![
        row(Cell::Text("2024-03-04"), "on-going", "Remote"),
        row(Cell::Text("sometime"), "Sent", "Haifa"),
        row(Cell::Serial(45355.0), "Rejected", "Tel Aviv"),
    ];
    let bytes = workbook_bytes(&REQUIRED_COLUMNS, &rows);

    let table = DataLoader::load_bytes(&bytes).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(
        table.present_categories(LOCATION),
        vec!["Remote".to_string(), "Tel Aviv".to_string()]
    );
}

#[test]
fn snapshot_from_realistic_tracker() {
    let mut rows = vec![
        row(Cell::Text("2024-03-04"), "on-going", "Remote"),
        row(Cell::Text("2024-03-05"), "Sent", "Remote"),
        row(Cell::Text("2024-03-05"), "Rejected", "Haifa"),
        row(Cell::Text("2024-02-03"), "Sent", "Tel Aviv"),
    ];
    rows[1].alignment = Some("N");
    rows[2].alignment = None;
    rows[3].source = "Referral";
    rows[3].interest = 3.0;
    let bytes = workbook_bytes(&REQUIRED_COLUMNS, &rows);

    let report = pipeline::analyze_bytes(&bytes, today()).unwrap();
    let snapshot = &report.snapshot;

    assert_eq!(snapshot.total_applications, 4);
    assert_eq!(snapshot.avg_fit_score, Some(4.0));
    assert_eq!(snapshot.avg_interest_score, Some(4.5));
    // 4 applications over 31 days
    assert!((snapshot.avg_per_month - 4.0 / (31.0 / 30.0)).abs() < 1e-9);
    assert!((snapshot.alignment.yes_pct - 200.0 / 3.0).abs() < 1e-9);
    assert!((snapshot.alignment.no_pct - 100.0 / 3.0).abs() < 1e-9);
    assert_eq!(
        snapshot.canonical_status_counts(),
        [("on-going", 1), ("Sent", 2), ("Rejected", 1)]
    );
    assert_eq!(snapshot.applications_this_week, 3);
    assert_eq!(snapshot.timeline.len(), 3);

    assert!(snapshot.tips.few_sources);
    assert!(snapshot.tips.few_locations);
    assert!(!snapshot.tips.all_interest_max);
    assert!(!snapshot.tips.never_aligned);
    assert!(!snapshot.tips.many_apps_no_progress);
    assert_eq!(report.tips.len(), 4);
    assert_eq!(report.tips[0].kind, TipKind::FewSources);
}

#[test]
fn header_only_tracker_gives_empty_snapshot() {
    let bytes = workbook_bytes(&REQUIRED_COLUMNS, &[]);
    let report = pipeline::analyze_bytes(&bytes, today()).unwrap();

    assert_eq!(report.snapshot.total_applications, 0);
    assert_eq!(report.snapshot.avg_fit_score, None);
    assert_eq!(report.snapshot.avg_per_month, 0.0);
    assert!(report.snapshot.tips.never_aligned);
}

#[test]
fn missing_columns_are_reported() {
    let columns: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|c| *c != LOCATION)
        .collect();
    let bytes = workbook_bytes(&columns, &[]);

    match pipeline::analyze_bytes(&bytes, today()) {
        Err(LoadError::MissingColumns(missing)) => assert_eq!(missing, vec![LOCATION.to_string()]),
        other => panic!("expected missing column error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn garbage_bytes_fail_to_open() {
    let result = DataLoader::load_bytes(b"definitely not a spreadsheet");
    assert!(matches!(result, Err(LoadError::Spreadsheet(_))));
}

#[test]
fn loads_from_disk_and_exports_json() {
    let dir = tempfile::tempdir().unwrap();
    let workbook_path = dir.path().join("tracker.xlsx");
    let rows = vec![row(Cell::Text("2024-03-04"), "on-going", "Remote")];
    std::fs::write(&workbook_path, workbook_bytes(&REQUIRED_COLUMNS, &rows)).unwrap();

    let report = pipeline::analyze_path(&workbook_path, today()).unwrap();
    assert_eq!(report.source_name.as_deref(), Some("tracker.xlsx"));
    assert_eq!(report.snapshot.total_applications, 1);

    let export_path = dir.path().join("summary.json");
    pipeline::export_report(&export_path, &report, &DashboardTargets::default()).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&export_path).unwrap()).unwrap();
    assert_eq!(json["targets"]["weekly_goal"], 10);
    assert_eq!(json["source_name"], "tracker.xlsx");
    assert_eq!(json["snapshot"]["total_applications"], 1);
    assert_eq!(json["snapshot"]["computed_on"], "2024-03-06");
}

#[test]
fn missing_file_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = pipeline::analyze_path(&dir.path().join("absent.xlsx"), today());
    assert!(result.is_err());
}
