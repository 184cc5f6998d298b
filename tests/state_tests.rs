//! End-to-end state transitions: load → select-date → edit-field → save,
//! each save being a full load-mutate-save round trip on the file.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tierboard::core::{ErrorEntry, Metric, RecognitionEntry};
use tierboard::error::BoardError;
use tierboard::excel::{WorkbookLoader, WorkbookSaver};
use tierboard::state::AppState;
use tierboard::types::{CellValue, Sheet, Workbook};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A board workbook as shipped: metric labels in column B, five January
/// header dates in C-G, empty log sheets with header rows.
fn write_fixture(path: &Path) {
    let mut data = Sheet::new("Data");
    for metric in Metric::ALL {
        data.set(metric.row(), 2, CellValue::Text(metric.label().to_string()));
    }
    for day in 1..=5u32 {
        data.set(1, 2 + day, CellValue::Date(date(2024, 1, day)));
    }

    let mut recognitions = Sheet::new("Recognitions");
    recognitions.append_row(&[
        CellValue::Text("First Name".to_string()),
        CellValue::Text("Last Name".to_string()),
        CellValue::Text("Recognition".to_string()),
        CellValue::Text("Date".to_string()),
    ]);

    let mut errors = Sheet::new("Error Tracker");
    errors.append_row(&[
        CellValue::Text("Date".to_string()),
        CellValue::Text("Category".to_string()),
        CellValue::Text("Description".to_string()),
        CellValue::Text("Entered By".to_string()),
    ]);

    let mut workbook = Workbook::new();
    workbook.add_sheet(data);
    workbook.add_sheet(recognitions);
    workbook.add_sheet(errors);
    WorkbookSaver::new(&workbook).save(path).unwrap();
}

fn fixture(temp_dir: &TempDir) -> (PathBuf, PathBuf) {
    let workbook_path = temp_dir.path().join("board.xlsx");
    let config_path = temp_dir.path().join("tierboard.json");
    write_fixture(&workbook_path);
    (workbook_path, config_path)
}

// ═══════════════════════════════════════════════════════════════════════════
// METRIC SUBMISSION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_submit_backfills_and_persists() {
    let temp_dir = TempDir::new().unwrap();
    let (workbook_path, config_path) = fixture(&temp_dir);

    let mut state = AppState::new(config_path);
    state.load(&workbook_path).unwrap();
    state.select_date(date(2024, 1, 8));
    state.edit_field(Metric::TruckFillPercent, "24");
    state.edit_field(Metric::Errors, "0");

    let column = state.save().unwrap();
    assert_eq!(column, 10, "08-Jan lands in column J after backfill");

    // Reload from disk: the mutation must have been durably saved.
    let reloaded = WorkbookLoader::new(&workbook_path).load().unwrap();
    let data = reloaded.sheet("Data").unwrap();
    assert_eq!(data.cell(1, 8), &CellValue::Date(date(2024, 1, 6)));
    assert_eq!(data.cell(1, 9), &CellValue::Date(date(2024, 1, 7)));
    assert_eq!(data.cell(1, 10), &CellValue::Date(date(2024, 1, 8)));
    assert_eq!(data.cell(13, 10), &CellValue::Text("92.31%".to_string()));
    assert_eq!(data.cell(7, 10), &CellValue::Number(0.0));
}

#[test]
fn test_resubmitting_same_date_reuses_the_column() {
    let temp_dir = TempDir::new().unwrap();
    let (workbook_path, config_path) = fixture(&temp_dir);

    let mut state = AppState::new(config_path);
    state.load(&workbook_path).unwrap();
    state.select_date(date(2024, 1, 8));
    state.edit_field(Metric::Huddles, "2");
    let first = state.save().unwrap();

    state.edit_field(Metric::Huddles, "3");
    let second = state.save().unwrap();
    assert_eq!(first, second);

    let reloaded = WorkbookLoader::new(&workbook_path).load().unwrap();
    let data = reloaded.sheet("Data").unwrap();
    assert_eq!(data.max_column(), 10, "No duplicate columns on resubmit");
    assert_eq!(data.cell(12, 10), &CellValue::Number(3.0));
}

#[test]
fn test_edit_field_last_write_wins() {
    let temp_dir = TempDir::new().unwrap();
    let (workbook_path, config_path) = fixture(&temp_dir);

    let mut state = AppState::new(config_path);
    state.load(&workbook_path).unwrap();
    state.edit_field(Metric::Errors, "5");
    state.edit_field(Metric::Errors, "1");

    assert_eq!(state.pending().to_vec(), vec![(Metric::Errors, "1".to_string())]);
}

#[test]
fn test_save_requires_a_selected_date() {
    let temp_dir = TempDir::new().unwrap();
    let (workbook_path, config_path) = fixture(&temp_dir);

    let mut state = AppState::new(config_path);
    state.load(&workbook_path).unwrap();
    state.edit_field(Metric::Errors, "1");

    assert!(matches!(state.save(), Err(BoardError::Validation(_))));
}

#[test]
fn test_save_without_workbook_is_a_resource_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("tierboard.json");

    let mut state = AppState::new(config_path);
    state.select_date(date(2024, 1, 8));
    assert!(matches!(state.save(), Err(BoardError::Resource(_))));
}

#[test]
fn test_missing_data_sheet_is_a_configuration_error() {
    let temp_dir = TempDir::new().unwrap();
    let workbook_path = temp_dir.path().join("odd.xlsx");
    let config_path = temp_dir.path().join("tierboard.json");

    let mut workbook = Workbook::new();
    let mut sheet = Sheet::new("Totally Different");
    sheet.set(1, 1, CellValue::Text("x".to_string()));
    workbook.add_sheet(sheet);
    WorkbookSaver::new(&workbook).save(&workbook_path).unwrap();

    let mut state = AppState::new(config_path);
    state.load(&workbook_path).unwrap();
    state.select_date(date(2024, 1, 8));
    state.edit_field(Metric::Errors, "1");

    assert!(matches!(state.save(), Err(BoardError::Configuration(_))));
}

#[test]
fn test_save_records_last_file_in_config() {
    let temp_dir = TempDir::new().unwrap();
    let (workbook_path, config_path) = fixture(&temp_dir);

    let mut state = AppState::new(config_path.clone());
    state.load(&workbook_path).unwrap();
    state.select_date(date(2024, 1, 5));
    state.edit_field(Metric::Errors, "0");
    state.save().unwrap();

    let config = tierboard::config::AppConfig::load(&config_path);
    assert_eq!(config.last_file, Some(workbook_path));
}

// ═══════════════════════════════════════════════════════════════════════════
// READ-BACK
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_metrics_for_reads_recorded_values() {
    let temp_dir = TempDir::new().unwrap();
    let (workbook_path, config_path) = fixture(&temp_dir);

    let mut state = AppState::new(config_path);
    state.load(&workbook_path).unwrap();
    state.select_date(date(2024, 1, 3));
    state.edit_field(Metric::Productivity, "104");
    state.save().unwrap();

    let values = state.metrics_for(date(2024, 1, 3)).unwrap();
    let productivity = values
        .iter()
        .find(|(m, _)| *m == Metric::Productivity)
        .unwrap();
    assert_eq!(productivity.1, CellValue::Number(104.0));
}

#[test]
fn test_metrics_for_unrecorded_date_is_a_validation_error() {
    let temp_dir = TempDir::new().unwrap();
    let (workbook_path, config_path) = fixture(&temp_dir);

    let mut state = AppState::new(config_path);
    state.load(&workbook_path).unwrap();

    let result = state.metrics_for(date(2023, 6, 1));
    assert!(matches!(result, Err(BoardError::Validation(_))));
}

// ═══════════════════════════════════════════════════════════════════════════
// APPEND-ONLY LOGS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_recognition_appends_and_persists() {
    let temp_dir = TempDir::new().unwrap();
    let (workbook_path, config_path) = fixture(&temp_dir);

    let mut state = AppState::new(config_path);
    state.load(&workbook_path).unwrap();

    let entry = RecognitionEntry {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        recognition: "Caught a mislabeled pallet".to_string(),
        date: "08-Jan".to_string(),
    };
    let row = state.add_recognition(&entry).unwrap();
    assert_eq!(row, 2, "First entry lands right under the header");

    let reloaded = WorkbookLoader::new(&workbook_path).load().unwrap();
    let sheet = reloaded.sheet("Recognitions").unwrap();
    assert_eq!(sheet.cell(2, 1), &CellValue::Text("Ada".to_string()));
    assert_eq!(sheet.cell(2, 3), &CellValue::Text("Caught a mislabeled pallet".to_string()));
}

#[test]
fn test_error_entry_appends_and_persists() {
    let temp_dir = TempDir::new().unwrap();
    let (workbook_path, config_path) = fixture(&temp_dir);

    let mut state = AppState::new(config_path);
    state.load(&workbook_path).unwrap();

    let entry = ErrorEntry {
        date: "08-Jan".to_string(),
        category: "Mispick".to_string(),
        description: "Wrong SKU boxed on line 2".to_string(),
        entered_by: "jh".to_string(),
    };
    let row = state.add_error(&entry).unwrap();
    assert_eq!(row, 2);

    let reloaded = WorkbookLoader::new(&workbook_path).load().unwrap();
    let sheet = reloaded.sheet("Error Tracker").unwrap();
    assert_eq!(sheet.cell(2, 2), &CellValue::Text("Mispick".to_string()));
}

#[test]
fn test_incomplete_recognition_leaves_file_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let (workbook_path, config_path) = fixture(&temp_dir);

    let mut state = AppState::new(config_path);
    state.load(&workbook_path).unwrap();

    let entry = RecognitionEntry {
        first_name: "Ada".to_string(),
        last_name: String::new(),
        recognition: "Great catch".to_string(),
        date: "08-Jan".to_string(),
    };
    assert!(state.add_recognition(&entry).is_err());

    let reloaded = WorkbookLoader::new(&workbook_path).load().unwrap();
    assert_eq!(reloaded.sheet("Recognitions").unwrap().max_row(), 1);
}
