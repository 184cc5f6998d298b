//! Explicit application state.
//!
//! The old forms mutated workbook handles and field bindings from dozens of
//! callbacks. Here every UI event is a discrete transition on one state
//! struct: load, select-date, edit-field, save. The CLI is the only place
//! errors become user-facing messages.

use crate::config::AppConfig;
use crate::core::{
    append_error, append_recognition, dates, resolve_column, write_metrics, ErrorEntry, Metric,
    RecognitionEntry, DATA_SHEET, ERROR_TRACKER_SHEET, FIRST_DATE_COLUMN, RECOGNITIONS_SHEET,
};
use crate::error::{BoardError, BoardResult};
use crate::excel::{WorkbookLoader, WorkbookSaver};
use crate::types::{CellValue, Workbook};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub struct AppState {
    config_path: PathBuf,
    pub config: AppConfig,
    workbook_path: Option<PathBuf>,
    workbook: Option<Workbook>,
    selected_date: Option<NaiveDate>,
    pending: Vec<(Metric, String)>,
}

impl AppState {
    pub fn new(config_path: PathBuf) -> Self {
        let config = AppConfig::load(&config_path);
        Self {
            config_path,
            config,
            workbook_path: None,
            workbook: None,
            selected_date: None,
            pending: Vec::new(),
        }
    }

    /// Load a workbook from disk, replacing any previously loaded one.
    /// Pending edits are dropped; they belonged to the old workbook.
    pub fn load(&mut self, path: &Path) -> BoardResult<()> {
        let workbook = WorkbookLoader::new(path).load()?;
        self.workbook = Some(workbook);
        self.workbook_path = Some(path.to_path_buf());
        self.pending.clear();
        Ok(())
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = Some(date);
    }

    /// Stage a metric value for the next save. A later edit of the same
    /// metric replaces the earlier one.
    pub fn edit_field(&mut self, metric: Metric, value: impl Into<String>) {
        let value = value.into();
        if let Some(slot) = self.pending.iter_mut().find(|(m, _)| *m == metric) {
            slot.1 = value;
        } else {
            self.pending.push((metric, value));
        }
    }

    pub fn pending(&self) -> &[(Metric, String)] {
        &self.pending
    }

    /// Commit pending metric edits: resolve the date column (backfilling
    /// missing days), write each value into its fixed row, save the file.
    /// Returns the resolved column. Nothing is durable until the save
    /// succeeds; on failure the next save retries the whole mutation.
    pub fn save(&mut self) -> BoardResult<u32> {
        let date = self
            .selected_date
            .ok_or_else(|| BoardError::Validation("no date selected".to_string()))?;
        let path = self.require_path()?;

        let workbook = self
            .workbook
            .as_mut()
            .ok_or_else(|| BoardError::Resource("no workbook loaded".to_string()))?;
        let sheet = workbook.sheet_mut(DATA_SHEET).ok_or_else(|| {
            BoardError::Configuration(format!("workbook has no '{}' sheet", DATA_SHEET))
        })?;

        let column = resolve_column(sheet, date, FIRST_DATE_COLUMN)?;
        write_metrics(sheet, column, &self.pending)?;

        WorkbookSaver::new(workbook).save(&path)?;
        self.pending.clear();
        self.remember_last_file(&path)?;

        tracing::info!(path = %path.display(), column, date = %date, "metrics saved");
        Ok(column)
    }

    /// Append a recognition row and save. Returns the row written.
    pub fn add_recognition(&mut self, entry: &RecognitionEntry) -> BoardResult<u32> {
        let path = self.require_path()?;
        let workbook = self
            .workbook
            .as_mut()
            .ok_or_else(|| BoardError::Resource("no workbook loaded".to_string()))?;
        let sheet = workbook.sheet_mut(RECOGNITIONS_SHEET).ok_or_else(|| {
            BoardError::Configuration(format!("workbook has no '{}' sheet", RECOGNITIONS_SHEET))
        })?;

        let row = append_recognition(sheet, entry)?;
        WorkbookSaver::new(workbook).save(&path)?;
        self.remember_last_file(&path)?;
        Ok(row)
    }

    /// Append an error-tracker row and save. Returns the row written.
    pub fn add_error(&mut self, entry: &ErrorEntry) -> BoardResult<u32> {
        let path = self.require_path()?;
        let workbook = self
            .workbook
            .as_mut()
            .ok_or_else(|| BoardError::Resource("no workbook loaded".to_string()))?;
        let sheet = workbook.sheet_mut(ERROR_TRACKER_SHEET).ok_or_else(|| {
            BoardError::Configuration(format!("workbook has no '{}' sheet", ERROR_TRACKER_SHEET))
        })?;

        let row = append_error(sheet, entry)?;
        WorkbookSaver::new(workbook).save(&path)?;
        self.remember_last_file(&path)?;
        Ok(row)
    }

    /// Read the recorded metric values for a date. Read-only: no backfill,
    /// no save. A date with no column is a validation error.
    pub fn metrics_for(&self, date: NaiveDate) -> BoardResult<Vec<(Metric, CellValue)>> {
        let workbook = self
            .workbook
            .as_ref()
            .ok_or_else(|| BoardError::Resource("no workbook loaded".to_string()))?;
        let sheet = workbook.sheet(DATA_SHEET).ok_or_else(|| {
            BoardError::Configuration(format!("workbook has no '{}' sheet", DATA_SHEET))
        })?;

        let mut column = None;
        for col in FIRST_DATE_COLUMN..=sheet.max_column() {
            if dates::parse_header_date(sheet.cell(dates::HEADER_ROW, col), chrono::Datelike::year(&date))
                == Some(date)
            {
                column = Some(col);
                break;
            }
        }
        let column = column.ok_or_else(|| {
            BoardError::Validation(format!(
                "no column recorded for {}",
                date.format(dates::HEADER_DATE_FORMAT)
            ))
        })?;

        Ok(Metric::ALL
            .iter()
            .map(|&m| (m, sheet.cell(m.row(), column).clone()))
            .collect())
    }

    /// Persist the config after updating `last_file`.
    fn remember_last_file(&mut self, path: &Path) -> BoardResult<()> {
        self.config.last_file = Some(path.to_path_buf());
        self.config.save(&self.config_path)
    }

    /// Persist the config as-is (counter updates and the like).
    pub fn save_config(&self) -> BoardResult<()> {
        self.config.save(&self.config_path)
    }

    fn require_path(&self) -> BoardResult<PathBuf> {
        self.workbook_path
            .clone()
            .ok_or_else(|| BoardError::Resource("no workbook loaded".to_string()))
    }
}
