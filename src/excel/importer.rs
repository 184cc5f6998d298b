//! Workbook loading - .xlsx on disk → in-memory [`Workbook`]

use crate::error::{BoardError, BoardResult};
use crate::types::{CellValue, Sheet, Workbook};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::path::{Path, PathBuf};

/// Loads an .xlsx file into the in-memory workbook model.
pub struct WorkbookLoader {
    path: PathBuf,
}

impl WorkbookLoader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load every sheet of the workbook. Cell styling is not carried over;
    /// only values matter to the save round trip.
    pub fn load(&self) -> BoardResult<Workbook> {
        let mut xlsx: Xlsx<_> = open_workbook(&self.path).map_err(|e| {
            BoardError::Resource(format!(
                "failed to open workbook {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let mut workbook = Workbook::new();
        let sheet_names = xlsx.sheet_names().to_vec();
        for sheet_name in sheet_names {
            if let Ok(range) = xlsx.worksheet_range(&sheet_name) {
                workbook.add_sheet(convert_sheet(&sheet_name, &range));
            }
        }

        tracing::debug!(
            path = %self.path.display(),
            sheets = workbook.sheets().len(),
            "workbook loaded"
        );
        Ok(workbook)
    }
}

fn convert_sheet(name: &str, range: &Range<Data>) -> Sheet {
    let mut sheet = Sheet::new(name);
    let (top, left) = range.start().unwrap_or((0, 0));

    for (row, col, data) in range.used_cells() {
        let value = convert_cell(data);
        if !value.is_empty() {
            // calamine coordinates are 0-based and range-relative.
            sheet.set(top + row as u32 + 1, left + col as u32 + 1, value);
        }
    }
    sheet
}

fn convert_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => CellValue::Date(ndt.date()),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => match chrono::NaiveDate::parse_from_str(&s[..10.min(s.len())], "%Y-%m-%d") {
            Ok(d) => CellValue::Date(d),
            Err(_) => CellValue::Text(s.clone()),
        },
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) => CellValue::Empty,
    }
}
