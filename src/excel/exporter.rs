//! Workbook saving - in-memory [`Workbook`] → .xlsx on disk
//!
//! Every save rewrites the whole file. There is no cross-process locking; a
//! file opened elsewhere surfaces as a save failure, never a partial write.

use crate::error::{BoardError, BoardResult};
use crate::types::{CellValue, Workbook};
use rust_xlsxwriter::Format;
use std::path::Path;

/// Number format applied to header date cells (08-Jan style).
const DATE_NUM_FORMAT: &str = "dd-mmm";

/// Saves the in-memory workbook model to an .xlsx file.
pub struct WorkbookSaver<'a> {
    workbook: &'a Workbook,
}

impl<'a> WorkbookSaver<'a> {
    pub fn new(workbook: &'a Workbook) -> Self {
        Self { workbook }
    }

    pub fn save(&self, path: &Path) -> BoardResult<()> {
        let mut out = rust_xlsxwriter::Workbook::new();
        let date_format = Format::new().set_num_format(DATE_NUM_FORMAT);

        for sheet in self.workbook.sheets() {
            let worksheet = out.add_worksheet();
            worksheet.set_name(&sheet.name).map_err(|e| {
                BoardError::Configuration(format!("invalid sheet name '{}': {}", sheet.name, e))
            })?;

            for (&(row, col), value) in sheet.iter() {
                let (r, c) = (row - 1, (col - 1) as u16);
                let written = match value {
                    CellValue::Empty => continue,
                    CellValue::Number(n) => worksheet.write_number(r, c, *n),
                    CellValue::Text(s) => worksheet.write_string(r, c, s),
                    CellValue::Bool(b) => worksheet.write_boolean(r, c, *b),
                    CellValue::Date(d) => {
                        worksheet.write_datetime_with_format(r, c, d, &date_format)
                    }
                };
                written.map_err(|e| {
                    BoardError::Resource(format!(
                        "failed to write cell ({}, {}) on '{}': {}",
                        row, col, sheet.name, e
                    ))
                })?;
            }
        }

        out.save(path).map_err(|e| {
            BoardError::Resource(format!("failed to save workbook {}: {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), "workbook saved");
        Ok(())
    }
}
