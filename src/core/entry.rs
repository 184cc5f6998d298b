//! Cell writers: the per-day metric column and the append-only log sheets.

use crate::core::metrics::{normalize_truck_fill, Metric};
use crate::error::{BoardError, BoardResult};
use crate::types::{CellValue, Sheet};

pub const DATA_SHEET: &str = "Data";
pub const RECOGNITIONS_SHEET: &str = "Recognitions";
pub const ERROR_TRACKER_SHEET: &str = "Error Tracker";

/// Write entered metric values into their fixed rows at the resolved date
/// column. Values are validated up front, so a bad truck-fill entry leaves
/// the sheet untouched. Empty values are skipped, not blanked.
pub fn write_metrics(
    sheet: &mut Sheet,
    column: u32,
    values: &[(Metric, String)],
) -> BoardResult<()> {
    let mut staged: Vec<(u32, CellValue)> = Vec::with_capacity(values.len());

    for (metric, raw) in values {
        if raw.trim().is_empty() {
            continue;
        }
        let cell = match metric {
            Metric::TruckFillPercent => CellValue::Text(normalize_truck_fill(raw)?),
            _ => coerce(raw),
        };
        staged.push((metric.row(), cell));
    }

    for (row, cell) in staged {
        sheet.set(row, column, cell);
    }
    Ok(())
}

/// Entries are opaque strings in the workbook; numbers are stored as numbers
/// so the dashboard formulas keep working.
fn coerce(raw: &str) -> CellValue {
    match raw.trim().parse::<f64>() {
        Ok(n) => CellValue::Number(n),
        Err(_) => CellValue::Text(raw.trim().to_string()),
    }
}

//==============================================================================
// Append-only log sheets
//==============================================================================

/// One row of the "Recognitions" sheet.
#[derive(Debug, Clone)]
pub struct RecognitionEntry {
    pub first_name: String,
    pub last_name: String,
    pub recognition: String,
    pub date: String,
}

impl RecognitionEntry {
    fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("First Name", &self.first_name),
            ("Last Name", &self.last_name),
            ("Recognition", &self.recognition),
            ("Date", &self.date),
        ]
    }
}

/// One row of the "Error Tracker" sheet.
#[derive(Debug, Clone)]
pub struct ErrorEntry {
    pub date: String,
    pub category: String,
    pub description: String,
    pub entered_by: String,
}

impl ErrorEntry {
    fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("Date", &self.date),
            ("Category", &self.category),
            ("Description", &self.description),
            ("Entered By", &self.entered_by),
        ]
    }
}

/// Append a recognition to the first empty row. Returns the row written.
pub fn append_recognition(sheet: &mut Sheet, entry: &RecognitionEntry) -> BoardResult<u32> {
    append_fields(sheet, &entry.fields())
}

/// Append an error-tracker entry to the first empty row. Returns the row
/// written.
pub fn append_error(sheet: &mut Sheet, entry: &ErrorEntry) -> BoardResult<u32> {
    append_fields(sheet, &entry.fields())
}

fn append_fields(sheet: &mut Sheet, fields: &[(&str, &str)]) -> BoardResult<u32> {
    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(BoardError::Validation(format!(
                "missing required field '{}'",
                name
            )));
        }
    }
    let values: Vec<CellValue> = fields
        .iter()
        .map(|(_, v)| CellValue::Text(v.trim().to_string()))
        .collect();
    let row = sheet.append_row(&values);
    tracing::debug!(sheet = %sheet.name, row, "row appended");
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn recognition() -> RecognitionEntry {
        RecognitionEntry {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            recognition: "Caught a mislabeled pallet".to_string(),
            date: "08-Jan".to_string(),
        }
    }

    #[test]
    fn test_write_metrics_lands_on_fixed_rows() {
        let mut sheet = Sheet::new(DATA_SHEET);
        write_metrics(
            &mut sheet,
            5,
            &[
                (Metric::DaysWithoutIncident, "12".to_string()),
                (Metric::Errors, "0".to_string()),
                (Metric::CostSavings, "none".to_string()),
            ],
        )
        .unwrap();

        assert_eq!(sheet.cell(2, 5), &CellValue::Number(12.0));
        assert_eq!(sheet.cell(7, 5), &CellValue::Number(0.0));
        assert_eq!(sheet.cell(16, 5), &CellValue::Text("none".to_string()));
    }

    #[test]
    fn test_write_metrics_normalizes_truck_fill() {
        let mut sheet = Sheet::new(DATA_SHEET);
        write_metrics(&mut sheet, 3, &[(Metric::TruckFillPercent, "24".to_string())]).unwrap();
        assert_eq!(sheet.cell(13, 3), &CellValue::Text("92.31%".to_string()));
    }

    #[test]
    fn test_write_metrics_bad_truck_fill_writes_nothing() {
        let mut sheet = Sheet::new(DATA_SHEET);
        let result = write_metrics(
            &mut sheet,
            3,
            &[
                (Metric::Errors, "2".to_string()),
                (Metric::TruckFillPercent, "forty".to_string()),
            ],
        );

        assert!(matches!(result, Err(BoardError::Validation(_))));
        assert_eq!(sheet.cell(7, 3), &CellValue::Empty);
    }

    #[test]
    fn test_write_metrics_skips_empty_values() {
        let mut sheet = Sheet::new(DATA_SHEET);
        sheet.set(12, 4, CellValue::Number(3.0));
        write_metrics(&mut sheet, 4, &[(Metric::Huddles, "  ".to_string())]).unwrap();
        assert_eq!(sheet.cell(12, 4), &CellValue::Number(3.0));
    }

    #[test]
    fn test_append_recognition() {
        let mut sheet = Sheet::new(RECOGNITIONS_SHEET);
        sheet.append_row(&[
            CellValue::Text("First Name".to_string()),
            CellValue::Text("Last Name".to_string()),
            CellValue::Text("Recognition".to_string()),
            CellValue::Text("Date".to_string()),
        ]);

        let row = append_recognition(&mut sheet, &recognition()).unwrap();
        assert_eq!(row, 2);
        assert_eq!(sheet.cell(2, 1), &CellValue::Text("Ada".to_string()));
        assert_eq!(sheet.cell(2, 4), &CellValue::Text("08-Jan".to_string()));
    }

    #[test]
    fn test_consecutive_appends_hit_consecutive_rows() {
        let mut sheet = Sheet::new(RECOGNITIONS_SHEET);
        let first = append_recognition(&mut sheet, &recognition()).unwrap();
        let second = append_recognition(&mut sheet, &recognition()).unwrap();
        assert_eq!(second, first + 1);
    }

    #[test]
    fn test_missing_required_field_appends_no_row() {
        let mut sheet = Sheet::new(RECOGNITIONS_SHEET);
        let mut entry = recognition();
        entry.recognition = String::new();

        let err = append_recognition(&mut sheet, &entry).unwrap_err();
        match err {
            BoardError::Validation(msg) => assert!(msg.contains("Recognition")),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(sheet.max_row(), 0);
    }

    #[test]
    fn test_error_tracker_requires_every_field() {
        let mut sheet = Sheet::new(ERROR_TRACKER_SHEET);
        let entry = ErrorEntry {
            date: "08-Jan".to_string(),
            category: "Mispick".to_string(),
            description: String::new(),
            entered_by: "jh".to_string(),
        };

        assert!(append_error(&mut sheet, &entry).is_err());
        assert_eq!(sheet.max_row(), 0);
    }
}
