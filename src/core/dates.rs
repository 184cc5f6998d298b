//! Date-series column resolver.
//!
//! Row 1 of the "Data" sheet is a growing time series: one column per
//! calendar day, oldest on the left. Workbooks in the field hold a mix of
//! native date cells and string-formatted dates ("08-Jan", "10/08/2024"),
//! so the scan tolerates both. Resolution appends columns for any missing
//! days between the last recorded date and the requested one.

use crate::error::{BoardError, BoardResult};
use crate::types::{CellValue, Sheet};
use chrono::{Datelike, Days, NaiveDate};
use std::collections::HashSet;

/// Row holding one calendar date per data column.
pub const HEADER_ROW: u32 = 1;

/// Columns 1-2 hold metric labels; dates start in column C.
pub const FIRST_DATE_COLUMN: u32 = 3;

/// Display format for header dates (native cells, dd-mmm number format).
pub const HEADER_DATE_FORMAT: &str = "%d-%b";

/// Parse a header cell as a calendar date.
///
/// Native date cells pass through. Strings are accepted in either of the two
/// formats seen in live workbooks: day-abbreviated-month (year taken from
/// `year_hint`) or month/day/year. Anything else is not a date.
pub fn parse_header_date(cell: &CellValue, year_hint: i32) -> Option<NaiveDate> {
    match cell {
        CellValue::Date(d) => Some(*d),
        CellValue::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            if let Ok(d) = NaiveDate::parse_from_str(&format!("{}-{}", s, year_hint), "%d-%b-%Y") {
                return Some(d);
            }
            NaiveDate::parse_from_str(s, "%m/%d/%Y").ok()
        }
        _ => None,
    }
}

/// Locate the column holding `requested`, backfilling missing days.
///
/// Scans `start_col..=max_column` of row 1. On an exact hit the column is
/// returned untouched. Otherwise one column is appended per calendar day from
/// the day after the latest recorded date through `requested` inclusive (the
/// requested date bounds the backfill, never "today", so future-dated entries
/// get their column too). An empty header anchors at January 1 of the
/// requested year. Days already present are never duplicated.
pub fn resolve_column(
    sheet: &mut Sheet,
    requested: NaiveDate,
    start_col: u32,
) -> BoardResult<u32> {
    let mut last_date: Option<NaiveDate> = None;
    let mut seen: HashSet<NaiveDate> = HashSet::new();
    let mut populated_cells = 0u32;

    for col in start_col..=sheet.max_column() {
        let cell = sheet.cell(HEADER_ROW, col);
        if !cell.is_empty() {
            populated_cells += 1;
        }
        let Some(date) = parse_header_date(cell, requested.year()) else {
            continue;
        };
        if date == requested {
            tracing::debug!(column = col, date = %requested, "date column found");
            return Ok(col);
        }
        seen.insert(date);
        if last_date.map_or(true, |last| date > last) {
            last_date = Some(date);
        }
    }

    let anchor = match last_date {
        Some(d) => d,
        None if populated_cells > 0 => {
            // Cells exist in the header but none parse as a date: the sheet
            // is not laid out the way we expect, refuse to extend it.
            return Err(BoardError::Configuration(format!(
                "sheet '{}' has no usable date anchor in row {}",
                sheet.name, HEADER_ROW
            )));
        }
        None => NaiveDate::from_ymd_opt(requested.year(), 1, 1).ok_or_else(|| {
            BoardError::Configuration(format!(
                "cannot infer a starting date for year {}",
                requested.year()
            ))
        })?,
    };

    if requested <= anchor {
        // A hole in the historical range. The sheets in the field keep such
        // gaps, so extending the row to the right would misorder the series.
        return Err(BoardError::Validation(format!(
            "date {} predates the latest recorded date {} and has no column",
            requested.format(HEADER_DATE_FORMAT),
            anchor.format(HEADER_DATE_FORMAT)
        )));
    }

    let mut resolved = None;
    let mut day = anchor + Days::new(1);
    while day <= requested {
        if !seen.contains(&day) {
            let col = sheet.max_column() + 1;
            sheet.set(HEADER_ROW, col, CellValue::Date(day));
            seen.insert(day);
            if day == requested {
                resolved = Some(col);
            }
        }
        day = day + Days::new(1);
    }

    let col = resolved.ok_or_else(|| {
        BoardError::Configuration(format!(
            "backfill ended without a column for {}",
            requested.format(HEADER_DATE_FORMAT)
        ))
    })?;
    tracing::info!(column = col, date = %requested, "date column appended");
    Ok(col)
}
