use chrono::NaiveDate;
use std::collections::BTreeMap;

//==============================================================================
// Cell Values
//==============================================================================

/// A single spreadsheet cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
    /// A native date cell (rendered as dd-mmm on export).
    Date(NaiveDate),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Render the value the way it appears in a cell.
    pub fn display(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Text(s) => s.clone(),
            CellValue::Bool(b) => b.to_string().to_uppercase(),
            CellValue::Date(d) => d.format("%d-%b").to_string(),
        }
    }
}

/// Format a number for display, removing unnecessary decimal places.
pub fn format_number(n: f64) -> String {
    let rounded = (n * 1e6).round() / 1e6;
    format!("{:.6}", rounded)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

//==============================================================================
// Sheets
//==============================================================================

/// A named 2-D grid of cells. Addressing is 1-based (row, column), matching
/// the spreadsheet convention used throughout.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    cells: BTreeMap<(u32, u32), CellValue>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
        }
    }

    /// Read a cell; absent cells read as `Empty`.
    pub fn cell(&self, row: u32, col: u32) -> &CellValue {
        self.cells.get(&(row, col)).unwrap_or(&CellValue::Empty)
    }

    /// Write a cell (absolute overwrite).
    pub fn set(&mut self, row: u32, col: u32, value: CellValue) {
        debug_assert!(row >= 1 && col >= 1, "cell addresses are 1-based");
        if value.is_empty() {
            self.cells.remove(&(row, col));
        } else {
            self.cells.insert((row, col), value);
        }
    }

    /// Highest populated row index, 0 when the sheet is empty.
    pub fn max_row(&self) -> u32 {
        self.cells.keys().map(|&(r, _)| r).max().unwrap_or(0)
    }

    /// Highest populated column index, 0 when the sheet is empty.
    pub fn max_column(&self) -> u32 {
        self.cells.keys().map(|&(_, c)| c).max().unwrap_or(0)
    }

    /// Append values as a new row at `max_row + 1`, starting in column 1.
    /// Returns the row that was written.
    pub fn append_row(&mut self, values: &[CellValue]) -> u32 {
        let row = self.max_row() + 1;
        for (i, value) in values.iter().enumerate() {
            self.set(row, i as u32 + 1, value.clone());
        }
        row
    }

    /// Iterate populated cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (&(u32, u32), &CellValue)> {
        self.cells.iter()
    }
}

//==============================================================================
// Workbooks
//==============================================================================

/// An in-memory workbook: an ordered list of sheets. The on-disk file is only
/// touched by the excel module's load and save round trip.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|s| s.name == name)
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}
