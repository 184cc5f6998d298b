//! Workbook file I/O
//!
//! Every mutation of an on-disk workbook is a full load-mutate-save round
//! trip: load into the in-memory model, patch cells, write the whole file
//! back. Last save wins.

mod exporter;
mod importer;

pub use exporter::WorkbookSaver;
pub use importer::WorkbookLoader;
