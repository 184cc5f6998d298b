//! Tierboard - daily tier-board workbook engine
//!
//! This library maintains an operations tier-board workbook: a "Data" sheet
//! whose header row grows one date column per day, fixed metric rows beneath
//! it, and append-only log sheets for recognitions and tracked errors.
//!
//! # Features
//!
//! - Date-series column resolution with calendar backfill
//! - Fixed metric-row mapping as a closed enum (rows 2-18)
//! - Truck-fill normalization (carton count → percent string)
//! - Append-only Recognitions / Error Tracker writers
//! - Versioned JSON config with a days-without-incident counter
//!
//! # Example
//!
//! ```no_run
//! use tierboard::core::{resolve_column, write_metrics, Metric, FIRST_DATE_COLUMN};
//! use tierboard::excel::{WorkbookLoader, WorkbookSaver};
//! use chrono::NaiveDate;
//! use std::path::Path;
//!
//! let path = Path::new("Boxing Tier.xlsx");
//! let mut workbook = WorkbookLoader::new(path).load()?;
//! let sheet = workbook.sheet_mut("Data").expect("Data sheet");
//! let date = NaiveDate::from_ymd_opt(2024, 1, 8).expect("valid date");
//!
//! let column = resolve_column(sheet, date, FIRST_DATE_COLUMN)?;
//! write_metrics(sheet, column, &[(Metric::TruckFillPercent, "24".to_string())])?;
//! WorkbookSaver::new(&workbook).save(path)?;
//! # Ok::<(), tierboard::error::BoardError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod state;
pub mod types;

// Re-export commonly used types
pub use error::{BoardError, BoardResult};
pub use types::{CellValue, Sheet, Workbook};
