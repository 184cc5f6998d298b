//! Core sheet logic: date-column resolution, metric rows, append-only logs.

pub mod dates;
pub mod entry;
pub mod metrics;

pub use dates::{resolve_column, FIRST_DATE_COLUMN, HEADER_ROW};
pub use entry::{
    append_error, append_recognition, write_metrics, ErrorEntry, RecognitionEntry, DATA_SHEET,
    ERROR_TRACKER_SHEET, RECOGNITIONS_SHEET,
};
pub use metrics::{normalize_truck_fill, Metric, TRUCK_FILL_MAX};
