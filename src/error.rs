use thiserror::Error;

pub type BoardResult<T> = Result<T, BoardError>;

/// The three error kinds every operation can surface, plus the I/O and JSON
/// sources they wrap. All of them reach the user exactly once, at the CLI
/// boundary.
#[derive(Error, Debug)]
pub enum BoardError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Bad user input: non-numeric percentage, missing required field,
    /// unparsable date.
    #[error("Validation error: {0}")]
    Validation(String),

    /// File not found, sheet not found, file locked for writing.
    #[error("Resource error: {0}")]
    Resource(String),

    /// Workbook loaded but the expected structure is absent.
    #[error("Configuration error: {0}")]
    Configuration(String),
}
