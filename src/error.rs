use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrackerError>;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("{} not found", .path.display())]
    MissingInput { path: PathBuf },

    #[error("Column '{column}' not found in {table}")]
    MissingColumn { table: String, column: String },

    #[error("Chart rendering error: {0}")]
    Chart(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl TrackerError {
    /// Wrap any plotters/image error into a chart error
    pub fn chart<E: std::fmt::Display>(err: E) -> Self {
        TrackerError::Chart(err.to_string())
    }
}
