//! Error types for the cleaning and conversion pipeline

use thiserror::Error;

use crate::config::TargetFormat;

/// Errors that can occur while processing a file
#[derive(Error, Debug)]
pub enum SweepError {
    /// The file extension is outside the supported set (csv, xlsx)
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// A column selection referenced a column that does not exist
    #[error("Column not found: {0}")]
    UnknownColumn(String),

    /// The requested output format has no serializer in this build
    #[error("No {0} writer available in this build; convert to csv instead")]
    WriterUnavailable(TargetFormat),

    /// Serialization to the target format failed
    #[error("Error during conversion: {0}")]
    Conversion(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to parse file: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, SweepError>;
