//! Loader errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Snapshot '{0}' has no data rows")]
    NoData(String),

    #[error("Invalid value '{value}' in column {column}")]
    InvalidValue { column: String, value: String },

    #[error("Snapshot '{label}' has no {ladder} levels")]
    EmptySide { label: String, ladder: &'static str },

    #[error("Snapshot root '{0}' is not a directory")]
    InvalidRoot(String),
}

pub type Result<T> = std::result::Result<T, Error>;
