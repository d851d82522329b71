use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("source table not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("DBF error: {0}")]
    Dbf(String),

    #[error("Unknown text encoding: {0}")]
    UnknownEncoding(String),

    #[error("Invalid delimiter: {0:?} (expected a single byte)")]
    InvalidDelimiter(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<dbase::Error> for ExportError {
    fn from(err: dbase::Error) -> Self {
        ExportError::Dbf(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
