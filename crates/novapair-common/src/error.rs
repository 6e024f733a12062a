use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NovapairError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Required file not found: {0}")]
    MissingFile(PathBuf),

    #[error("Required column '{column}' not found in {file}")]
    MissingColumn { file: PathBuf, column: String },

    #[error("Parse error in {file} line {line}: {message}")]
    Parse {
        file: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, NovapairError>;
