use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset has no header row")]
    MissingHeader,

    #[error("dataset contains no records")]
    Empty,
}

pub type Result<T> = std::result::Result<T, StoreError>;
