//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O and volume-reader errors, and provides semantic
//! variants for argument validation and batch-fatal conditions.
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Volume reader error: {0}")]
    Volume(#[from] crate::io::VolumeError),

    #[error("Series conversion error: {0}")]
    Convert(#[from] crate::io::ConvertError),

    #[error("Input root does not exist: {path}")]
    MissingInputRoot { path: PathBuf },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Target size must be greater than 0, got: {size}")]
    ZeroSize { size: usize },

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("External error: {0}")]
    External(String),
}

impl Error {
    pub fn external<E: std::fmt::Display>(e: E) -> Self {
        Error::External(e.to_string())
    }
}
