//! Error types for glc-inspect

use thiserror::Error;

pub type Result<T> = std::result::Result<T, InspectError>;

#[derive(Error, Debug)]
pub enum InspectError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported file format: {0}")]
    Unsupported(String),

    #[error("Object parse error: {0}")]
    Object(#[from] object::read::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
