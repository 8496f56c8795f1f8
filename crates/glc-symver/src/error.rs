//! Error types for glc-symver

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SymverError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymverError {
    #[error("Invalid glibc version tag: {0}")]
    InvalidVersion(String),

    #[error("Invalid versioned symbol: {0}")]
    InvalidSymbol(String),

    #[error("No glibc baseline known for architecture {0}; set GLC_GLIBC_BASELINE")]
    UnknownArchitecture(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidSetting { key: String, value: String },

    #[error("Symbol is not shimmed: {0}")]
    NotShimmed(String),
}
