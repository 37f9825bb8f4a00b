//! Common error types for HSA

use thiserror::Error;

/// Common result type for HSA operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the HSA crates
///
/// The parsing and search engines never return these: abnormal input degrades
/// to empty results. Errors only arise while building rule tables or loading
/// configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML config file could not be parsed
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Correction rule or date grammar failed to compile
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
