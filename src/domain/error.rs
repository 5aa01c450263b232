//! Error types for the userdeck dashboard.
//!
//! This module defines the centralized error type [`DirectoryError`] and a type alias
//! [`Result`] used throughout the crate. Gateway failures are classified into the four
//! directory categories (network, decode, validation, not found); the remaining variants
//! cover configuration, theming and local I/O.

use thiserror::Error;

/// The main error type for userdeck operations.
///
/// Gateway implementations map every failure into one of the first four variants so
/// the worker can surface them uniformly as an `OperationFailed` transition. The
/// `Display` output is the message shown to the user.
///
/// # Examples
///
/// ```
/// use userdeck::domain::DirectoryError;
///
/// let err = DirectoryError::NotFound("42".to_string());
/// assert_eq!(err.to_string(), "User 42 not found");
/// ```
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Transport failure: connection refused, timeout, unexpected HTTP status.
    #[error("Network error: {0}")]
    Network(String),

    /// The response body could not be decoded into the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The backend (or local validation) rejected the submitted input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// No user with the given identifier exists.
    #[error("User {0} not found")]
    NotFound(String),

    /// Configuration is invalid or could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Filesystem or terminal I/O failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DirectoryError {
    /// Short, stable name of the error category, used as a tracing field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Decode(_) => "decode",
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::Config(_) => "config",
            Self::Theme(_) => "theme",
            Self::Io(_) => "io",
        }
    }
}

impl From<serde_json::Error> for DirectoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// A specialized `Result` type for userdeck operations.
pub type Result<T> = std::result::Result<T, DirectoryError>;
