//! Error types for bruteknn.
//!
//! Errors carry a status code plus a human-readable message. Every fallible
//! operation in the crate returns [`Result`].

use std::fmt;
use std::io;
use thiserror::Error;

/// Error codes reported by the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid argument provided (e.g. `k == 0`).
    InvalidArgument,
    /// Two vectors taking part in one comparison have different lengths.
    DimensionMismatch,
    /// Input file does not exist.
    NotFound,
    /// Input data is corrupt or unparseable.
    DataLoss,
    /// Unexpected failure, usually I/O.
    Internal,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::InvalidArgument => write!(f, "INVALID_ARGUMENT"),
            ErrorCode::DimensionMismatch => write!(f, "DIMENSION_MISMATCH"),
            ErrorCode::NotFound => write!(f, "NOT_FOUND"),
            ErrorCode::DataLoss => write!(f, "DATA_LOSS"),
            ErrorCode::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// Main error type for search and loading operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub struct KnnError {
    code: ErrorCode,
    message: String,
}

impl KnnError {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidArgument, msg)
    }

    /// Create a dimension mismatch error for vectors of length `left` and `right`.
    pub fn dimension_mismatch(left: usize, right: usize) -> Self {
        Self::new(
            ErrorCode::DimensionMismatch,
            format!("vectors have different dimensions: {left} vs {right}"),
        )
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, msg)
    }

    /// Create a data loss error.
    pub fn data_loss(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::DataLoss, msg)
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, msg)
    }

    /// Prefix the message with extra context, keeping the code.
    pub fn context(self, ctx: impl fmt::Display) -> Self {
        Self {
            code: self.code,
            message: format!("{ctx}: {}", self.message),
        }
    }
}

impl fmt::Display for KnnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl From<io::Error> for KnnError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::not_found(err.to_string()),
            io::ErrorKind::InvalidData => Self::data_loss(err.to_string()),
            _ => Self::internal(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for KnnError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Self::internal(err.to_string())
        } else {
            Self::data_loss(err.to_string())
        }
    }
}

/// Result type alias for bruteknn operations.
pub type Result<T> = std::result::Result<T, KnnError>;

/// Extension trait for inspecting a [`Result`] by status code.
pub trait StatusExt<T> {
    /// Get the error, if any.
    fn status(&self) -> Option<&KnnError>;

    /// Get the error code, if any.
    fn code(&self) -> Option<ErrorCode> {
        self.status().map(KnnError::code)
    }
}

impl<T> StatusExt<T> for Result<T> {
    fn status(&self) -> Option<&KnnError> {
        self.as_ref().err()
    }
}
