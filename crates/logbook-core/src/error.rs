//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
///
/// The `Validation`, `NotFound`, and `Conflict` messages are returned to
/// clients verbatim, so they carry no internal identifiers.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed or missing client input, rejected before any storage access.
    #[error("{0}")]
    Validation(String),

    /// A referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The operation would violate an integrity policy.
    #[error("{0}")]
    Conflict(String),

    /// A row written by this request could not be read back.
    #[error("integrity error: {0}")]
    Integrity(String),

    /// An insert completed without yielding a stored row.
    #[error("write failure: {0}")]
    WriteFailure(String),

    /// A database or connection-level failure.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
