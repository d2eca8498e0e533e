use thiserror::Error;

/// Errors returned by clustering operations in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Caller-owned assignment buffer does not match the input length.
    #[error("assignment buffer length mismatch: expected {expected}, found {found}")]
    AssignmentLengthMismatch {
        /// Number of input elements.
        expected: usize,
        /// Length of the buffer that was passed.
        found: usize,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
