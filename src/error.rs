//! Error taxonomy shared by every part of the crate.
//!
//! Mirrors the kind/when table in the specification this reader implements:
//! each variant below corresponds to exactly one of the documented failure
//! kinds, so callers can match on `Error` instead of parsing messages.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while parsing or querying an AIG.
#[derive(Debug, Error)]
pub enum Error {
    /// Null or contradictory argument passed to an API call.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An allocation failed.
    #[error("out of memory")]
    OutOfMemory,

    /// Malformed input: unexpected character, missing newline in strict
    /// mode, bad literal encoding, or similar grammar violation.
    #[error("illegal sequence at byte {pos}: {message}")]
    IllegalSequence { pos: u64, message: String },

    /// An index or literal fell outside the bounds the format or the
    /// header's counts allow.
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// A decimal literal would not fit in a u64.
    #[error("numeric overflow while parsing a literal near byte {0}")]
    Overflow(u64),

    /// A feature this reader deliberately does not implement (binary
    /// AND-gate decoding, AIGER 1.9 extensions).
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// Strict-mode symbol table parsing found a duplicate name for the
    /// same position.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// `lookup_by_name` found no matching symbol.
    #[error("not found: {0}")]
    NotFound(String),

    /// The underlying byte stream failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn illegal(pos: u64, message: impl Into<String>) -> Self {
        Error::IllegalSequence {
            pos,
            message: message.into(),
        }
    }

    pub(crate) fn out_of_range(message: impl Into<String>) -> Self {
        Error::OutOfRange(message.into())
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }
}
