//! Error types for term encoding and merging

use std::io;
use thiserror::Error;

/// Errors raised while encoding or combining terms
///
/// All of these are terminal for the operation that raised them: the
/// computation is deterministic, so retrying with the same input fails the
/// same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TermError {
    /// A row contained a character other than `0` or `1`
    #[error("Invalid character '{character}' at position {position} (expected '0' or '1')")]
    InvalidEncoding {
        /// The offending character
        character: char,
        /// Position in the bit string
        position: usize,
    },
    /// Two terms (or a row and an encoder) disagree on bit width
    #[error("Width mismatch: {left} bits vs {right} bits")]
    WidthMismatch {
        /// Width on the left-hand side
        left: usize,
        /// Width on the right-hand side
        right: usize,
    },
    /// Group nesting grew past the configured bound
    #[error("Invalid state: group nesting depth {depth} exceeds maximum {max_depth}")]
    InvalidState {
        /// Depth the merge would have produced
        depth: usize,
        /// Configured maximum
        max_depth: usize,
    },
}

impl From<TermError> for io::Error {
    fn from(err: TermError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, err)
    }
}
