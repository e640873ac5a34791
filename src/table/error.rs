//! Error types for truth tables and the chess state loader

use crate::term::TermError;
use std::io;
use thiserror::Error;

/// Errors raised while loading or building truth tables
#[derive(Debug, Error)]
pub enum TableError {
    /// A line of the state table did not hold exactly 8 integers
    #[error("Malformed input row at line {line}: {reason} ('{content}')")]
    MalformedInputRow {
        /// 1-based line number in the source
        line: usize,
        /// The offending line
        content: String,
        /// What was wrong with it
        reason: String,
    },
    /// The table ended with a before-state that has no after-state
    #[error("State at line {line} has no following move line")]
    UnpairedState {
        /// 1-based line number of the unpaired state
        line: usize,
    },
    /// A rook move distance does not fit its bit field
    #[error("Move distance {distance} does not fit in {bits} bits")]
    DistanceOutOfRange {
        /// The distance moved
        distance: u32,
        /// Width of the distance field
        bits: usize,
    },
    /// A board coordinate does not fit the position field
    #[error("Coordinate {value} does not fit in {bits} bits")]
    CoordinateOutOfRange {
        /// The coordinate value
        value: u8,
        /// Width of the position field
        bits: usize,
    },
    /// Boards larger than 8x8 (or empty boards) are not encoded
    #[error("Unsupported board size {size} (expected 1..=8)")]
    UnsupportedBoardSize {
        /// Requested board size
        size: usize,
    },
    /// A row's key or value width differs from the table's
    #[error(
        "Row '{key} {value}' does not match table widths (inputs: {inputs}, outputs: {outputs})"
    )]
    InconsistentWidth {
        /// Row key
        key: String,
        /// Row value
        value: String,
        /// Expected key width
        inputs: usize,
        /// Expected value width
        outputs: usize,
    },
    /// An output pattern used a character other than `0`, `1`, `.` or `-`
    #[error("Invalid character '{character}' at position {position} in output pattern")]
    InvalidPattern {
        /// The offending character
        character: char,
        /// Position in the pattern
        position: usize,
    },
    /// An output pattern's width differs from the table's output width
    #[error("Output pattern has {pattern} positions but the table has {outputs} output bits")]
    PatternWidthMismatch {
        /// Number of positions in the pattern
        pattern: usize,
        /// Number of output bits in the table
        outputs: usize,
    },
    /// An output bit index is past the last output
    #[error("Output bit {requested} is out of range for {outputs} output bits")]
    OutputOutOfRange {
        /// Requested output bit index
        requested: usize,
        /// Number of output bits in the table
        outputs: usize,
    },
    /// A row failed to encode as a term
    #[error(transparent)]
    Term(#[from] TermError),
    /// Reading the source failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<TableError> for io::Error {
    fn from(err: TableError) -> Self {
        match err {
            TableError::Io(e) => e,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}
