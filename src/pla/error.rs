//! Error types for PLA format parsing and validation

use crate::table::TableError;
use std::io;
use thiserror::Error;

/// Errors related to PLA format parsing and validation
///
/// These errors occur when reading PLA text whose rows cannot become truth
/// table rows. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PLAError {
    /// PLA file is missing the .i (inputs) directive
    #[error("PLA file missing .i directive and no rows to infer from")]
    MissingInputDirective,
    /// PLA file is missing the .o (outputs) directive
    #[error("PLA file missing .o directive and no rows to infer from")]
    MissingOutputDirective,
    /// Invalid value in .i directive
    #[error("Invalid .i directive value: '{value}'")]
    InvalidInputDirective {
        /// The invalid value string
        value: String,
    },
    /// Invalid value in .o directive
    #[error("Invalid .o directive value: '{value}'")]
    InvalidOutputDirective {
        /// The invalid value string
        value: String,
    },
    /// A .type other than `f` or `fr`
    #[error("Unsupported PLA type '{value}' (expected f or fr)")]
    UnsupportedType {
        /// The declared type
        value: String,
    },
    /// Invalid character in the input part of a row
    ///
    /// Input don't-cares (`-`) are rejected: every row must be fully specified.
    #[error("Invalid input character '{character}' at line {line}, position {position}")]
    InvalidInputCharacter {
        /// The invalid character
        character: char,
        /// Line of the row
        line: usize,
        /// Position in the input string
        position: usize,
    },
    /// Invalid character in the output part of a row
    #[error("Invalid output character '{character}' at line {line}, position {position}")]
    InvalidOutputCharacter {
        /// The invalid character
        character: char,
        /// Line of the row
        line: usize,
        /// Position in the output string
        position: usize,
    },
    /// A row is not an input part and an output part separated by whitespace
    #[error("Malformed row at line {line}: '{content}'")]
    MalformedRow {
        /// Line of the row
        line: usize,
        /// The offending line
        content: String,
    },
    /// Row dimensions don't match declared dimensions
    #[error(
        "Row at line {line} (inputs: {actual_inputs}, outputs: {actual_outputs}) doesn't match \
         declared dimensions (inputs: {expected_inputs}, outputs: {expected_outputs})"
    )]
    RowDimensionMismatch {
        /// Line of the row
        line: usize,
        /// Expected number of inputs
        expected_inputs: usize,
        /// Actual number of inputs in the row
        actual_inputs: usize,
        /// Expected number of outputs
        expected_outputs: usize,
        /// Actual number of outputs in the row
        actual_outputs: usize,
    },
    /// Label count doesn't match dimension count
    #[error("{label_type} label count ({actual}) doesn't match {label_type} count ({expected})")]
    LabelCountMismatch {
        /// Type of label ("input" or "output")
        label_type: &'static str,
        /// Expected number of labels
        expected: usize,
        /// Actual number of labels provided
        actual: usize,
    },
}

impl From<PLAError> for io::Error {
    fn from(err: PLAError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}

/// Errors that can occur when reading PLA format data
///
/// This error type is returned by the `PLAReader::from_pla_*` methods.
#[derive(Debug, Error)]
pub enum PLAReadError {
    /// PLA format error
    #[error("PLA format error: {0}")]
    PLA(#[from] PLAError),
    /// The parsed rows did not form a valid table
    #[error("PLA table error: {0}")]
    Table(#[from] TableError),
    /// IO error during reading
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<PLAReadError> for io::Error {
    fn from(err: PLAReadError) -> Self {
        match err {
            PLAReadError::Io(e) => e,
            PLAReadError::PLA(e) => e.into(),
            PLAReadError::Table(e) => e.into(),
        }
    }
}

/// Errors that can occur when writing PLA format data
///
/// This error type is returned by the `PLAWriter::to_pla_*` methods.
#[derive(Debug, Error)]
pub enum PLAWriteError {
    /// IO error during writing
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<PLAWriteError> for io::Error {
    fn from(err: PLAWriteError) -> Self {
        match err {
            PLAWriteError::Io(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pla_error_missing_input_directive() {
        let msg = PLAError::MissingInputDirective.to_string();
        assert!(msg.contains("missing .i directive"));
    }

    #[test]
    fn test_pla_error_invalid_input_character() {
        let err = PLAError::InvalidInputCharacter {
            character: '-',
            line: 5,
            position: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("'-'"));
        assert!(msg.contains("line 5"));
        assert!(msg.contains("position 3"));
    }

    #[test]
    fn test_pla_error_row_dimension_mismatch() {
        let err = PLAError::RowDimensionMismatch {
            line: 7,
            expected_inputs: 3,
            actual_inputs: 2,
            expected_outputs: 1,
            actual_outputs: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("inputs: 2"));
        assert!(msg.contains("inputs: 3"));
    }

    #[test]
    fn test_label_count_mismatch_message() {
        let err = PLAError::LabelCountMismatch {
            label_type: "input",
            expected: 4,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "input label count (3) doesn't match input count (4)"
        );
    }

    #[test]
    fn test_pla_read_error_conversions() {
        let read_err: PLAReadError = PLAError::MissingInputDirective.into();
        assert!(matches!(read_err, PLAReadError::PLA(_)));

        let read_err: PLAReadError =
            io::Error::new(io::ErrorKind::NotFound, "file not found").into();
        assert!(matches!(read_err, PLAReadError::Io(_)));
    }

    #[test]
    fn test_pla_read_error_to_io_error_preserves_io_error() {
        let read_err = PLAReadError::Io(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        let io_err: io::Error = read_err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
        assert_eq!(io_err.to_string(), "file not found");

        let read_err = PLAReadError::PLA(PLAError::MissingOutputDirective);
        let io_err: io::Error = read_err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_pla_write_error_to_io_error() {
        let write_err: PLAWriteError =
            io::Error::new(io::ErrorKind::PermissionDenied, "permission denied").into();
        let io_err: io::Error = write_err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::PermissionDenied);
    }
}
