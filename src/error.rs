//! Top-level error type
//!
//! Each layer has its own error enum ([`TermError`], [`TableError`],
//! [`PLAReadError`], [`PLAWriteError`]). [`MinimizeError`] collects them for
//! callers that drive the whole pipeline, such as the command-line tool.

use crate::pla::{PLAReadError, PLAWriteError};
use crate::table::TableError;
use crate::term::TermError;
use std::io;
use thiserror::Error;

/// Any error raised while loading, minimizing or writing a table
#[derive(Debug, Error)]
pub enum MinimizeError {
    /// Term construction or merging failed
    #[error(transparent)]
    Term(#[from] TermError),
    /// Building or loading a truth table failed
    #[error(transparent)]
    Table(#[from] TableError),
    /// Reading a PLA file failed
    #[error(transparent)]
    PLARead(#[from] PLAReadError),
    /// Writing a PLA file failed
    #[error(transparent)]
    PLAWrite(#[from] PLAWriteError),
    /// IO error outside of the loaders
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<MinimizeError> for io::Error {
    fn from(err: MinimizeError) -> Self {
        match err {
            MinimizeError::Io(e) => e,
            MinimizeError::Term(e) => e.into(),
            MinimizeError::Table(e) => e.into(),
            MinimizeError::PLARead(e) => e.into(),
            MinimizeError::PLAWrite(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pla::PLAError;
    use std::error::Error;

    #[test]
    fn test_layer_errors_convert() {
        let err: MinimizeError = TermError::InvalidEncoding {
            character: '2',
            position: 0,
        }
        .into();
        assert!(matches!(err, MinimizeError::Term(_)));
        assert_eq!(
            err.to_string(),
            TermError::InvalidEncoding {
                character: '2',
                position: 0
            }
            .to_string()
        );

        let err: MinimizeError = TableError::UnpairedState { line: 3 }.into();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_io_kind_preserved() {
        let read: PLAReadError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        let err: MinimizeError = read.into();
        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::NotFound);

        let err: MinimizeError = PLAReadError::from(PLAError::MissingOutputDirective).into();
        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_source_chain() {
        let err: MinimizeError = io::Error::new(io::ErrorKind::Other, "boom").into();
        assert!(err.source().is_some());
    }
}
