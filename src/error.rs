//! Errors raised while parsing persisted records and while reading or writing the
//! persisted file.

use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// A line of the persisted file could not be turned into a [`Record`][crate::record::Record].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseRecordError {
    /// The line ended before the named field.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// The named field was present but isn't an integer.
    #[error("invalid {field}: {value:?}")]
    InvalidNumber {
        /// Which of `month`, `day` or `year` failed.
        field: &'static str,
        /// The offending token.
        value: String,
        /// Why the integer parse failed.
        #[source]
        source: ParseIntError,
    },
}

/// Failures of the persistence layer. The infallible `persist`/`restore` wrappers on
/// [`Store`][crate::store::Store] log these and carry on as if nothing happened.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The file couldn't be opened.
    #[error("cannot open {path}: {source}")]
    Io {
        /// The file that was being opened.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: io::Error,
    },

    /// Writing a record out failed part way.
    #[error("write failed: {0}")]
    Write(#[from] io::Error),
}
