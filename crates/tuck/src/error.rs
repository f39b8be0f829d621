//! Error types for factor dataset retrieval and cleaning.

use crate::dataset::FactorSet;
use crate::frequency::Frequency;
use thiserror::Error;

/// Result type for factor dataset operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while retrieving or cleaning a factor dataset.
///
/// Nothing here is retried and nothing is recovered silently: an unexpected
/// upstream shape surfaces as a hard error carrying the factor set, frequency
/// and offending row so layout drift can be diagnosed.
#[derive(Debug, Error)]
pub enum DataError {
    /// Upstream file layout no longer matches the expected shape
    /// (missing annual marker, unexpected header, impossible slice range).
    #[error("{dataset} {frequency} file format changed: {detail}")]
    FormatChanged {
        /// Factor set whose file was being cleaned
        dataset: FactorSet,
        /// Requested frequency
        frequency: Frequency,
        /// What failed to match
        detail: String,
    },

    /// A date token failed its frequency-specific pattern.
    #[error("unparseable {frequency} date token {token:?}")]
    DateParse {
        /// Raw token as found in the file
        token: String,
        /// Frequency whose pattern the token was checked against
        frequency: Frequency,
    },

    /// A factor cell was non-numeric after slicing, which indicates a
    /// slicing offset error rather than bad data.
    #[error("non-numeric cell {cell:?} in column {column} at data row {row}")]
    NumericParse {
        /// Raw cell contents
        cell: String,
        /// Column the cell belongs to
        column: String,
        /// Data-row index within the sliced block
        row: usize,
    },

    /// The data library page had no link matching the requested file.
    #[error("link resolution failed: {0}")]
    LinkResolution(String),

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// ZIP archive error while unpacking a downloaded file
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}
