//! Core table cleaning: block location, block slicing and date
//! normalization over the raw data library files.

pub mod block;
pub mod date;
pub mod raw;

pub use raw::RawTable;

use crate::dataset::FactorSet;
use crate::error::DataError;
use crate::frequency::Frequency;

/// Identifies the upstream file a row operation is running against, so
/// failures report which dataset and frequency drifted.
#[derive(Debug, Clone, Copy)]
pub struct TableContext {
    /// Factor set being cleaned.
    pub dataset: FactorSet,
    /// Requested frequency.
    pub frequency: Frequency,
}

impl TableContext {
    /// Builds a [`DataError::FormatChanged`] for this file.
    pub fn format_changed(&self, detail: impl Into<String>) -> DataError {
        DataError::FormatChanged {
            dataset: self.dataset,
            frequency: self.frequency,
            detail: detail.into(),
        }
    }
}
