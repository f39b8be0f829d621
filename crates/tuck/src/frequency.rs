//! Data frequency of a factor dataset.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Frequency of a factor series.
///
/// Determines which upstream file variant is downloaded, which slicing rule
/// applies and how date tokens are normalized: daily dates are taken as-is,
/// monthly dates shift to the last calendar day of the month and annual dates
/// map to December 31.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    /// Daily observations, `YYYYMMDD` date tokens.
    Daily,

    /// Monthly observations, `YYYYMM` date tokens.
    Monthly,

    /// Annual observations, `YYYY` date tokens.
    Annual,
}

impl Frequency {
    /// Returns all frequencies.
    pub fn all() -> Vec<Self> {
        vec![Self::Daily, Self::Monthly, Self::Annual]
    }

    /// Returns the lowercase name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Monthly => "monthly",
            Self::Annual => "annual",
        }
    }

    /// Number of digits in a valid raw date token for this frequency.
    pub const fn token_len(&self) -> usize {
        match self {
            Self::Daily => 8,
            Self::Monthly => 6,
            Self::Annual => 4,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
