#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tuck/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod client;
pub mod dataset;
pub mod error;
pub mod frequency;
pub mod source;
pub mod table;

pub use client::{FamaFrench, extract_factor_table};
pub use dataset::{FactorSet, TableLayout};
pub use error::{DataError, Result};
pub use frequency::Frequency;
pub use source::fetch::{Fetcher, HttpFetcher};
pub use source::links::{DataLibraryResolver, LinkResolver};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
