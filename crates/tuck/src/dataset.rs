//! Factor set definitions and upstream file layouts.
//!
//! Each factor set maps to one family of files in the data library. The files
//! are not regular CSV: monthly/annual variants carry two concatenated blocks
//! separated by an "Annual Factors" marker row, with repeated headers and a
//! copyright footer, and each family has its own preamble length. All of
//! those row offsets live in [`TableLayout`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::frequency::Frequency;

/// A published factor dataset family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactorSet {
    /// Fama-French 3 factors: market risk premium, size, value, risk-free rate.
    ThreeFactor,

    /// Momentum factor.
    Momentum,

    /// Fama-French 5 factors: 3 factors plus profitability and investment.
    FiveFactor,
}

/// Row-offset layout of one upstream file family.
///
/// All counts are literal constants tied to the current data library files,
/// verified against the live downloads. An upstream layout change shows up
/// here first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    /// Descriptive preamble lines before the header row.
    pub preamble_rows: usize,

    /// Marker row content separating the monthly block from the annual block.
    /// Compared against raw cells without trimming, padding included.
    pub annual_marker: &'static str,

    /// Leading rows of the annual block to drop: the marker row itself plus
    /// the repeated header lines below it.
    pub annual_header_rows: usize,

    /// Trailing copyright rows of the annual block. The 5-factor file carries
    /// none, an upstream asymmetry replicated here.
    pub annual_footer_rows: usize,

    /// Trailing copyright rows of the daily file.
    pub daily_footer_rows: usize,
}

/// Marker row in the 3- and 5-factor files, space padding included.
const RESEARCH_ANNUAL_MARKER: &str = " Annual Factors: January-December ";

/// Marker row in the momentum file.
const MOMENTUM_ANNUAL_MARKER: &str = "Annual Factors:";

impl FactorSet {
    /// Returns all factor sets.
    pub fn all() -> Vec<Self> {
        vec![Self::ThreeFactor, Self::Momentum, Self::FiveFactor]
    }

    /// Returns the display name, as used on the data library page.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ThreeFactor => "Fama/French 3 Factors",
            Self::Momentum => "Momentum Factor (Mom)",
            Self::FiveFactor => "Fama/French 5 Factors (2x3)",
        }
    }

    /// Canonical value-column names of the cleaned table, in file order.
    pub const fn factor_columns(&self) -> &'static [&'static str] {
        match self {
            Self::ThreeFactor => &["MktRF", "SMB", "HML", "RF"],
            Self::Momentum => &["MOM"],
            Self::FiveFactor => &["MktRF", "SMB", "HML", "RMW", "CMA", "RF"],
        }
    }

    /// Row-offset layout of this set's upstream files.
    ///
    /// The momentum file has ten extra preamble lines and one extra repeated
    /// header line inside its annual block.
    pub const fn layout(&self) -> TableLayout {
        match self {
            Self::ThreeFactor => TableLayout {
                preamble_rows: 3,
                annual_marker: RESEARCH_ANNUAL_MARKER,
                annual_header_rows: 2,
                annual_footer_rows: 1,
                daily_footer_rows: 2,
            },
            Self::Momentum => TableLayout {
                preamble_rows: 13,
                annual_marker: MOMENTUM_ANNUAL_MARKER,
                annual_header_rows: 3,
                annual_footer_rows: 1,
                daily_footer_rows: 2,
            },
            Self::FiveFactor => TableLayout {
                preamble_rows: 3,
                annual_marker: RESEARCH_ANNUAL_MARKER,
                annual_header_rows: 2,
                annual_footer_rows: 0,
                daily_footer_rows: 2,
            },
        }
    }

    /// File-name stem of the upstream download for the given frequency.
    ///
    /// Monthly and annual data share one file; daily data is a separate file.
    /// The stems are matched as substrings of the hrefs scraped from the data
    /// library page.
    pub const fn file_stem(&self, frequency: Frequency) -> &'static str {
        match (self, frequency) {
            (Self::ThreeFactor, Frequency::Daily) => "F-F_Research_Data_Factors_daily_CSV",
            (Self::ThreeFactor, _) => "F-F_Research_Data_Factors_CSV",
            (Self::Momentum, Frequency::Daily) => "F-F_Momentum_Factor_daily_CSV",
            (Self::Momentum, _) => "F-F_Momentum_Factor_CSV",
            (Self::FiveFactor, Frequency::Daily) => "F-F_Research_Data_5_Factors_2x3_daily_CSV",
            (Self::FiveFactor, _) => "F-F_Research_Data_5_Factors_2x3_CSV",
        }
    }
}

impl fmt::Display for FactorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sets() {
        assert_eq!(FactorSet::all().len(), 3);
    }

    #[test]
    fn test_factor_columns() {
        assert_eq!(
            FactorSet::ThreeFactor.factor_columns(),
            ["MktRF", "SMB", "HML", "RF"]
        );
        assert_eq!(FactorSet::Momentum.factor_columns(), ["MOM"]);
        assert_eq!(FactorSet::FiveFactor.factor_columns().len(), 6);
    }

    #[test]
    fn test_layout_offsets() {
        let ff3 = FactorSet::ThreeFactor.layout();
        assert_eq!(ff3.preamble_rows, 3);
        assert_eq!(ff3.annual_header_rows, 2);
        assert_eq!(ff3.annual_footer_rows, 1);

        let mom = FactorSet::Momentum.layout();
        assert_eq!(mom.preamble_rows, 13);
        assert_eq!(mom.annual_header_rows, 3);

        // 5-factor annual block has no trailing copyright row
        assert_eq!(FactorSet::FiveFactor.layout().annual_footer_rows, 0);
    }

    #[test]
    fn test_file_stems_distinct() {
        let mut stems = Vec::new();
        for set in FactorSet::all() {
            for frequency in Frequency::all() {
                stems.push(set.file_stem(frequency));
            }
        }
        // daily and monthly/annual variants must never match each other
        for a in &stems {
            for b in &stems {
                if a != b {
                    assert!(!a.contains(b), "{a} contains {b}");
                }
            }
        }
    }

    #[test]
    fn test_markers() {
        assert_eq!(
            FactorSet::ThreeFactor.layout().annual_marker,
            " Annual Factors: January-December "
        );
        assert_eq!(FactorSet::Momentum.layout().annual_marker, "Annual Factors:");
        assert_eq!(
            FactorSet::FiveFactor.layout().annual_marker,
            FactorSet::ThreeFactor.layout().annual_marker
        );
    }
}
