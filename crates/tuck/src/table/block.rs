//! Block location and slicing inside a raw monthly/annual file.
//!
//! The monthly/annual files concatenate two tables: the monthly block, a
//! marker row (e.g. `" Annual Factors: January-December "`), repeated header
//! lines, the annual block, and usually a copyright footer. These functions
//! find the marker and cut out the requested block. Every impossible range is
//! a format-changed error, never a panicking slice.

use crate::dataset::TableLayout;
use crate::error::Result;
use crate::table::TableContext;

/// Returns the index of the first data row containing the annual marker.
///
/// The marker is compared against raw cells without trimming, so padded
/// markers must be passed in their padded form. A missing marker means the
/// upstream layout changed and surfaces as a hard error.
pub fn locate_annual_boundary(
    rows: &[Vec<String>],
    marker: &str,
    ctx: TableContext,
) -> Result<usize> {
    rows.iter()
        .position(|row| row.iter().any(|cell| cell == marker))
        .ok_or_else(|| ctx.format_changed(format!("annual marker {marker:?} not found")))
}

/// The monthly block: everything strictly above the annual marker.
pub fn slice_monthly(rows: &[Vec<String>], boundary: usize) -> &[Vec<String>] {
    &rows[..boundary]
}

/// The annual block: rows from the marker onward, minus the marker row plus
/// repeated header lines at the top and the copyright rows at the bottom.
pub fn slice_annual<'a>(
    rows: &'a [Vec<String>],
    boundary: usize,
    layout: &TableLayout,
    ctx: TableContext,
) -> Result<&'a [Vec<String>]> {
    let start = boundary + layout.annual_header_rows;
    let end = rows.len().saturating_sub(layout.annual_footer_rows);
    if start >= end {
        return Err(ctx.format_changed(format!(
            "annual block has no data rows (rows {start}..{end} of {})",
            rows.len()
        )));
    }
    Ok(&rows[start..end])
}

/// The daily table: all rows minus the trailing copyright rows. Daily files
/// hold a single block, so no boundary search is involved.
pub fn trim_daily<'a>(
    rows: &'a [Vec<String>],
    layout: &TableLayout,
    ctx: TableContext,
) -> Result<&'a [Vec<String>]> {
    let end = rows.len().saturating_sub(layout.daily_footer_rows);
    if end == 0 {
        return Err(ctx.format_changed(format!(
            "daily table has no data rows ({} rows, {} footer rows)",
            rows.len(),
            layout.daily_footer_rows
        )));
    }
    Ok(&rows[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::FactorSet;
    use crate::error::DataError;
    use crate::frequency::Frequency;

    fn ctx(frequency: Frequency) -> TableContext {
        TableContext {
            dataset: FactorSet::ThreeFactor,
            frequency,
        }
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn monthly_annual_rows() -> Vec<Vec<String>> {
        vec![
            row(&["192607", "2.96", "-2.56", "-2.43", "0.22"]),
            row(&["192608", "2.64", "-1.17", "3.82", "0.25"]),
            row(&[" Annual Factors: January-December "]),
            row(&["", "Mkt-RF", "SMB", "HML", "RF"]),
            row(&["1927", "29.47", "-2.54", "-10.04", "3.12"]),
            row(&["1928", "35.39", "4.22", "-6.17", "3.56"]),
            row(&["Copyright 2023 Kenneth R. French"]),
        ]
    }

    #[test]
    fn test_locate_boundary() {
        let rows = monthly_annual_rows();
        let boundary = locate_annual_boundary(
            &rows,
            " Annual Factors: January-December ",
            ctx(Frequency::Annual),
        )
        .unwrap();
        assert_eq!(boundary, 2);
    }

    #[test]
    fn test_missing_marker_is_format_changed() {
        let rows = monthly_annual_rows();
        let err =
            locate_annual_boundary(&rows, "Annual Factors:", ctx(Frequency::Annual)).unwrap_err();
        assert!(matches!(err, DataError::FormatChanged { .. }));
    }

    #[test]
    fn test_trimmed_marker_does_not_match() {
        let rows = monthly_annual_rows();
        let result = locate_annual_boundary(
            &rows,
            "Annual Factors: January-December",
            ctx(Frequency::Annual),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_slice_monthly() {
        let rows = monthly_annual_rows();
        let boundary = 2;
        let monthly = slice_monthly(&rows, boundary);
        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly[1][0], "192608");
    }

    #[test]
    fn test_slice_annual() {
        let rows = monthly_annual_rows();
        let layout = FactorSet::ThreeFactor.layout();
        let annual = slice_annual(&rows, 2, &layout, ctx(Frequency::Annual)).unwrap();
        assert_eq!(annual.len(), 2);
        assert_eq!(annual[0][0], "1927");
        assert_eq!(annual[1][0], "1928");
    }

    #[test]
    fn test_slice_annual_without_footer() {
        // 5-factor files end on a data row
        let mut rows = monthly_annual_rows();
        rows.pop();
        let layout = FactorSet::FiveFactor.layout();
        let annual = slice_annual(&rows, 2, &layout, ctx(Frequency::Annual)).unwrap();
        assert_eq!(annual.len(), 2);
        assert_eq!(annual[1][0], "1928");
    }

    #[test]
    fn test_empty_annual_block_is_format_changed() {
        let rows = vec![
            row(&[" Annual Factors: January-December "]),
            row(&["", "Mkt-RF", "SMB", "HML", "RF"]),
            row(&["Copyright 2023 Kenneth R. French"]),
        ];
        let layout = FactorSet::ThreeFactor.layout();
        let err = slice_annual(&rows, 0, &layout, ctx(Frequency::Annual)).unwrap_err();
        assert!(matches!(err, DataError::FormatChanged { .. }));
    }

    #[test]
    fn test_trim_daily() {
        let rows = vec![
            row(&["19260701", "0.10", "-0.24", "-0.28", "0.009"]),
            row(&["19260702", "0.45", "-0.32", "-0.08", "0.009"]),
            row(&["Copyright 2023 Kenneth R. French"]),
            row(&[""]),
        ];
        let layout = FactorSet::ThreeFactor.layout();
        let daily = trim_daily(&rows, &layout, ctx(Frequency::Daily)).unwrap();
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[1][0], "19260702");
    }

    #[test]
    fn test_trim_daily_too_short_is_format_changed() {
        let rows = vec![row(&["Copyright 2023 Kenneth R. French"])];
        let layout = FactorSet::ThreeFactor.layout();
        let err = trim_daily(&rows, &layout, ctx(Frequency::Daily)).unwrap_err();
        assert!(matches!(err, DataError::FormatChanged { .. }));
    }
}
