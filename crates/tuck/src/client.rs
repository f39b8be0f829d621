//! Per-factor-set orchestration: resolve a download link, fetch the raw
//! blob, and clean it into a factor table.

use polars::prelude::*;
use tracing::{debug, info};

use crate::dataset::FactorSet;
use crate::error::{DataError, Result};
use crate::frequency::Frequency;
use crate::source::fetch::{Fetcher, HttpFetcher};
use crate::source::links::{DataLibraryResolver, LinkResolver};
use crate::table::block::{locate_annual_boundary, slice_annual, slice_monthly, trim_daily};
use crate::table::date::normalize_date;
use crate::table::{RawTable, TableContext};

/// Client for the data library factor datasets.
///
/// Each entry point independently resolves, fetches and cleans its source
/// file; table data is never cached, so repeated calls re-fetch. Collaborators
/// are injectable for tests via [`with_collaborators`](Self::with_collaborators).
#[derive(Debug)]
pub struct FamaFrench<R = DataLibraryResolver, F = HttpFetcher> {
    resolver: R,
    fetcher: F,
}

impl FamaFrench {
    /// Creates a client wired to the live data library page.
    pub fn new() -> Result<Self> {
        Ok(Self {
            resolver: DataLibraryResolver::new()?,
            fetcher: HttpFetcher::new()?,
        })
    }
}

impl<R: LinkResolver, F: Fetcher> FamaFrench<R, F> {
    /// Creates a client from explicit collaborators.
    pub const fn with_collaborators(resolver: R, fetcher: F) -> Self {
        Self { resolver, fetcher }
    }

    /// Fama-French 3-factor table: `Date | MktRF | SMB | HML | RF`.
    pub fn three_factor(&self, frequency: Frequency) -> Result<DataFrame> {
        self.factor_table(FactorSet::ThreeFactor, frequency)
    }

    /// Momentum table: `Date | MOM`.
    pub fn momentum(&self, frequency: Frequency) -> Result<DataFrame> {
        self.factor_table(FactorSet::Momentum, frequency)
    }

    /// Fama-French 5-factor table: `Date | MktRF | SMB | HML | RMW | CMA | RF`.
    pub fn five_factor(&self, frequency: Frequency) -> Result<DataFrame> {
        self.factor_table(FactorSet::FiveFactor, frequency)
    }

    /// Carhart 4-factor table: the 3-factor table left-joined with momentum
    /// on `Date`.
    ///
    /// Every 3-factor date is retained, so the result has exactly as many
    /// rows as the 3-factor table; momentum rows without a matching 3-factor
    /// date are dropped, and 3-factor dates absent from momentum carry a
    /// null `MOM`.
    pub fn carhart_four_factor(&self, frequency: Frequency) -> Result<DataFrame> {
        let ff3 = self.three_factor(frequency)?;
        let mom = self.momentum(frequency)?;

        // both inputs are ascending and unique on Date, so sorting pins the
        // join output back to the 3-factor row order
        let joined = ff3
            .lazy()
            .join(
                mom.lazy(),
                [col("Date")],
                [col("Date")],
                JoinArgs::new(JoinType::Left),
            )
            .sort(["Date"], Default::default())
            .collect()?;
        Ok(joined)
    }

    /// Downloads and cleans one factor set at one frequency.
    pub fn factor_table(&self, dataset: FactorSet, frequency: Frequency) -> Result<DataFrame> {
        let url = self.resolver.resolve(dataset, frequency)?;
        debug!("resolved {dataset} {frequency} to {url}");

        let blob = self.fetcher.fetch_text(&url)?;
        let frame = extract_factor_table(&blob, dataset, frequency)?;
        info!("{dataset} {frequency}: {} rows", frame.height());
        Ok(frame)
    }
}

/// Cleans one raw blob into a factor table. Pure, no I/O.
///
/// The blob is split into rows, the header validated and canonicalized, the
/// requested block sliced out per frequency, dates normalized to end of
/// period and every value cell parsed as a percentage and divided by 100.
pub fn extract_factor_table(
    blob: &str,
    dataset: FactorSet,
    frequency: Frequency,
) -> Result<DataFrame> {
    let ctx = TableContext { dataset, frequency };
    let layout = dataset.layout();

    let raw = RawTable::parse(blob, layout.preamble_rows, ctx)?;
    let columns = canonical_columns(raw.header(), dataset, ctx)?;

    let rows = match frequency {
        Frequency::Daily => trim_daily(raw.rows(), &layout, ctx)?,
        Frequency::Monthly => {
            let boundary = locate_annual_boundary(raw.rows(), layout.annual_marker, ctx)?;
            slice_monthly(raw.rows(), boundary)
        }
        Frequency::Annual => {
            let boundary = locate_annual_boundary(raw.rows(), layout.annual_marker, ctx)?;
            slice_annual(raw.rows(), boundary, &layout, ctx)?
        }
    };
    debug!("{dataset} {frequency}: sliced {} data rows", rows.len());

    build_frame(rows, &columns, ctx)
}

/// Validates the header row against the factor set's expected columns and
/// returns the canonical output names.
///
/// Raw files name the first column inconsistently (usually an empty cell);
/// it is always renamed `Date`. Value columns are trimmed, dashes dropped
/// (`Mkt-RF` -> `MktRF`) and compared case-insensitively against the
/// canonical list (`Mom` -> `MOM`), so drift in the column count or names is
/// a format-changed error rather than a silently misnamed table.
fn canonical_columns(
    header: &[String],
    dataset: FactorSet,
    ctx: TableContext,
) -> Result<Vec<&'static str>> {
    let expected = dataset.factor_columns();
    let values = header.len().saturating_sub(1);
    if values != expected.len() {
        return Err(ctx.format_changed(format!(
            "header has {values} value columns, expected {}",
            expected.len()
        )));
    }

    for (cell, want) in header[1..].iter().zip(expected) {
        let canonical = cell.trim().replace('-', "");
        if !canonical.eq_ignore_ascii_case(want) {
            return Err(ctx.format_changed(format!(
                "unexpected header column {cell:?}, expected {want}"
            )));
        }
    }

    Ok(expected.to_vec())
}

/// Assembles the sliced rows into a `DataFrame` with a `Date` column of
/// dtype Date plus one `f64` column per factor.
fn build_frame(
    rows: &[Vec<String>],
    columns: &[&'static str],
    ctx: TableContext,
) -> Result<DataFrame> {
    let mut dates: Vec<String> = Vec::with_capacity(rows.len());
    let mut values: Vec<Vec<f64>> = vec![Vec::with_capacity(rows.len()); columns.len()];

    for (index, row) in rows.iter().enumerate() {
        if row.len() != columns.len() + 1 {
            return Err(ctx.format_changed(format!(
                "data row {index} has {} cells, expected {}",
                row.len(),
                columns.len() + 1
            )));
        }

        let date = normalize_date(&row[0], ctx.frequency)?;
        dates.push(date.format("%Y-%m-%d").to_string());

        for ((cell, column), series) in row[1..].iter().zip(columns).zip(values.iter_mut()) {
            series.push(parse_percent(cell, column, index)?);
        }
    }

    let mut frame_columns: Vec<Column> = Vec::with_capacity(columns.len() + 1);
    frame_columns.push(Series::new("Date".into(), dates).into());
    for (name, series) in columns.iter().zip(values) {
        frame_columns.push(Column::new((*name).into(), series));
    }

    let frame = DataFrame::new(frame_columns)?
        .lazy()
        .with_column(col("Date").cast(DataType::Date))
        .collect()?;
    Ok(frame)
}

/// Parses one raw factor cell and converts percent to decimal fraction.
///
/// A cell that fails to parse as a finite number after slicing means the
/// slice offsets are wrong for the current upstream layout; coercing it to a
/// missing value would silently corrupt the table, so it is a hard error.
fn parse_percent(cell: &str, column: &str, row: usize) -> Result<f64> {
    let value: f64 = cell
        .trim()
        .parse()
        .map_err(|_| numeric_error(cell, column, row))?;
    if !value.is_finite() {
        return Err(numeric_error(cell, column, row));
    }
    Ok(value / 100.0)
}

fn numeric_error(cell: &str, column: &str, row: usize) -> DataError {
    DataError::NumericParse {
        cell: cell.to_string(),
        column: column.to_string(),
        row,
    }
}
