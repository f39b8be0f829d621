//! Raw table construction from a downloaded blob.

use crate::error::Result;
use crate::table::TableContext;

/// An upstream file split into a header row and data rows of string cells.
///
/// The preamble is skipped by raw line count (blank lines included, as the
/// published preamble lengths are counted that way); after the preamble,
/// blank lines are discarded so the separator lines between blocks never
/// count toward row offsets. Lines are split on `,` and cells are kept
/// untrimmed: the annual marker row is matched against its space-padded raw
/// form, and date/value tokens are trimmed at parse time instead.
#[derive(Debug, Clone)]
pub struct RawTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Parses `blob`, discarding the first `preamble_rows` raw lines, then
    /// taking the next non-blank line as the header row and the remaining
    /// non-blank lines as data rows.
    ///
    /// A blob too short to contain a header row is a format-changed error.
    pub fn parse(blob: &str, preamble_rows: usize, ctx: TableContext) -> Result<Self> {
        let mut lines = blob.lines();

        for skipped in 0..preamble_rows {
            if lines.next().is_none() {
                return Err(ctx.format_changed(format!(
                    "file ended inside the preamble ({skipped} of {preamble_rows} lines)"
                )));
            }
        }

        let mut lines = lines.filter(|line| !line.trim().is_empty());

        let header = lines
            .next()
            .ok_or_else(|| ctx.format_changed("missing header row after preamble"))?;
        let header = split_cells(header);

        let rows = lines.map(split_cells).collect();

        Ok(Self { header, rows })
    }

    /// Header row cells, as found in the file.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Data rows below the header.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

fn split_cells(line: &str) -> Vec<String> {
    line.split(',').map(str::to_string).collect()
}
