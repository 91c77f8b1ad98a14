//! MBP-10 CSV snapshots
//!
//! Expects a header row with, for every level `NN` in `00..depth`:
//! `bid_px_NN`, `bid_sz_NN`, `ask_px_NN`, `ask_sz_NN`. Any other columns
//! (timestamps, counts, symbol) are ignored. Only the first data row is
//! read.
//!
//! Feeds leave missing levels blank, so an empty price ends that side's
//! ladder. A present price with an empty size is malformed.

use csv::{ReaderBuilder, StringRecord, Trim};
use impactfit_core::{BookLevel, DepthSnapshot};
use log::debug;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Levels per side in an MBP-10 record
pub const DEFAULT_DEPTH: usize = 10;

/// Load the snapshot stored in the CSV file at `path`
///
/// The snapshot is labelled with the file stem.
pub fn load_snapshot(path: impl AsRef<Path>, depth: usize) -> Result<DepthSnapshot> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let label = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    parse_snapshot(file, &label, depth)
}

/// Parse the first data row of an MBP CSV stream
pub fn parse_snapshot<R: Read>(reader: R, label: &str, depth: usize) -> Result<DepthSnapshot> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let record = match rdr.records().next() {
        Some(row) => row?,
        None => return Err(Error::NoData(label.to_string())),
    };

    let bids = read_ladder(&headers, &record, "bid", depth)?;
    let asks = read_ladder(&headers, &record, "ask", depth)?;

    for (ladder, levels) in [("bid", &bids), ("ask", &asks)] {
        if levels.is_empty() {
            return Err(Error::EmptySide {
                label: label.to_string(),
                ladder,
            });
        }
    }

    debug!(
        "loaded snapshot {}: {} bid / {} ask levels",
        label,
        bids.len(),
        asks.len()
    );

    Ok(DepthSnapshot::new(bids, asks).with_label(label))
}

fn read_ladder(
    headers: &StringRecord,
    record: &StringRecord,
    prefix: &str,
    depth: usize,
) -> Result<Vec<BookLevel>> {
    let mut levels = Vec::with_capacity(depth);

    for i in 0..depth {
        let px_col = format!("{}_px_{:02}", prefix, i);
        let sz_col = format!("{}_sz_{:02}", prefix, i);

        let price = field(headers, record, &px_col)?;
        if price.is_empty() {
            debug!("{} ladder ends at level {}", prefix, i);
            break;
        }
        let size = field(headers, record, &sz_col)?;

        levels.push(BookLevel::new(
            parse_decimal(&px_col, price)?,
            parse_decimal(&sz_col, size)?,
        ));
    }

    Ok(levels)
}

fn field<'r>(headers: &StringRecord, record: &'r StringRecord, column: &str) -> Result<&'r str> {
    let index = headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| Error::MissingColumn(column.to_string()))?;

    Ok(record.get(index).unwrap_or(""))
}

/// Plain or scientific notation
fn parse_decimal(column: &str, value: &str) -> Result<Decimal> {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| Error::InvalidValue {
            column: column.to_string(),
            value: value.to_string(),
        })
}
