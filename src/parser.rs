//! CSV parser for NYC motor vehicle collision payloads.

use anyhow::{Context, Result, bail};
use tracing::trace;

use crate::record::{CollisionRecord, RawCollision};

/// Columns every payload must carry. Other columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "crash_date",
    "crash_time",
    "borough",
    "on_street_name",
    "cross_street_name",
    "number_of_persons_injured",
    "number_of_persons_killed",
    "vehicle_type_code1",
];

/// Records decoded from one or more CSV payloads.
#[derive(Debug, Default)]
pub struct ParsedBatch {
    pub records: Vec<CollisionRecord>,
    /// Data rows seen, including dropped ones.
    pub rows_read: usize,
    /// Rows dropped because their date or time did not parse.
    pub unparseable: usize,
}

impl ParsedBatch {
    /// Appends another batch, keeping row order.
    pub fn extend(&mut self, other: ParsedBatch) {
        self.records.extend(other.records);
        self.rows_read += other.rows_read;
        self.unparseable += other.unparseable;
    }
}

/// Decodes a CSV payload into collision records.
///
/// # Errors
///
/// Returns an error if a required column is missing, a row is malformed, or
/// an injury/fatality count is not numeric. Rows with an unparseable
/// timestamp are not errors; they are counted in [`ParsedBatch::unparseable`].
pub fn parse_collisions(bytes: &[u8]) -> Result<ParsedBatch> {
    let mut rdr = csv::Reader::from_reader(bytes);
    let headers = rdr
        .headers()
        .context("failed to read collision CSV header")?
        .clone();

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .collect();
    if !missing.is_empty() {
        bail!(
            "collision data is missing required columns: {}",
            missing.join(", ")
        );
    }

    let mut batch = ParsedBatch::default();
    for (idx, result) in rdr.deserialize::<RawCollision>().enumerate() {
        let raw = result.with_context(|| format!("malformed collision row {}", idx + 1))?;
        batch.rows_read += 1;
        match raw.into_record() {
            Some(record) => batch.records.push(record),
            None => {
                trace!(row = idx + 1, "Dropping row with unparseable timestamp");
                batch.unparseable += 1;
            }
        }
    }

    Ok(batch)
}
