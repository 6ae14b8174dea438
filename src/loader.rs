//! Loads one calendar year of collision records from the configured source.

use anyhow::{Context, Result};
use reqwest::Url;
use tracing::{debug, info};

use crate::config::{Config, DataSource, year_bounds};
use crate::fetch::{HttpClient, fetch_bytes};
use crate::parser::{ParsedBatch, parse_collisions};
use crate::record::CollisionRecord;

/// All retained records for one year. Built once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct CollisionDataset {
    year: i32,
    records: Vec<CollisionRecord>,
    /// Data rows received from the source.
    pub rows_read: usize,
    /// Rows dropped because their date or time did not parse.
    pub unparseable: usize,
    /// Rows dropped because they fall outside the year.
    pub out_of_range: usize,
}

impl CollisionDataset {
    /// A dataset with no dropped rows, for building fixtures.
    #[cfg(test)]
    pub fn new(year: i32, records: Vec<CollisionRecord>) -> Self {
        let rows_read = records.len();
        Self {
            year,
            records,
            rows_read,
            unparseable: 0,
            out_of_range: 0,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn records(&self) -> &[CollisionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Loads the configured year from the configured source.
///
/// # Errors
///
/// Any fetch, read or decode failure is fatal; nothing is retried.
#[tracing::instrument(skip(client, config), fields(year = config.year))]
pub fn load_dataset<C: HttpClient>(client: &C, config: &Config) -> Result<CollisionDataset> {
    let batch = match &config.source {
        DataSource::Remote(base) => fetch_all_pages(client, base, config.year, config.page_size)?,
        DataSource::File(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            parse_collisions(&bytes)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
    };

    let (start, end) = year_bounds(config.year)?;
    let ParsedBatch {
        records,
        rows_read,
        unparseable,
    } = batch;
    let (records, outside): (Vec<_>, Vec<_>) = records
        .into_iter()
        .partition(|r| (start..end).contains(&r.crashed_at.date()));

    info!(
        rows_read,
        unparseable,
        out_of_range = outside.len(),
        retained = records.len(),
        "Collision data loaded"
    );

    Ok(CollisionDataset {
        year: config.year,
        records,
        rows_read,
        unparseable,
        out_of_range: outside.len(),
    })
}

/// Builds the query URL for one page of the year's collisions.
///
/// Pages are ordered by the source's row id so offsets stay stable.
pub fn page_url(base: &Url, year: i32, limit: usize, offset: usize) -> Result<Url> {
    let (start, end) = year_bounds(year)?;
    let filter = format!(
        "crash_date>='{}T00:00:00.000' AND crash_date<'{}T00:00:00.000'",
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d")
    );

    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("$where", &filter)
        .append_pair("$order", ":id")
        .append_pair("$limit", &limit.to_string())
        .append_pair("$offset", &offset.to_string());
    Ok(url)
}

/// Requests pages until one comes back short.
fn fetch_all_pages<C: HttpClient>(
    client: &C,
    base: &Url,
    year: i32,
    page_size: usize,
) -> Result<ParsedBatch> {
    let mut combined = ParsedBatch::default();
    let mut offset = 0;

    loop {
        let url = page_url(base, year, page_size, offset)?;
        let bytes = fetch_bytes(client, &url)?;
        let page = parse_collisions(&bytes)
            .with_context(|| format!("failed to parse collision page at offset {offset}"))?;
        let page_rows = page.rows_read;
        debug!(offset, rows = page_rows, "Collision page parsed");

        combined.extend(page);
        if page_rows < page_size {
            break;
        }
        offset += page_rows;
    }

    Ok(combined)
}
