//! Runtime configuration read from the environment (and `.env`, loaded by the binary).

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use reqwest::Url;
use std::path::PathBuf;

/// NYC Open Data "Motor Vehicle Collisions - Crashes" resource.
pub const DEFAULT_SOURCE: &str = "https://data.cityofnewyork.us/resource/h9gi-nx95.csv";
pub const DEFAULT_YEAR: i32 = 2024;
pub const DEFAULT_PAGE_SIZE: usize = 50_000;

/// Where collision rows come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Remote CSV resource, queried page by page.
    Remote(Url),
    /// Local CSV export, read in one go.
    File(PathBuf),
}

impl DataSource {
    pub fn parse(source: &str) -> Result<Self> {
        if source.starts_with("http://") || source.starts_with("https://") {
            let url = Url::parse(source).with_context(|| format!("invalid source URL '{source}'"))?;
            Ok(DataSource::Remote(url))
        } else {
            Ok(DataSource::File(PathBuf::from(source)))
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub source: DataSource,
    pub year: i32,
    pub page_size: usize,
    pub log_file_path: Option<PathBuf>,
}

impl Config {
    /// Reads `COLLISION_SOURCE`, `COLLISION_YEAR`, `COLLISION_PAGE_SIZE` and
    /// `LOG_FILE_PATH` from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Unset keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let source = DataSource::parse(
            lookup("COLLISION_SOURCE")
                .as_deref()
                .unwrap_or(DEFAULT_SOURCE),
        )?;

        let year = match lookup("COLLISION_YEAR") {
            Some(raw) => raw
                .trim()
                .parse::<i32>()
                .with_context(|| format!("COLLISION_YEAR must be a year, got '{raw}'"))?,
            None => DEFAULT_YEAR,
        };
        year_bounds(year)?;

        let page_size = match lookup("COLLISION_PAGE_SIZE") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("COLLISION_PAGE_SIZE must be a number, got '{raw}'"))?,
            None => DEFAULT_PAGE_SIZE,
        };
        if page_size == 0 {
            bail!("COLLISION_PAGE_SIZE must be greater than zero");
        }

        let log_file_path = lookup("LOG_FILE_PATH")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        Ok(Config {
            source,
            year,
            page_size,
            log_file_path,
        })
    }
}

/// First day of `year` and first day of the following year.
pub fn year_bounds(year: i32) -> Result<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1);
    let end = year
        .checked_add(1)
        .and_then(|next| NaiveDate::from_ymd_opt(next, 1, 1));
    match (start, end) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => bail!("year {year} is out of range"),
    }
}
