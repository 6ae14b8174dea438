//! Collision records as they come out of the NYC open-data CSV export.

use anyhow::{Result, bail};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The five NYC boroughs as reported in the `borough` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Borough {
    Bronx,
    Brooklyn,
    Manhattan,
    Queens,
    StatenIsland,
}

impl FromStr for Borough {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BRONX" => Ok(Borough::Bronx),
            "BROOKLYN" => Ok(Borough::Brooklyn),
            "MANHATTAN" => Ok(Borough::Manhattan),
            "QUEENS" => Ok(Borough::Queens),
            "STATEN ISLAND" => Ok(Borough::StatenIsland),
            other => bail!("unknown borough '{other}'"),
        }
    }
}

/// One CSV row, before timestamp validation.
///
/// Field names are the upstream column names. Empty cells deserialize to
/// `None`; a non-numeric injury or fatality count is a decode error.
#[derive(Debug, Deserialize)]
pub struct RawCollision {
    pub crash_date: Option<String>,
    pub crash_time: Option<String>,
    pub borough: Option<String>,
    pub on_street_name: Option<String>,
    pub cross_street_name: Option<String>,
    pub number_of_persons_injured: Option<f64>,
    pub number_of_persons_killed: Option<f64>,
    pub vehicle_type_code1: Option<String>,
}

/// A single reported crash with a valid combined date and time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollisionRecord {
    pub crashed_at: NaiveDateTime,
    pub borough: Option<Borough>,
    pub on_street: Option<String>,
    pub cross_street: Option<String>,
    pub persons_injured: Option<f64>,
    pub persons_killed: Option<f64>,
    pub vehicle_type: Option<String>,
}

impl RawCollision {
    /// Validates the row. Returns `None` when the date or time is missing or
    /// cannot be parsed; such rows are dropped, never repaired.
    pub fn into_record(self) -> Option<CollisionRecord> {
        let crashed_at = parse_timestamp(self.crash_date.as_deref()?, self.crash_time.as_deref()?)?;

        Some(CollisionRecord {
            crashed_at,
            borough: self.borough.as_deref().and_then(|b| b.parse().ok()),
            on_street: self.on_street_name,
            cross_street: self.cross_street_name,
            persons_injured: self.number_of_persons_injured,
            persons_killed: self.number_of_persons_killed,
            vehicle_type: self.vehicle_type_code1,
        })
    }
}

/// Combines a crash date and a crash time into one naive timestamp.
///
/// Dates may be API floating timestamps (`2024-01-05T00:00:00.000`, whose
/// time part is always midnight and ignored), ISO dates or `MM/DD/YYYY`.
/// Times may be `H:MM`, `HH:MM` or `HH:MM:SS`.
pub fn parse_timestamp(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = parse_date(date.trim())?;
    let time = parse_time(time.trim())?;
    Some(date.and_time(time))
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let day = s.split_once('T').map_or(s, |(day, _)| day);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(day, "%m/%d/%Y"))
        .ok()
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}
