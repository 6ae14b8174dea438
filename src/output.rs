//! Structured log dumps of the computed collision statistics.

use anyhow::Result;
use tracing::debug;

use crate::stats::CollisionStats;

/// Logs the statistics in Rust debug format.
pub fn log_pretty(stats: &CollisionStats) {
    debug!("{:#?}", stats);
}

/// Logs the statistics as pretty-printed JSON.
pub fn log_json(stats: &CollisionStats) -> Result<()> {
    debug!("{}", serde_json::to_string_pretty(stats)?);
    Ok(())
}
