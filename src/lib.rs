//! NYC motor vehicle collision report viewer.
//!
//! Loads one year of collisions, computes a fixed set of aggregates once, and
//! serves them through a numbered terminal menu with two line charts.

pub mod chart;
pub mod config;
pub mod fetch;
pub mod loader;
pub mod menu;
pub mod output;
pub mod parser;
pub mod ranking;
pub mod record;
pub mod stats;
