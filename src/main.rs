//! Interactive viewer for one year of NYC motor vehicle collisions.
//!
//! Loads the data once, computes every statistic up front, then serves a
//! numbered menu until the user exits.

use anyhow::Result;
use collision_viewer::{
    chart::TerminalChartDisplay,
    config::Config,
    fetch::BasicClient,
    loader::load_dataset,
    menu::ReportMenu,
    output::{log_json, log_pretty},
    stats::CollisionStats,
};
use std::ffi::OsStr;
use std::io;
use std::path::Path;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let config = Config::from_env()?;
    let _log_guard = init_logging(config.log_file_path.as_deref());
    info!(source = ?config.source, year = config.year, "Starting collision viewer");

    println!("Loading {} NYC collision data...", config.year);
    let client = BasicClient::new()?;
    let dataset = load_dataset(&client, &config)?;
    println!("Data loaded successfully. Total records: {}", dataset.len());

    let stats = CollisionStats::from_dataset(&dataset);
    log_pretty(&stats);
    log_json(&stats)?;

    let mut menu = ReportMenu::new(&stats, TerminalChartDisplay);
    menu.run(io::stdin().lock(), io::stdout())
}

/// Logging setup: stderr always, plus a JSON rolling log file when
/// `LOG_FILE_PATH` is configured. The returned guard flushes the file on drop.
fn init_logging(log_file_path: Option<&Path>) -> Option<WorkerGuard> {
    // Quiet by default so log lines do not interleave with the menu.
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_ansi(true)
        .with_writer(io::stderr)
        .with_filter(EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("warn")));

    let (json_layer, guard) = match log_file_path {
        Some(path) => {
            let log_dir = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let log_file_name = path
                .file_name()
                .unwrap_or(OsStr::new("collision_viewer.log"));

            let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(non_blocking_file)
                .with_filter(
                    EnvFilter::try_from_env("RUST_LOG_JSON")
                        .unwrap_or_else(|_| EnvFilter::new("debug")),
                );
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    guard
}
