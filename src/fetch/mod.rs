mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::Result;
use reqwest::Url;
use tracing::debug;

/// Fetches the body at `url` through `client`.
pub fn fetch_bytes<C: HttpClient>(client: &C, url: &Url) -> Result<Vec<u8>> {
    let bytes = client.get_bytes(url)?;
    debug!(%url, bytes = bytes.len(), "Fetched");
    Ok(bytes)
}
