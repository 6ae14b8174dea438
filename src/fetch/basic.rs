use super::client::HttpClient;
use anyhow::{Context, Result, anyhow};
use reqwest::Url;
use std::time::Duration;

/// [`HttpClient`] backed by a blocking `reqwest` client.
pub struct BasicClient(reqwest::blocking::Client);

impl BasicClient {
    pub fn new() -> Result<Self> {
        // A full page of a year's CSV can take a while on slow links.
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(300))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self(client))
    }
}

impl HttpClient for BasicClient {
    fn get_bytes(&self, url: &Url) -> Result<Vec<u8>> {
        let response = self
            .0
            .get(url.clone())
            .send()
            .with_context(|| format!("request to {url} failed"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(anyhow!("{url} returned status {status}: {body}"));
        }

        Ok(response.bytes()?.to_vec())
    }
}
