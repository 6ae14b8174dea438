use anyhow::Result;
use reqwest::Url;

/// Blocking HTTP seam used by the loader.
pub trait HttpClient {
    /// Performs a GET and returns the response body of a successful response.
    fn get_bytes(&self, url: &Url) -> Result<Vec<u8>>;
}
