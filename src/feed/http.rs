//! HTTP price feed client (requires the `async` feature)

use std::time::Duration;

use reqwest::Client;

use crate::error::{PriceBookError, Result};
use crate::feed::{parse_json, parse_json_lossy, DEFAULT_FEED_URL};
use crate::index::LatestPriceIndex;
use crate::observation::PriceObservation;

/// Client for fetching a JSON price feed over HTTP
pub struct PriceFeedClient {
    client: Client,
    url: String,
}

impl PriceFeedClient {
    /// Create a client pointed at the default feed endpoint
    pub fn new() -> Result<Self> {
        Self::with_url(DEFAULT_FEED_URL)
    }

    /// Create a client pointed at a custom feed endpoint
    pub fn with_url(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("pricebook/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                PriceBookError::FeedError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Endpoint this client fetches from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and strictly parse the feed
    pub async fn fetch(&self) -> Result<Vec<PriceObservation>> {
        parse_json(&self.fetch_text().await?)
    }

    /// Fetch the feed, dropping malformed records with a warning.
    /// Returns the surviving observations and the drop count.
    pub async fn fetch_lossy(&self) -> Result<(Vec<PriceObservation>, usize)> {
        parse_json_lossy(&self.fetch_text().await?)
    }

    /// Fetch the feed and build a latest-price index from it
    pub async fn fetch_index(&self) -> Result<LatestPriceIndex> {
        Ok(LatestPriceIndex::from_observations(self.fetch().await?))
    }

    async fn fetch_text(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| PriceBookError::FeedError(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(PriceBookError::FeedError(format!(
                "Feed endpoint returned error: {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| PriceBookError::FeedError(format!("Failed to read response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_defaults_to_public_feed() {
        let client = PriceFeedClient::new().unwrap();
        assert_eq!(client.url(), DEFAULT_FEED_URL);
    }

    #[test]
    fn test_client_url_override() {
        let client = PriceFeedClient::with_url("http://localhost:9000/prices.json").unwrap();
        assert_eq!(client.url(), "http://localhost:9000/prices.json");
    }
}
