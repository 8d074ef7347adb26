use anyhow::{Context, Result};
use reqwest::Client;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use std::time::Duration;

use crate::config::settings::ScraperSettings;

/// HTTP client carrying the browser-like headers the search site expects
pub struct PageClient {
    client: Client,
}

impl PageClient {
    pub fn new(settings: &ScraperSettings) -> Result<Self> {
        let client = Self::build_client(settings)?;
        Ok(Self { client })
    }

    pub async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<reqwest::Response> {
        self.client
            .get(url)
            .query(query)
            .send()
            .await
            .context("Failed to send GET request")
    }

    fn build_client(settings: &ScraperSettings) -> Result<Client> {
        Client::builder()
            .user_agent(settings.user_agent)
            .default_headers(Self::build_headers(settings))
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }

    fn build_headers(settings: &ScraperSettings) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(settings.accept_language),
        );
        headers
    }
}
