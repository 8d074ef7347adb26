use anyhow::Result;
use log::debug;

use crate::config::settings::ScraperSettings;
use crate::errors::AppError;
use crate::http::PageClient;

/// Fetches one search results page per genre
pub struct SearchPageFetcher {
    client: PageClient,
    search_url: String,
}

impl SearchPageFetcher {
    pub fn new(settings: &ScraperSettings) -> Result<Self> {
        Ok(Self {
            client: PageClient::new(settings)?,
            search_url: settings.search_url.to_string(),
        })
    }

    /// Fetch the raw markup of a genre search page, sorted by user rating,
    /// limited to `count` feature films. Any transport failure or non-2xx
    /// status surfaces as a fetch error; the caller skips the genre.
    pub async fn fetch(&self, genre: &str, count: usize) -> Result<String> {
        let count = count.to_string();
        let query = [
            ("genres", genre),
            ("title_type", "feature"),
            ("sort", "user_rating,desc"),
            ("count", count.as_str()),
        ];

        debug!("Fetching genre page: {} genres={}", self.search_url, genre);

        let response = self
            .client
            .get(&self.search_url, &query)
            .await
            .map_err(|e| AppError::Fetch(format!("Request failed for genre '{genre}': {e:#}")))?;

        Self::check_status(genre, &response)?;

        response
            .text()
            .await
            .map_err(|e| AppError::Fetch(format!("Failed to read page for genre '{genre}': {e}")).into())
    }

    fn check_status(genre: &str, response: &reqwest::Response) -> Result<()> {
        if !response.status().is_success() {
            return Err(AppError::Fetch(format!(
                "HTTP {} for genre '{}'",
                response.status(),
                genre
            ))
            .into());
        }
        Ok(())
    }
}
