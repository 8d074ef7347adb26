use anyhow::{Result, bail};
use log::{info, warn};
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::sleep;

use crate::catalog::CatalogStore;
use crate::config::settings::AppConfig;
use crate::domain::MovieRecord;
use crate::errors::AppError;
use crate::extractor::MovieExtractor;
use crate::fetchers::SearchPageFetcher;

/// Builds the catalog: one fetch+extract pass per genre, then a single
/// deduplicated write.
pub struct ScrapeService {
    fetcher: SearchPageFetcher,
    extractor: MovieExtractor,
    store: CatalogStore,
    delay: Duration,
    per_genre: usize,
}

impl ScrapeService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            fetcher: SearchPageFetcher::new(&config.scraper)?,
            extractor: MovieExtractor::new()?,
            store: CatalogStore::new(&config.storage),
            delay: Duration::from_millis(config.scraper.delay_ms),
            per_genre: config.scraper.per_genre,
        })
    }

    /// Scrape every genre in order, skipping failed ones, and persist the
    /// deduplicated catalog. Returns the number of persisted records.
    /// Nothing is written unless at least one genre succeeds.
    pub async fn run(&self, genres: &[String]) -> Result<usize> {
        info!("=== Starting Catalog Scrape ===");

        let mut collected = Vec::new();
        let mut failed = Vec::new();

        for genre in genres {
            match self.scrape_genre(genre).await {
                Ok(records) => {
                    info!("  → {}: {} listings", genre, records.len());
                    collected.extend(records);
                    // Courtesy delay between requests.
                    sleep(self.delay).await;
                }
                Err(e) => {
                    warn!("Skipping genre '{}': {:#}", genre, e);
                    failed.push(genre.clone());
                }
            }
        }

        let catalog = finalize(collected, &failed)?;
        self.store.write(&catalog)?;

        info!("=== Scrape Complete: {} movies ===", catalog.len());
        Ok(catalog.len())
    }

    async fn scrape_genre(&self, genre: &str) -> Result<Vec<MovieRecord>> {
        let markup = self.fetcher.fetch(genre, self.per_genre).await?;
        let records = self.extractor.extract(&markup, genre);

        // A page that parses but lists nothing counts as a failed genre.
        if records.is_empty() {
            bail!("no listings found for genre '{}'", genre);
        }
        Ok(records)
    }
}

/// Deduplicate the collected records, or fail naming every genre when
/// nothing was collected at all.
pub fn finalize(collected: Vec<MovieRecord>, failed: &[String]) -> Result<Vec<MovieRecord>> {
    if collected.is_empty() {
        return Err(AppError::Scrape(format!(
            "Could not scrape data for any genres: {}",
            failed.join(", ")
        ))
        .into());
    }
    Ok(dedup_records(collected))
}

/// Drop records sharing a `(title, year)` identity, keeping the first
/// occurrence and the original order.
pub fn dedup_records(records: Vec<MovieRecord>) -> Vec<MovieRecord> {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(records.len());

    for record in records {
        let identity = (record.title.clone(), record.year.clone());
        if seen.insert(identity) {
            unique.push(record);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    fn record(title: &str, year: &str, genres: &str, rating: Option<f64>) -> MovieRecord {
        MovieRecord {
            title: title.to_string(),
            year: year.to_string(),
            genres: genres.to_string(),
            rating,
            source_genre: "action".to_string(),
        }
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let records = vec![
            record("Mad Max", "2015", "action", Some(8.1)),
            record("Old Film", "1990", "action", Some(7.0)),
            record("Old Film", "1990", "action,drama", Some(7.0)),
        ];

        let unique = dedup_records(records);

        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].title, "Mad Max");
        assert_eq!(unique[1].title, "Old Film");
        assert_eq!(unique[1].genres, "action");
    }

    #[test]
    fn test_dedup_distinguishes_same_title_different_year() {
        let records = vec![
            record("Remake", "1990", "drama", Some(7.0)),
            record("Remake", "2020", "drama", Some(6.5)),
        ];

        let unique = dedup_records(records);

        assert_eq!(unique.len(), 2);
    }

    #[test]
    fn test_finalize_with_no_records_names_failed_genres() {
        let failed = vec!["action".to_string(), "drama".to_string()];

        let err = finalize(Vec::new(), &failed).unwrap_err();

        let app_error = err.downcast_ref::<AppError>().expect("domain error");
        assert!(matches!(app_error, AppError::Scrape(_)));
        assert!(err.to_string().contains("action, drama"));
    }

    #[test]
    fn test_finalize_dedups_collected_records() {
        let records = vec![
            record("Mad Max", "2015", "action", Some(8.1)),
            record("Mad Max", "2015", "action,thriller", Some(8.1)),
        ];

        let catalog = finalize(records, &["drama".to_string()]).unwrap();

        assert_eq!(catalog.len(), 1);
    }
}
