use anyhow::Result;
use log::info;
use std::cmp::Ordering;
use std::io::{self, Write};

use crate::catalog::CatalogStore;
use crate::config::default_genres;
use crate::config::settings::AppConfig;
use crate::domain::{MovieRecord, Suggestion};
use crate::errors::AppError;
use crate::services::scrape::ScrapeService;

/// Interactive recommendation flow: make sure a catalog exists, resolve
/// the genre, rank, print.
pub struct SuggestionService {
    store: CatalogStore,
    scraper: ScrapeService,
    genres: Vec<String>,
}

impl SuggestionService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            store: CatalogStore::new(&config.storage),
            scraper: ScrapeService::new(config)?,
            genres: default_genres(),
        })
    }

    pub async fn run(&self, genre: Option<String>, limit: usize, refresh: bool) -> Result<()> {
        self.ensure_dataset(refresh).await?;
        let genre = resolve_genre(genre)?;

        let catalog = self.store.load()?;
        let suggestions = suggest_by_genre(&catalog, &genre, limit)?;

        println!("\nTop suggestions:");
        println!("{}", format_suggestions(&suggestions));
        Ok(())
    }

    /// Scrape a catalog when none exists yet. When the whole scrape fails
    /// and a bundled fallback is available, copy it into place so the app
    /// stays usable offline.
    async fn ensure_dataset(&self, refresh: bool) -> Result<()> {
        if refresh {
            self.store.remove()?;
        }
        if self.store.exists() {
            return Ok(());
        }

        info!("Scraping movies... (this may take a while)");
        match self.scraper.run(&self.genres).await {
            Ok(_) => Ok(()),
            Err(e) => match e.downcast_ref::<AppError>() {
                Some(AppError::Scrape(_)) => self.apply_fallback(&e),
                _ => Err(e),
            },
        }
    }

    fn apply_fallback(&self, scrape_error: &anyhow::Error) -> Result<()> {
        if !self.store.has_fallback() {
            return Err(AppError::Scrape(format!(
                "Failed to scrape data and no fallback available: {scrape_error}"
            ))
            .into());
        }

        self.store.copy_fallback()?;
        info!("Network scraping failed; loaded bundled sample data instead.");
        Ok(())
    }
}

fn resolve_genre(genre: Option<String>) -> Result<String> {
    match genre {
        Some(g) => {
            let trimmed = g.trim();
            if trimmed.is_empty() {
                Err(AppError::Suggestion("No genre provided.".to_string()).into())
            } else {
                Ok(trimmed.to_string())
            }
        }
        None => prompt_for_genre(),
    }
}

fn prompt_for_genre() -> Result<String> {
    print!("Enter a movie genre (e.g., action, comedy, drama): ");
    io::stdout().flush().ok();

    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => Err(AppError::InputCancelled.into()),
        Ok(_) => {
            let genre = line.trim();
            if genre.is_empty() {
                Err(AppError::Suggestion("No genre provided.".to_string()).into())
            } else {
                Ok(genre.to_string())
            }
        }
    }
}

/// Rank the catalog rows matching `genre` (case-insensitive substring of
/// the genres field) by rating descending, then year descending; ties keep
/// their encounter order. Returns at most `limit` rows.
pub fn suggest_by_genre(
    catalog: &[MovieRecord],
    genre: &str,
    limit: usize,
) -> Result<Vec<Suggestion>> {
    if genre.trim().is_empty() {
        return Err(AppError::Suggestion("Genre cannot be empty.".to_string()).into());
    }

    let needle = genre.to_lowercase();
    let mut matches: Vec<&MovieRecord> = catalog
        .iter()
        .filter(|record| record.genres.to_lowercase().contains(&needle))
        .collect();

    if matches.is_empty() {
        return Err(AppError::Suggestion(format!(
            "No movies found for genre '{genre}'. Try another genre."
        ))
        .into());
    }

    matches.sort_by(|a, b| rank_order(a, b));
    Ok(matches.into_iter().take(limit).map(Suggestion::from).collect())
}

/// Higher rating first (absent rating sorts last), then more recent year.
fn rank_order(a: &MovieRecord, b: &MovieRecord) -> Ordering {
    let rating_a = a.rating.unwrap_or(f64::NEG_INFINITY);
    let rating_b = b.rating.unwrap_or(f64::NEG_INFINITY);

    rating_b
        .partial_cmp(&rating_a)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.year.cmp(&a.year))
}

/// One display line per suggestion, e.g. `Mad Max (2015) - 8.1 [action]`.
pub fn format_suggestions(rows: &[Suggestion]) -> String {
    rows.iter().map(format_line).collect::<Vec<_>>().join("\n")
}

fn format_line(row: &Suggestion) -> String {
    let mut line = format!("{} ({})", row.title, row.year);
    if let Some(rating) = row.rating {
        if rating != 0.0 {
            line.push_str(&format!(" - {rating}"));
        }
    }
    if !row.genres.is_empty() {
        line.push_str(&format!(" [{}]", row.genres));
    }
    line
}
