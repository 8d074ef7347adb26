use anyhow::{Context, Result};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::domain::MovieRecord;

/// Extracts movie records from the listing blocks of a search results page
pub struct MovieExtractor {
    listing: Selector,
    title: Selector,
    year: Selector,
    genre: Selector,
    rating: Selector,
    year_token: Regex,
}

impl MovieExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            listing: parse_selector("div.lister-item")?,
            title: parse_selector("h3.lister-item-header a")?,
            year: parse_selector("span.lister-item-year")?,
            genre: parse_selector("span.genre")?,
            rating: parse_selector("div.inline-block.ratings-imdb-rating strong")?,
            year_token: Regex::new(r"^\(?(\d{4})\)?$")
                .context("Failed to compile year token regex")?,
        })
    }

    /// Extract one record per listing block. Blocks without a title are
    /// skipped; a page with no listing blocks yields an empty vec, which is
    /// not an error at this layer.
    pub fn extract(&self, markup: &str, genre: &str) -> Vec<MovieRecord> {
        let document = Html::parse_document(markup);
        let source_genre = genre.to_lowercase();

        let mut records = Vec::new();
        for item in document.select(&self.listing) {
            let Some(title) = self.first_text(item, &self.title) else {
                continue;
            };

            records.push(MovieRecord {
                title,
                year: self.extract_year(item),
                genres: self.extract_genres(item, genre),
                rating: self.extract_rating(item),
                source_genre: source_genre.clone(),
            });
        }
        records
    }

    // --- Field Extraction ---

    /// First 4-digit token of the year field wins, e.g. "(I) (2015)" → 2015.
    fn extract_year(&self, item: ElementRef) -> String {
        let year_text = self.first_text(item, &self.year).unwrap_or_default();
        year_text
            .split_whitespace()
            .find_map(|token| self.year_token.captures(token).map(|c| c[1].to_string()))
            .unwrap_or_default()
    }

    /// Genre tag text, lowercased with whitespace removed. Falls back to
    /// the queried genre when the tag is missing.
    fn extract_genres(&self, item: ElementRef, queried: &str) -> String {
        match self.first_text(item, &self.genre) {
            Some(text) => text.split_whitespace().collect::<String>().to_lowercase(),
            None => queried.to_lowercase(),
        }
    }

    fn extract_rating(&self, item: ElementRef) -> Option<f64> {
        let text = self.first_text(item, &self.rating)?;
        parse_decimal(&text)
    }

    fn first_text(&self, item: ElementRef, selector: &Selector) -> Option<String> {
        let element = item.select(selector).next()?;
        let text = element.text().collect::<String>();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow::anyhow!("Failed to parse selector '{css}': {e}"))
}

/// Accepts only plain decimal numerals ("8.1", "9"), rejecting signs,
/// exponents and other forms `f64::from_str` would allow.
fn parse_decimal(text: &str) -> Option<f64> {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    text.parse().ok()
}
