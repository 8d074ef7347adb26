use serde::{Deserialize, Serialize};

/// One movie listing extracted from a search results page.
///
/// Field order matches the catalog file header:
/// `title,year,genres,rating,source_genre`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    /// 4-digit year, or empty when the listing carried none.
    pub year: String,
    /// Lowercase, comma-joined, whitespace-free; may be empty.
    pub genres: String,
    pub rating: Option<f64>,
    /// The genre the listing was scraped under. Older catalogs may lack
    /// this column, so it defaults to empty on load.
    #[serde(default)]
    pub source_genre: String,
}

impl MovieRecord {
    /// Deduplication identity within a catalog.
    pub fn identity(&self) -> (&str, &str) {
        (&self.title, &self.year)
    }
}

/// A recommendation row, projected down to the display fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub title: String,
    pub year: String,
    pub rating: Option<f64>,
    pub genres: String,
}

impl From<&MovieRecord> for Suggestion {
    fn from(record: &MovieRecord) -> Self {
        Self {
            title: record.title.clone(),
            year: record.year.clone(),
            rating: record.rating,
            genres: record.genres.clone(),
        }
    }
}
