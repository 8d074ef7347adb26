use std::path::PathBuf;

pub struct ScraperSettings {
    pub search_url: &'static str,
    pub user_agent: &'static str,
    pub accept_language: &'static str,
    pub timeout_secs: u64,
    pub delay_ms: u64,
    pub per_genre: usize,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            search_url: "https://www.imdb.com/search/title/",
            // A lightweight browser user agent helps avoid basic blocking.
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                         AppleWebKit/537.36 (KHTML, like Gecko) \
                         Chrome/119.0.0.0 Safari/537.36",
            accept_language: "en-US,en;q=0.9",
            timeout_secs: 10,
            delay_ms: 500,
            per_genre: 30,
        }
    }
}

pub struct StorageSettings {
    pub data_path: PathBuf,
    pub fallback_path: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/movies.csv"),
            fallback_path: PathBuf::from("data/sample_movies.csv"),
        }
    }
}

pub struct AppConfig {
    pub scraper: ScraperSettings,
    pub storage: StorageSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            scraper: ScraperSettings::default(),
            storage: StorageSettings::default(),
        }
    }
}

// Passed explicitly into the services (dependency injection) rather than
// held as process-wide globals.
