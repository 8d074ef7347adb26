use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::settings::StorageSettings;
use crate::domain::MovieRecord;
use crate::errors::AppError;

/// Columns the recommender requires; `source_genre` is written by the
/// scraper but optional on load.
pub const REQUIRED_COLUMNS: [&str; 4] = ["title", "year", "genres", "rating"];

/// CSV-backed catalog file with a bundled fallback copy
#[derive(Clone)]
pub struct CatalogStore {
    data_path: PathBuf,
    fallback_path: PathBuf,
}

impl CatalogStore {
    pub fn new(settings: &StorageSettings) -> Self {
        Self {
            data_path: settings.data_path.clone(),
            fallback_path: settings.fallback_path.clone(),
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn exists(&self) -> bool {
        self.data_path.exists()
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback_path.exists()
    }

    pub fn remove(&self) -> Result<()> {
        if self.exists() {
            fs::remove_file(&self.data_path).context("Failed to remove existing catalog")?;
        }
        Ok(())
    }

    /// Write the full catalog, overwriting any existing file. Rows go to a
    /// temporary file first and are renamed into place, so an interrupted
    /// write never leaves a partial catalog behind.
    pub fn write(&self, records: &[MovieRecord]) -> Result<()> {
        self.create_parent_dirs()?;

        let temp_path = self.temp_path();
        self.write_rows(&temp_path, records)?;
        fs::rename(&temp_path, &self.data_path).context("Failed to move catalog into place")?;

        info!(
            "Wrote {} movies to {}",
            records.len(),
            self.data_path.display()
        );
        Ok(())
    }

    /// Load the catalog, validating that every required column is present.
    pub fn load(&self) -> Result<Vec<MovieRecord>> {
        if !self.exists() {
            return Err(AppError::Dataset(format!(
                "Movie dataset not found at {}",
                self.data_path.display()
            ))
            .into());
        }

        let mut reader = csv::Reader::from_path(&self.data_path)
            .map_err(|e| AppError::Dataset(format!("Could not read dataset: {e}")))?;

        let headers = reader
            .headers()
            .map_err(|e| AppError::Dataset(format!("Could not read dataset: {e}")))?
            .clone();
        Self::check_columns(&headers)?;

        let mut records = Vec::new();
        for row in reader.deserialize() {
            let record: MovieRecord =
                row.map_err(|e| AppError::Dataset(format!("Could not read dataset: {e}")))?;
            records.push(record);
        }
        Ok(records)
    }

    /// Copy the bundled fallback catalog into place, byte for byte.
    pub fn copy_fallback(&self) -> Result<()> {
        if !self.has_fallback() {
            return Err(AppError::Dataset(format!(
                "No fallback dataset at {}",
                self.fallback_path.display()
            ))
            .into());
        }

        self.create_parent_dirs()?;
        fs::copy(&self.fallback_path, &self.data_path)
            .context("Failed to copy fallback dataset")?;

        info!(
            "Copied fallback dataset to {}",
            self.data_path.display()
        );
        Ok(())
    }

    // --- Helper Methods ---

    fn check_columns(headers: &csv::StringRecord) -> Result<()> {
        let mut missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .filter(|column| !headers.iter().any(|h| h == **column))
            .copied()
            .collect();

        if missing.is_empty() {
            return Ok(());
        }
        missing.sort_unstable();
        Err(AppError::Dataset(format!("Dataset missing columns: {}", missing.join(", "))).into())
    }

    fn write_rows(&self, path: &Path, records: &[MovieRecord]) -> Result<()> {
        let mut writer = csv::Writer::from_path(path).context("Failed to create catalog file")?;
        for record in records {
            writer
                .serialize(record)
                .context("Failed to serialize movie record")?;
        }
        writer.flush().context("Failed to flush catalog file")?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut path = self.data_path.clone().into_os_string();
        path.push(".tmp");
        PathBuf::from(path)
    }

    fn create_parent_dirs(&self) -> Result<()> {
        if let Some(parent) = self.data_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).context("Failed to create data directory")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn store_at(dir: &Path) -> CatalogStore {
        CatalogStore::new(&StorageSettings {
            data_path: dir.join("movies.csv"),
            fallback_path: dir.join("sample_movies.csv"),
        })
    }

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
    fn test_round_trip_preserves_records() {
        let dir = TempDir::new().unwrap();
        let store = store_at(dir.path());
        let records = vec![
            record("Mad Max", "2015", "action", Some(8.1)),
            record("Unrated Film", "", "action,drama", None),
        ];

        store.write(&records).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, records);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let store = store_at(dir.path());

        let err = store.load().unwrap_err();

        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_names_missing_rating_column() {
        let dir = TempDir::new().unwrap();
        let store = store_at(dir.path());
        std::fs::write(
            dir.path().join("movies.csv"),
            "title,year,genres\nMad Max,2015,action\n",
        )
        .unwrap();

        let err = store.load().unwrap_err();

        let message = err.to_string();
        assert!(message.contains("missing columns"));
        assert!(message.contains("rating"));
    }

    #[test]
    fn test_load_accepts_catalog_without_source_genre() {
        let dir = TempDir::new().unwrap();
        let store = store_at(dir.path());
        std::fs::write(
            dir.path().join("movies.csv"),
            "title,year,genres,rating\nMad Max,2015,action,8.1\n",
        )
        .unwrap();

        let loaded = store.load().unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "Mad Max");
        assert_eq!(loaded[0].rating, Some(8.1));
        assert_eq!(loaded[0].source_genre, "");
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let store = CatalogStore::new(&StorageSettings {
            data_path: dir.path().join("nested/data/movies.csv"),
            fallback_path: dir.path().join("sample_movies.csv"),
        });

        store.write(&[record("Mad Max", "2015", "action", Some(8.1))]).unwrap();

        assert!(store.exists());
    }

    #[test]
    fn test_write_overwrites_existing_catalog() {
        let dir = TempDir::new().unwrap();
        let store = store_at(dir.path());

        store.write(&[record("Old Film", "1990", "drama", Some(7.0))]).unwrap();
        store.write(&[record("Mad Max", "2015", "action", Some(8.1))]).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "Mad Max");
    }

    #[test]
    fn test_write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = store_at(dir.path());

        store.write(&[record("Mad Max", "2015", "action", Some(8.1))]).unwrap();

        assert!(!dir.path().join("movies.csv.tmp").exists());
    }

    #[test]
    fn test_copy_fallback_is_byte_for_byte() {
        let dir = TempDir::new().unwrap();
        let store = store_at(dir.path());
        let seed = "title,year,genres,rating,source_genre\nMad Max,2015,action,8.1,action\n";
        std::fs::write(dir.path().join("sample_movies.csv"), seed).unwrap();

        store.copy_fallback().unwrap();

        let copied = std::fs::read_to_string(dir.path().join("movies.csv")).unwrap();
        assert_eq!(copied, seed);
    }

    #[test]
    fn test_copy_fallback_without_seed_fails() {
        let dir = TempDir::new().unwrap();
        let store = store_at(dir.path());

        let err = store.copy_fallback().unwrap_err();

        assert!(err.to_string().contains("No fallback dataset"));
    }
}
