pub mod catalog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod extractor;
pub mod fetchers;
pub mod http;
pub mod services;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

use crate::cli::Command;
use crate::config::default_genres;
use crate::config::settings::AppConfig;
use crate::services::scrape::ScrapeService;
use crate::services::suggest::SuggestionService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_suggest(genre: Option<String>, limit: usize, refresh: bool) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = SuggestionService::new(&config)?;
        service.run(genre, limit, refresh).await
    })
}

pub fn handle_scrape(per_genre: Option<usize>) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let mut config = AppConfig::new();
        if let Some(count) = per_genre {
            config.scraper.per_genre = count;
        }
        let service = ScrapeService::new(&config)?;
        let count = service.run(&default_genres()).await?;
        println!(
            "Scraped {} movies into {}",
            count,
            config.storage.data_path.display()
        );
        Ok(())
    })
}
