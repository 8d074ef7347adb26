use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "movie recommendations from scraped genre listings")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Print top movie suggestions for a genre (scrapes the catalog first if missing)
    Suggest {
        /// Genre to look up; prompts on stdin when omitted
        #[arg(short, long)]
        genre: Option<String>,
        /// Maximum number of suggestions
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
        /// Discard any existing catalog and scrape a fresh one first
        #[arg(long)]
        refresh: bool,
    },
    /// Rebuild the movie catalog from the live site
    Scrape {
        /// Listings requested per genre (overrides the configured default)
        #[arg(long)]
        per_genre: Option<usize>,
    },
}
