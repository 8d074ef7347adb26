use anyhow::Result;

use movie_recommender::cli::Command;
use movie_recommender::errors::AppError;
use movie_recommender::{handle_scrape, handle_suggest, interpret};

fn main() {
    setup_logging();
    if let Err(e) = parse_and_execute() {
        report_failure(&e);
        std::process::exit(1);
    }
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Suggest {
            genre,
            limit,
            refresh,
        } => handle_suggest(genre.clone(), *limit, *refresh),
        Command::Scrape { per_genre } => handle_scrape(*per_genre),
    }
}

fn report_failure(error: &anyhow::Error) {
    match error.downcast_ref::<AppError>() {
        Some(domain) => eprintln!("Error: {domain}"),
        None => eprintln!("Unexpected error: {error:#}"),
    }
}
