pub mod scrape;
pub mod suggest;
