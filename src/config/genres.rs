/// Genres scraped when building the catalog.
///
/// The search endpoint accepts any free-text genre label; this list covers
/// the mainstream categories so the bundled catalog stays broadly useful.
pub const DEFAULT_GENRES: [&str; 9] = [
    "action",
    "adventure",
    "animation",
    "comedy",
    "drama",
    "horror",
    "romance",
    "sci-fi",
    "thriller",
];

/// Get the genre list used for a full catalog build
pub fn default_genres() -> Vec<String> {
    DEFAULT_GENRES.iter().map(|g| g.to_string()).collect()
}
