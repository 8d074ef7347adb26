use thiserror::Error;

/// Domain errors reported to the user as `Error: <message>`.
///
/// Anything that is not an `AppError` reaches the top level as an
/// unexpected failure and is printed with a distinct prefix.
#[derive(Error, Debug)]
pub enum AppError {
    /// A single genre's page request failed; the caller skips the genre.
    #[error("{0}")]
    Fetch(String),

    /// Every genre failed; the message lists the failed genres.
    #[error("{0}")]
    Scrape(String),

    /// Catalog file missing, unreadable, or missing required columns.
    #[error("{0}")]
    Dataset(String),

    /// Empty genre input or no matching rows.
    #[error("{0}")]
    Suggestion(String),

    /// Stdin was closed or interrupted during the genre prompt.
    #[error("Input cancelled. Please rerun the app.")]
    InputCancelled,
}
