use thiserror::Error;

/// Errors surfaced by the scrape pipeline.
///
/// Field extraction misses are not errors: a candidate block lacking a date
/// or location is silently dropped during normalization.
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("fetch failed: {url} - {message}")]
    Fetch { url: String, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
