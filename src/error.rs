use thiserror::Error;

/// Reasons the wikitext of an article could not be retrieved.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with HTTP {status}")]
    Status { status: reqwest::StatusCode },

    /// The API answered, but without the article's wikitext.
    #[error("article '{title}' not found or inaccessible ({reason})")]
    ArticleNotFound { title: String, reason: String },

    #[error("malformed API response: {0}")]
    Decode(#[from] serde_json::Error),
}
