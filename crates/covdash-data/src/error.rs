use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from {context}: {source}")]
    Deserialize {
        context: String,
        source: serde_json::Error,
    },

    #[error("invalid base URL {url:?}: {reason}")]
    BaseUrl { url: String, reason: String },
}
