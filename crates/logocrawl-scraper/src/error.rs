use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid configured header \"{name}\": {reason}")]
    InvalidHeader { name: String, reason: String },
}
