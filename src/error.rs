use thiserror::Error;

/// Errors surfaced to callers of the review scraper
#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("Could not determine ASIN from product URL: {url}")]
    AsinNotFound { url: String },
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("HTTP client setup failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// A single failed request attempt
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// A review block that could not be turned into a record
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Review link {href:?} cannot be resolved: {source}")]
    ReviewUrl {
        href: String,
        #[source]
        source: url::ParseError,
    },
}
