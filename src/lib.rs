//! Paginated scraping of product review listings.
//!
//! [`ReviewScraper`] derives the ASIN from a product URL, walks the
//! recency-sorted review pages and turns each review block into a [`Review`].

pub mod asin;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod output;
pub mod review;
pub mod scrape;
pub mod selectors;
pub mod text;

pub use asin::extract_asin;
pub use config::ScraperConfig;
pub use error::{ExtractError, FetchError, ScraperError};
pub use extract::parse_reviews;
pub use fetch::{fetch_with_retries, HttpTransport, PageResponse, Transport};
pub use output::OutputFormat;
pub use review::Review;
pub use scrape::ReviewScraper;
