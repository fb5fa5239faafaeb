//! Pagination over a product's review listing pages.

use crate::asin::extract_asin;
use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::extract::parse_reviews;
use crate::fetch::{fetch_with_retries, HttpTransport, Transport};
use crate::review::Review;

/// Walks the recency-sorted review listing of one product, page by page.
pub struct ReviewScraper<T = HttpTransport> {
    transport: T,
    config: ScraperConfig,
}

impl ReviewScraper<HttpTransport> {
    /// Creates a scraper that talks HTTP with the given settings.
    pub fn new(config: ScraperConfig) -> Result<Self, ScraperError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self { transport, config })
    }
}

impl<T: Transport> ReviewScraper<T> {
    pub fn with_transport(config: ScraperConfig, transport: T) -> Self {
        Self { transport, config }
    }

    /// Listing URL for one page of a product's reviews, newest first.
    pub fn review_page_url(&self, asin: &str, page: usize) -> String {
        format!(
            "{}/product-reviews/{}?pageNumber={}&sortBy=recent",
            self.config.origin.as_str().trim_end_matches('/'),
            asin,
            page
        )
    }

    /// Collects up to `max_reviews` reviews for the product behind `product_url`.
    ///
    /// Fails only when no ASIN can be derived from the URL, before any request
    /// is made. A page that cannot be fetched or yields no reviews ends the
    /// walk, and whatever was collected so far is returned.
    pub async fn scrape_product_reviews(
        &self,
        product_url: &str,
        max_reviews: usize,
    ) -> Result<Vec<Review>, ScraperError> {
        let asin = extract_asin(product_url).ok_or_else(|| ScraperError::AsinNotFound {
            url: product_url.to_string(),
        })?;
        log::info!("Derived ASIN {} from URL {}", asin, product_url);

        let mut collected: Vec<Review> = Vec::new();
        let mut page = 1;

        while collected.len() < max_reviews {
            let page_url = self.review_page_url(&asin, page);
            log::debug!("Fetching reviews page {}: {}", page, page_url);

            let Some(html) = fetch_with_retries(
                &self.transport,
                &page_url,
                self.config.max_attempts(),
                self.config.sleep_between_requests,
            )
            .await
            else {
                log::warn!("Empty HTML returned for {}. Stopping pagination.", page_url);
                break;
            };

            let reviews = parse_reviews(&html, &asin, collected.len() + 1, &self.config.origin);
            if reviews.is_empty() {
                log::info!("No more reviews found at page {}.", page);
                break;
            }

            let yielded = reviews.len();
            collected.extend(reviews);
            log::info!(
                "Page {} yielded {} reviews (total so far: {}).",
                page,
                yielded,
                collected.len()
            );

            if collected.len() >= max_reviews {
                break;
            }

            page += 1;
            tokio::time::sleep(self.config.sleep_between_requests).await;
        }

        collected.truncate(max_reviews);
        Ok(collected)
    }
}
