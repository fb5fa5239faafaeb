//! Runtime settings for the review scraper.

use std::time::Duration;

use url::Url;

use crate::error::ScraperError;

/// Site origin that listing URLs are built on and review links resolve against.
pub const DEFAULT_ORIGIN: &str = "https://www.amazon.com";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration bundle shared by the transport and the pagination loop.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Sent as the `User-Agent` header on every request
    pub user_agent: String,
    /// Per-request cap
    pub timeout: Duration,
    /// Routes both HTTP and HTTPS traffic when set
    pub proxy: Option<String>,
    /// Maximum fetch attempts per page
    pub retry_count: u32,
    /// Politeness delay between pages, also the base of the retry backoff
    pub sleep_between_requests: Duration,
    pub origin: Url,
}

impl ScraperConfig {
    /// Replaces the site origin, e.g. to point at a local mirror.
    pub fn with_origin(mut self, origin: &str) -> Result<Self, ScraperError> {
        let parsed = Url::parse(origin)
            .map_err(|e| ScraperError::InvalidUrl(format!("{}: {}", origin, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(ScraperError::InvalidUrl(format!(
                "{}: origin cannot be used as a base URL",
                origin
            )));
        }
        self.origin = parsed;
        Ok(self)
    }

    /// Number of attempts the fetcher makes for one page, never less than one.
    pub fn max_attempts(&self) -> u32 {
        self.retry_count.max(1)
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(20),
            proxy: None,
            retry_count: 3,
            sleep_between_requests: Duration::from_secs(1),
            origin: Url::parse(DEFAULT_ORIGIN).expect("default origin is a valid URL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ScraperConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(20));
        assert_eq!(config.retry_count, 3);
        assert_eq!(config.sleep_between_requests, Duration::from_secs(1));
        assert!(config.proxy.is_none());
        assert_eq!(config.origin.as_str(), "https://www.amazon.com/");
    }

    #[test]
    fn zero_retries_still_attempts_once() {
        let config = ScraperConfig {
            retry_count: 0,
            ..ScraperConfig::default()
        };
        assert_eq!(config.max_attempts(), 1);
    }

    #[test]
    fn rejects_unusable_origin() {
        assert!(ScraperConfig::default().with_origin("not a url").is_err());
        assert!(ScraperConfig::default().with_origin("mailto:someone@example.com").is_err());
        let config = ScraperConfig::default()
            .with_origin("http://127.0.0.1:8080")
            .unwrap();
        assert_eq!(config.origin.as_str(), "http://127.0.0.1:8080/");
    }
}
