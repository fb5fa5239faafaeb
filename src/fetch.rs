//! Page retrieval: the HTTP transport and the bounded-retry fetcher on top of it.

use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};

use crate::config::ScraperConfig;
use crate::error::{FetchError, ScraperError};

/// Status and body of one HTTP response.
#[derive(Debug, Clone)]
pub struct PageResponse {
    pub status: u16,
    pub body: String,
}

/// Anything that can GET a URL and hand back the raw response.
///
/// Timeouts, proxies and headers are the transport's business; the retry
/// policy lives in [`fetch_with_retries`].
pub trait Transport: Send + Sync {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<PageResponse, FetchError>>;
}

/// `reqwest`-backed transport configured from a [`ScraperConfig`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScraperError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let mut client_builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers);

        if let Some(proxy_url) = &config.proxy {
            log::debug!("Using proxy: {}", proxy_url);
            client_builder = client_builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        Ok(Self {
            client: client_builder.build()?,
        })
    }
}

impl Transport for HttpTransport {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<PageResponse, FetchError>> {
        async move {
            let response = self.client.get(url).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(PageResponse { status, body })
        }
        .boxed()
    }
}

/// GETs `url` up to `max_attempts` times and returns the body of the first
/// 200 response.
///
/// Every failed attempt (non-200 status or transport error) is followed by a
/// wait of `base_delay * attempt`, the last one included. Returns `None` once
/// the attempts are used up.
pub async fn fetch_with_retries<T: Transport + ?Sized>(
    transport: &T,
    url: &str,
    max_attempts: u32,
    base_delay: Duration,
) -> Option<String> {
    for attempt in 1..=max_attempts {
        match transport.get(url).await {
            Ok(response) if response.status == 200 => return Some(response.body),
            Ok(response) => {
                log::warn!("Non-200 status ({}) for {}", response.status, url);
            }
            Err(e) => {
                log::warn!(
                    "Request error (attempt {}/{}) for {}: {}",
                    attempt,
                    max_attempts,
                    url,
                    e
                );
            }
        }

        let wait = base_delay.saturating_mul(attempt);
        log::debug!("Waiting {:?} before next attempt", wait);
        tokio::time::sleep(wait).await;
    }

    log::error!("Failed to fetch {} after {} attempts.", url, max_attempts);
    None
}
