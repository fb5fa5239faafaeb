//! Product identifier (ASIN) resolution from product page URLs.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::config::DEFAULT_ORIGIN;

/// Path shapes that carry the ASIN, in priority order.
static PATH_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"/dp/([A-Z0-9]{10})(?:/|$)").unwrap(),
        Regex::new(r"/gp/product/([A-Z0-9]{10})(?:/|$)").unwrap(),
        Regex::new(r"/product-reviews/([A-Z0-9]{10})(?:/|$)").unwrap(),
    ]
});

static ASIN_VALUE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z0-9]{10}$").unwrap());

/// Extracts the 10-character ASIN from a product URL.
///
/// Recognised shapes, tried in order:
/// 1. `/dp/<ASIN>`
/// 2. `/gp/product/<ASIN>`
/// 3. `/product-reviews/<ASIN>`
/// 4. an `ASIN=<ASIN>` query parameter
/// 5. the last path segment that is exactly 10 ASCII alphanumerics
///
/// Relative URLs such as `/dp/B0C1234567` are accepted; they are resolved
/// against [`DEFAULT_ORIGIN`], which only matters for parsing.
pub fn extract_asin(url: &str) -> Option<String> {
    let parsed = parse_lenient(url)?;
    let path = parsed.path();

    for pattern in PATH_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(path) {
            return Some(caps[1].to_string());
        }
    }

    if let Some((_, value)) = parsed
        .query_pairs()
        .find(|(key, value)| key == "ASIN" && ASIN_VALUE.is_match(value))
    {
        return Some(value.into_owned());
    }

    path.split('/')
        .rev()
        .filter(|segment| !segment.is_empty())
        .find(|segment| segment.len() == 10 && segment.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(str::to_string)
}

fn parse_lenient(url: &str) -> Option<Url> {
    match Url::parse(url) {
        Ok(parsed) => Some(parsed),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse(DEFAULT_ORIGIN).ok()?;
            base.join(url).ok()
        }
        Err(e) => {
            log::debug!("Unparsable product URL {:?}: {}", url, e);
            None
        }
    }
}
