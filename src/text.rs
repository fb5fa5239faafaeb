//! Normalisation helpers for text pulled out of review markup.

use std::sync::LazyLock;

use regex::Regex;

static HELPFUL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d[\d,]*)\s+(?:people|person)\s+found this helpful").unwrap()
});

static RATING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([0-5](?:\.\d)?)\s+out of\s+5").unwrap());

/// Collapses every whitespace run to a single space and trims both ends.
///
/// Accepts either a `&str` or an `Option<&str>`; `None` yields an empty string.
pub fn clean_text<'a>(text: impl Into<Option<&'a str>>) -> String {
    match text.into() {
        Some(text) => text.split_whitespace().collect::<Vec<_>>().join(" "),
        None => String::new(),
    }
}

/// Parses a star rating such as `"4.0 out of 5 stars"`.
pub fn parse_rating_score(text: &str) -> Option<f64> {
    if text.is_empty() {
        return None;
    }
    let caps = RATING_RE.captures(text)?;
    match caps[1].parse::<f64>() {
        Ok(score) => Some(score),
        Err(e) => {
            log::debug!("Failed to parse rating score from {:?}: {}", text, e);
            None
        }
    }
}

/// Parses the helpful vote count from statements like
/// `"21 people found this helpful"` or `"One person found this helpful"`.
pub fn parse_helpful_votes(text: &str) -> u64 {
    if text.is_empty() {
        return 0;
    }

    if let Some(caps) = HELPFUL_RE.captures(text) {
        let digits = caps[1].replace(',', "");
        match digits.parse::<u64>() {
            Ok(votes) => return votes,
            Err(e) => log::debug!("Failed to parse helpful votes from {:?}: {}", text, e),
        }
    }

    if text.to_lowercase().contains("one person found this helpful") {
        return 1;
    }

    0
}
