//! CSS selectors for review listing pages.
//!
//! Every selector keys off the `data-hook` attributes the listing markup
//! carries; class names are only used where no hook exists.

use std::sync::LazyLock;

use scraper::Selector;

fn parse(selector: &str) -> Selector {
    Selector::parse(selector).unwrap()
}

/// One review block.
pub static REVIEW: LazyLock<Selector> = LazyLock::new(|| parse("div[data-hook='review']"));

pub static STAR_RATING: LazyLock<Selector> =
    LazyLock::new(|| parse("i[data-hook='review-star-rating'] span.a-icon-alt"));
/// Any icon alt text, used when the star rating hook is missing.
pub static ICON_ALT: LazyLock<Selector> = LazyLock::new(|| parse("span.a-icon-alt"));

pub static TITLE_LINK: LazyLock<Selector> = LazyLock::new(|| parse("a[data-hook='review-title']"));
pub static TITLE_TEXT: LazyLock<Selector> =
    LazyLock::new(|| parse("a[data-hook='review-title'] span"));

pub static HELPFUL_VOTES: LazyLock<Selector> =
    LazyLock::new(|| parse("span[data-hook='helpful-vote-statement']"));

pub static REVIEW_DATE: LazyLock<Selector> = LazyLock::new(|| parse("span[data-hook='review-date']"));

pub static BODY: LazyLock<Selector> = LazyLock::new(|| parse("span[data-hook='review-body']"));
pub static BODY_TEXT: LazyLock<Selector> =
    LazyLock::new(|| parse("span[data-hook='review-body'] span"));

pub static VERIFIED_BADGE: LazyLock<Selector> = LazyLock::new(|| parse("span[data-hook='avp-badge']"));

pub static FORMAT_STRIP: LazyLock<Selector> = LazyLock::new(|| parse("a[data-hook='format-strip']"));

pub static IMAGE_TILE: LazyLock<Selector> =
    LazyLock::new(|| parse("img[data-hook='review-image-tile']"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_selectors_parse() {
        for selector in [
            &REVIEW,
            &STAR_RATING,
            &ICON_ALT,
            &TITLE_LINK,
            &TITLE_TEXT,
            &HELPFUL_VOTES,
            &REVIEW_DATE,
            &BODY,
            &BODY_TEXT,
            &VERIFIED_BADGE,
            &FORMAT_STRIP,
            &IMAGE_TILE,
        ] {
            LazyLock::force(selector);
        }
    }
}
