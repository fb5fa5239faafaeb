//! Turns review blocks of a listing page into [`Review`] records.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::ExtractError;
use crate::review::{Review, NO_VOTES_STATEMENT};
use crate::selectors;
use crate::text::{clean_text, parse_helpful_votes, parse_rating_score};

/// Extracts every review on a listing page, in document order.
///
/// Kept records get consecutive positions starting at `start_position`.
/// Blocks that fail to extract are logged and skipped.
pub fn parse_reviews(html: &str, asin: &str, start_position: usize, origin: &Url) -> Vec<Review> {
    let document = Html::parse_document(html);
    let mut reviews = Vec::new();
    let mut position = start_position;

    for block in document.select(&selectors::REVIEW) {
        match extract_review(block, asin, position, origin) {
            Ok(Some(review)) => {
                reviews.push(review);
                position += 1;
            }
            Ok(None) => log::debug!("Skipping review block with neither body nor rating"),
            Err(e) => log::error!("Error parsing review block: {}", e),
        }
    }

    reviews
}

/// Builds a record from a single review block.
///
/// Returns `Ok(None)` when the block has an empty body and no parsable
/// rating, since such blocks are not real reviews.
pub fn extract_review(
    block: ElementRef,
    asin: &str,
    position: usize,
    origin: &Url,
) -> Result<Option<Review>, ExtractError> {
    let rating_text = first_of(block, &selectors::STAR_RATING, &selectors::ICON_ALT)
        .map(|el| joined_text(el, ""))
        .unwrap_or_default();
    let rating_score = parse_rating_score(&rating_text);

    let review_title = first_of(block, &selectors::TITLE_TEXT, &selectors::TITLE_LINK)
        .map(|el| clean_text(joined_text(el, "").as_str()))
        .unwrap_or_default();

    let review_url = match first(block, &selectors::TITLE_LINK).and_then(|el| el.value().attr("href")) {
        Some(href) => origin
            .join(href)
            .map_err(|source| ExtractError::ReviewUrl {
                href: href.to_string(),
                source,
            })?
            .to_string(),
        None => String::new(),
    };

    let review_reaction = first(block, &selectors::HELPFUL_VOTES)
        .map(|el| clean_text(joined_text(el, "").as_str()))
        .unwrap_or_else(|| NO_VOTES_STATEMENT.to_string());

    let reviewed_in = first(block, &selectors::REVIEW_DATE)
        .map(|el| clean_text(joined_text(el, "").as_str()))
        .unwrap_or_default();

    let review_description = first_of(block, &selectors::BODY_TEXT, &selectors::BODY)
        .map(|el| clean_text(joined_text(el, " ").as_str()))
        .unwrap_or_default();

    let is_verified = first(block, &selectors::VERIFIED_BADGE)
        .is_some_and(|el| el.text().collect::<String>().contains("Verified Purchase"));

    let variant = first(block, &selectors::FORMAT_STRIP)
        .map(|el| clean_text(joined_text(el, " ").as_str()))
        .unwrap_or_default();

    let review_images = block
        .select(&selectors::IMAGE_TILE)
        .filter_map(|img| {
            let attrs = img.value();
            attrs
                .attr("src")
                .filter(|src| !src.is_empty())
                .or_else(|| attrs.attr("data-src"))
                .filter(|src| !src.is_empty())
                .map(String::from)
        })
        .collect();

    if review_description.is_empty() && rating_score.is_none() {
        return Ok(None);
    }

    let helpful_votes = parse_helpful_votes(&review_reaction);

    Ok(Some(Review {
        asin: asin.to_string(),
        rating_score,
        review_title,
        review_url,
        review_reaction,
        reviewed_in,
        review_description,
        is_verified,
        variant,
        review_images,
        position,
        helpful_votes,
    }))
}

fn first<'a>(block: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    block.select(selector).next()
}

fn first_of<'a>(
    block: ElementRef<'a>,
    primary: &Selector,
    fallback: &Selector,
) -> Option<ElementRef<'a>> {
    first(block, primary).or_else(|| first(block, fallback))
}

/// Text of every descendant text node, each trimmed, empty ones dropped.
fn joined_text(element: ElementRef, separator: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_REVIEW: &str = r#"
<div data-hook="review" id="R1">
  <i data-hook="review-star-rating" class="a-icon a-icon-star a-star-4">
    <span class="a-icon-alt">4.0 out of 5 stars</span>
  </i>
  <a data-hook="review-title" class="review-title" href="/gp/customer-reviews/R1ABC/ref=cm_cr_arp_d_rvw_ttl?ie=UTF8">
    <span>  Works   as
      advertised </span>
  </a>
  <span data-hook="review-date">Reviewed in the United States on March 3, 2024</span>
  <a data-hook="format-strip" href="/x">Color: <span>Blue</span> Size: <span>Large</span></a>
  <span data-hook="avp-badge">Verified Purchase</span>
  <span data-hook="review-body"><span>First line.<br>Second
     line.</span></span>
  <img data-hook="review-image-tile" src="https://img.example/1.jpg" data-src="https://img.example/1-lazy.jpg">
  <img data-hook="review-image-tile" data-src="https://img.example/2.jpg">
  <img data-hook="review-image-tile" alt="no source">
  <span data-hook="helpful-vote-statement">21 people found this helpful</span>
</div>
"#;

    fn origin() -> Url {
        Url::parse("https://www.amazon.com").unwrap()
    }

    fn page(blocks: &[&str]) -> String {
        format!(
            "<html><body><div id=\"cm_cr-review_list\">{}</div></body></html>",
            blocks.join("\n")
        )
    }

    fn extract_one(block_html: &str) -> Result<Option<Review>, ExtractError> {
        let document = Html::parse_document(&page(&[block_html]));
        let block = document.select(&selectors::REVIEW).next().unwrap();
        extract_review(block, "B0C1234567", 7, &origin())
    }

    #[test]
    fn extracts_every_field() {
        let review = extract_one(FULL_REVIEW).unwrap().unwrap();

        assert_eq!(review.asin, "B0C1234567");
        assert_eq!(review.rating_score, Some(4.0));
        assert_eq!(review.review_title, "Works as advertised");
        assert_eq!(
            review.review_url,
            "https://www.amazon.com/gp/customer-reviews/R1ABC/ref=cm_cr_arp_d_rvw_ttl?ie=UTF8"
        );
        assert_eq!(review.review_reaction, "21 people found this helpful");
        assert_eq!(review.helpful_votes, 21);
        assert_eq!(review.reviewed_in, "Reviewed in the United States on March 3, 2024");
        assert_eq!(review.review_description, "First line. Second line.");
        assert!(review.is_verified);
        assert_eq!(review.variant, "Color: Blue Size: Large");
        assert_eq!(review.position, 7);
    }

    #[test]
    fn images_prefer_src_and_skip_nodes_without_source() {
        let review = extract_one(FULL_REVIEW).unwrap().unwrap();
        assert_eq!(
            review.review_images,
            vec!["https://img.example/1.jpg", "https://img.example/2.jpg"]
        );
    }

    #[test]
    fn falls_back_to_generic_selectors() {
        let block = r#"
<div data-hook="review">
  <span class="a-icon-alt">5.0 out of 5 stars</span>
  <a data-hook="review-title" href="https://other.example/review/9">Plain title</a>
  <span data-hook="review-body">Body without inner span</span>
</div>"#;
        let review = extract_one(block).unwrap().unwrap();

        assert_eq!(review.rating_score, Some(5.0));
        assert_eq!(review.review_title, "Plain title");
        assert_eq!(review.review_url, "https://other.example/review/9");
        assert_eq!(review.review_description, "Body without inner span");
    }

    #[test]
    fn missing_optional_nodes_get_defaults() {
        let block = r#"
<div data-hook="review">
  <span data-hook="review-body"><span>Only a body.</span></span>
</div>"#;
        let review = extract_one(block).unwrap().unwrap();

        assert_eq!(review.rating_score, None);
        assert_eq!(review.review_title, "");
        assert_eq!(review.review_url, "");
        assert_eq!(review.review_reaction, NO_VOTES_STATEMENT);
        assert_eq!(review.helpful_votes, 0);
        assert_eq!(review.reviewed_in, "");
        assert!(!review.is_verified);
        assert_eq!(review.variant, "");
        assert!(review.review_images.is_empty());
    }

    #[test]
    fn rating_alone_keeps_the_review() {
        let block = r#"
<div data-hook="review">
  <i data-hook="review-star-rating"><span class="a-icon-alt">1.0 out of 5 stars</span></i>
</div>"#;
        let review = extract_one(block).unwrap().unwrap();
        assert_eq!(review.rating_score, Some(1.0));
        assert_eq!(review.review_description, "");
    }

    #[test]
    fn drops_block_without_body_or_rating() {
        let block = r#"
<div data-hook="review">
  <a data-hook="review-title" href="/r/1"><span>Title only</span></a>
  <span data-hook="avp-badge">Verified Purchase</span>
  <span data-hook="helpful-vote-statement">3 people found this helpful</span>
  <img data-hook="review-image-tile" src="https://img.example/a.jpg">
  <span data-hook="review-body"><span>   </span></span>
</div>"#;
        assert!(extract_one(block).unwrap().is_none());
    }

    #[test]
    fn badge_without_phrase_is_not_verified() {
        let block = r#"
<div data-hook="review">
  <span data-hook="avp-badge">Vine Customer Review of Free Product</span>
  <span data-hook="review-body">text</span>
</div>"#;
        assert!(!extract_one(block).unwrap().unwrap().is_verified);
    }

    #[test]
    fn empty_href_resolves_to_the_origin_root() {
        let block = r#"
<div data-hook="review">
  <a data-hook="review-title" href="">Linked nowhere</a>
  <span data-hook="review-body">text</span>
</div>"#;
        let review = extract_one(block).unwrap().unwrap();
        assert_eq!(review.review_url, "https://www.amazon.com/");
    }

    #[test]
    fn unresolvable_link_is_an_error() {
        let block = r#"
<div data-hook="review">
  <a data-hook="review-title" href="http://[::1">Broken</a>
  <span data-hook="review-body">text</span>
</div>"#;
        assert!(matches!(
            extract_one(block),
            Err(ExtractError::ReviewUrl { .. })
        ));
    }

    #[test]
    fn page_positions_are_consecutive_over_kept_reviews() {
        let empty = r#"<div data-hook="review"><span data-hook="review-body"></span></div>"#;
        let broken = r#"<div data-hook="review"><a data-hook="review-title" href="http://[::1">x</a><span data-hook="review-body">b</span></div>"#;
        let html = page(&[FULL_REVIEW, empty, broken, FULL_REVIEW]);

        let reviews = parse_reviews(&html, "B0C1234567", 11, &origin());

        let positions: Vec<usize> = reviews.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![11, 12]);
    }

    #[test]
    fn page_without_review_blocks_yields_nothing() {
        let html = "<html><body><p>No reviews yet</p></body></html>";
        assert!(parse_reviews(html, "B0C1234567", 1, &origin()).is_empty());
    }
}
