use serde::{Deserialize, Serialize};

/// Reaction statement used when a review carries no helpfulness line.
pub const NO_VOTES_STATEMENT: &str = "0 people found this helpful";

/// One customer review pulled from a listing page
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "productAsin")]
    pub asin: String,
    pub rating_score: Option<f64>,
    pub review_title: String,
    pub review_url: String,
    pub review_reaction: String,
    pub reviewed_in: String,
    pub review_description: String,
    pub is_verified: bool,
    pub variant: String,
    pub review_images: Vec<String>,
    /// 1-based, counted across every page of one scrape
    pub position: usize,
    pub helpful_votes: u64,
}
