//! Rendering of scraped reviews for the command line.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;

use crate::review::Review;

/// Output format for scraped reviews
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
    Text,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "text" | "txt" => Ok(Self::Text),
            other => Err(anyhow::anyhow!(
                "Unknown format '{}'. Use: json, csv, or text",
                other
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "text",
        };
        f.write_str(name)
    }
}

pub fn render(reviews: &[Review], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => format_json(reviews),
        OutputFormat::Csv => format_csv(reviews),
        OutputFormat::Text => Ok(format_text(reviews)),
    }
}

/// Format reviews as JSON
fn format_json(reviews: &[Review]) -> Result<String> {
    Ok(serde_json::to_string_pretty(reviews)?)
}

/// Format reviews as CSV, one row per review
fn format_csv(reviews: &[Review]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);

    writer.write_record([
        "productAsin",
        "ratingScore",
        "reviewTitle",
        "reviewUrl",
        "reviewReaction",
        "reviewedIn",
        "reviewDescription",
        "isVerified",
        "variant",
        "reviewImages",
        "position",
        "helpfulVotes",
    ])?;

    for review in reviews {
        let row = vec![
            review.asin.clone(),
            review.rating_score.map(|r| r.to_string()).unwrap_or_default(),
            review.review_title.clone(),
            review.review_url.clone(),
            review.review_reaction.clone(),
            review.reviewed_in.clone(),
            review.review_description.clone(),
            review.is_verified.to_string(),
            review.variant.clone(),
            review.review_images.join("|"),
            review.position.to_string(),
            review.helpful_votes.to_string(),
        ];
        writer.write_record(&row)?;
    }

    Ok(String::from_utf8(writer.into_inner()?)?)
}

/// Format reviews as plain text
fn format_text(reviews: &[Review]) -> String {
    let mut output = String::new();

    for (i, review) in reviews.iter().enumerate() {
        if i > 0 {
            output.push_str("\n\n");
            output.push_str(&"=".repeat(80));
            output.push_str("\n\n");
        }

        output.push_str(&format!("#{} [{}]\n", review.position, review.asin));
        match review.rating_score {
            Some(score) => output.push_str(&format!("Rating: {:.1}/5\n", score)),
            None => output.push_str("Rating: n/a\n"),
        }
        if !review.review_title.is_empty() {
            output.push_str(&format!("Title: {}\n", review.review_title));
        }
        if !review.reviewed_in.is_empty() {
            output.push_str(&format!("{}\n", review.reviewed_in));
        }
        if !review.variant.is_empty() {
            output.push_str(&format!("Variant: {}\n", review.variant));
        }
        if review.is_verified {
            output.push_str("Verified Purchase\n");
        }
        output.push_str(&format!("Helpful votes: {}\n", review.helpful_votes));
        if !review.review_url.is_empty() {
            output.push_str(&format!("URL: {}\n", review.review_url));
        }

        if !review.review_description.is_empty() {
            output.push_str(&format!("\n{}\n", review.review_description));
        }

        if !review.review_images.is_empty() {
            output.push_str(&format!("\nImages ({}):\n", review.review_images.len()));
            for image in &review.review_images {
                output.push_str(&format!("  - {}\n", image));
            }
        }
    }

    output
}
