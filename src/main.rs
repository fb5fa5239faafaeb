use anyhow::{Context, Result};
use clap::Parser;
use review_scraper::config::DEFAULT_USER_AGENT;
use review_scraper::{
    extract_asin, output, parse_reviews, OutputFormat, ReviewScraper, ScraperConfig, ScraperError,
};
use std::time::Duration;

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "review-scraper")]
#[command(about = "Scrape customer reviews from a product's review listing pages", long_about = None)]
struct Args {
    /// Product page URL (any /dp/, /gp/product/ or /product-reviews/ link)
    url: String,

    /// Maximum number of reviews to collect
    #[arg(short = 'n', long, default_value = "100")]
    max_reviews: usize,

    /// Output format: json, csv, or text
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Request timeout in seconds
    #[arg(short, long, default_value = "20")]
    timeout: u64,

    /// Custom user agent
    #[arg(short, long)]
    user_agent: Option<String>,

    /// Proxy URL for both HTTP and HTTPS (e.g., http://proxy.example.com:8080)
    #[arg(short, long)]
    proxy: Option<String>,

    /// Maximum fetch attempts per page
    #[arg(short, long, default_value = "3")]
    retries: u32,

    /// Delay between requests in milliseconds, also the retry backoff base
    #[arg(short, long, default_value = "1000")]
    delay: u64,

    /// Site origin used for listing pages and review links
    #[arg(long)]
    origin: Option<String>,

    /// Parse a saved listing page instead of fetching
    #[arg(long)]
    from_file: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (minimal output)
    #[arg(short, long)]
    quiet: bool,

    /// Save output to file
    #[arg(short, long)]
    output: Option<String>,
}

impl Args {
    fn scraper_config(&self) -> Result<ScraperConfig, ScraperError> {
        let config = ScraperConfig {
            user_agent: self
                .user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            timeout: Duration::from_secs(self.timeout),
            proxy: self.proxy.clone(),
            retry_count: self.retries,
            sleep_between_requests: Duration::from_millis(self.delay),
            ..ScraperConfig::default()
        };
        match &self.origin {
            Some(origin) => config.with_origin(origin),
            None => Ok(config),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logger
    let log_level = if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = args.scraper_config()?;

    let reviews = match &args.from_file {
        Some(path) => {
            let asin = extract_asin(&args.url).ok_or_else(|| ScraperError::AsinNotFound {
                url: args.url.clone(),
            })?;
            log::info!("Parsing saved listing page {} for ASIN {}", path, asin);
            let html = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path))?;
            let mut reviews = parse_reviews(&html, &asin, 1, &config.origin);
            reviews.truncate(args.max_reviews);
            reviews
        }
        None => {
            log::info!("Scraping up to {} reviews from {}", args.max_reviews, args.url);
            let scraper = ReviewScraper::new(config)?;
            scraper
                .scrape_product_reviews(&args.url, args.max_reviews)
                .await?
        }
    };

    let output_str = output::render(&reviews, args.format)?;

    // Write to file or stdout
    if let Some(output_file) = &args.output {
        std::fs::write(output_file, &output_str)?;
        log::info!("Output saved to: {}", output_file);
    } else if !args.quiet {
        println!("{}", output_str);
    }

    log::info!("Collected {} review(s)", reviews.len());
    Ok(())
}
