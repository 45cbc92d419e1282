//! Product scraper
//!
//! Fetches one product page and extracts a `ScrapedProduct` from it using
//! the source's per-field selectors.

use crate::crawler::extract::{extract_text, extract_url_attr, parse_price};
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::markup::{HtmlDocument, MarkupError};
use crate::crawler::CrawlError;
use crate::model::{ProductSelectors, ScrapedProduct};
use chrono::Utc;
use std::time::Duration;
use url::Url;

/// Attribute read from the image element
const IMAGE_ATTRIBUTE: &str = "src";

/// Fetches `url` and extracts a product record from it
///
/// A fetch failure is returned as-is. Missing or unmatched selectors leave
/// the corresponding field empty.
pub async fn scrape_product(
    fetcher: &dyn PageFetcher,
    source_name: &str,
    url: &Url,
    selectors: &ProductSelectors,
    timeout: Duration,
) -> Result<ScrapedProduct, CrawlError> {
    let page = fetcher.fetch(url, timeout).await?;
    let product = extract_product(&page.body, source_name, url, selectors)?;
    tracing::debug!("Scraped {} for source '{}'", url, source_name);
    Ok(product)
}

/// Extracts a product record from an already fetched page body
pub fn extract_product(
    body: &str,
    source_name: &str,
    url: &Url,
    selectors: &ProductSelectors,
) -> Result<ScrapedProduct, MarkupError> {
    let doc = HtmlDocument::parse(body);

    let title = extract_text(&doc, selectors.title.as_deref())?;
    let price = extract_text(&doc, selectors.price.as_deref())?
        .as_deref()
        .and_then(parse_price);
    let currency = extract_text(&doc, selectors.currency.as_deref())?;
    let image_url = extract_url_attr(&doc, selectors.image.as_deref(), IMAGE_ATTRIBUTE, url)?;
    let sku = extract_text(&doc, selectors.sku.as_deref())?;
    let availability = extract_text(&doc, selectors.availability.as_deref())?;

    Ok(ScrapedProduct {
        source: source_name.to_string(),
        url: url.to_string(),
        title,
        price,
        currency,
        image_url,
        sku,
        availability,
        scraped_at: Utc::now(),
    })
}
