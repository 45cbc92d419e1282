//! Source resolver
//!
//! Turns a `SourceConfig` into the deduplicated set of product URLs to
//! scrape: the known product pages plus every item link found on the
//! source's list pages.

use crate::crawler::extract::extract_links;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::markup::{HtmlDocument, MarkupError};
use crate::crawler::CrawlError;
use crate::model::SourceConfig;
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// Resolves the product URLs of one source
///
/// List pages are fetched one after another. Any fetch failure fails the
/// whole resolution; no partial set is returned.
///
/// # Returns
///
/// * `Ok(HashSet<Url>)` - Union of product pages and list-page links
/// * `Err(CrawlError)` - A list page could not be fetched, or the link
///   selector is malformed
pub async fn resolve_source(
    fetcher: &dyn PageFetcher,
    source: &SourceConfig,
    timeout: Duration,
) -> Result<HashSet<Url>, CrawlError> {
    let mut urls: HashSet<Url> = source.product_pages.iter().cloned().collect();

    for list_url in &source.list_pages {
        let page = fetcher.fetch(list_url, timeout).await?;
        let links = links_on_page(&page.body, list_url, source)?;

        tracing::debug!(
            "Source '{}': {} item links on {}",
            source.name,
            links.len(),
            list_url
        );

        urls.extend(links);
    }

    Ok(urls)
}

/// Item links on one fetched list page, resolved against the list page URL
pub fn links_on_page(
    body: &str,
    list_url: &Url,
    source: &SourceConfig,
) -> Result<Vec<Url>, MarkupError> {
    let doc = HtmlDocument::parse(body);
    extract_links(
        &doc,
        &source.item_link_selector,
        &source.item_link_attribute,
        list_url,
    )
}
