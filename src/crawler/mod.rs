//! Crawler module for resolving and scraping product pages
//!
//! This module contains the core scraping engine, including:
//! - Page fetching behind the `PageFetcher` capability
//! - Markup queries behind the `MarkupQuery` capability
//! - Source resolution and product extraction
//! - Bounded-concurrency orchestration across a request's sources

mod extract;
mod fetcher;
mod markup;
mod orchestrator;
mod product;
mod resolver;
mod tickets;

pub use extract::{extract_links, extract_text, extract_url_attr, normalize_text, parse_price};
pub use fetcher::{build_http_client, FetchError, FetchedPage, HttpFetcher, PageFetcher};
pub use markup::{HtmlDocument, MarkupError, MarkupQuery};
pub use orchestrator::Orchestrator;
pub use product::{extract_product, scrape_product};
pub use resolver::{links_on_page, resolve_source};
pub use tickets::{Ticket, TicketPool};

use thiserror::Error;

/// Failure of a crawl run
///
/// The `Display` text is what a failed job reports as its error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrawlError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Markup(#[from] MarkupError),

    #[error("Scrape task failed: {0}")]
    TaskFailed(String),
}
