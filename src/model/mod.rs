//! Data model for crawl requests and scraped results
//!
//! - `CrawlRequest` / `SourceConfig` / `ProductSelectors`: what a caller submits
//! - `ScrapedProduct`: one extracted product record

mod product;
mod request;

pub use product::ScrapedProduct;
pub use request::{CrawlRequest, ProductSelectors, SourceConfig};
