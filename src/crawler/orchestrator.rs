//! Crawl orchestrator - drives one crawl request end to end
//!
//! Sources are processed sequentially in request order. For each source the
//! URL set is resolved first, then every URL is scraped concurrently under
//! the request-wide ticket pool. The first failing scrape fails the whole
//! run; the rest of that batch is aborted and discarded.

use crate::crawler::fetcher::PageFetcher;
use crate::crawler::product::scrape_product;
use crate::crawler::resolver::resolve_source;
use crate::crawler::tickets::TicketPool;
use crate::crawler::CrawlError;
use crate::model::{CrawlRequest, ScrapedProduct, SourceConfig};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use url::Url;

/// Runs crawl requests against a shared page fetcher
#[derive(Clone)]
pub struct Orchestrator {
    fetcher: Arc<dyn PageFetcher>,
}

impl Orchestrator {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    /// Runs every source of `request` and returns the scraped products
    ///
    /// Results are concatenated in source order; within a source they follow
    /// completion order.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ScrapedProduct>)` - Every resolved URL was scraped
    /// * `Err(CrawlError)` - The first resolution or scrape failure
    pub async fn run(&self, request: &CrawlRequest) -> Result<Vec<ScrapedProduct>, CrawlError> {
        let pool = TicketPool::new(request.effective_concurrency());
        let timeout = request.request_timeout();
        let mut items = Vec::new();

        tracing::debug!(
            "Crawling {} sources with {} tickets, {:?} timeout",
            request.sources.len(),
            pool.size(),
            timeout
        );

        for source in &request.sources {
            let urls = resolve_source(self.fetcher.as_ref(), source, timeout).await?;
            tracing::info!("Source '{}': {} product URLs", source.name, urls.len());

            let batch = self.scrape_batch(source, urls, &pool, timeout).await?;
            items.extend(batch);
        }

        Ok(items)
    }

    /// Scrapes all `urls` of one source concurrently, failing fast
    async fn scrape_batch(
        &self,
        source: &SourceConfig,
        urls: HashSet<Url>,
        pool: &TicketPool,
        timeout: Duration,
    ) -> Result<Vec<ScrapedProduct>, CrawlError> {
        let source_name: Arc<str> = Arc::from(source.name.as_str());
        let selectors = Arc::new(source.product.clone());
        let mut tasks = JoinSet::new();

        for url in urls {
            let fetcher = Arc::clone(&self.fetcher);
            let pool = pool.clone();
            let source_name = Arc::clone(&source_name);
            let selectors = Arc::clone(&selectors);

            tasks.spawn(async move {
                let _ticket = pool
                    .acquire()
                    .await
                    .map_err(|e| CrawlError::TaskFailed(e.to_string()))?;
                scrape_product(fetcher.as_ref(), &source_name, &url, &selectors, timeout).await
            });
        }

        let mut products = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(product)) => products.push(product),
                Ok(Err(e)) => {
                    tasks.abort_all();
                    return Err(e);
                }
                Err(e) => {
                    tasks.abort_all();
                    return Err(CrawlError::TaskFailed(e.to_string()));
                }
            }
        }

        Ok(products)
    }
}
