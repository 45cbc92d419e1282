use crate::common::{selectors, service_with_fetcher};
use async_trait::async_trait;
use shelf_scout::crawler::{FetchError, FetchedPage, Orchestrator, PageFetcher};
use shelf_scout::jobs::JobStatus;
use shelf_scout::model::{CrawlRequest, SourceConfig};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Fetcher that records how many fetches are in flight at once
#[derive(Default)]
struct OccupancyFetcher {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    total: AtomicUsize,
}

impl OccupancyFetcher {
    fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for OccupancyFetcher {
    async fn fetch(&self, url: &Url, _timeout: Duration) -> Result<FetchedPage, FetchError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.total.fetch_add(1, Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(30)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(FetchedPage {
            final_url: url.to_string(),
            status_code: 200,
            body: format!(r#"<h1 class="title">{}</h1>"#, url.path()),
        })
    }
}

fn source_with_pages(name: &str, host: &str, count: usize) -> SourceConfig {
    let mut source = SourceConfig::new(name, selectors());
    source.product_pages = (0..count)
        .map(|i| Url::parse(&format!("https://{}/p/{}", host, i)).unwrap())
        .collect();
    source
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrency_bound_is_respected() {
    let fetcher = Arc::new(OccupancyFetcher::default());
    let orchestrator = Orchestrator::new(fetcher.clone());

    let mut request = CrawlRequest::new(vec![source_with_pages("shop", "a.example.com", 5)]);
    request.concurrency = Some(2);

    let items = orchestrator.run(&request).await.unwrap();

    assert_eq!(items.len(), 5);
    assert_eq!(fetcher.total.load(Ordering::SeqCst), 5);
    assert!(fetcher.peak() <= 2, "peak in-flight was {}", fetcher.peak());
    assert_eq!(fetcher.peak(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrency_of_one_serializes_fetches() {
    let fetcher = Arc::new(OccupancyFetcher::default());
    let orchestrator = Orchestrator::new(fetcher.clone());

    let mut request = CrawlRequest::new(vec![source_with_pages("shop", "a.example.com", 4)]);
    request.concurrency = Some(0);

    orchestrator.run(&request).await.unwrap();
    assert_eq!(fetcher.peak(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_bound_holds_across_sources() {
    let fetcher = Arc::new(OccupancyFetcher::default());
    let service = service_with_fetcher(fetcher.clone());

    let mut request = CrawlRequest::new(vec![
        source_with_pages("first", "a.example.com", 4),
        source_with_pages("second", "b.example.com", 4),
    ]);
    request.concurrency = Some(3);

    let submitted = service.submit(request).unwrap();
    submitted.handle.await.unwrap();

    let view = service.status(&submitted.view.id).unwrap();
    assert_eq!(view.status, JobStatus::Completed);
    assert_eq!(view.count, 8);
    assert!(fetcher.peak() <= 3, "peak in-flight was {}", fetcher.peak());
}
