use crate::common::{http_orchestrator, http_service, mount_page, product_page, source, url};
use shelf_scout::jobs::JobStatus;
use shelf_scout::model::CrawlRequest;
use std::collections::HashSet;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// List page linking to three products, one of them twice, plus a nav link
async fn mount_catalog(server: &MockServer) {
    mount_page(
        server,
        "/catalog",
        r#"<html><body>
            <nav><a href="/about">About</a></nav>
            <a class="product" href="/p/1">One</a>
            <a class="product" href="/p/2">Two</a>
            <a class="product" href="p/3">Three</a>
            <a class="product" href="/p/1">One again</a>
        </body></html>"#
            .to_string(),
    )
    .await;

    mount_page(server, "/p/1", product_page("one", "$1,299.00")).await;
    mount_page(server, "/p/2", product_page("two", "19.99")).await;
    mount_page(server, "/p/3", product_page("three", "N/A")).await;
}

#[tokio::test]
async fn test_full_crawl_deduplicates_product_urls() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    let mut shop = source("shop");
    shop.list_pages = vec![url(&server, "/catalog")];
    shop.product_pages = vec![url(&server, "/p/2")];

    let service = http_service();
    let submitted = service.submit(CrawlRequest::new(vec![shop])).unwrap();
    submitted.handle.await.unwrap();

    let view = service.status(&submitted.view.id).unwrap();
    assert_eq!(view.status, JobStatus::Completed, "error: {:?}", view.error);
    assert_eq!(view.count, 3);

    let items = service.items(&submitted.view.id).unwrap();
    let urls: HashSet<String> = items.items.iter().map(|p| p.url.clone()).collect();
    let expected: HashSet<String> = ["/p/1", "/p/2", "/p/3"]
        .iter()
        .map(|p| url(&server, p).to_string())
        .collect();
    assert_eq!(urls, expected);
}

#[tokio::test]
async fn test_full_crawl_extracts_fields() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    let mut shop = source("shop");
    shop.product_pages = vec![url(&server, "/p/1"), url(&server, "/p/3")];

    let mut items = http_orchestrator()
        .run(&CrawlRequest::new(vec![shop]))
        .await
        .unwrap();
    items.sort_by(|a, b| a.url.cmp(&b.url));

    let one = &items[0];
    assert_eq!(one.source, "shop");
    assert_eq!(one.title.as_deref(), Some("one"));
    assert_eq!(one.price, Some(1299.0));
    assert_eq!(one.currency.as_deref(), Some("USD"));
    assert_eq!(
        one.image_url.as_deref(),
        Some(url(&server, "/img/one.jpg").as_str())
    );
    assert_eq!(one.sku.as_deref(), Some("SKU-one"));
    assert_eq!(one.availability.as_deref(), Some("In stock"));

    let three = &items[1];
    assert_eq!(three.title.as_deref(), Some("three"));
    assert_eq!(three.price, None);
}

#[tokio::test]
async fn test_sources_are_concatenated_in_order() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    let mut first = source("first");
    first.product_pages = vec![url(&server, "/p/1"), url(&server, "/p/2")];
    let mut second = source("second");
    second.product_pages = vec![url(&server, "/p/3")];

    let items = http_orchestrator()
        .run(&CrawlRequest::new(vec![first, second]))
        .await
        .unwrap();

    let sources: Vec<&str> = items.iter().map(|p| p.source.as_str()).collect();
    assert_eq!(sources, vec!["first", "first", "second"]);
}

#[tokio::test]
async fn test_broken_list_page_fails_job() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    Mock::given(method("GET"))
        .and(path("/catalog/broken"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut shop = source("shop");
    shop.list_pages = vec![url(&server, "/catalog"), url(&server, "/catalog/broken")];

    let service = http_service();
    let submitted = service.submit(CrawlRequest::new(vec![shop])).unwrap();
    submitted.handle.await.unwrap();

    let view = service.status(&submitted.view.id).unwrap();
    assert_eq!(view.status, JobStatus::Failed);
    assert_eq!(view.count, 0);
    assert_eq!(
        view.error,
        Some(format!("HTTP 503 for {}", url(&server, "/catalog/broken")))
    );
}

#[tokio::test]
async fn test_one_missing_product_fails_job() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    let mut shop = source("shop");
    shop.product_pages = vec![url(&server, "/p/1"), url(&server, "/p/404")];

    let service = http_service();
    let submitted = service.submit(CrawlRequest::new(vec![shop])).unwrap();
    submitted.handle.await.unwrap();

    let items = service.items(&submitted.view.id).unwrap();
    assert_eq!(items.status, JobStatus::Failed);
    assert!(items.items.is_empty());
    assert_eq!(items.meta.count, 0);
}

#[tokio::test]
async fn test_invalid_selector_fails_job() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    let mut shop = source("shop");
    shop.list_pages = vec![url(&server, "/catalog")];
    shop.item_link_selector = "a[".to_string();

    let service = http_service();
    let submitted = service.submit(CrawlRequest::new(vec![shop])).unwrap();
    submitted.handle.await.unwrap();

    let view = service.status(&submitted.view.id).unwrap();
    assert_eq!(view.status, JobStatus::Failed);
    assert!(view.error.unwrap().starts_with("Invalid selector 'a['"));
}
