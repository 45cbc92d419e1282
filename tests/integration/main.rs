//! Integration tests for Shelf-Scout
//!
//! These tests use wiremock to serve list/product pages and callback
//! endpoints, and exercise the crawl cycle end-to-end.

mod api_tests;
mod concurrency_tests;
mod crawl_tests;
