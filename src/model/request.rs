use crate::config::DefaultsConfig;
use crate::RequestError;
use serde::{Deserialize, Serialize};
use url::Url;

/// Optional per-field selectors for a product page
///
/// A missing selector means the field is never attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSelectors {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    /// Selects the image element; its `src` attribute is read
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub availability: Option<String>,
}

/// A named source: where to find product pages and how to read them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub name: String,

    /// Pages crawled for product links
    #[serde(default)]
    pub list_pages: Vec<Url>,

    /// Product pages known in advance
    #[serde(default)]
    pub product_pages: Vec<Url>,

    /// Selector for product links on a list page
    #[serde(default = "default_item_link_selector")]
    pub item_link_selector: String,

    /// Attribute holding the link target
    #[serde(default = "default_item_link_attribute")]
    pub item_link_attribute: String,

    pub product: ProductSelectors,
}

/// A crawl job submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlRequest {
    pub sources: Vec<SourceConfig>,

    /// Maximum in-flight fetches for the whole request; clamped to >= 1
    #[serde(default)]
    pub concurrency: Option<i64>,

    /// Timeout applied to every page fetch of the job (milliseconds)
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,

    /// Endpoint notified once the job completes successfully
    #[serde(default)]
    pub callback_url: Option<Url>,
}

impl SourceConfig {
    /// Creates a source with default link selector/attribute and no pages
    pub fn new(name: impl Into<String>, product: ProductSelectors) -> Self {
        Self {
            name: name.into(),
            list_pages: Vec::new(),
            product_pages: Vec::new(),
            item_link_selector: default_item_link_selector(),
            item_link_attribute: default_item_link_attribute(),
            product,
        }
    }
}

impl CrawlRequest {
    /// Creates a request with unset tuning values
    pub fn new(sources: Vec<SourceConfig>) -> Self {
        Self {
            sources,
            concurrency: None,
            request_timeout_ms: None,
            callback_url: None,
        }
    }

    /// Fills unset tuning values from the service defaults
    pub fn apply_defaults(&mut self, defaults: &DefaultsConfig) {
        self.concurrency.get_or_insert(defaults.concurrency);
        self.request_timeout_ms
            .get_or_insert(defaults.request_timeout_ms);
    }

    /// Size of the ticket pool for this request (never below 1)
    pub fn effective_concurrency(&self) -> usize {
        let requested = self
            .concurrency
            .unwrap_or_else(crate::config::default_concurrency);
        usize::try_from(requested.max(1)).unwrap_or(usize::MAX)
    }

    /// Per-fetch timeout for this request
    pub fn request_timeout(&self) -> std::time::Duration {
        let ms = self
            .request_timeout_ms
            .unwrap_or_else(crate::config::default_request_timeout_ms);
        std::time::Duration::from_millis(ms)
    }

    /// Validates the request before a job is created for it
    pub fn validate(&self) -> Result<(), RequestError> {
        for (index, source) in self.sources.iter().enumerate() {
            validate_source(index, source)?;
        }

        if let Some(callback) = &self.callback_url {
            require_http(callback, "callback_url")?;
        }

        Ok(())
    }
}

fn validate_source(index: usize, source: &SourceConfig) -> Result<(), RequestError> {
    if source.name.trim().is_empty() {
        return Err(RequestError::EmptySourceName { index });
    }

    if source.item_link_selector.trim().is_empty() {
        return Err(RequestError::EmptyField {
            source_name: source.name.clone(),
            field: "item_link_selector",
        });
    }

    if source.item_link_attribute.trim().is_empty() {
        return Err(RequestError::EmptyField {
            source_name: source.name.clone(),
            field: "item_link_attribute",
        });
    }

    let context = format!("source '{}'", source.name);
    for url in source.list_pages.iter().chain(&source.product_pages) {
        require_http(url, &context)?;
    }

    Ok(())
}

fn require_http(url: &Url, context: &str) -> Result<(), RequestError> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(RequestError::UnsupportedScheme {
            context: context.to_string(),
            url: url.to_string(),
        }),
    }
}

fn default_item_link_selector() -> String {
    "a".to_string()
}

fn default_item_link_attribute() -> String {
    "href".to_string()
}
