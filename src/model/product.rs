use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A structured record extracted from one product page
///
/// Values are produced once by the scraper and never mutated afterwards.
/// Fields whose selector was not configured, or did not match, are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapedProduct {
    /// Name of the source this product was scraped for
    pub source: String,

    /// The product page URL
    pub url: String,

    pub title: Option<String>,

    pub price: Option<f64>,

    pub currency: Option<String>,

    /// Absolute URL of the product image
    pub image_url: Option<String>,

    pub sku: Option<String>,

    pub availability: Option<String>,

    /// When extraction completed (UTC)
    pub scraped_at: DateTime<Utc>,
}
