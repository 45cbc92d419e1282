//! Completion callback delivery
//!
//! Callbacks are best-effort: one POST per successful job, a fixed timeout
//! independent of the job's own, no retries. Failures are logged and
//! dropped; they never touch job state.

use crate::config::CallbackConfig;
use crate::jobs::store::JobId;
use crate::model::ScrapedProduct;
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use url::Url;

/// Body of the callback POST
///
/// Holds an immutable snapshot of the job's result.
#[derive(Debug, Clone, Serialize)]
pub struct CallbackPayload {
    pub id: JobId,
    pub count: usize,
    pub items: Arc<Vec<ScrapedProduct>>,
}

impl CallbackPayload {
    pub fn new(id: JobId, items: Arc<Vec<ScrapedProduct>>) -> Self {
        Self {
            id,
            count: items.len(),
            items,
        }
    }
}

#[derive(Debug, Error)]
pub enum CallbackError {
    #[error("Callback to {url} failed: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Callback to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Posts completion payloads to caller-supplied endpoints
#[derive(Debug, Clone)]
pub struct CallbackNotifier {
    client: Client,
}

impl CallbackNotifier {
    pub fn new(config: &CallbackConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self { client })
    }

    /// Sends one POST and reports the outcome
    pub async fn deliver(&self, url: &Url, payload: &CallbackPayload) -> Result<(), CallbackError> {
        let response = self
            .client
            .post(url.as_str())
            .json(payload)
            .send()
            .await
            .map_err(|source| CallbackError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CallbackError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(())
    }

    /// Delivers `payload` on a detached task; the outcome is only logged
    pub fn notify(&self, url: Url, payload: CallbackPayload) -> JoinHandle<()> {
        let notifier = self.clone();
        tokio::spawn(async move {
            match notifier.deliver(&url, &payload).await {
                Ok(()) => tracing::info!("Delivered callback for job {} to {}", payload.id, url),
                Err(e) => tracing::warn!("Dropping callback for job {}: {}", payload.id, e),
            }
        })
    }
}
