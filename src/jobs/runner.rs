//! Job runner - submission, background execution, and polling
//!
//! `JobService` is the single entry point the transport layer talks to.
//! Submitting validates the request, registers a queued job, and spawns
//! the crawl on its own task so the caller never waits for it.

use crate::config::{Config, DefaultsConfig};
use crate::crawler::{CrawlError, HttpFetcher, Orchestrator};
use crate::jobs::notifier::{CallbackNotifier, CallbackPayload};
use crate::jobs::status::JobStatus;
use crate::jobs::store::{JobId, JobStore};
use crate::jobs::view::{JobItemsView, JobView};
use crate::model::CrawlRequest;
use crate::RequestError;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// A job that has been accepted and scheduled
#[derive(Debug)]
pub struct SubmittedJob {
    /// State of the job at submission time (always queued)
    pub view: JobView,

    /// Handle of the background crawl task
    pub handle: JoinHandle<()>,
}

/// Accepts crawl requests and answers job queries
#[derive(Clone)]
pub struct JobService {
    store: Arc<JobStore>,
    orchestrator: Orchestrator,
    notifier: CallbackNotifier,
    defaults: DefaultsConfig,
}

impl JobService {
    pub fn new(
        store: Arc<JobStore>,
        orchestrator: Orchestrator,
        notifier: CallbackNotifier,
        defaults: DefaultsConfig,
    ) -> Self {
        Self {
            store,
            orchestrator,
            notifier,
            defaults,
        }
    }

    /// Builds a service with an empty store and HTTP-backed collaborators
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        let fetcher = HttpFetcher::new(&config.fetcher)?;
        let notifier = CallbackNotifier::new(&config.callback)?;

        Ok(Self::new(
            Arc::new(JobStore::new()),
            Orchestrator::new(Arc::new(fetcher)),
            notifier,
            config.defaults.clone(),
        ))
    }

    pub fn store(&self) -> &Arc<JobStore> {
        &self.store
    }

    /// Validates `request`, registers a queued job, and starts it in the background
    ///
    /// Must be called from within a Tokio runtime.
    pub fn submit(&self, mut request: CrawlRequest) -> Result<SubmittedJob, RequestError> {
        request.validate()?;
        request.apply_defaults(&self.defaults);

        let job = self.store.create_job();
        let view = JobView::from(&job);

        tracing::info!(
            "Job {} queued with {} sources",
            job.id,
            request.sources.len()
        );

        let handle = tokio::spawn(run_job(
            job.id,
            request,
            Arc::clone(&self.store),
            self.orchestrator.clone(),
            self.notifier.clone(),
        ));

        Ok(SubmittedJob { view, handle })
    }

    /// Status summary of a job, or `None` if unknown
    pub fn status(&self, id: &JobId) -> Option<JobView> {
        self.store.get(id).map(|job| JobView::from(&job))
    }

    /// Status and items of a job, or `None` if unknown
    pub fn items(&self, id: &JobId) -> Option<JobItemsView> {
        self.store.get(id).map(|job| JobItemsView::from(&job))
    }
}

/// Executes one job to completion and records the outcome
async fn run_job(
    id: JobId,
    request: CrawlRequest,
    store: Arc<JobStore>,
    orchestrator: Orchestrator,
    notifier: CallbackNotifier,
) {
    if let Err(e) = store.set_status(&id, JobStatus::Running) {
        tracing::error!("Job {} could not start: {}", id, e);
        return;
    }
    tracing::info!("Job {} running", id);

    let callback_url = request.callback_url.clone();

    // a panicking crawl must still leave the job in a terminal state
    let crawl = tokio::spawn(async move { orchestrator.run(&request).await });
    let outcome = match crawl.await {
        Ok(outcome) => outcome,
        Err(e) => Err(CrawlError::TaskFailed(e.to_string())),
    };

    let items = match outcome {
        Ok(items) => items,
        Err(e) => {
            tracing::error!(job_id = %id, "Job failed: {}", e);
            if let Err(store_err) = store.set_error(&id, e.to_string()) {
                tracing::error!("Job {}: {}", id, store_err);
            }
            return;
        }
    };

    let count = items.len();
    if let Err(e) = store.set_items(&id, items) {
        tracing::error!("Job {}: {}", id, e);
        return;
    }
    tracing::info!("Job {} completed with {} items", id, count);

    if let Some(callback_url) = callback_url {
        // snapshot taken from the store, so the callback sees exactly what pollers see
        if let Some(job) = store.get(&id) {
            notifier.notify(callback_url, CallbackPayload::new(job.id, job.items));
        }
    }
}
