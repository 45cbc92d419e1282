//! In-memory job registry
//!
//! The store owns every `Job` record. Callers only ever receive cloned
//! snapshots; all mutation goes through the store's methods, which are
//! serialized by a single mutex.

use crate::jobs::status::JobStatus;
use crate::model::ScrapedProduct;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use uuid::Uuid;

/// Opaque job identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    /// A fresh random id (32 lowercase hex characters)
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for JobId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for JobId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of one job
#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub status: JobStatus,
    /// Empty unless the job completed
    pub items: Arc<Vec<ScrapedProduct>>,
    /// Set if and only if the job failed
    pub error: Option<String>,
}

impl Job {
    fn queued(id: JobId) -> Self {
        Self {
            id,
            status: JobStatus::Queued,
            items: Arc::new(Vec::new()),
            error: None,
        }
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobStoreError {
    #[error("Job id already exists: {0}")]
    DuplicateId(JobId),

    #[error("Invalid job transition for {id}: {from} -> {to}")]
    InvalidTransition {
        id: JobId,
        from: JobStatus,
        to: JobStatus,
    },

    #[error("Status {0} can only be reached through set_items or set_error")]
    OutcomeStatus(JobStatus),
}

/// Registry of all jobs known to this process
#[derive(Debug, Default)]
pub struct JobStore {
    jobs: Mutex<HashMap<JobId, Job>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<JobId, Job>> {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a new queued job under `id`
    pub fn create(&self, id: JobId) -> Result<Job, JobStoreError> {
        let mut jobs = self.lock();
        if jobs.contains_key(&id) {
            return Err(JobStoreError::DuplicateId(id));
        }
        let job = Job::queued(id.clone());
        jobs.insert(id, job.clone());
        Ok(job)
    }

    /// Registers a new queued job under a freshly generated id
    pub fn create_job(&self) -> Job {
        let mut jobs = self.lock();
        loop {
            let id = JobId::generate();
            if !jobs.contains_key(&id) {
                let job = Job::queued(id.clone());
                jobs.insert(id, job.clone());
                return job;
            }
        }
    }

    /// Snapshot of the job, or `None` if the id is unknown
    pub fn get(&self, id: &JobId) -> Option<Job> {
        self.lock().get(id).cloned()
    }

    /// Moves a job to a non-terminal status
    ///
    /// Unknown ids are ignored. Terminal statuses are only reachable through
    /// `set_items` and `set_error`, which carry the outcome with them.
    pub fn set_status(&self, id: &JobId, status: JobStatus) -> Result<(), JobStoreError> {
        if status.is_terminal() {
            return Err(JobStoreError::OutcomeStatus(status));
        }
        self.transition(id, status, |_| {})
    }

    /// Marks a job failed with `message`
    pub fn set_error(&self, id: &JobId, message: impl Into<String>) -> Result<(), JobStoreError> {
        let message = message.into();
        self.transition(id, JobStatus::Failed, move |job| {
            job.error = Some(message);
        })
    }

    /// Marks a job completed with its scraped items
    pub fn set_items(&self, id: &JobId, items: Vec<ScrapedProduct>) -> Result<(), JobStoreError> {
        self.transition(id, JobStatus::Completed, move |job| {
            job.items = Arc::new(items);
        })
    }

    /// Number of jobs in the store
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn transition(
        &self,
        id: &JobId,
        to: JobStatus,
        apply: impl FnOnce(&mut Job),
    ) -> Result<(), JobStoreError> {
        let mut jobs = self.lock();
        let Some(job) = jobs.get_mut(id) else {
            tracing::debug!("Ignoring {} update for unknown job {}", to, id);
            return Ok(());
        };

        if !job.status.can_transition_to(to) {
            return Err(JobStoreError::InvalidTransition {
                id: id.clone(),
                from: job.status,
                to,
            });
        }

        apply(job);
        job.status = to;
        Ok(())
    }
}
