//! Response shapes for job polling

use crate::jobs::status::JobStatus;
use crate::jobs::store::{Job, JobId};
use crate::model::ScrapedProduct;
use serde::Serialize;
use std::sync::Arc;

/// Status summary of a job
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobView {
    pub id: JobId,
    pub status: JobStatus,
    pub count: usize,
    pub error: Option<String>,
}

/// A job's status together with its items
#[derive(Debug, Clone, Serialize)]
pub struct JobItemsView {
    pub id: JobId,
    pub status: JobStatus,
    pub items: Arc<Vec<ScrapedProduct>>,
    pub meta: ItemsMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemsMeta {
    pub count: usize,
}

impl From<&Job> for JobView {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id.clone(),
            status: job.status,
            count: job.count(),
            error: job.error.clone(),
        }
    }
}

impl From<&Job> for JobItemsView {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id.clone(),
            status: job.status,
            items: Arc::clone(&job.items),
            meta: ItemsMeta { count: job.count() },
        }
    }
}
