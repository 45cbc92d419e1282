//! Job management for crawl requests
//!
//! # Components
//!
//! - `JobStatus`: the queued/running/completed/failed lifecycle
//! - `JobStore`: in-memory registry of jobs, serialized behind one mutex
//! - `CallbackNotifier`: best-effort completion callbacks
//! - `JobService`: submission, background execution, and polling

mod notifier;
mod runner;
mod status;
mod store;
mod view;

pub use notifier::{CallbackError, CallbackNotifier, CallbackPayload};
pub use runner::{JobService, SubmittedJob};
pub use status::JobStatus;
pub use store::{Job, JobId, JobStore, JobStoreError};
pub use view::{ItemsMeta, JobItemsView, JobView};
