//! Ticket pool bounding concurrent fetches
//!
//! One pool is created per crawl request and shared by every source in it.
//! A ticket is held for the whole of one scrape operation and returned when
//! the `Ticket` is dropped, whether the scrape succeeded, failed, or was
//! aborted.

use std::sync::Arc;
use tokio::sync::{AcquireError, OwnedSemaphorePermit, Semaphore};

/// Counting limiter for in-flight scrape operations
#[derive(Debug, Clone)]
pub struct TicketPool {
    semaphore: Arc<Semaphore>,
    size: usize,
}

/// Proof of a reserved slot; released on drop
#[derive(Debug)]
pub struct Ticket {
    _permit: OwnedSemaphorePermit,
}

impl TicketPool {
    /// Creates a pool with `size` tickets, clamped to `1..=Semaphore::MAX_PERMITS`
    pub fn new(size: usize) -> Self {
        let size = size.clamp(1, Semaphore::MAX_PERMITS);
        Self {
            semaphore: Arc::new(Semaphore::new(size)),
            size,
        }
    }

    /// Waits until a ticket is free and takes it
    ///
    /// Only fails if the pool has been closed, which never happens while a
    /// crawl holds it.
    pub async fn acquire(&self) -> Result<Ticket, AcquireError> {
        let permit = Arc::clone(&self.semaphore).acquire_owned().await?;
        Ok(Ticket { _permit: permit })
    }

    /// Number of tickets the pool was created with
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of tickets currently free
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}
