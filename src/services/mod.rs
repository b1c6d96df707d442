//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! the job core and the request handlers.

mod job_service;

pub use job_service::JobService;

use crate::jobs::{JobExecutor, JobStore};

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since the job store is shared through an `Arc`.
#[derive(Clone)]
pub struct Services {
    pub jobs: JobService,
}

impl Services {
    /// Creates a new Services instance over a shared store and executor.
    pub fn new(store: JobStore, executor: JobExecutor) -> Self {
        Self {
            jobs: JobService::new(store, executor),
        }
    }
}
