//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::sync::Arc;

use crate::jobs::{JobExecutor, JobScheduler, JobStore};
use crate::services::Services;

/// Application state containing all shared services and resources.
///
/// Cloning is cheap: the store lives behind an `Arc` and the scheduler is
/// shared.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Background scheduler, absent when scanning is disabled
    pub scheduler: Option<Arc<JobScheduler>>,
}

impl AppState {
    /// Creates a new AppState over a shared job store.
    pub fn new(store: JobStore, executor: JobExecutor, scheduler: Option<Arc<JobScheduler>>) -> Self {
        Self {
            services: Services::new(store, executor),
            scheduler,
        }
    }
}
