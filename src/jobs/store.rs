use std::collections::HashMap;
use std::sync::Arc;

use jiff::Timestamp;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::jobs::error::{JobError, JobResult};
use crate::jobs::models::{Job, NewJob};
use crate::jobs::types::JobStatus;

/// Authoritative in-memory collection of live jobs, keyed by id.
///
/// Cloning is cheap and every clone shares the same records. Reads share the
/// lock; inserts, removals and mutations take it exclusively. Callers only
/// ever receive snapshots.
#[derive(Clone, Default)]
pub struct JobStore {
    jobs: Arc<RwLock<HashMap<String, Job>>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new job under a fresh id and returns the stored record.
    pub async fn insert(&self, new_job: NewJob) -> Job {
        let mut jobs = self.jobs.write().await;

        let mut id = Uuid::new_v4().to_string();
        while jobs.contains_key(&id) {
            id = Uuid::new_v4().to_string();
        }

        let job = Job::from_new(id.clone(), new_job, Timestamp::now());
        jobs.insert(id, job.clone());
        job
    }

    pub async fn get(&self, id: &str) -> JobResult<Job> {
        let jobs = self.jobs.read().await;
        jobs.get(id)
            .cloned()
            .ok_or_else(|| JobError::NotFound(id.to_string()))
    }

    /// Snapshot of all live jobs, in no particular order.
    pub async fn list(&self) -> Vec<Job> {
        let jobs = self.jobs.read().await;
        jobs.values().cloned().collect()
    }

    /// Deletes a job; an unknown id is a no-op.
    pub async fn remove(&self, id: &str) -> Option<Job> {
        let mut jobs = self.jobs.write().await;
        jobs.remove(id)
    }

    /// Applies `f` to the record under exclusive access.
    ///
    /// `f` must check its guards before writing: when it returns an error the
    /// record is expected to be unchanged.
    pub async fn mutate<T, F>(&self, id: &str, f: F) -> JobResult<T>
    where
        F: FnOnce(&mut Job) -> JobResult<T>,
    {
        let mut jobs = self.jobs.write().await;
        let job = jobs
            .get_mut(id)
            .ok_or_else(|| JobError::NotFound(id.to_string()))?;
        f(job)
    }

    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.jobs.read().await.is_empty()
    }

    /// Number of live jobs per status. Statuses with no jobs are included
    /// with a zero count.
    pub async fn count_by_status(&self) -> HashMap<JobStatus, usize> {
        let jobs = self.jobs.read().await;
        let mut counts: HashMap<JobStatus, usize> =
            JobStatus::ALL.iter().map(|status| (*status, 0)).collect();
        for job in jobs.values() {
            *counts.entry(job.status).or_insert(0) += 1;
        }
        counts
    }
}
