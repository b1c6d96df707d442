//! Job service exposing the core deferred-job operations.

use jiff::Timestamp;

use crate::jobs::{Job, JobExecutor, JobResult, JobStore, NewJob};

/// Job service used by request handlers.
///
/// Cloning is cheap; all clones share the same store.
#[derive(Clone)]
pub struct JobService {
    store: JobStore,
    executor: JobExecutor,
}

impl JobService {
    /// Creates a new JobService over the given store and executor.
    pub fn new(store: JobStore, executor: JobExecutor) -> Self {
        Self { store, executor }
    }

    /// Submits a job to run at `execute_at`, which must lie in the future.
    pub async fn submit(&self, description: String, execute_at: Timestamp) -> JobResult<Job> {
        let new_job = NewJob::new(description, execute_at, Timestamp::now())?;
        let job = self.store.insert(new_job).await;

        tracing::info!(job_id = %job.id, execute_at = %job.execute_at, "Created job");
        Ok(job)
    }

    /// Lists all live jobs.
    pub async fn list_all(&self) -> Vec<Job> {
        self.store.list().await
    }

    /// Gets a job by ID.
    pub async fn get(&self, id: &str) -> JobResult<Job> {
        self.store.get(id).await
    }

    /// Cancels a scheduled job. The job stays in the store as `cancelled`.
    pub async fn cancel(&self, id: &str) -> JobResult<Job> {
        let job = self
            .store
            .mutate(id, |job| {
                job.cancel()?;
                Ok(job.clone())
            })
            .await?;

        tracing::info!(job_id = %id, "Cancelled job");
        Ok(job)
    }

    /// Runs a scheduled job now and waits for it to finish.
    ///
    /// Returns the job as `executed`; it is no longer in the store afterwards.
    pub async fn run_now(&self, id: &str) -> JobResult<Job> {
        self.executor.run(id).await
    }

    pub(crate) fn store(&self) -> &JobStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::{JobError, JobScheduler, JobStatus};
    use jiff::SignedDuration;
    use std::collections::HashSet;
    use std::time::Duration;
    use tokio::time::Instant;

    const DELAY: Duration = Duration::from_millis(100);

    fn service() -> JobService {
        let store = JobStore::new();
        let executor = JobExecutor::with_delay(store.clone(), DELAY);
        JobService::new(store, executor)
    }

    fn in_future(millis: i64) -> Timestamp {
        Timestamp::now() + SignedDuration::from_millis(millis)
    }

    #[tokio::test]
    async fn test_submit_rejects_past_or_now() {
        let service = service();

        let past = service
            .submit("late".to_string(), Timestamp::now() - SignedDuration::from_secs(1))
            .await;
        assert!(matches!(past, Err(JobError::Validation { .. })));

        let now = service.submit("now".to_string(), Timestamp::now()).await;
        assert!(matches!(now, Err(JobError::Validation { .. })));

        assert!(service.list_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_submit_returns_fresh_scheduled_job() {
        let service = service();
        let job = service.submit("mail".to_string(), in_future(60_000)).await.unwrap();

        assert_eq!(job.status, JobStatus::Scheduled);
        assert!(job.executed_at.is_none());
        assert_eq!(job.description, "mail");
        assert_eq!(service.get(&job.id).await.unwrap(), job);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_submissions_have_unique_ids() {
        let service = service();
        let tasks: Vec<_> = (0..100)
            .map(|i| {
                let service = service.clone();
                tokio::spawn(async move {
                    service.submit(format!("job {i}"), in_future(60_000)).await.unwrap().id
                })
            })
            .collect();

        let ids: HashSet<String> = futures::future::join_all(tasks)
            .await
            .into_iter()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(ids.len(), 100);
    }

    #[tokio::test]
    async fn test_run_now_then_run_now_is_not_found() {
        let service = service();
        let job = service.submit("once".to_string(), in_future(60_000)).await.unwrap();

        let done = service.run_now(&job.id).await.unwrap();
        assert_eq!(done.status, JobStatus::Executed);
        assert!(done.executed_at.is_some());

        assert!(matches!(service.run_now(&job.id).await, Err(JobError::NotFound(_))));
        assert!(matches!(service.get(&job.id).await, Err(JobError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_cancel_then_run_now_is_invalid_state() {
        let service = service();
        let job = service.submit("nope".to_string(), in_future(60_000)).await.unwrap();

        let cancelled = service.cancel(&job.id).await.unwrap();
        assert_eq!(cancelled.status, JobStatus::Cancelled);

        let err = service.run_now(&job.id).await.unwrap_err();
        assert!(matches!(err, JobError::InvalidState { .. }));
        assert!(matches!(service.cancel(&job.id).await, Err(JobError::InvalidState { .. })));
    }

    #[tokio::test]
    async fn test_cancel_unknown_is_not_found() {
        let service = service();
        assert!(matches!(service.cancel("ghost").await, Err(JobError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_cancel_executing_is_invalid_state() {
        let service = service();
        let job = service.submit("busy".to_string(), in_future(60_000)).await.unwrap();

        let running = {
            let service = service.clone();
            let id = job.id.clone();
            tokio::spawn(async move { service.run_now(&id).await })
        };
        tokio::time::sleep(DELAY / 4).await;

        let err = service.cancel(&job.id).await.unwrap_err();
        assert!(matches!(err, JobError::InvalidState { status: JobStatus::Executing, .. }));
        assert_eq!(running.await.unwrap().unwrap().status, JobStatus::Executed);
    }

    #[tokio::test]
    async fn test_cancelled_job_remains_visible_after_its_time() {
        let service = service();
        let store = service.store().clone();
        let executor = JobExecutor::with_delay(store.clone(), DELAY);
        let scheduler = JobScheduler::with_interval(store, executor, Duration::from_millis(20));
        scheduler.start().await.unwrap();

        let job = service.submit("A".to_string(), in_future(100)).await.unwrap();
        assert_eq!(service.cancel(&job.id).await.unwrap().status, JobStatus::Cancelled);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(service.get(&job.id).await.unwrap().status, JobStatus::Cancelled);

        scheduler.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_due_job_is_not_left_scheduled() {
        let service = service();
        let store = service.store().clone();
        let executor = JobExecutor::with_delay(store.clone(), DELAY);
        let scheduler = JobScheduler::with_interval(store, executor, Duration::from_millis(50));
        scheduler.start().await.unwrap();

        let job = service.submit("soon".to_string(), in_future(100)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(400)).await;

        let still_scheduled = service
            .list_all()
            .await
            .into_iter()
            .any(|j| j.id == job.id && j.status == JobStatus::Scheduled);
        assert!(!still_scheduled);

        scheduler.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_submit_and_list_do_not_wait_for_running_job() {
        let service = service();
        let job = service.submit("slow".to_string(), in_future(60_000)).await.unwrap();

        let running = {
            let service = service.clone();
            let id = job.id.clone();
            tokio::spawn(async move { service.run_now(&id).await })
        };
        tokio::time::sleep(DELAY / 4).await;

        let started = Instant::now();
        service.submit("quick".to_string(), in_future(60_000)).await.unwrap();
        let jobs = service.list_all().await;
        assert!(started.elapsed() < DELAY / 2);
        assert_eq!(jobs.len(), 2);
        assert!(jobs.iter().any(|j| j.id == job.id && j.status == JobStatus::Executing));

        running.await.unwrap().unwrap();
    }
}
