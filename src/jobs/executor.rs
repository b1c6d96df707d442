use std::time::Duration;

use jiff::Timestamp;
use tokio::task::JoinHandle;
use tokio_util::task::TaskTracker;

use crate::jobs::error::{JobError, JobResult};
use crate::jobs::models::Job;
use crate::jobs::store::JobStore;

/// Default length of the simulated work.
pub const DEFAULT_EXECUTION_DELAY: Duration = Duration::from_secs(1);

/// Runs jobs: `scheduled → executing`, a simulated delay, `executed`, then
/// removal from the store.
///
/// The store lock is only taken for the two transitions and the removal,
/// never across the delay. Once a job is executing, the rest of the sequence
/// runs on a tracked task, so it completes even if the caller goes away.
/// Clones share the tracker.
#[derive(Clone)]
pub struct JobExecutor {
    store: JobStore,
    execution_delay: Duration,
    executions: TaskTracker,
}

impl JobExecutor {
    pub fn new(store: JobStore) -> Self {
        Self::with_delay(store, DEFAULT_EXECUTION_DELAY)
    }

    pub fn with_delay(store: JobStore, execution_delay: Duration) -> Self {
        Self {
            store,
            execution_delay,
            executions: TaskTracker::new(),
        }
    }

    pub fn execution_delay(&self) -> Duration {
        self.execution_delay
    }

    /// Runs the whole execution sequence and returns the `executed` record
    /// as it was just before removal.
    ///
    /// Dropping the returned future after the job started executing does not
    /// abort it; the job still ends up executed and removed.
    pub async fn run(&self, id: &str) -> JobResult<Job> {
        self.begin(id).await?;
        self.spawn_finish(id.to_string())
            .await
            .map_err(|e| JobError::Scheduler(format!("execution task for job {id} failed: {e}")))?
    }

    /// Hands `finish` for an executing job to the tracked task set.
    pub fn spawn_finish(&self, id: String) -> JoinHandle<JobResult<Job>> {
        let executor = self.clone();
        self.executions.spawn(async move {
            let result = executor.finish(&id).await;
            if let Err(e) = &result {
                tracing::warn!(job_id = %id, error = %e, "Execution did not complete");
            }
            result
        })
    }

    /// Waits for every execution handed to this executor (or its clones).
    pub async fn drain(&self) {
        self.executions.close();
        self.executions.wait().await;
    }

    /// Marks a scheduled job as executing.
    pub async fn begin(&self, id: &str) -> JobResult<Job> {
        let job = self
            .store
            .mutate(id, |job| {
                job.begin_execution(Timestamp::now())?;
                Ok(job.clone())
            })
            .await?;

        tracing::debug!(job_id = %id, "Job execution started");
        Ok(job)
    }

    /// Waits out the simulated work for a job already marked executing, then
    /// completes and removes it.
    pub async fn finish(&self, id: &str) -> JobResult<Job> {
        tokio::time::sleep(self.execution_delay).await;

        let job = self
            .store
            .mutate(id, |job| {
                job.complete_execution()?;
                Ok(job.clone())
            })
            .await?;
        self.store.remove(id).await;

        tracing::info!(job_id = %id, "Executed job");
        Ok(job)
    }
}
