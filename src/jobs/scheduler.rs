use std::time::Duration;

use jiff::Timestamp;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::jobs::error::{JobError, JobResult};
use crate::jobs::executor::JobExecutor;
use crate::jobs::store::JobStore;

/// Default pause between two scans of the store.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Periodic background loop that triggers due jobs.
///
/// Every tick takes a snapshot of the store, marks each due job as executing
/// inline, and hands the simulated work to a tracked task so the scan never
/// waits on a delay. The loop runs until [`JobScheduler::stop`] is called.
pub struct JobScheduler {
    store: JobStore,
    executor: JobExecutor,
    tick_interval: Duration,
    shutdown: CancellationToken,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl JobScheduler {
    pub fn new(store: JobStore, executor: JobExecutor) -> Self {
        Self::with_interval(store, executor, DEFAULT_TICK_INTERVAL)
    }

    pub fn with_interval(store: JobStore, executor: JobExecutor, tick_interval: Duration) -> Self {
        Self {
            store,
            executor,
            tick_interval,
            shutdown: CancellationToken::new(),
            handle: Mutex::new(None),
        }
    }

    /// Spawns the scan loop on the current runtime.
    pub async fn start(&self) -> JobResult<()> {
        let mut handle = self.handle.lock().await;
        if handle.is_some() || self.shutdown.is_cancelled() {
            return Err(JobError::Scheduler(
                "scheduler has already been started".to_string(),
            ));
        }

        let scanner = Scanner {
            store: self.store.clone(),
            executor: self.executor.clone(),
        };
        let shutdown = self.shutdown.clone();
        let tick_interval = self.tick_interval;

        *handle = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(
                tokio::time::Instant::now() + tick_interval,
                tick_interval,
            );
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    _ = ticker.tick() => {
                        scanner.scan().await;
                    }
                }
            }

            tracing::debug!("Scheduler loop exited");
        }));

        tracing::info!(
            tick_interval_ms = %tick_interval.as_millis(),
            execution_delay_ms = %self.executor.execution_delay().as_millis(),
            "Job scheduler started"
        );
        Ok(())
    }

    /// Stops the loop and waits for in-flight executions to complete.
    pub async fn stop(&self) -> JobResult<()> {
        self.shutdown.cancel();

        let handle = self.handle.lock().await.take();
        if let Some(handle) = handle {
            handle
                .await
                .map_err(|e| JobError::Scheduler(format!("scheduler loop failed: {e}")))?;
        }

        self.executor.drain().await;

        tracing::info!("Job scheduler stopped");
        Ok(())
    }

    pub async fn is_running(&self) -> bool {
        self.handle.lock().await.is_some() && !self.shutdown.is_cancelled()
    }

    /// Runs one scan immediately and returns the ids it triggered.
    pub async fn tick(&self) -> Vec<String> {
        Scanner {
            store: self.store.clone(),
            executor: self.executor.clone(),
        }
        .scan()
        .await
    }
}

struct Scanner {
    store: JobStore,
    executor: JobExecutor,
}

impl Scanner {
    async fn scan(&self) -> Vec<String> {
        let due = self.due_ids(Timestamp::now()).await;
        self.trigger(due).await
    }

    async fn due_ids(&self, now: Timestamp) -> Vec<String> {
        self.store
            .list()
            .await
            .into_iter()
            .filter(|job| job.is_due(now))
            .map(|job| job.id)
            .collect()
    }

    /// Begins each job and hands its completion to the executor.
    ///
    /// Jobs cancelled or removed since the snapshot are skipped.
    async fn trigger(&self, ids: Vec<String>) -> Vec<String> {
        let mut triggered = Vec::with_capacity(ids.len());
        for id in ids {
            match self.executor.begin(&id).await {
                Ok(_) => {
                    self.executor.spawn_finish(id.clone());
                    triggered.push(id);
                }
                Err(e) if e.is_race() => {
                    tracing::debug!(job_id = %id, error = %e, "Skipping job that changed state since scan");
                }
                Err(e) => {
                    tracing::error!(job_id = %id, error = %e, "Failed to trigger due job");
                }
            }
        }

        if !triggered.is_empty() {
            tracing::debug!(count = triggered.len(), "Triggered due jobs");
        }
        triggered
    }
}
