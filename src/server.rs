//! Server module for managing HTTP server lifecycle
//!
//! Builds the job store, executor and scheduler from settings, serves the
//! router and shuts everything down on Ctrl+C or SIGTERM.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;

use crate::api::routes::create_router;
use crate::config::settings::Settings;
use crate::jobs::{JobExecutor, JobScheduler, JobStore};
use crate::state::AppState;

/// HTTP server manager
pub struct Server {
    settings: Settings,
}

impl Server {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Start the server and run until a shutdown signal arrives
    ///
    /// The scheduler, when enabled, is started before the listener binds and
    /// stopped after the last connection drains. In-flight executions, including
    /// run-now requests whose client went away, finish before this returns.
    pub async fn run(self) -> anyhow::Result<()> {
        let settings = &self.settings;

        tracing::info!(
            app_name = %settings.application.name,
            app_version = %settings.application.version,
            "Application starting"
        );
        tracing::info!(
            host = %settings.server.host,
            port = settings.server.port,
            request_timeout = settings.server.request_timeout,
            "Server configuration loaded"
        );
        tracing::info!(
            enabled = settings.scheduler.enabled,
            tick_interval_ms = settings.scheduler.tick_interval_ms,
            execution_delay_ms = settings.scheduler.execution_delay_ms,
            "Scheduler configuration loaded"
        );

        let store = JobStore::new();
        let executor = JobExecutor::with_delay(store.clone(), settings.scheduler.execution_delay());

        let scheduler = if settings.scheduler.enabled {
            let scheduler = Arc::new(JobScheduler::with_interval(
                store.clone(),
                executor.clone(),
                settings.scheduler.tick_interval(),
            ));
            scheduler
                .start()
                .await
                .context("Failed to start job scheduler")?;
            Some(scheduler)
        } else {
            tracing::warn!("Job scheduler disabled; jobs only run on demand");
            None
        };

        let state = AppState::new(store, executor.clone(), scheduler.clone());
        let router = create_router(state, Duration::from_secs(settings.server.request_timeout));

        let address = settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        tracing::info!(address = %address, "Server listening");

        let served = axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await;

        if let Some(scheduler) = scheduler {
            if let Err(e) = scheduler.stop().await {
                tracing::error!(error = %e, "Failed to stop job scheduler");
            }
        }
        executor.drain().await;

        served.context("HTTP server error")?;
        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
///
/// If a handler cannot be installed, that source is ignored and the other
/// one still triggers shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
