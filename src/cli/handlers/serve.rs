//! Serve command handler
//!
//! Handles the serve command including dry-run validation and server startup.

use crate::config::settings::Settings;
use crate::server::Server;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Runs the server, or only validates configuration when `dry_run` is set
    pub async fn execute(self, dry_run: bool) -> anyhow::Result<()> {
        if dry_run {
            return self.validate_only();
        }

        Server::new(self.config).run().await
    }

    /// Validate configuration without starting the server
    pub fn validate_only(&self) -> anyhow::Result<()> {
        self.config.validate()?;

        let scheduler = &self.config.scheduler;
        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        if scheduler.enabled {
            println!(
                "✓ Scheduler scans every {}ms, executions take {}ms",
                scheduler.tick_interval_ms, scheduler.execution_delay_ms
            );
        } else {
            println!("✓ Scheduler is disabled; jobs only run on demand");
        }
        println!("✓ Logger level: {}", self.config.logger.level);

        println!("Dry run completed successfully");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dry_run_accepts_defaults() {
        let handler = ServeCommandHandler::new(Settings::default());
        assert_eq!(handler.config(), &Settings::default());
        assert!(handler.execute(true).await.is_ok());
    }

    #[tokio::test]
    async fn test_dry_run_rejects_invalid_config() {
        let mut config = Settings::default();
        config.server.port = 0;

        let handler = ServeCommandHandler::new(config);
        assert!(handler.execute(true).await.is_err());
    }
}
