//! Configuration validation logic
//!
//! This module provides validation methods for all configuration structures
//! to ensure configuration values are within acceptable ranges and formats.

use crate::config::error::ConfigError;
use crate::config::settings::{FileSettings, LoggerSettings, SchedulerConfig, ServerConfig, Settings};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

/// Upper bound for the simulated execution delay (one hour)
const MAX_EXECUTION_DELAY_MS: u64 = 60 * 60 * 1000;

impl ServerConfig {
    /// Validate server configuration
    ///
    /// # Validation Rules
    /// - Host must not be empty
    /// - Port must be between 1 and 65535
    /// - Request timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation(
                "server.host",
                "Host is required. Please specify an address to bind to.",
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl SchedulerConfig {
    /// Validate scheduler configuration
    ///
    /// # Validation Rules
    /// - Tick interval must be greater than 0
    /// - Execution delay must not exceed one hour
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::validation(
                "scheduler.tick_interval_ms",
                "Tick interval must be greater than 0 milliseconds.",
            ));
        }

        if self.execution_delay_ms > MAX_EXECUTION_DELAY_MS {
            return Err(ConfigError::ValidationError {
                field: "scheduler.execution_delay_ms".to_string(),
                message: format!(
                    "Execution delay ({} ms) cannot exceed {} ms.",
                    self.execution_delay_ms, MAX_EXECUTION_DELAY_MS
                ),
            });
        }

        Ok(())
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Log level must be one of: trace, debug, info, warn, error
    /// - At least one of console or file output must be enabled
    /// - If file logging is enabled, path must not be empty
    /// - Log format must be one of: full, compact, json
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        self.file.validate()?;

        Ok(())
    }
}

impl Settings {
    /// Validate all configuration settings
    ///
    /// Returns the first validation error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.scheduler.validate()?;
        self.logger.validate()?;

        // Run-now requests wait for the whole execution
        if self.scheduler.execution_delay_ms >= self.server.request_timeout.saturating_mul(1000) {
            return Err(ConfigError::ValidationError {
                field: "scheduler.execution_delay_ms".to_string(),
                message: format!(
                    "Execution delay ({} ms) must be shorter than server.request_timeout ({} s).",
                    self.scheduler.execution_delay_ms, self.server.request_timeout
                ),
            });
        }

        Ok(())
    }
}
