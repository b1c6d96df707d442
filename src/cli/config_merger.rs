//! Configuration merger for CLI arguments and config files
//!
//! CLI arguments sit on top of the file and environment layers.

use std::path::Path;

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, settings::Settings};

/// Applies CLI argument overrides to file-based configuration
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    /// Create a new configuration merger with base configuration
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Load the base configuration the CLI points at
    ///
    /// `--config` selects a single file; otherwise the layered loader is used,
    /// with `--env` overriding `DEFER_APP_ENV`.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let config = match &cli.config {
            Some(path) => Self::load_config_from_file(path)?,
            None => {
                let mut loader = ConfigLoader::new()?;
                if let Some(env) = cli.env {
                    loader = loader.with_environment(env.into());
                }
                loader.load()?
            }
        };

        Ok(Self::new(config))
    }

    fn load_config_from_file(path: &Path) -> Result<Settings, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::file_not_found(format!(
                "Configuration file does not exist: '{}'",
                path.display()
            )));
        }

        ConfigLoader::from_file(path).load()
    }

    /// Merge CLI arguments with the base configuration
    ///
    /// Command-specific flags win over global ones; the result is validated.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(Commands::Serve {
            host,
            port,
            log_level,
            dry_run: _,
        }) = &cli.command
        {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            if let Some(level) = log_level {
                config.logger.level = (*level).into();
            }
        }

        config.validate()?;

        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}
