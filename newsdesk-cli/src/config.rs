//! Configuration module
//!
//! The CLI reads the shared session configuration and lets flags override
//! the assistant, the thread and the poll interval.

use std::time::Duration;

use anyhow::{Context, Result};
use newsdesk_runner::Config;

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub assistant_id: Option<String>,
    pub thread_id: Option<String>,
    pub poll_interval: Option<u64>,
}

impl Overrides {
    /// Applies the flags on top of the loaded configuration
    pub fn apply(self, mut config: Config) -> Config {
        if let Some(id) = self.assistant_id {
            config = config.with_assistant(id);
        }
        if let Some(id) = self.thread_id {
            config = config.with_thread(id);
        }
        if let Some(secs) = self.poll_interval {
            config.poll_interval = Duration::from_secs(secs);
        }
        config
    }
}

/// Loads `.env` and the environment, then applies the flags
pub fn load(overrides: Overrides) -> Result<Config> {
    let config = overrides.apply(Config::load().context("Failed to load configuration")?);
    config.validate().context("Invalid command-line override")?;
    Ok(config)
}
