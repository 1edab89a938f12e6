//! Configuration file handling

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use super::paths::config_path;
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Suite host settings
    #[serde(default)]
    pub runner: RunnerConfig,

    /// Settings for the bundled conformance fixtures
    #[serde(default)]
    pub fixtures: FixtureConfig,
}

/// Suite host settings
#[derive(Debug, Deserialize)]
pub struct RunnerConfig {
    /// Number of cases executed concurrently in parallel mode
    #[serde(default = "default_jobs")]
    pub jobs: usize,

    /// Per-case deadline in milliseconds, 0 disables it
    #[serde(default)]
    pub deadline_ms: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            jobs: default_jobs(),
            deadline_ms: 0,
        }
    }
}

impl RunnerConfig {
    /// The per-case deadline, if one is configured
    pub fn deadline(&self) -> Option<Duration> {
        (self.deadline_ms > 0).then(|| Duration::from_millis(self.deadline_ms))
    }
}

fn default_jobs() -> usize {
    4
}

/// Settings for the bundled conformance fixtures
#[derive(Debug, Deserialize)]
pub struct FixtureConfig {
    /// Number of elements pushed onto the stack fixture during setup
    #[serde(default = "default_stack_size")]
    pub stack_size: usize,

    /// Pattern the event wrapper's textual form must match
    #[serde(default = "default_event_display")]
    pub event_display: String,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            stack_size: default_stack_size(),
            event_display: default_event_display(),
        }
    }
}

fn default_stack_size() -> usize {
    10
}

fn default_event_display() -> String {
    "glob:EventObject[source=Source@*]".to_string()
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| super::Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| super::Error::ConfigParse(e.to_string()))?;
        if config.runner.jobs == 0 {
            return Err(super::Error::Config(
                "runner.jobs must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }
}
