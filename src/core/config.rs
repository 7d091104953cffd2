//! Configuration management for Helsa.
//!
//! This module provides configuration handling with:
//! - YAML file support
//! - Environment variable overrides
//! - CLI argument overrides
//! - Validation and defaults

use crate::core::{HelsaError, Result};
use crate::planner::rules::RuleSet;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete configuration for Helsa
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Planner configuration
    pub planner: PlannerConfig,
    /// Data source configuration
    pub source: SourceConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Debug mode
    #[serde(skip)]
    pub debug: bool,
}

/// Planner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Keyword rule tables; replacing them swaps the alias vocabulary
    pub rules: RuleSet,
}

/// Data source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Upper bound on a single source read
    #[serde(with = "humantime_serde")]
    pub read_timeout: Duration,
    /// Fixed seed for the demo source; `None` draws from entropy
    pub demo_seed: Option<u64>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: LogLevel,
}

/// Log levels
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            planner: PlannerConfig::default(),
            source: SourceConfig::default(),
            logging: LoggingConfig::default(),
            debug: false,
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            rules: RuleSet::default(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            read_timeout: Duration::from_secs(10),
            demo_seed: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: LogLevel::Info,
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Result<Self> {
        let config = Config::default();
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.source.read_timeout.is_zero() {
            return Err(HelsaError::config("read_timeout must be greater than 0"));
        }

        self.planner.rules.validate()?;

        Ok(())
    }
}

impl LogLevel {
    /// Convert to tracing filter string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Configuration builder for programmatic construction
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with defaults
    pub fn new() -> Self {
        ConfigBuilder {
            config: Config::default(),
        }
    }

    /// Load configuration from YAML string
    pub fn from_yaml(mut self, yaml: &str) -> Result<Self> {
        self.config = serde_yaml::from_str(yaml)
            .map_err(|e| HelsaError::config(format!("Failed to parse YAML config: {}", e)))?;
        Ok(self)
    }

    /// Set the source read timeout
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.config.source.read_timeout = timeout;
        self
    }

    /// Pin the demo source to a fixed seed
    pub fn demo_seed(mut self, seed: u64) -> Self {
        self.config.source.demo_seed = Some(seed);
        self
    }

    /// Replace the planner rule tables
    pub fn rules(mut self, rules: RuleSet) -> Self {
        self.config.planner.rules = rules;
        self
    }

    /// Set the log level
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set debug mode
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
