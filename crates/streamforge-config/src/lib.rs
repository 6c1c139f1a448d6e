//! Configuration system for StreamForge.
//!
//! Load pipeline configuration from TOML or YAML to choose the default
//! execution mode and size the parallel worker pool without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use streamforge_config::{ExecutionMode, StreamConfig, ThreadCount};
//!
//! let config = StreamConfig::from_toml_str(r#"
//!     default_mode = "parallel"
//!
//!     [parallel]
//!     thread_count = { count = 4 }
//!     min_chunk_len = 64
//! "#).unwrap();
//!
//! assert_eq!(config.default_mode, ExecutionMode::Parallel);
//! assert_eq!(config.parallel.thread_count, ThreadCount::Count(4));
//! assert_eq!(config.parallel.chunk_len(), 64);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use streamforge_config::StreamConfig;
//!
//! let config = StreamConfig::load("streamforge.toml").unwrap_or_default();
//! // Proceeds with sequential defaults if file doesn't exist
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Chunk length used when none is configured.
pub const DEFAULT_MIN_CHUNK_LEN: usize = 1;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main stream configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct StreamConfig {
    /// Mode used by streams built from this configuration.
    #[serde(default)]
    pub default_mode: ExecutionMode,

    /// Parallel executor configuration.
    #[serde(default)]
    pub parallel: ParallelConfig,
}

impl StreamConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or fails
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::from_toml_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the default execution mode.
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.default_mode = mode;
        self
    }

    /// Sets a fixed worker thread count for parallel streams.
    pub fn with_thread_count(mut self, threads: usize) -> Self {
        self.parallel.thread_count = ThreadCount::Count(threads);
        self
    }

    /// Sets the minimum number of elements handed to one parallel work unit.
    pub fn with_min_chunk_len(mut self, len: usize) -> Self {
        self.parallel.min_chunk_len = Some(len);
        self
    }

    /// Checks values serde cannot reject on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parallel.validate()
    }

    /// Returns true if streams built from this configuration run in parallel.
    pub fn is_parallel(&self) -> bool {
        self.default_mode == ExecutionMode::Parallel
    }
}

/// Execution strategy for newly built streams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// Every stage runs on the caller's thread.
    #[default]
    Sequential,

    /// Per-element stages fan out over a worker pool.
    Parallel,
}

/// Worker thread count configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadCount {
    /// Share the process-wide rayon pool.
    #[default]
    Auto,

    /// Dedicated pool with a specific number of threads.
    Count(usize),
}

/// Parallel executor configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ParallelConfig {
    /// Number of worker threads.
    #[serde(default)]
    pub thread_count: ThreadCount,

    /// Minimum number of elements per work unit.
    pub min_chunk_len: Option<usize>,

    /// Prefix for worker thread names of a dedicated pool. Requires
    /// `thread_count = { count = n }`; the shared pool cannot be renamed.
    pub thread_name_prefix: Option<String>,
}

impl ParallelConfig {
    /// Returns the configured chunk length, or [`DEFAULT_MIN_CHUNK_LEN`].
    pub fn chunk_len(&self) -> usize {
        self.min_chunk_len.unwrap_or(DEFAULT_MIN_CHUNK_LEN)
    }

    /// Rejects zero thread counts, zero chunk lengths and thread names
    /// without a dedicated pool.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thread_count == ThreadCount::Count(0) {
            return Err(ConfigError::Invalid(
                "parallel.thread_count must be at least 1".to_string(),
            ));
        }
        if self.min_chunk_len == Some(0) {
            return Err(ConfigError::Invalid(
                "parallel.min_chunk_len must be at least 1".to_string(),
            ));
        }
        if self.thread_name_prefix.is_some() && self.thread_count == ThreadCount::Auto {
            return Err(ConfigError::Invalid(
                "parallel.thread_name_prefix requires an explicit thread_count".to_string(),
            ));
        }
        Ok(())
    }
}
