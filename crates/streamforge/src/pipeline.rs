//! Configured entry point that hides executor wiring.

use std::any::Any;
use std::path::Path;

use streamforge_config::StreamConfig;
use streamforge_core::{Item, Mode, Result, Stream, StreamError};
use tracing::info;

/// Builds streams in the mode of one [`StreamConfig`].
///
/// The executor is built once, when the pipeline is created, and shared by
/// every stream the pipeline hands out. Cloning a pipeline shares it too.
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    mode: Mode,
}

impl Pipeline {
    /// Creates a pipeline from an already loaded configuration.
    pub fn from_config(config: &StreamConfig) -> Result<Self> {
        let mode = Mode::from_config(config)?;
        info!(
            parallel = mode.is_parallel(),
            "Stream pipeline configured"
        );
        Ok(Self { mode })
    }

    /// Loads a TOML configuration file and creates a pipeline from it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config =
            StreamConfig::load(path).map_err(|e| StreamError::Config(e.to_string()))?;
        Self::from_config(&config)
    }

    /// Loads `path` if it exists, falling back to the default configuration.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Self::from_config(&StreamConfig::default())
        }
    }

    /// Wraps an existing mode.
    pub fn with_mode(mode: Mode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_parallel(&self) -> bool {
        self.mode.is_parallel()
    }

    /// Creates a stream over `items`.
    pub fn stream<T: Item>(&self, items: impl IntoIterator<Item = T>) -> Stream<T> {
        Stream::new(items, self.mode.clone())
    }

    /// Creates a stream from a dynamically typed source.
    ///
    /// See [`Stream::sequential_from_any`] for the accepted sources.
    pub fn stream_from_any<T: Item>(&self, source: &dyn Any) -> Stream<T> {
        Stream::from_any(source, self.mode.clone())
    }
}
