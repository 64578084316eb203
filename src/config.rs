//! Configuration for AtlasDoc
//!
//! Centralized configuration with sensible defaults.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::logger::Logger;

/// Main configuration for an AtlasDoc instance
#[derive(Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for all collections
    /// Internal structure:
    ///   {data_dir}/
    ///     └── {collection}/
    ///           ├── {resource}.json
    ///           └── {resource}.json.tmp   (transient, during writes)
    pub data_dir: PathBuf,

    /// fsync the staging file before it is renamed into place
    pub sync_writes: bool,

    // -------------------------------------------------------------------------
    // Logging Configuration
    // -------------------------------------------------------------------------
    /// Diagnostic sink; `None` selects `TracingLogger::default()`
    pub logger: Option<Arc<dyn Logger>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./atlasdoc_data"),
            sync_writes: true,
            logger: None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("data_dir", &self.data_dir)
            .field("sync_writes", &self.sync_writes)
            .field("logger", &self.logger.as_ref().map(|_| "<custom>"))
            .finish()
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root for all collections)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Enable or disable fsync of staged records
    pub fn sync_writes(mut self, sync: bool) -> Self {
        self.config.sync_writes = sync;
        self
    }

    /// Set the logger the engine reports to
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.config.logger = Some(logger);
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
