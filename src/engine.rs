//! Engine Module
//!
//! The document store: ties the path resolver, lock registry and record codec
//! together into the public CRUD surface.
//!
//! ## Responsibilities
//! - Create or attach to the root directory
//! - Serialize mutations per collection
//! - Publish records atomically (stage to `.tmp`, then rename)
//! - Decode records for point reads and collection scans

use std::fs::{self, DirBuilder, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;
use crate::error::{AtlasError, Result};
use crate::logger::{Logger, TracingLogger};
use crate::storage::{LockRegistry, PathResolver, RecordCodec};

/// The document store engine
///
/// ## Concurrency Model: per-collection writer, lock-free readers
///
/// - **Mutations** (write/delete): serialized per collection
///   - Must acquire: registry lock (brief) → collection lock → filesystem
///   - Mutations on different collections run in parallel
///
/// - **Reads** (read/read_all/list): take no lock
///   - Records are only ever replaced by `rename`, so a reader sees either
///     the previous or the new file, never a partial one
///
/// Engines pointed at the same directory do not coordinate; open one per root.
pub struct Engine {
    /// Engine configuration
    config: Config,

    /// Maps names onto paths under the (normalized) root
    resolver: PathResolver,

    /// One mutex per collection
    locks: LockRegistry,

    /// Diagnostic sink
    logger: Arc<dyn Logger>,
}

impl Engine {
    /// Open or create an engine with the given config
    ///
    /// An existing root directory is attached as-is; a missing one is created
    /// along with its parents. Any failure is returned and no engine is built.
    pub fn open(config: Config) -> Result<Self> {
        if config.data_dir.as_os_str().is_empty() {
            return Err(AtlasError::Config("data directory must not be empty".to_string()));
        }

        let logger = config
            .logger
            .clone()
            .unwrap_or_else(|| Arc::new(TracingLogger::default()));
        let resolver = PathResolver::new(&config.data_dir);
        let root = resolver.root();

        match fs::metadata(root) {
            Ok(meta) if meta.is_dir() => {
                logger.debug(format_args!(
                    "Using '{}' (database already exists)",
                    root.display()
                ));
            }
            Ok(_) => {
                return Err(AtlasError::Config(format!(
                    "'{}' exists and is not a directory",
                    root.display()
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                logger.debug(format_args!("Creating the database at '{}'...", root.display()));
                create_dir_all(root)?;
            }
            Err(e) => return Err(AtlasError::Io(e)),
        }

        Ok(Self {
            config,
            resolver,
            locks: LockRegistry::new(),
            logger,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data directory
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::builder().data_dir(path).build())
    }

    /// Create or replace a record
    ///
    /// Steps:
    /// 1. Encode the value (fails before touching disk)
    /// 2. Acquire the collection lock
    /// 3. Ensure the collection directory exists
    /// 4. Write the bytes to `<resource>.json.tmp`
    /// 5. Rename the staging file over `<resource>.json`
    pub fn write<T: Serialize + ?Sized>(
        &self,
        collection: &str,
        resource: &str,
        value: &T,
    ) -> Result<()> {
        require("collection", collection)?;
        require("resource", resource)?;

        let bytes = RecordCodec::encode(value)?;

        let lock = self.locks.lock_for(collection);
        let _guard = lock.lock();

        create_dir_all(&self.resolver.collection_dir(collection))?;

        let (final_path, temp_path) = self.resolver.record_paths(collection, resource);

        if let Err(e) = self.stage(&temp_path, &bytes) {
            // The staging file is garbage now; the committed record is untouched.
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        if let Err(e) = fs::rename(&temp_path, &final_path) {
            let _ = fs::remove_file(&temp_path);
            return Err(AtlasError::Io(e));
        }

        self.logger.info(format_args!(
            "Successfully wrote data to '{}'",
            final_path.display()
        ));
        Ok(())
    }

    /// Read a record into a value of type `T`
    ///
    /// Takes no lock.
    pub fn read<T: DeserializeOwned>(&self, collection: &str, resource: &str) -> Result<T> {
        require("collection", collection)?;
        require("resource", resource)?;

        let path = self.resolver.record_path(collection, resource);
        let bytes = fs::read(&path).map_err(|e| AtlasError::from_io(&path, e))?;

        RecordCodec::decode(&bytes, &path)
    }

    /// Read every record of a collection, ordered by resource name
    ///
    /// Subdirectories and non-record files (including in-flight `.tmp`
    /// files) are skipped. The first record that fails to decode aborts the
    /// scan, as does any record that cannot be read (a record removed after
    /// listing surfaces as `NotFound`).
    pub fn read_all<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>> {
        let entries = self.record_entries(collection)?;
        let mut records = Vec::with_capacity(entries.len());

        for (_, path) in entries {
            let bytes = fs::read(&path).map_err(|e| AtlasError::from_io(&path, e))?;
            records.push(RecordCodec::decode(&bytes, &path)?);
        }

        Ok(records)
    }

    /// Resource names present in a collection, sorted
    pub fn list(&self, collection: &str) -> Result<Vec<String>> {
        Ok(self
            .record_entries(collection)?
            .into_iter()
            .map(|(name, _)| name)
            .collect())
    }

    /// Delete by name
    ///
    /// An empty `resource` removes the whole collection; otherwise the single
    /// record is removed. Prefer `delete_record`/`delete_collection`.
    pub fn delete(&self, collection: &str, resource: &str) -> Result<()> {
        if resource.is_empty() {
            self.delete_collection(collection)
        } else {
            self.delete_record(collection, resource)
        }
    }

    /// Remove one record file; siblings are untouched
    pub fn delete_record(&self, collection: &str, resource: &str) -> Result<()> {
        require("collection", collection)?;
        require("resource", resource)?;

        let lock = self.locks.lock_for(collection);
        let _guard = lock.lock();

        let path = self.resolver.record_path(collection, resource);
        fs::remove_file(&path).map_err(|e| AtlasError::from_io(&path, e))?;

        self.logger.debug(format_args!("Deleted '{}'", path.display()));
        Ok(())
    }

    /// Remove a collection directory and everything in it
    pub fn delete_collection(&self, collection: &str) -> Result<()> {
        require("collection", collection)?;

        let lock = self.locks.lock_for(collection);
        let _guard = lock.lock();

        let dir = self.resolver.collection_dir(collection);
        let meta = fs::metadata(&dir).map_err(|e| AtlasError::from_io(&dir, e))?;
        if !meta.is_dir() {
            return Err(AtlasError::NotFound { path: dir });
        }

        fs::remove_dir_all(&dir)?;

        self.logger.debug(format_args!("Deleted collection '{}'", dir.display()));
        Ok(())
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the normalized root directory
    pub fn data_dir(&self) -> &Path {
        self.resolver.root()
    }

    /// Get the path resolver
    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Get the lock registry
    pub fn locks(&self) -> &LockRegistry {
        &self.locks
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Write `bytes` to the staging path (create or truncate)
    fn stage(&self, temp_path: &Path, bytes: &[u8]) -> Result<()> {
        let mut options = OpenOptions::new();
        options.create(true).write(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o644);
        }

        let mut file = options.open(temp_path)?;
        file.write_all(bytes)?;
        if self.config.sync_writes {
            file.sync_all()?;
        }
        Ok(())
    }

    /// Record files of a collection as (resource, path), sorted by name
    fn record_entries(&self, collection: &str) -> Result<Vec<(String, PathBuf)>> {
        require("collection", collection)?;

        let dir = self.resolver.collection_dir(collection);
        let mut entries = Vec::new();

        for entry in fs::read_dir(&dir).map_err(|e| AtlasError::from_io(&dir, e))? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                continue;
            }

            let path = entry.path();
            if let Some(name) = PathResolver::resource_name(&path) {
                entries.push((name, path));
            }
        }

        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(entries)
    }
}

/// Reject an empty name for `field`
fn require(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(AtlasError::InvalidArgument { field });
    }
    Ok(())
}

/// `mkdir -p` with owner rwx, group/other rx
fn create_dir_all(path: &Path) -> Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(path)?;
    Ok(())
}
