//! Lock Registry
//!
//! One mutex per collection, created on first use and kept for the lifetime
//! of the registry.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

use super::paths::normalize;

/// Mutual-exclusion lock guarding one collection's files
pub type CollectionLock = Arc<Mutex<()>>;

/// Maps collection names to their locks
///
/// ## Concurrency:
/// - `locks`: the outer mutex is held only for the lookup-or-insert, never
///   across I/O
/// - Returned locks are acquired by the caller, so writers to different
///   collections never contend
#[derive(Debug, Default)]
pub struct LockRegistry {
    locks: Mutex<HashMap<String, CollectionLock>>,
}

impl LockRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the lock for `collection`, creating it if absent
    ///
    /// Lookup and insert happen under one critical section, so two threads
    /// racing on a new collection always receive the same lock. Names that
    /// resolve to the same directory ("users", "users/", "./users") share one
    /// lock.
    pub fn lock_for(&self, collection: &str) -> CollectionLock {
        let key = Self::key(collection);
        let mut locks = self.locks.lock();

        if let Some(lock) = locks.get(&key) {
            return Arc::clone(lock);
        }

        let lock = Arc::new(Mutex::new(()));
        locks.insert(key, Arc::clone(&lock));
        lock
    }

    /// Number of collections with a registered lock
    pub fn collection_count(&self) -> usize {
        self.locks.lock().len()
    }

    /// Whether `collection` has a registered lock
    pub fn contains(&self, collection: &str) -> bool {
        self.locks.lock().contains_key(&Self::key(collection))
    }

    /// Registry key: the lexically normalized collection path
    fn key(collection: &str) -> String {
        normalize(Path::new(collection)).to_string_lossy().into_owned()
    }
}
