//! Path Resolver
//!
//! Pure mapping from collection/resource names to paths under the root.
//! Performs no I/O.

use std::path::{Component, Path, PathBuf};

/// Extension appended to every record file
pub const RECORD_EXTENSION: &str = "json";

/// Suffix of the staging file written before the atomic rename
pub const TEMP_SUFFIX: &str = ".tmp";

/// Resolves collection and record paths relative to a root directory
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    /// Create a resolver for `root` (normalized lexically)
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: normalize(root.as_ref()),
        }
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `root/collection`
    pub fn collection_dir(&self, collection: &str) -> PathBuf {
        self.root.join(collection)
    }

    /// `root/collection/resource.json`
    pub fn record_path(&self, collection: &str, resource: &str) -> PathBuf {
        self.collection_dir(collection)
            .join(format!("{}.{}", resource, RECORD_EXTENSION))
    }

    /// `root/collection/resource.json.tmp`
    pub fn temp_path(&self, collection: &str, resource: &str) -> PathBuf {
        self.record_paths(collection, resource).1
    }

    /// Final and staging paths in one call
    pub fn record_paths(&self, collection: &str, resource: &str) -> (PathBuf, PathBuf) {
        let final_path = self.record_path(collection, resource);
        let mut temp = final_path.clone().into_os_string();
        temp.push(TEMP_SUFFIX);
        (final_path, PathBuf::from(temp))
    }

    /// Resource name of a record file, or `None` for anything else
    ///
    /// "Kamo.json" → Some("Kamo"), "Kamo.json.tmp" → None
    pub fn resource_name(path: &Path) -> Option<String> {
        if path.extension()? != RECORD_EXTENSION {
            return None;
        }
        Some(path.file_stem()?.to_string_lossy().into_owned())
    }
}

/// Lexically clean a path: drop `.` segments and fold `..` into the
/// preceding segment where possible. Symlinks are not resolved.
///
/// An empty result becomes `.`.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}
