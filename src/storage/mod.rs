//! Storage Module
//!
//! Building blocks of the engine's on-disk layer.
//!
//! ## Responsibilities
//! - Map (collection, resource) pairs onto file paths
//! - Hand out one mutual-exclusion lock per collection
//! - Encode records as pretty-printed JSON and decode them back
//!
//! ## On-Disk Layout
//! ```text
//! {root}/
//! ├── users/
//! │   ├── Kamo.json
//! │   ├── Kamzo.json
//! │   └── Kamzo.json.tmp     (only while a write is in flight)
//! └── orders/
//!     └── 1001.json
//! ```

mod codec;
mod locks;
mod paths;

pub use codec::RecordCodec;
pub use locks::{CollectionLock, LockRegistry};
pub use paths::{normalize, PathResolver, RECORD_EXTENSION, TEMP_SUFFIX};
