//! # AtlasDoc
//!
//! A minimal document store that keeps every record as a JSON file:
//! - Named collections map to directories, records to `<name>.json` files
//! - Atomic writes (stage to `.tmp`, then rename) so readers never see
//!   a half-written record
//! - Per-collection locking: writers to one collection are serialized,
//!   different collections proceed in parallel
//! - Schema-agnostic: any `Serialize`/`Deserialize` type can be stored
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Engine                               │
//! │         write / read / read_all / list / delete              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!      ┌────────────────┼─────────────────┐
//!      │                │                 │
//!      ▼                ▼                 ▼
//! ┌──────────┐   ┌──────────────┐   ┌───────────┐
//! │  Path    │   │ LockRegistry │   │  Record   │
//! │ Resolver │   │ (per-coll.)  │   │  Codec    │
//! └────┬─────┘   └──────────────┘   └─────┬─────┘
//!      │                                  │
//!      └───────────────┬──────────────────┘
//!                      ▼
//!            {root}/{collection}/{resource}.json
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use atlasdoc::Engine;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct User {
//!     name: String,
//!     age: u32,
//! }
//!
//! let db = Engine::open_path("./users_db".as_ref()).unwrap();
//! db.write("users", "Kamo", &User { name: "Kamo".into(), age: 23 }).unwrap();
//! let user: User = db.read("users", "Kamo").unwrap();
//! assert_eq!(user.age, 23);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;
pub mod logger;

pub mod storage;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{AtlasError, Result};
pub use config::Config;
pub use engine::Engine;
pub use logger::{Logger, SilentLogger, TracingLogger};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of AtlasDoc
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
