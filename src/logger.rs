//! Logging capability
//!
//! The engine reports diagnostics through a [`Logger`] trait object so hosts
//! can route messages wherever they like. The default implementation forwards
//! to `tracing`; install a subscriber (e.g. `tracing_subscriber::fmt`) to see
//! output on the console.

use std::fmt;

use tracing::level_filters::LevelFilter;
use tracing::Level;

/// Leveled message sink used by the engine
///
/// Each method takes pre-formatted arguments; call sites use
/// `format_args!` so nothing is allocated for disabled levels.
pub trait Logger: Send + Sync {
    fn fatal(&self, args: fmt::Arguments<'_>);
    fn error(&self, args: fmt::Arguments<'_>);
    fn warn(&self, args: fmt::Arguments<'_>);
    fn info(&self, args: fmt::Arguments<'_>);
    fn debug(&self, args: fmt::Arguments<'_>);
    fn trace(&self, args: fmt::Arguments<'_>);
}

// =============================================================================
// TracingLogger
// =============================================================================

/// Forwards messages to `tracing` events under the `atlasdoc` target
///
/// Messages more verbose than `max_level` are dropped before they reach the
/// subscriber. The default verbosity is INFO.
#[derive(Debug, Clone, Copy)]
pub struct TracingLogger {
    max_level: LevelFilter,
}

impl TracingLogger {
    /// Create a logger that emits messages up to `max_level`
    pub fn new(max_level: LevelFilter) -> Self {
        Self { max_level }
    }

    /// Current verbosity threshold
    pub fn max_level(&self) -> LevelFilter {
        self.max_level
    }

    /// Whether a message at `level` would be emitted
    pub fn enabled(&self, level: Level) -> bool {
        level <= self.max_level
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new(LevelFilter::INFO)
    }
}

impl Logger for TracingLogger {
    fn fatal(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Level::ERROR) {
            tracing::error!(target: "atlasdoc", fatal = true, "{}", args);
        }
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Level::ERROR) {
            tracing::error!(target: "atlasdoc", "{}", args);
        }
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Level::WARN) {
            tracing::warn!(target: "atlasdoc", "{}", args);
        }
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Level::INFO) {
            tracing::info!(target: "atlasdoc", "{}", args);
        }
    }

    fn debug(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Level::DEBUG) {
            tracing::debug!(target: "atlasdoc", "{}", args);
        }
    }

    fn trace(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Level::TRACE) {
            tracing::trace!(target: "atlasdoc", "{}", args);
        }
    }
}

// =============================================================================
// SilentLogger
// =============================================================================

/// Discards every message
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentLogger;

impl Logger for SilentLogger {
    fn fatal(&self, _args: fmt::Arguments<'_>) {}
    fn error(&self, _args: fmt::Arguments<'_>) {}
    fn warn(&self, _args: fmt::Arguments<'_>) {}
    fn info(&self, _args: fmt::Arguments<'_>) {}
    fn debug(&self, _args: fmt::Arguments<'_>) {}
    fn trace(&self, _args: fmt::Arguments<'_>) {}
}
