//! Logging facilities for Gridscape.
//!
//! Gridscape uses the `tracing` crate for instrumentation and never installs a
//! subscriber itself. To see logs, install one in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("gridscape=debug")
//!         .init();
//! }
//! ```

/// Span names used throughout Gridscape for tracing.
///
/// These constants can be used to filter traces for specific subsystems.
pub mod span_names {
    /// Per-frame manager update span.
    pub const MANAGER_UPDATE: &str = "gridscape::manager::update";
    /// Full viewport re-evaluation span.
    pub const FULL_EVALUATION: &str = "gridscape::manager::full_evaluation";
    /// Host attach span.
    pub const ATTACH: &str = "gridscape::manager::attach";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "gridscape_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "gridscape_core::signal";
    /// Entity lifecycle and appearance target.
    pub const ENTITY: &str = "gridscape::entity";
    /// Visibility manager target.
    pub const MANAGER: &str = "gridscape::manager";
    /// Render step target.
    pub const RENDER_STEP: &str = "gridscape::render_step";
}

/// A guard that keeps a tracing span entered until it is dropped.
///
/// This is useful for tracking the duration of operations. Spans are
/// recorded under the `gridscape::perf` target.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "gridscape::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Macros for common tracing patterns.
///
/// These are thin wrappers around the `tracing` macros with the core target.
#[macro_export]
macro_rules! gridscape_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "gridscape_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! gridscape_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "gridscape_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! gridscape_info {
    ($($arg:tt)*) => {
        tracing::info!(target: "gridscape_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! gridscape_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "gridscape_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! gridscape_error {
    ($($arg:tt)*) => {
        tracing::error!(target: "gridscape_core", $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span() {
        // Just ensure it compiles and doesn't panic without a subscriber
        let _span = PerfSpan::new("test_operation");
        gridscape_debug!(value = 1, "inside perf span");
    }

    #[test]
    fn test_perf_span_target() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let perf = PerfSpan::new("test_operation");
            let metadata = perf.span.metadata().expect("span enabled");
            assert_eq!(metadata.target(), "gridscape::perf");
            assert_eq!(metadata.level(), &tracing::Level::INFO);
        });
    }

    #[test]
    fn test_targets_are_namespaced() {
        for target in [targets::ENTITY, targets::MANAGER, targets::RENDER_STEP] {
            assert!(target.starts_with("gridscape::"));
        }
        assert!(targets::SIGNAL.starts_with(targets::CORE));
    }
}
