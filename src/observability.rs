//! Logging infrastructure for runtime filters.
//!
//! Runtime filters use `tracing` for structured logging. All events use the
//! target [`FILTER_TARGET`] and include an `event` field for filtering.
//!
//! ## Library Integration
//!
//! This crate never initializes a global subscriber. Applications configure
//! tracing via `tracing_subscriber` or similar.
//!
//! ## Conventions
//!
//! - `event`: snake_case event name (required)
//! - `component`: module/subsystem (e.g., "string_filter", "pruning")
//! - Use `%` for Display, `?` for Debug formatting
//! - Filters sit on the scan hot path: only log on state transitions, never per value

/// Target for all runtime filter log events.
pub(crate) const FILTER_TARGET: &str = "tonbo::runtime_filter";

/// Macro for debug-level log events.
///
/// # Example
/// ```ignore
/// log_debug!(
///     component = "string_filter",
///     event = "filter_degraded",
///     reason = "memory_budget",
/// );
/// ```
macro_rules! log_debug {
    ($($field:tt)*) => {
        ::tracing::debug!(target: $crate::observability::FILTER_TARGET, $($field)*)
    };
}

/// Macro for trace-level log events.
macro_rules! log_trace {
    ($($field:tt)*) => {
        ::tracing::trace!(target: $crate::observability::FILTER_TARGET, $($field)*)
    };
}

/// Macro for warn-level log events.
macro_rules! log_warn {
    ($($field:tt)*) => {
        ::tracing::warn!(target: $crate::observability::FILTER_TARGET, $($field)*)
    };
}

pub(crate) use log_debug;
pub(crate) use log_trace;
pub(crate) use log_warn;
