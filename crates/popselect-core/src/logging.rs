//! Logging facilities for popselect.
//!
//! popselect uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Every module logs under one of the [`targets`], so a directive such as
//! `popselect::controller=debug` narrows output to the interaction state
//! machine.

/// Span names used throughout popselect for tracing.
pub mod span_names {
    /// Signal emission span.
    pub const SIGNAL: &str = "popselect::signal";
    /// Chooser construction span.
    pub const INIT: &str = "popselect::init";
    /// Resynchronization span.
    pub const UPDATE: &str = "popselect::update";
}

/// Target names for log filtering.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "popselect_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "popselect_core::signal";
    /// Option resolution target.
    pub const CONFIG: &str = "popselect::config";
    /// Label and panel construction target.
    pub const BUILDER: &str = "popselect::builder";
    /// Interaction state machine target.
    pub const CONTROLLER: &str = "popselect::controller";
    /// Widget registry and command surface target.
    pub const REGISTRY: &str = "popselect::registry";
    /// Keyboard dispatcher target.
    pub const DISPATCHER: &str = "popselect::dispatcher";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "popselect::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Trace-level event under the core target.
#[macro_export]
macro_rules! chooser_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "popselect_core", $($arg)*)
    };
}
