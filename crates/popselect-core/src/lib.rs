//! Core systems for popselect.
//!
//! This crate provides the framework plumbing the chooser widget is built on:
//!
//! - **Signal/Slot System**: Type-safe change notification
//! - **Geometry**: Points, sizes and rectangles in logical pixels
//! - **Keyboard Input**: The small [`Key`] vocabulary the chooser reacts to
//! - **Logging**: `tracing` targets, span names and helper macros
//!
//! # Signal/Slot Example
//!
//! ```
//! use popselect_core::Signal;
//!
//! let selection_changed = Signal::<Vec<String>>::new();
//!
//! let conn_id = selection_changed.connect(|values| {
//!     println!("Selection is now: {:?}", values);
//! });
//!
//! selection_changed.emit(vec!["red".to_string(), "blue".to_string()]);
//! selection_changed.disconnect(conn_id);
//! ```

mod event;
pub mod geometry;
pub mod logging;
pub mod signal;

pub use event::Key;
pub use geometry::{Point, Rect, Size};
pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
