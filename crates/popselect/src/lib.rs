//! popselect - pop-up choosers that stand in for native select controls.
//!
//! A chooser hides an existing single- or multi-select control (the *host*)
//! behind a compact label. Clicking the label opens a floating panel of the
//! host's choices, optionally laid out as a grid; picking from the panel
//! writes the selection straight back to the host and fires the host's own
//! change notification, so surrounding code keeps working unchanged.
//!
//! The crate is headless. A UI layer implements [`HostControl`] over its
//! native control, feeds pointer and key input into a [`ChooserRegistry`] as
//! [`InputEvent`]s, and paints the [`Label`] and [`Panel`] it reads back.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use popselect::prelude::*;
//!
//! fn main() -> popselect::Result<()> {
//!     let host = Arc::new(Mutex::new(MemoryHost::multiple(
//!         "toppings",
//!         vec![
//!             Choice::new("ham", "Ham"),
//!             Choice::new("olive", "Olives"),
//!             Choice::new("basil", "Basil"),
//!         ],
//!     )));
//!
//!     let options = ChooserOptions::from_json(r#"{ "maxDisplay": 1, "disallowEmpty": true }"#)?;
//!     let mut registry = ChooserRegistry::new();
//!     let id = registry.init(host.clone(), &options)?;
//!
//!     // Nothing was selected, so the first choice was picked for us.
//!     assert_eq!(registry.get(id).unwrap().label().text(), "Ham");
//!
//!     registry.dispatch(InputEvent::chooser(id, ChooserInput::LabelClick))?;
//!     registry.dispatch(InputEvent::chooser(id, ChooserInput::PanelClick(PanelTarget::Item(2))))?;
//!     assert_eq!(registry.get(id).unwrap().label().text(), "Ham, ...");
//!
//!     registry.dispatch(InputEvent::KeyUp(Key::Escape))?;
//!     assert!(!registry.get(id).unwrap().is_open());
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod config;
pub mod controller;
pub mod dispatcher;
pub mod error;
pub mod host;
pub mod layout;
pub mod panel;
pub mod prelude;
pub mod registry;
pub mod sync;
pub mod transition;

pub use config::{ChooserOptions, Configuration, Effect, Speed};
pub use controller::{Chooser, ChooserInput, ChooserState};
pub use error::{ConfigError, Error, Result, StateError};
pub use host::{Choice, HostControl, MemoryHost, SharedHost};
pub use panel::{Item, Label, Panel, PanelTarget};
pub use registry::{ChooserId, ChooserRegistry, InputEvent};
pub use popselect_core::{Key, Point, Rect, Signal, Size};
