//! Prelude module for popselect.
//!
//! ```ignore
//! use popselect::prelude::*;
//! ```
//!
//! This provides access to:
//! - The registry and its input stream (`ChooserRegistry`, `InputEvent`)
//! - Chooser input and state (`ChooserInput`, `ChooserState`, `PanelTarget`)
//! - Host controls (`HostControl`, `MemoryHost`, `Choice`)
//! - Options (`ChooserOptions`, `Effect`, `Speed`)

// ============================================================================
// Registry
// ============================================================================

pub use crate::registry::{ChooserId, ChooserRegistry, InputEvent};

// ============================================================================
// Chooser
// ============================================================================

pub use crate::controller::{Chooser, ChooserInput, ChooserState};
pub use crate::panel::{Label, Panel, PanelTarget};

// ============================================================================
// Host Controls
// ============================================================================

pub use crate::host::{Choice, HostControl, HostGeometry, MemoryHost, Positioning, SharedHost};

// ============================================================================
// Options and Errors
// ============================================================================

pub use crate::config::{ChooserOptions, Effect, Speed};
pub use crate::error::{ConfigError, Error, StateError};

// ============================================================================
// Core
// ============================================================================

pub use popselect_core::{Key, Point, Rect, Signal, Size};
