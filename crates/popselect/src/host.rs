//! The host control boundary.
//!
//! A chooser never owns the selection control it replaces. The host page
//! owns it; the chooser reads its choices once at construction, reads and
//! writes its selection afterward, and asks it to fire its own change
//! notification whenever the user picks something.
//!
//! [`HostControl`] is the trait a UI layer implements over its native
//! control. [`MemoryHost`] is a complete in-memory implementation, useful for
//! headless use and tests.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use popselect::host::{Choice, HostControl, MemoryHost};
//!
//! let host = Arc::new(Mutex::new(MemoryHost::new(
//!     "colors",
//!     vec![Choice::new("r", "Red"), Choice::new("g", "Green").selected()],
//! )));
//!
//! host.lock().changed.connect(|values| {
//!     println!("host now holds {:?}", values);
//! });
//!
//! assert_eq!(host.lock().selected_values(), vec!["g".to_string()]);
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use popselect_core::{Rect, Signal};

/// One entry in a host control's ordered choice list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// The value written back to the host when this choice is picked.
    pub value: String,
    /// The human-readable text shown in the label and panel.
    pub text: String,
    /// Whether the choice is currently selected.
    pub selected: bool,
}

impl Choice {
    /// Create an unselected choice.
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            selected: false,
        }
    }

    /// Mark the choice as selected (builder pattern).
    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }
}

/// How the host control is positioned on its page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Positioning {
    /// Laid out in normal flow.
    #[default]
    Static,
    /// Laid out in normal flow, offset relative to itself.
    Relative,
    /// Taken out of flow and placed relative to its container.
    Absolute,
    /// Taken out of flow and placed relative to the viewport.
    Fixed,
}

impl Positioning {
    /// The positioning a stand-in label should use for a host positioned like this.
    ///
    /// Absolutely positioned hosts get an absolutely positioned label; every
    /// other host gets a relatively positioned one so it stays in flow.
    pub fn for_label(self) -> Self {
        match self {
            Self::Absolute => Self::Absolute,
            _ => Self::Relative,
        }
    }
}

/// The host control's on-screen footprint.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HostGeometry {
    /// Outer rectangle (including border and padding).
    pub rect: Rect,
    /// Positioning mode.
    pub positioning: Positioning,
}

impl HostGeometry {
    /// Create a geometry record.
    pub fn new(rect: Rect, positioning: Positioning) -> Self {
        Self { rect, positioning }
    }
}

/// A pre-existing single- or multi-select control.
pub trait HostControl: Send {
    /// A stable identity for the control (a DOM id, a widget name, ...).
    fn id(&self) -> &str;

    /// The ordered choice list with current selection flags.
    fn choices(&self) -> Vec<Choice>;

    /// Whether the control allows several simultaneous selections.
    fn is_multiple(&self) -> bool;

    /// Values of the currently selected choices, in choice order.
    fn selected_values(&self) -> Vec<String> {
        self.choices()
            .into_iter()
            .filter(|choice| choice.selected)
            .map(|choice| choice.value)
            .collect()
    }

    /// Display texts of the currently selected choices, in choice order.
    fn selected_texts(&self) -> Vec<String> {
        self.choices()
            .into_iter()
            .filter(|choice| choice.selected)
            .map(|choice| choice.text)
            .collect()
    }

    /// Replace the selection with the choices carrying the given values.
    ///
    /// Single-select controls select only the first matching choice. Values
    /// that match no choice are ignored.
    fn set_selected_values(&mut self, values: &[String]);

    /// Select exactly the choice at `index`, or nothing for `None`.
    fn select_index(&mut self, index: Option<usize>);

    /// Prepare the control's standard change notification.
    ///
    /// Called with the host locked; the chooser runs the returned
    /// notification only after releasing the lock, so listeners are free to
    /// lock the host and read its new selection.
    fn change_notification(&self) -> ChangeNotification;

    /// The control's current on-screen footprint.
    fn geometry(&self) -> HostGeometry;

    /// Show or hide the control. A hidden control keeps accepting writes.
    fn set_visible(&mut self, visible: bool);

    /// Whether the control is currently shown.
    fn is_visible(&self) -> bool;
}

/// A host control shared between the host page and the chooser registry.
pub type SharedHost = Arc<Mutex<dyn HostControl>>;

/// A change notification to fire once the host lock is released.
pub type ChangeNotification = Box<dyn FnOnce() + Send>;

/// An in-memory host control.
///
/// Emits [`changed`](Self::changed) with the selected values whenever a
/// notification from [`HostControl::change_notification`] runs.
#[derive(Debug)]
pub struct MemoryHost {
    id: String,
    choices: Vec<Choice>,
    multiple: bool,
    geometry: HostGeometry,
    visible: bool,

    /// The control's change notification.
    pub changed: Arc<Signal<Vec<String>>>,
}

impl MemoryHost {
    /// Create a single-select host control.
    pub fn new(id: impl Into<String>, choices: Vec<Choice>) -> Self {
        Self {
            id: id.into(),
            choices,
            multiple: false,
            geometry: HostGeometry::default(),
            visible: true,
            changed: Arc::new(Signal::new()),
        }
    }

    /// Create a multi-select host control.
    pub fn multiple(id: impl Into<String>, choices: Vec<Choice>) -> Self {
        Self {
            multiple: true,
            ..Self::new(id, choices)
        }
    }

    /// Set the geometry using builder pattern.
    pub fn with_geometry(mut self, geometry: HostGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Move or resize the control.
    pub fn set_geometry(&mut self, geometry: HostGeometry) {
        self.geometry = geometry;
    }

    /// Set the selection flag of the choice carrying `value`.
    ///
    /// This is an out-of-band write: no change notification is fired. For a
    /// single-select control, selecting one choice deselects the others.
    /// Returns `false` if no choice carries the value.
    pub fn set_selected(&mut self, value: &str, selected: bool) -> bool {
        let Some(index) = self.choices.iter().position(|c| c.value == value) else {
            return false;
        };
        if selected && !self.multiple {
            for choice in &mut self.choices {
                choice.selected = false;
            }
        }
        self.choices[index].selected = selected;
        true
    }
}

impl HostControl for MemoryHost {
    fn id(&self) -> &str {
        &self.id
    }

    fn choices(&self) -> Vec<Choice> {
        self.choices.clone()
    }

    fn is_multiple(&self) -> bool {
        self.multiple
    }

    fn set_selected_values(&mut self, values: &[String]) {
        if self.multiple {
            for choice in &mut self.choices {
                choice.selected = values.contains(&choice.value);
            }
            return;
        }

        let target = self
            .choices
            .iter()
            .position(|c| values.contains(&c.value));
        for (i, choice) in self.choices.iter_mut().enumerate() {
            choice.selected = Some(i) == target;
        }
    }

    fn select_index(&mut self, index: Option<usize>) {
        for (i, choice) in self.choices.iter_mut().enumerate() {
            choice.selected = Some(i) == index;
        }
    }

    fn change_notification(&self) -> ChangeNotification {
        let changed = self.changed.clone();
        let values = self.selected_values();
        Box::new(move || changed.emit(values))
    }

    fn geometry(&self) -> HostGeometry {
        self.geometry
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}
