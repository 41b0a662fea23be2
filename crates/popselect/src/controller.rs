//! The chooser and its interaction state machine.
//!
//! A [`Chooser`] is either [`Closed`](ChooserState::Closed) or
//! [`Open`](ChooserState::Open). Pointer input arrives as [`ChooserInput`]
//! values that the UI layer translates from its native events:
//!
//! ```text
//!            LabelClick
//!   Closed ─────────────────────────────▶ Open
//!     ▲                                     │
//!     │  PanelClick (single-select)         │  animated close
//!     │  PanelLeave (hide on mouse out)     │  immediate hide
//!     │  Escape (any open chooser)          │  immediate hide
//!     └─────────────────────────────────────┘
//! ```
//!
//! Item clicks also change the selection, independently of whether the click
//! closes the panel. Every selection change is written through to the host
//! control, which then fires its own change notification.

use popselect_core::logging::targets;
use popselect_core::{Point, Signal};

use crate::builder::{self, Presentation};
use crate::config::{ChooserOptions, Configuration};
use crate::error::{ConfigError, StateError};
use crate::host::SharedHost;
use crate::layout::GridLayout;
use crate::panel::{Label, Panel, PanelTarget};
use crate::sync;
use crate::transition::{Transition, TransitionDirection, TransitionRequest};

/// Whether the panel is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChooserState {
    /// The panel is hidden.
    #[default]
    Closed,
    /// The panel is shown below the label.
    Open,
}

/// Pointer input for one chooser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChooserInput {
    /// The pointer entered the label.
    LabelEnter,
    /// The pointer left the label.
    LabelLeave,
    /// The label was clicked.
    LabelClick,
    /// Something inside the panel was clicked.
    PanelClick(PanelTarget),
    /// The pointer left the panel.
    PanelLeave,
}

/// A pop-up chooser bound to one host control.
pub struct Chooser {
    host: SharedHost,
    host_id: String,
    multiple: bool,
    config: Configuration,
    label: Label,
    panel: Panel,
    layout: Option<GridLayout>,
    state: ChooserState,

    // Signals
    /// Emitted with the host's selected values after a click changes them.
    pub selection_changed: Signal<Vec<String>>,
    /// Emitted when the panel opens.
    pub opened: Signal<()>,
    /// Emitted when the panel closes, animated or not.
    pub closed: Signal<()>,
    /// Emitted whenever the panel starts a visibility transition.
    pub transition_started: Signal<TransitionRequest>,
    /// Emitted when the label text changes.
    pub label_text_changed: Signal<String>,
}

impl Chooser {
    /// Resolve `options` against `host` and build a chooser for it.
    ///
    /// Nothing is built and the host is left untouched when the options are
    /// invalid.
    pub fn new(host: SharedHost, options: &ChooserOptions) -> Result<Self, ConfigError> {
        let (config, presentation, host_id, multiple) = {
            let mut control = host.lock();
            let config = Configuration::resolve(&*control, options)?;
            let presentation = builder::build(&mut *control, &config);
            (config, presentation, control.id().to_string(), control.is_multiple())
        };
        let Presentation {
            label,
            panel,
            layout,
        } = presentation;

        Ok(Self {
            host,
            host_id,
            multiple,
            config,
            label,
            panel,
            layout,
            state: ChooserState::Closed,
            selection_changed: Signal::new(),
            opened: Signal::new(),
            closed: Signal::new(),
            transition_started: Signal::new(),
            label_text_changed: Signal::new(),
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The host control this chooser stands in for.
    pub fn host(&self) -> &SharedHost {
        &self.host
    }

    /// The host control's id.
    pub fn host_id(&self) -> &str {
        &self.host_id
    }

    /// Whether the host is multi-select.
    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    /// The resolved configuration.
    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// The stand-in label.
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// The choice panel.
    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    /// The grid shape, if the panel is a grid.
    pub fn layout(&self) -> Option<&GridLayout> {
        self.layout.as_ref()
    }

    /// The current state.
    pub fn state(&self) -> ChooserState {
        self.state
    }

    /// Whether the panel is open.
    pub fn is_open(&self) -> bool {
        self.state == ChooserState::Open
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Feed one pointer input through the state machine.
    pub fn handle(&mut self, input: ChooserInput) {
        tracing::trace!(target: targets::CONTROLLER, host = %self.host_id, ?input, state = ?self.state, "input");
        match input {
            ChooserInput::LabelEnter => self.label.set_highlighted(true),
            ChooserInput::LabelLeave => self.label.set_highlighted(false),
            ChooserInput::LabelClick => self.open(),
            ChooserInput::PanelClick(target) => self.panel_click(target),
            ChooserInput::PanelLeave => {
                if self.config.hide_on_mouse_out {
                    self.hide_immediately();
                }
            }
        }
    }

    /// Hit test a panel-local point and feed the click through the state
    /// machine. Returns what was hit, or `None` for points outside the panel.
    pub fn click_panel_at(&mut self, local: Point) -> Option<PanelTarget> {
        let target = self.panel.hit_test(local)?;
        self.handle(ChooserInput::PanelClick(target));
        Some(target)
    }

    fn panel_click(&mut self, target: PanelTarget) {
        if let PanelTarget::Item(visual) = target {
            self.select_item(visual);
        }
        if !self.multiple {
            self.close_animated();
        }
    }

    fn select_item(&mut self, visual: usize) {
        let Some((value, text, selected)) = self
            .panel
            .item(visual)
            .filter(|item| !item.is_padding())
            .and_then(|item| Some((item.value.clone()?, item.text.clone(), item.selected)))
        else {
            return;
        };

        let values = if self.multiple {
            let mut host = self.host.lock();
            if self.config.disallow_empty && selected && host.selected_values().len() == 1 {
                tracing::debug!(
                    target: targets::CONTROLLER,
                    host = %self.host_id,
                    %value,
                    "ignoring click on the sole selected choice"
                );
                return;
            }

            if let Some(item) = self.panel.item_mut(visual) {
                item.selected = !selected;
            }
            let values = self.panel.selected_values();
            host.set_selected_values(&values);
            let notification = host.change_notification();
            drop(host);
            notification();

            self.set_label_text(sync::summarize(&self.panel.selected_texts(), &self.config));
            sync::mark_sole_selection(&mut self.panel, true, &self.config);
            values
        } else {
            for (index, item) in self.panel.items_mut().enumerate() {
                item.selected = index == visual;
            }
            self.set_label_text(text);

            let values = vec![value];
            let notification = {
                let mut host = self.host.lock();
                host.set_selected_values(&values);
                host.change_notification()
            };
            notification();
            values
        };

        tracing::debug!(target: targets::CONTROLLER, host = %self.host_id, ?values, "selection changed");
        self.selection_changed.emit(values);
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// Show the panel below the label with the open effect.
    ///
    /// Does nothing if the panel is already open.
    pub fn open(&mut self) {
        if self.is_open() {
            return;
        }
        let transition = Transition::animated(
            self.config.open_effect,
            TransitionDirection::Show,
            self.config.open_speed.duration(),
        );
        let request = transition.request();
        self.panel.show_at(self.label.panel_anchor(), transition);
        self.state = ChooserState::Open;

        tracing::debug!(target: targets::CONTROLLER, host = %self.host_id, effect = ?request.effect, "opened");
        self.transition_started.emit(request);
        self.opened.emit(());
    }

    /// Hide the panel with the close effect.
    pub fn close_animated(&mut self) {
        let transition = Transition::animated(
            self.config.close_effect,
            TransitionDirection::Hide,
            self.config.close_speed.duration(),
        );
        self.close_with(transition);
    }

    /// Hide the panel without animating.
    pub fn hide_immediately(&mut self) {
        self.close_with(Transition::immediate(TransitionDirection::Hide));
    }

    fn close_with(&mut self, transition: Transition) {
        if !self.is_open() {
            return;
        }
        let request = transition.request();
        self.panel.hide(transition);
        self.state = ChooserState::Closed;

        tracing::debug!(target: targets::CONTROLLER, host = %self.host_id, immediate = request.is_immediate(), "closed");
        self.transition_started.emit(request);
        self.closed.emit(());
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Re-read the host's selection into the panel and label.
    ///
    /// Call after the host's selection was changed by anything other than
    /// this chooser.
    pub fn update(&mut self) {
        let (values, texts) = {
            let host = self.host.lock();
            (host.selected_values(), host.selected_texts())
        };
        self.panel.select_values(&values);
        self.set_label_text(sync::summarize(&texts, &self.config));
        sync::mark_sole_selection(&mut self.panel, self.multiple, &self.config);
    }

    /// Deselect everything on the host, then [`update`](Self::update).
    ///
    /// No change notification is fired.
    pub fn clear(&mut self) -> Result<(), StateError> {
        if self.config.disallow_empty {
            return Err(StateError::ClearDisallowed);
        }
        self.host.lock().select_index(None);
        self.update();
        Ok(())
    }

    /// Show the host control again. Used when the chooser is removed.
    pub(crate) fn restore_host(&self) {
        self.host.lock().set_visible(true);
    }

    fn set_label_text(&mut self, text: String) {
        if self.label.set_text(text) {
            self.label_text_changed.emit(self.label.text().to_string());
        }
    }
}

impl std::fmt::Debug for Chooser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chooser")
            .field("host_id", &self.host_id)
            .field("multiple", &self.multiple)
            .field("state", &self.state)
            .field("label", &self.label.text())
            .finish_non_exhaustive()
    }
}
