//! The chooser registry and public command surface.
//!
//! [`ChooserRegistry`] owns every chooser, keyed by a [`ChooserId`] handle,
//! and indexes them by host control id so a host is never initialized twice.
//! It also owns the shared [`EscapeDispatcher`] and routes the global input
//! stream: per-chooser pointer input to one chooser, key releases to the
//! dispatcher.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use popselect::prelude::*;
//!
//! let host = Arc::new(Mutex::new(MemoryHost::new(
//!     "size",
//!     vec![Choice::new("s", "Small"), Choice::new("l", "Large")],
//! )));
//!
//! let mut registry = ChooserRegistry::new();
//! let id = registry.init(host.clone(), &ChooserOptions::new()).unwrap();
//!
//! registry.dispatch(InputEvent::chooser(id, ChooserInput::LabelClick)).unwrap();
//! registry.dispatch(InputEvent::chooser(id, ChooserInput::PanelClick(PanelTarget::Item(1)))).unwrap();
//!
//! assert_eq!(registry.get(id).unwrap().label().text(), "Large");
//! assert_eq!(host.lock().selected_values(), vec!["l".to_string()]);
//! ```

use std::collections::HashMap;

use popselect_core::logging::{span_names, targets};
use popselect_core::{Key, PerfSpan};
use slotmap::{SlotMap, new_key_type};

use crate::config::ChooserOptions;
use crate::controller::{Chooser, ChooserInput};
use crate::dispatcher::EscapeDispatcher;
use crate::error::{Result, StateError};
use crate::host::SharedHost;

new_key_type! {
    /// A unique identifier for a chooser in a [`ChooserRegistry`].
    pub struct ChooserId;
}

/// An event from the UI layer's input stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Pointer input aimed at one chooser.
    Chooser {
        /// The chooser the input is for.
        id: ChooserId,
        /// The input.
        input: ChooserInput,
    },
    /// A key was released anywhere.
    KeyUp(Key),
}

impl InputEvent {
    /// Pointer input for the chooser `id`.
    pub fn chooser(id: ChooserId, input: ChooserInput) -> Self {
        Self::Chooser { id, input }
    }
}

/// Owns every chooser and routes input to them.
#[derive(Debug, Default)]
pub struct ChooserRegistry {
    choosers: SlotMap<ChooserId, Chooser>,
    by_host: HashMap<String, ChooserId>,
    dispatcher: EscapeDispatcher,
}

impl ChooserRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Build a chooser for `host`.
    ///
    /// # Errors
    ///
    /// Fails with a configuration error if `options` are invalid for the
    /// host, and with [`StateError::AlreadyInitialized`] if the host already
    /// has a chooser. Nothing is built in either case.
    pub fn init(&mut self, host: SharedHost, options: &ChooserOptions) -> Result<ChooserId> {
        let _span = PerfSpan::new(span_names::INIT);

        let host_id = host.lock().id().to_string();
        if self.by_host.contains_key(&host_id) {
            return Err(StateError::AlreadyInitialized { host: host_id }.into());
        }

        let chooser = Chooser::new(host, options).inspect_err(|error| {
            tracing::warn!(target: targets::REGISTRY, host = %host_id, %error, "chooser init failed");
        })?;

        self.dispatcher.install();
        let id = self.choosers.insert(chooser);
        self.by_host.insert(host_id.clone(), id);
        tracing::info!(target: targets::REGISTRY, host = %host_id, ?id, "chooser initialized");
        Ok(id)
    }

    /// Resynchronize a chooser with its host's current selection.
    pub fn update(&mut self, id: ChooserId) -> Result<()> {
        let _span = PerfSpan::new(span_names::UPDATE);
        self.chooser_mut(id)?.update();
        Ok(())
    }

    /// Deselect everything on a chooser's host and resynchronize.
    ///
    /// # Errors
    ///
    /// Fails with [`StateError::ClearDisallowed`] if the chooser was built
    /// with `disallowEmpty`.
    pub fn clear(&mut self, id: ChooserId) -> Result<()> {
        self.chooser_mut(id)?.clear()?;
        Ok(())
    }

    /// Route one input event.
    ///
    /// # Errors
    ///
    /// Fails with [`StateError::UnknownChooser`] for pointer input aimed at a
    /// chooser that does not exist.
    pub fn dispatch(&mut self, event: InputEvent) -> Result<()> {
        match event {
            InputEvent::Chooser { id, input } => {
                let chooser = self.chooser_mut(id)?;
                chooser.handle(input);
                let open = chooser.is_open();
                self.dispatcher.track(id, open);
            }
            InputEvent::KeyUp(key) => {
                for id in self.dispatcher.key_up(key) {
                    if let Some(chooser) = self.choosers.get_mut(id) {
                        chooser.hide_immediately();
                    }
                }
            }
        }
        Ok(())
    }

    /// Remove a chooser and show its host control again.
    pub fn remove(&mut self, id: ChooserId) -> Option<Chooser> {
        let chooser = self.choosers.remove(id)?;
        self.by_host.remove(chooser.host_id());
        self.dispatcher.forget(id);
        chooser.restore_host();
        tracing::info!(target: targets::REGISTRY, host = chooser.host_id(), ?id, "chooser removed");
        Some(chooser)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Get a chooser by id.
    pub fn get(&self, id: ChooserId) -> Option<&Chooser> {
        self.choosers.get(id)
    }

    /// Get a chooser by id, mutably.
    ///
    /// Opening or closing it directly bypasses Escape tracking; prefer
    /// [`dispatch`](Self::dispatch) for input.
    pub fn get_mut(&mut self, id: ChooserId) -> Option<&mut Chooser> {
        self.choosers.get_mut(id)
    }

    /// Find the chooser standing in for the host control `host_id`.
    pub fn find_by_host(&self, host_id: &str) -> Option<ChooserId> {
        self.by_host.get(host_id).copied()
    }

    /// Number of choosers.
    pub fn len(&self) -> usize {
        self.choosers.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.choosers.is_empty()
    }

    /// Ids of all choosers.
    pub fn ids(&self) -> impl Iterator<Item = ChooserId> + '_ {
        self.choosers.keys()
    }

    /// Ids of the choosers whose panel is open.
    pub fn open_ids(&self) -> impl Iterator<Item = ChooserId> + '_ {
        self.dispatcher.open_ids()
    }

    /// Whether the shared Escape listener has been installed.
    pub fn escape_listener_installed(&self) -> bool {
        self.dispatcher.is_installed()
    }

    fn chooser_mut(&mut self, id: ChooserId) -> Result<&mut Chooser> {
        self.choosers
            .get_mut(id)
            .ok_or_else(|| StateError::UnknownChooser(id).into())
    }
}
