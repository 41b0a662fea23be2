//! The shared Escape listener.
//!
//! One dispatcher serves every chooser in a registry. It is installed the
//! first time a chooser is created and stays installed; further installs are
//! no-ops. It keeps the set of open choosers so that an Escape key release can
//! close all of them at once.

use std::collections::BTreeSet;

use popselect_core::Key;
use popselect_core::logging::targets;

use crate::registry::ChooserId;

/// Tracks open choosers and closes them all on Escape.
#[derive(Debug, Default)]
pub struct EscapeDispatcher {
    installed: bool,
    open: BTreeSet<ChooserId>,
}

impl EscapeDispatcher {
    /// Create an uninstalled dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the listener. Returns `true` only for the first call.
    pub fn install(&mut self) -> bool {
        if self.installed {
            return false;
        }
        self.installed = true;
        tracing::debug!(target: targets::DISPATCHER, "escape listener installed");
        true
    }

    /// Whether the listener is installed.
    pub fn is_installed(&self) -> bool {
        self.installed
    }

    /// Record whether the chooser `id` is open.
    pub fn track(&mut self, id: ChooserId, open: bool) {
        if open {
            self.open.insert(id);
        } else {
            self.open.remove(&id);
        }
    }

    /// Stop tracking a removed chooser.
    pub fn forget(&mut self, id: ChooserId) {
        self.open.remove(&id);
    }

    /// Ids of the choosers currently open.
    pub fn open_ids(&self) -> impl Iterator<Item = ChooserId> + '_ {
        self.open.iter().copied()
    }

    /// React to a key release.
    ///
    /// Returns the choosers to hide: every open one for Escape, none for any
    /// other key or while uninstalled.
    pub fn key_up(&mut self, key: Key) -> Vec<ChooserId> {
        if !self.installed || !key.is_escape() {
            popselect_core::chooser_trace!(?key, "key ignored");
            return Vec::new();
        }
        let ids: Vec<ChooserId> = std::mem::take(&mut self.open).into_iter().collect();
        tracing::debug!(target: targets::DISPATCHER, count = ids.len(), "escape closes open choosers");
        ids
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    fn ids(n: usize) -> Vec<ChooserId> {
        let mut map: SlotMap<ChooserId, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    #[test]
    fn test_install_is_idempotent() {
        let mut dispatcher = EscapeDispatcher::new();
        assert!(!dispatcher.is_installed());
        assert!(dispatcher.install());
        assert!(!dispatcher.install());
        assert!(dispatcher.is_installed());
    }

    #[test]
    fn test_escape_closes_all_open() {
        let ids = ids(3);
        let mut dispatcher = EscapeDispatcher::new();
        dispatcher.install();
        dispatcher.track(ids[0], true);
        dispatcher.track(ids[2], true);

        let mut closed = dispatcher.key_up(Key::Escape);
        closed.sort();
        let mut expected = vec![ids[0], ids[2]];
        expected.sort();
        assert_eq!(closed, expected);
        assert_eq!(dispatcher.open_ids().count(), 0);
    }

    #[test]
    fn test_other_keys_ignored() {
        let ids = ids(1);
        let mut dispatcher = EscapeDispatcher::new();
        dispatcher.install();
        dispatcher.track(ids[0], true);
        assert!(dispatcher.key_up(Key::Enter).is_empty());
        assert!(dispatcher.key_up(Key::Char('x')).is_empty());
        assert_eq!(dispatcher.open_ids().collect::<Vec<_>>(), ids);
    }

    #[test]
    fn test_uninstalled_ignores_escape() {
        let ids = ids(1);
        let mut dispatcher = EscapeDispatcher::new();
        dispatcher.track(ids[0], true);
        assert!(dispatcher.key_up(Key::Escape).is_empty());
    }

    #[test]
    fn test_track_and_forget() {
        let ids = ids(2);
        let mut dispatcher = EscapeDispatcher::new();
        dispatcher.track(ids[0], true);
        dispatcher.track(ids[1], true);
        dispatcher.track(ids[0], false);
        dispatcher.forget(ids[1]);
        assert_eq!(dispatcher.open_ids().count(), 0);
    }
}
