//! Shared navigation mode cell

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::debug;

use super::{FnSubscriber, ModeSubscriber, NavigationMode, RemoteAction, SubscriptionId};
use crate::config::KeyMap;
use crate::events::InputEvent;
use crate::host::TvRuntimeProbe;

type SubscriberTable = IndexMap<SubscriptionId, Arc<dyn ModeSubscriber>>;

/// The single source of truth for the current [`NavigationMode`].
///
/// Cloning yields another handle onto the same cell; every container and
/// element binding holds one, so all of them read the same value within
/// one event turn.
#[derive(Clone)]
pub struct ModeEngine {
    mode: Arc<RwLock<NavigationMode>>,
    subscribers: Arc<RwLock<SubscriberTable>>,
}

impl ModeEngine {
    /// Create a cell starting in `initial`
    pub fn new(initial: NavigationMode) -> Self {
        Self {
            mode: Arc::new(RwLock::new(initial)),
            subscribers: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Pick the initial mode from the host: TV runtimes start remote-driven,
    /// everything else (including an unanswerable probe) starts in pointer mode.
    pub fn detect(probe: &dyn TvRuntimeProbe) -> Self {
        Self::detect_or(probe, false)
    }

    /// Like [`ModeEngine::detect`], with an explicit answer for probes that
    /// cannot tell.
    pub fn detect_or(probe: &dyn TvRuntimeProbe, unknown_is_tv: bool) -> Self {
        let is_tv = probe.is_tv_runtime().unwrap_or(unknown_is_tv);
        let initial = if is_tv {
            NavigationMode::RemoteDPad
        } else {
            NavigationMode::Pointer
        };
        debug!(?initial, is_tv, "navigation mode detected");
        Self::new(initial)
    }

    pub fn mode(&self) -> NavigationMode {
        *self.mode.read()
    }

    pub fn is_remote(&self) -> bool {
        self.mode().is_remote()
    }

    /// Store `mode`, notifying subscribers only if the value changed.
    ///
    /// Returns whether a change happened.
    pub fn set_mode(&self, mode: NavigationMode) -> bool {
        let previous = {
            let mut current = self.mode.write();
            if *current == mode {
                return false;
            }
            std::mem::replace(&mut *current, mode)
        };

        debug!(?previous, current = ?mode, "navigation mode changed");
        self.notify_subscribers(previous, mode);
        true
    }

    /// Apply the mode rule for a raw input event.
    ///
    /// Pointer movement selects [`NavigationMode::Pointer`], a key resolving
    /// to a directional move selects [`NavigationMode::RemoteDPad`]; nothing
    /// else touches the mode. Returns the new mode when it changed.
    pub fn observe(&self, event: &InputEvent, keymap: &KeyMap) -> Option<NavigationMode> {
        match event {
            InputEvent::PointerMove => self.observe_pointer(),
            InputEvent::Key(key) => keymap.resolve(key).and_then(|action| self.observe_action(action)),
        }
    }

    pub fn observe_pointer(&self) -> Option<NavigationMode> {
        self.set_mode(NavigationMode::Pointer)
            .then_some(NavigationMode::Pointer)
    }

    pub fn observe_action(&self, action: RemoteAction) -> Option<NavigationMode> {
        match action {
            RemoteAction::Move(_) => self
                .set_mode(NavigationMode::RemoteDPad)
                .then_some(NavigationMode::RemoteDPad),
            RemoteAction::Activate | RemoteAction::Back => None,
        }
    }

    /// Add a subscriber
    pub fn subscribe(&self, subscriber: Arc<dyn ModeSubscriber>) -> SubscriptionId {
        let id = SubscriptionId::next();
        self.subscribers.write().insert(id, subscriber);
        id
    }

    /// Add a closure subscriber
    pub fn subscribe_fn<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(NavigationMode, NavigationMode) + Send + Sync + 'static,
    {
        self.subscribe(Arc::new(FnSubscriber::new(handler)))
    }

    /// Remove a subscriber; returns false if it was not registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.write().shift_remove(&id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    /// Notify all subscribers of a mode change
    fn notify_subscribers(&self, previous: NavigationMode, current: NavigationMode) {
        // Snapshot first so subscribers may (un)subscribe or read the mode.
        let subscribers: Vec<Arc<dyn ModeSubscriber>> =
            self.subscribers.read().values().cloned().collect();

        for subscriber in subscribers {
            subscriber.on_mode_change(previous, current);
        }
    }
}

impl std::fmt::Debug for ModeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModeEngine")
            .field("mode", &self.mode())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
