//! Per-element focus and activation binding

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::trace;

use crate::config::KeyMap;
use crate::events::{EventOutcome, KeyEvent};
use crate::focus_ring::FocusRing;
use crate::navigation::{ModeEngine, RemoteAction};

/// Opaque handle for one interactive UI node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Fresh id, unique within the process
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1 << 32);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for ElementId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

type Callback = Box<dyn FnMut()>;
type BackHandler = Box<dyn FnMut() -> bool>;

/// Callbacks and flags for a [`RemoteFocusable`]
#[derive(Default)]
pub struct FocusableConfig {
    on_focus: Option<Callback>,
    on_blur: Option<Callback>,
    on_enter: Option<Callback>,
    on_back: Option<BackHandler>,
    disabled: bool,
}

impl FocusableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_focus(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_focus = Some(Box::new(callback));
        self
    }

    pub fn on_blur(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_blur = Some(Box::new(callback));
        self
    }

    /// Activation (OK/Enter) while focused
    pub fn on_enter(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_enter = Some(Box::new(callback));
        self
    }

    /// Local Back handler; return `true` to consume the event
    pub fn on_back(mut self, handler: impl FnMut() -> bool + 'static) -> Self {
        self.on_back = Some(Box::new(handler));
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl fmt::Debug for FocusableConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusableConfig")
            .field("on_focus", &self.on_focus.is_some())
            .field("on_blur", &self.on_blur.is_some())
            .field("on_enter", &self.on_enter.is_some())
            .field("on_back", &self.on_back.is_some())
            .field("disabled", &self.disabled)
            .finish()
    }
}

/// Properties the rendering layer attaches to the node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusableProps {
    /// `Some(0)` puts the node in the keyboard order, `None` removes it
    pub tab_index: Option<i32>,
    /// Opt-in flag for the host's own 5-way traversal engine
    pub remote_focusable: bool,
    pub focused: bool,
    pub ring: FocusRing,
}

/// Focus, activation and back handling for one element.
///
/// A disabled element is inert: it cannot take focus and none of its
/// callbacks fire, whatever events are delivered to it.
pub struct RemoteFocusable {
    id: ElementId,
    config: FocusableConfig,
    mode: ModeEngine,
    focused: bool,
}

impl RemoteFocusable {
    pub fn new(config: FocusableConfig, mode: ModeEngine) -> Self {
        Self::with_id(ElementId::next(), config, mode)
    }

    pub fn with_id(id: ElementId, config: FocusableConfig, mode: ModeEngine) -> Self {
        Self {
            id,
            config,
            mode,
            focused: false,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn is_disabled(&self) -> bool {
        self.config.disabled
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Disabling drops focus silently; `on_blur` does not fire.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.config.disabled = disabled;
        if disabled {
            self.focused = false;
        }
    }

    pub fn props(&self) -> FocusableProps {
        let enabled = !self.config.disabled;
        FocusableProps {
            tab_index: enabled.then_some(0),
            remote_focusable: enabled,
            focused: self.focused,
            ring: self.focus_ring(),
        }
    }

    pub fn focus_ring(&self) -> FocusRing {
        FocusRing::for_state(self.mode.mode(), self.focused)
    }

    /// Native focus landed on the element. Returns whether focus was taken.
    pub fn handle_focus(&mut self) -> bool {
        if self.config.disabled {
            return false;
        }
        if !self.focused {
            self.focused = true;
            if let Some(on_focus) = self.config.on_focus.as_mut() {
                on_focus();
            }
        }
        true
    }

    /// Native focus left the element
    pub fn handle_blur(&mut self) {
        if self.config.disabled || !self.focused {
            return;
        }
        self.focused = false;
        if let Some(on_blur) = self.config.on_blur.as_mut() {
            on_blur();
        }
    }

    /// Offer a resolved remote action to the element.
    ///
    /// Only Activate and Back are consumed here, and only while focused.
    /// Back without a local handler stays unhandled so an enclosing
    /// container or the global fallback can process it.
    pub fn handle_action(&mut self, action: RemoteAction) -> EventOutcome {
        if self.config.disabled || !self.focused {
            return EventOutcome::Unhandled;
        }

        let outcome = match action {
            RemoteAction::Activate => match self.config.on_enter.as_mut() {
                Some(on_enter) => {
                    on_enter();
                    EventOutcome::Handled
                }
                None => EventOutcome::Unhandled,
            },
            RemoteAction::Back => match self.config.on_back.as_mut() {
                Some(on_back) => EventOutcome::from(on_back()),
                None => EventOutcome::Unhandled,
            },
            RemoteAction::Move(_) => EventOutcome::Unhandled,
        };

        trace!(element = %self.id, ?action, ?outcome, "element action");
        outcome
    }

    pub fn handle_key(&mut self, event: &KeyEvent, keymap: &KeyMap) -> EventOutcome {
        match keymap.resolve(event) {
            Some(action) => self.handle_action(action),
            None => EventOutcome::Unhandled,
        }
    }
}

impl fmt::Debug for RemoteFocusable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteFocusable")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("focused", &self.focused)
            .finish()
    }
}
