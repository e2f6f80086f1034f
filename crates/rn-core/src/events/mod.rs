//! Raw input events delivered by the host and dispatch outcomes

use serde::{Serialize, Deserialize};

/// A key-down as the host reports it: the symbolic name (`"ArrowUp"`,
/// `"Enter"`, `"GoBack"`) and the numeric code. A code of `0` means the host
/// supplied none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub code: u32,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>, code: u32) -> Self {
        Self { key: key.into(), code }
    }

    /// Key known only by name
    pub fn named(key: impl Into<String>) -> Self {
        Self::new(key, 0)
    }

    /// Key known only by numeric code
    pub fn code(code: u32) -> Self {
        Self::new(String::new(), code)
    }
}

/// Input consumed by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    PointerMove,
    Key(KeyEvent),
}

impl InputEvent {
    pub fn pointer_move() -> Self {
        InputEvent::PointerMove
    }

    pub fn key(key: impl Into<String>, code: u32) -> Self {
        InputEvent::Key(KeyEvent::new(key, code))
    }
}

impl From<KeyEvent> for InputEvent {
    fn from(event: KeyEvent) -> Self {
        InputEvent::Key(event)
    }
}

/// Whether a handler consumed an event. Unhandled events propagate to the
/// next handler out (container, global fallback, then the host itself).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Handled,
    Unhandled,
}

impl EventOutcome {
    pub fn is_handled(self) -> bool {
        matches!(self, EventOutcome::Handled)
    }
}

impl From<bool> for EventOutcome {
    fn from(handled: bool) -> Self {
        if handled {
            EventOutcome::Handled
        } else {
            EventOutcome::Unhandled
        }
    }
}
