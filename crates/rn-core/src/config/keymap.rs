//! Key bindings: semantic remote actions to host key identifiers

use std::fmt;

use ahash::AHashMap;
use serde::{Serialize, Deserialize};

use super::ConfigError;
use crate::events::KeyEvent;
use crate::navigation::{Direction, RemoteAction};

/// Back button code reported by webOS remotes
pub const WEBOS_BACK_KEY_CODE: u32 = 461;

/// A host key identifier, either a numeric code or a symbolic name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyId {
    Code(u32),
    Name(String),
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyId::Code(code) => write!(f, "code {}", code),
            KeyId::Name(name) => write!(f, "\"{}\"", name),
        }
    }
}

impl From<u32> for KeyId {
    fn from(code: u32) -> Self {
        KeyId::Code(code)
    }
}

impl From<&str> for KeyId {
    fn from(name: &str) -> Self {
        KeyId::Name(name.to_string())
    }
}

/// Serializable key bindings, one list per action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyMapConfig {
    pub move_up: Vec<KeyId>,
    pub move_down: Vec<KeyId>,
    pub move_left: Vec<KeyId>,
    pub move_right: Vec<KeyId>,
    pub activate: Vec<KeyId>,
    pub back: Vec<KeyId>,
}

impl Default for KeyMapConfig {
    /// webOS remote layout
    fn default() -> Self {
        Self {
            move_up: vec!["ArrowUp".into(), KeyId::Code(38)],
            move_down: vec!["ArrowDown".into(), KeyId::Code(40)],
            move_left: vec!["ArrowLeft".into(), KeyId::Code(37)],
            move_right: vec!["ArrowRight".into(), KeyId::Code(39)],
            activate: vec!["Enter".into(), KeyId::Code(13)],
            back: vec!["GoBack".into(), KeyId::Code(WEBOS_BACK_KEY_CODE)],
        }
    }
}

impl KeyMapConfig {
    fn bindings(&self) -> [(RemoteAction, &[KeyId]); 6] {
        [
            (RemoteAction::Move(Direction::Up), self.move_up.as_slice()),
            (RemoteAction::Move(Direction::Down), self.move_down.as_slice()),
            (RemoteAction::Move(Direction::Left), self.move_left.as_slice()),
            (RemoteAction::Move(Direction::Right), self.move_right.as_slice()),
            (RemoteAction::Activate, self.activate.as_slice()),
            (RemoteAction::Back, self.back.as_slice()),
        ]
    }
}

/// Validated lookup table from key identifiers to actions
#[derive(Debug, Clone)]
pub struct KeyMap {
    table: AHashMap<KeyId, RemoteAction>,
}

impl KeyMap {
    /// Build the lookup table, rejecting empty bindings and keys bound to
    /// more than one action.
    pub fn from_config(config: &KeyMapConfig) -> Result<Self, ConfigError> {
        let mut table = AHashMap::new();

        for (action, keys) in config.bindings() {
            if keys.is_empty() {
                return Err(ConfigError::EmptyBinding(action));
            }
            for key in keys {
                match table.insert(key.clone(), action) {
                    Some(existing) if existing != action => {
                        return Err(ConfigError::ConflictingBinding {
                            key: key.clone(),
                            first: existing,
                            second: action,
                        });
                    }
                    _ => {}
                }
            }
        }

        Ok(Self { table })
    }

    /// Map a key-down to its action; the numeric code is consulted before
    /// the name.
    pub fn resolve(&self, event: &KeyEvent) -> Option<RemoteAction> {
        let by_code = (event.code != 0)
            .then(|| self.table.get(&KeyId::Code(event.code)))
            .flatten();

        by_code
            .or_else(|| {
                if event.key.is_empty() {
                    None
                } else {
                    self.table.get(&KeyId::Name(event.key.clone()))
                }
            })
            .copied()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        let mut table = AHashMap::new();
        for (action, keys) in KeyMapConfig::default().bindings() {
            for key in keys {
                table.insert(key.clone(), action);
            }
        }
        Self { table }
    }
}
