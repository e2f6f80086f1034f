//! Controller configuration

pub mod keymap;

use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::navigation::RemoteAction;

pub use keymap::{KeyId, KeyMap, KeyMapConfig, WEBOS_BACK_KEY_CODE};

/// Prompt shown before closing the application from the root screen
pub const DEFAULT_EXIT_PROMPT: &str = "Do you want to exit the app?";

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error reading {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config parsing error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Key {key} is bound to both {first:?} and {second:?}")]
    ConflictingBinding {
        key: KeyId,
        first: RemoteAction,
        second: RemoteAction,
    },

    #[error("No keys bound to {0:?}")]
    EmptyBinding(RemoteAction),
}

/// Settings for a [`crate::RemoteNavigationController`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Key bindings per action
    pub keymap: KeyMapConfig,

    /// Message passed to the exit confirmation
    pub exit_prompt: String,

    /// Start in remote mode when the runtime probe cannot answer
    pub treat_unknown_runtime_as_tv: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            keymap: KeyMapConfig::default(),
            exit_prompt: DEFAULT_EXIT_PROMPT.to_string(),
            treat_unknown_runtime_as_tv: false,
        }
    }
}

impl ControllerConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ControllerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Check the key bindings without keeping the built table
    pub fn validate(&self) -> Result<(), ConfigError> {
        KeyMap::from_config(&self.keymap).map(|_| ())
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = ControllerConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ControllerConfig::default());
        assert_eq!(config.exit_prompt, DEFAULT_EXIT_PROMPT);
    }

    #[test]
    fn test_partial_keymap_override() {
        let json = r#"{ "keymap": { "back": ["Escape", 10009] }, "exit_prompt": "Quit?" }"#;
        let config = ControllerConfig::from_json_str(json).unwrap();
        assert_eq!(config.keymap.back, vec![KeyId::from("Escape"), KeyId::Code(10009)]);
        assert_eq!(config.keymap.move_up, KeyMapConfig::default().move_up);
        assert_eq!(config.exit_prompt, "Quit?");
    }

    #[test]
    fn test_conflict_fails_to_load() {
        let json = r#"{ "keymap": { "activate": ["Enter", 461] } }"#;
        assert!(matches!(
            ControllerConfig::from_json_str(json),
            Err(ConfigError::ConflictingBinding { .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            ControllerConfig::from_json_str("{ keymap"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("rn-core-config-that-does-not-exist.json");
        let err = ControllerConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("rn-core-config-that-does-not-exist.json"));
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("rn-core-config-{}.json", std::process::id()));
        let config = ControllerConfig {
            exit_prompt: "Leave Anyflix?".to_string(),
            ..Default::default()
        };
        std::fs::write(&path, config.to_json_pretty().unwrap()).unwrap();
        let loaded = ControllerConfig::from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }
}
