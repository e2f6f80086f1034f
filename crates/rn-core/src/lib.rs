//! Remote-control focus navigation for TV-style media browsing
//!
//! This crate decides whether the UI is currently driven by a pointer or by
//! a 5-way remote, moves focus through registered elements on D-pad input,
//! and resolves Back presses into local handlers, history pops or an exit
//! confirmation. All host interaction goes through the traits in [`host`].

pub mod config;
pub mod container;
pub mod controller;
pub mod events;
pub mod focus_ring;
pub mod focusable;
pub mod host;
pub mod layers;
pub mod navigation;

// Re-export commonly used types
pub use config::{ConfigError, ControllerConfig, KeyId, KeyMap, KeyMapConfig, WEBOS_BACK_KEY_CODE};
pub use container::{default_back, BackResolution, ContainerConfig, FocusableElement, NavigationContainer};
pub use controller::RemoteNavigationController;
pub use events::{EventOutcome, InputEvent, KeyEvent};
pub use focus_ring::{FocusRing, FocusRingStyle};
pub use focusable::{ElementId, FocusableConfig, FocusableProps, RemoteFocusable};
pub use host::{
    ExitConfirmation, FocusDriver, HistoryNavigator, NavigationHost, StaticProbe,
    TvRuntimeProbe, UnknownRuntime,
};
pub use layers::{LayerId, LayerStack};
pub use navigation::{Direction, ModeEngine, ModeSubscriber, NavigationMode, RemoteAction, SubscriptionId};
