//! Host runtime collaborators
//!
//! The controller never talks to a DOM, a dialog or a process API directly.
//! Everything it needs from the surrounding runtime comes through these
//! traits, so the same logic runs on a TV, in a browser shell or in tests.

use crate::ElementId;

/// Answers "is this a TV runtime?" at startup.
///
/// `None` means the runtime cannot tell; callers treat that as `false`.
pub trait TvRuntimeProbe {
    fn is_tv_runtime(&self) -> Option<bool>;
}

/// Probe with a fixed answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticProbe(pub bool);

impl TvRuntimeProbe for StaticProbe {
    fn is_tv_runtime(&self) -> Option<bool> {
        Some(self.0)
    }
}

/// Probe for runtimes without any platform detection
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownRuntime;

impl TvRuntimeProbe for UnknownRuntime {
    fn is_tv_runtime(&self) -> Option<bool> {
        None
    }
}

/// Moves real input focus and triggers native activation
pub trait FocusDriver {
    /// Programmatically focus the node behind `id`
    fn focus(&mut self, id: ElementId);

    /// Native activation of the node (a click, in browser terms)
    fn activate(&mut self, id: ElementId);
}

/// The application's navigation history
pub trait HistoryNavigator {
    fn can_go_back(&self) -> bool;
    fn go_back(&mut self);
}

/// Exit gate shown when there is no history left to pop
pub trait ExitConfirmation {
    /// Ask the user; `true` means "yes, exit"
    fn confirm(&mut self, message: &str) -> bool;

    /// Close the application
    fn exit(&mut self);
}

/// Everything the controller needs from its host
pub trait NavigationHost: FocusDriver + HistoryNavigator + ExitConfirmation {}

impl<T> NavigationHost for T where T: FocusDriver + HistoryNavigator + ExitConfirmation {}
