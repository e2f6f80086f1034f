//! Mode subscriber trait

use std::sync::atomic::{AtomicU64, Ordering};

use super::NavigationMode;

/// Handle returned by [`super::ModeEngine::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Trait for components that react to navigation mode changes
/// (focus-ring visibility, pointer cursor, and so on).
pub trait ModeSubscriber: Send + Sync {
    /// Called once per actual change, after the new mode is readable.
    fn on_mode_change(&self, previous: NavigationMode, current: NavigationMode);
}

/// Adapter turning a closure into a [`ModeSubscriber`]
pub struct FnSubscriber<F> {
    handler: F,
}

impl<F> FnSubscriber<F>
where
    F: Fn(NavigationMode, NavigationMode) + Send + Sync,
{
    pub fn new(handler: F) -> Self {
        Self { handler }
    }
}

impl<F> ModeSubscriber for FnSubscriber<F>
where
    F: Fn(NavigationMode, NavigationMode) + Send + Sync,
{
    fn on_mode_change(&self, previous: NavigationMode, current: NavigationMode) {
        (self.handler)(previous, current);
    }
}
