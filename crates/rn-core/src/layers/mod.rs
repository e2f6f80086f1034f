//! Stacked navigation layers (page, row, modal)

use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;

use crate::container::NavigationContainer;

/// Identifier of a pushed layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(u64);

impl LayerId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Stack of navigation containers; only the top-most one receives keys.
///
/// A modal pushed over a page captures all remote input until it is
/// removed, after which the page below receives input again.
#[derive(Debug, Default)]
pub struct LayerStack {
    layers: IndexMap<LayerId, NavigationContainer>,
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, container: NavigationContainer) -> LayerId {
        let id = LayerId::next();
        self.layers.insert(id, container);
        id
    }

    /// Remove a layer wherever it sits in the stack
    pub fn remove(&mut self, id: LayerId) -> Option<NavigationContainer> {
        self.layers.shift_remove(&id)
    }

    pub fn top_id(&self) -> Option<LayerId> {
        self.layers.last().map(|(id, _)| *id)
    }

    pub fn top_mut(&mut self) -> Option<&mut NavigationContainer> {
        self.layers.last_mut().map(|(_, container)| container)
    }

    pub fn get(&self, id: LayerId) -> Option<&NavigationContainer> {
        self.layers.get(&id)
    }

    pub fn get_mut(&mut self, id: LayerId) -> Option<&mut NavigationContainer> {
        self.layers.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
