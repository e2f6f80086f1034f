//! Per-container directional navigation binding

use std::fmt;

use indexmap::IndexMap;
use serde::{Serialize, Deserialize};
use tracing::{debug, info, trace};

use crate::config::{KeyMap, DEFAULT_EXIT_PROMPT};
use crate::events::{EventOutcome, KeyEvent};
use crate::focusable::{ElementId, RemoteFocusable};
use crate::host::{ExitConfirmation, FocusDriver, HistoryNavigator, NavigationHost};
use crate::navigation::{initial_step, wrap_step, Direction, ModeEngine, RemoteAction};

type NavigateHandler = Box<dyn FnMut(Direction) -> bool>;
type BackHandler = Box<dyn FnMut() -> bool>;
type ActivateHandler = Box<dyn FnMut()>;

/// Hooks and flags for a [`NavigationContainer`]
#[derive(Default)]
pub struct ContainerConfig {
    on_navigate: Option<NavigateHandler>,
    on_back: Option<BackHandler>,
    on_activate: Option<ActivateHandler>,
    auto_focus: bool,
}

impl ContainerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// First refusal on every directional press; return `true` to
    /// suppress the built-in wrap traversal.
    pub fn on_navigate(mut self, handler: impl FnMut(Direction) -> bool + 'static) -> Self {
        self.on_navigate = Some(Box::new(handler));
        self
    }

    /// First refusal on Back; return `true` to suppress history pop / exit.
    pub fn on_back(mut self, handler: impl FnMut() -> bool + 'static) -> Self {
        self.on_back = Some(Box::new(handler));
        self
    }

    pub fn on_activate(mut self, handler: impl FnMut() + 'static) -> Self {
        self.on_activate = Some(Box::new(handler));
        self
    }

    /// Focus the first element on mount when the remote drives the UI
    pub fn auto_focus(mut self, auto_focus: bool) -> Self {
        self.auto_focus = auto_focus;
        self
    }
}

impl fmt::Debug for ContainerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerConfig")
            .field("on_navigate", &self.on_navigate.is_some())
            .field("on_back", &self.on_back.is_some())
            .field("on_activate", &self.on_activate.is_some())
            .field("auto_focus", &self.auto_focus)
            .finish()
    }
}

/// Snapshot of one registered element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusableElement {
    pub id: ElementId,
    pub order: i32,
    pub is_disabled: bool,
    pub is_current: bool,
}

/// What the default Back handling ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackResolution {
    WentBack,
    Exited,
    ExitDeclined,
}

/// Pop history if there is any, otherwise ask before exiting.
pub fn default_back<H>(host: &mut H, exit_prompt: &str) -> BackResolution
where
    H: HistoryNavigator + ExitConfirmation + ?Sized,
{
    if host.can_go_back() {
        host.go_back();
        debug!("back: history popped");
        return BackResolution::WentBack;
    }

    info!(prompt = exit_prompt, "back: no history left, asking to exit");
    if host.confirm(exit_prompt) {
        host.exit();
        BackResolution::Exited
    } else {
        BackResolution::ExitDeclined
    }
}

struct Entry {
    element: RemoteFocusable,
    order: i32,
}

/// A group of focusable elements navigated as one linear sequence.
///
/// Elements register and unregister explicitly. The tracked traversal list
/// is always a full rebuild from the registry: enabled elements sorted by
/// `order`, ties broken by registration order.
pub struct NavigationContainer {
    config: ContainerConfig,
    mode: ModeEngine,
    exit_prompt: String,
    entries: IndexMap<ElementId, Entry>,
    tracked: Vec<ElementId>,
    current: Option<ElementId>,
}

impl NavigationContainer {
    pub fn new(config: ContainerConfig, mode: ModeEngine) -> Self {
        Self {
            config,
            mode,
            exit_prompt: DEFAULT_EXIT_PROMPT.to_string(),
            entries: IndexMap::new(),
            tracked: Vec::new(),
            current: None,
        }
    }

    pub fn with_exit_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.exit_prompt = prompt.into();
        self
    }

    pub fn exit_prompt(&self) -> &str {
        &self.exit_prompt
    }

    pub fn auto_focus(&self) -> bool {
        self.config.auto_focus
    }

    /// Add an element at position `order`. Re-registering an id replaces
    /// the previous binding.
    pub fn register(&mut self, element: RemoteFocusable, order: i32) -> ElementId {
        let id = element.id();
        self.note_native_blur(id);
        self.entries.insert(id, Entry { element, order });
        self.refresh();
        id
    }

    /// Remove an element (unmount). The current designation goes with it.
    pub fn unregister(&mut self, id: ElementId) -> Option<RemoteFocusable> {
        let entry = self.entries.shift_remove(&id)?;
        self.refresh();
        Some(entry.element)
    }

    pub fn set_disabled(&mut self, id: ElementId, disabled: bool) -> bool {
        match self.entries.get_mut(&id) {
            Some(entry) => {
                entry.element.set_disabled(disabled);
                self.refresh();
                true
            }
            None => false,
        }
    }

    pub fn set_order(&mut self, id: ElementId, order: i32) -> bool {
        match self.entries.get_mut(&id) {
            Some(entry) => {
                entry.order = order;
                self.refresh();
                true
            }
            None => false,
        }
    }

    pub fn element(&self, id: ElementId) -> Option<&RemoteFocusable> {
        self.entries.get(&id).map(|entry| &entry.element)
    }

    /// Mutable access for the host's native focus/blur routing. Changing the
    /// disabled flag this way needs a [`NavigationContainer::refresh`].
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut RemoteFocusable> {
        self.entries.get_mut(&id).map(|entry| &mut entry.element)
    }

    /// Rebuild the tracked list from the registry
    pub fn refresh(&mut self) {
        let mut tracked: Vec<(i32, ElementId)> = self
            .entries
            .iter()
            .filter(|(_, entry)| !entry.element.is_disabled())
            .map(|(id, entry)| (entry.order, *id))
            .collect();
        // stable: equal orders keep registration order
        tracked.sort_by_key(|(order, _)| *order);
        self.tracked = tracked.into_iter().map(|(_, id)| id).collect();

        if let Some(current) = self.current {
            if !self.tracked.contains(&current) {
                if let Some(entry) = self.entries.get_mut(&current) {
                    entry.element.handle_blur();
                }
                self.current = None;
            }
        }
        trace!(tracked = self.tracked.len(), "focus list rebuilt");
    }

    pub fn elements(&self) -> Vec<FocusableElement> {
        let mut snapshot: Vec<FocusableElement> = self
            .entries
            .iter()
            .map(|(id, entry)| FocusableElement {
                id: *id,
                order: entry.order,
                is_disabled: entry.element.is_disabled(),
                is_current: self.current == Some(*id),
            })
            .collect();
        snapshot.sort_by_key(|element| element.order);
        snapshot
    }

    /// Tracked (enabled, ordered) element ids
    pub fn tracked(&self) -> &[ElementId] {
        &self.tracked
    }

    pub fn current(&self) -> Option<ElementId> {
        self.current
    }

    pub fn current_index(&self) -> Option<usize> {
        let current = self.current?;
        self.tracked.iter().position(|id| *id == current)
    }

    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    /// Mount-time auto focus. Returns whether an element was focused.
    pub fn mount<H>(&mut self, host: &mut H) -> bool
    where
        H: FocusDriver + ?Sized,
    {
        if !self.config.auto_focus || !self.mode.is_remote() || self.tracked.is_empty() {
            return false;
        }
        self.focus_index(0, host)
    }

    /// Make `id` current and move real focus onto it
    pub fn focus_element<H>(&mut self, id: ElementId, host: &mut H) -> bool
    where
        H: FocusDriver + ?Sized,
    {
        match self.tracked.iter().position(|tracked| *tracked == id) {
            Some(index) => self.focus_index(index, host),
            None => false,
        }
    }

    /// The host moved focus on its own (pointer click, host traversal);
    /// sync the current designation without calling back into the host.
    pub fn note_native_focus(&mut self, id: ElementId) -> bool {
        if !self.tracked.contains(&id) {
            return false;
        }
        self.transfer_current(id);
        true
    }

    /// The host reports focus left `id`
    pub fn note_native_blur(&mut self, id: ElementId) {
        if self.current == Some(id) {
            if let Some(entry) = self.entries.get_mut(&id) {
                entry.element.handle_blur();
            }
            self.current = None;
        }
    }

    pub fn handle_key<H>(&mut self, event: &KeyEvent, keymap: &KeyMap, host: &mut H) -> EventOutcome
    where
        H: NavigationHost + ?Sized,
    {
        match keymap.resolve(event) {
            Some(action) => self.handle_action(action, host),
            None => EventOutcome::Unhandled,
        }
    }

    /// Dispatch one resolved remote action.
    ///
    /// Back goes to the focused element first, then the container hook, then
    /// [`default_back`]. Moves go to the `on_navigate` hook, then wrap
    /// traversal. Activate runs the element's `on_enter`, the container's
    /// `on_activate` and the native activation, in that order.
    pub fn handle_action<H>(&mut self, action: RemoteAction, host: &mut H) -> EventOutcome
    where
        H: NavigationHost + ?Sized,
    {
        match action {
            RemoteAction::Move(direction) => self.navigate(direction, host),
            RemoteAction::Activate => self.activate(host),
            RemoteAction::Back => self.back(host),
        }
    }

    fn navigate<H>(&mut self, direction: Direction, host: &mut H) -> EventOutcome
    where
        H: FocusDriver + ?Sized,
    {
        if !self.mode.is_remote() {
            return EventOutcome::Unhandled;
        }

        if let Some(on_navigate) = self.config.on_navigate.as_mut() {
            if on_navigate(direction) {
                trace!(?direction, "navigation consumed by container hook");
                return EventOutcome::Handled;
            }
        }

        let len = self.tracked.len();
        let next = match self.current_index() {
            Some(index) => wrap_step(index, len, direction),
            None => initial_step(len, direction),
        };

        match next {
            Some(index) => {
                self.focus_index(index, host);
                EventOutcome::Handled
            }
            None => EventOutcome::Unhandled,
        }
    }

    fn activate<H>(&mut self, host: &mut H) -> EventOutcome
    where
        H: FocusDriver + ?Sized,
    {
        if !self.mode.is_remote() {
            return EventOutcome::Unhandled;
        }

        let mut handled = false;
        if let Some(entry) = self.current.and_then(|id| self.entries.get_mut(&id)) {
            handled = entry.element.handle_action(RemoteAction::Activate).is_handled();
        }
        if let Some(on_activate) = self.config.on_activate.as_mut() {
            on_activate();
            handled = true;
        }
        if let Some(current) = self.current {
            debug!(element = %current, "activating focused element");
            host.activate(current);
            handled = true;
        }
        EventOutcome::from(handled)
    }

    fn back<H>(&mut self, host: &mut H) -> EventOutcome
    where
        H: HistoryNavigator + ExitConfirmation + ?Sized,
    {
        if let Some(entry) = self.current.and_then(|id| self.entries.get_mut(&id)) {
            if entry.element.handle_action(RemoteAction::Back).is_handled() {
                trace!(element = %entry.element.id(), "back consumed by element");
                return EventOutcome::Handled;
            }
        }

        if let Some(on_back) = self.config.on_back.as_mut() {
            if on_back() {
                trace!("back consumed by container hook");
                return EventOutcome::Handled;
            }
        }

        let resolution = default_back(host, &self.exit_prompt);
        debug!(?resolution, "default back handling");
        EventOutcome::Handled
    }

    fn focus_index<H>(&mut self, index: usize, host: &mut H) -> bool
    where
        H: FocusDriver + ?Sized,
    {
        let Some(id) = self.tracked.get(index).copied() else {
            return false;
        };
        self.transfer_current(id);
        host.focus(id);
        debug!(element = %id, index, "focus moved");
        true
    }

    fn transfer_current(&mut self, id: ElementId) {
        if self.current == Some(id) {
            return;
        }
        if let Some(previous) = self.current.take() {
            if let Some(entry) = self.entries.get_mut(&previous) {
                entry.element.handle_blur();
            }
        }
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.element.handle_focus();
        }
        self.current = Some(id);
    }
}

impl fmt::Debug for NavigationContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationContainer")
            .field("config", &self.config)
            .field("mode", &self.mode.mode())
            .field("tracked", &self.tracked)
            .field("current", &self.current)
            .finish()
    }
}
