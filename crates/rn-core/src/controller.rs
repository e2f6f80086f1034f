//! Top-level remote navigation controller

use tracing::{debug, trace};

use crate::config::{ConfigError, ControllerConfig, KeyMap};
use crate::container::{default_back, BackResolution, ContainerConfig, NavigationContainer};
use crate::events::{EventOutcome, InputEvent};
use crate::focusable::{FocusableConfig, RemoteFocusable};
use crate::host::{NavigationHost, TvRuntimeProbe};
use crate::layers::{LayerId, LayerStack};
use crate::navigation::{ModeEngine, NavigationMode, RemoteAction};

/// Arbitrates pointer versus D-pad input and routes remote keys to the
/// top-most navigation layer.
#[derive(Debug)]
pub struct RemoteNavigationController {
    mode: ModeEngine,
    keymap: KeyMap,
    exit_prompt: String,
    layers: LayerStack,
}

impl RemoteNavigationController {
    pub fn new(config: &ControllerConfig, probe: &dyn TvRuntimeProbe) -> Result<Self, ConfigError> {
        let keymap = KeyMap::from_config(&config.keymap)?;
        let mode = ModeEngine::detect_or(probe, config.treat_unknown_runtime_as_tv);
        Ok(Self {
            mode,
            keymap,
            exit_prompt: config.exit_prompt.clone(),
            layers: LayerStack::new(),
        })
    }

    /// Controller with the webOS key layout
    pub fn with_defaults(probe: &dyn TvRuntimeProbe) -> Self {
        Self {
            mode: ModeEngine::detect(probe),
            keymap: KeyMap::default(),
            exit_prompt: crate::config::DEFAULT_EXIT_PROMPT.to_string(),
            layers: LayerStack::new(),
        }
    }

    /// Handle onto the shared mode cell
    pub fn mode_engine(&self) -> ModeEngine {
        self.mode.clone()
    }

    pub fn mode(&self) -> NavigationMode {
        self.mode.mode()
    }

    pub fn key_map(&self) -> &KeyMap {
        &self.keymap
    }

    /// Container bound to this controller's mode cell and exit prompt
    pub fn container(&self, config: ContainerConfig) -> NavigationContainer {
        NavigationContainer::new(config, self.mode.clone()).with_exit_prompt(self.exit_prompt.clone())
    }

    /// Element binding bound to this controller's mode cell
    pub fn focusable(&self, config: FocusableConfig) -> RemoteFocusable {
        RemoteFocusable::new(config, self.mode.clone())
    }

    /// Mount `container` (auto focus) and make it the top layer
    pub fn push_layer<H>(&mut self, mut container: NavigationContainer, host: &mut H) -> LayerId
    where
        H: NavigationHost + ?Sized,
    {
        container.mount(host);
        let id = self.layers.push(container);
        debug!(?id, depth = self.layers.len(), "layer pushed");
        id
    }

    pub fn pop_layer(&mut self, id: LayerId) -> Option<NavigationContainer> {
        let removed = self.layers.remove(id);
        if removed.is_some() {
            debug!(?id, depth = self.layers.len(), "layer removed");
        }
        removed
    }

    pub fn layer(&self, id: LayerId) -> Option<&NavigationContainer> {
        self.layers.get(id)
    }

    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut NavigationContainer> {
        self.layers.get_mut(id)
    }

    pub fn top_layer(&self) -> Option<LayerId> {
        self.layers.top_id()
    }

    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    /// Process one raw input event.
    ///
    /// The mode is updated before anything is dispatched, so every handler
    /// invoked for this event reads the post-event mode.
    pub fn handle_input<H>(&mut self, event: &InputEvent, host: &mut H) -> EventOutcome
    where
        H: NavigationHost + ?Sized,
    {
        self.mode.observe(event, &self.keymap);

        let outcome = match event {
            InputEvent::PointerMove => EventOutcome::Unhandled,
            InputEvent::Key(key) => match self.keymap.resolve(key) {
                Some(action) => self.dispatch(action, host),
                None => EventOutcome::Unhandled,
            },
        };

        trace!(?event, ?outcome, mode = ?self.mode.mode(), "input processed");
        outcome
    }

    fn dispatch<H>(&mut self, action: RemoteAction, host: &mut H) -> EventOutcome
    where
        H: NavigationHost + ?Sized,
    {
        if let Some(top) = self.layers.top_mut() {
            return top.handle_action(action, host);
        }

        match action {
            RemoteAction::Back => {
                let resolution: BackResolution = default_back(host, &self.exit_prompt);
                debug!(?resolution, "back handled without any layer");
                EventOutcome::Handled
            }
            RemoteAction::Move(_) | RemoteAction::Activate => EventOutcome::Unhandled,
        }
    }
}
