//! Scripted input sessions replayed through the controller

use std::path::Path;

use anyhow::{Context, Result};
use rn_core::{
    ContainerConfig, ControllerConfig, EventOutcome, FocusableConfig, InputEvent, KeyEvent,
    LayerId, NavigationMode, RemoteNavigationController, StaticProbe, TvRuntimeProbe,
    UnknownRuntime,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::shell::ConsoleHost;

/// One UI layer (page, row, modal) in a session
#[derive(Debug, Clone, Deserialize)]
pub struct LayerSpec {
    pub name: String,
    #[serde(default)]
    pub auto_focus: bool,
    /// Swallow Back in this layer instead of popping history
    #[serde(default)]
    pub consume_back: bool,
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ElementSpec {
    pub label: String,
    /// Defaults to the element's position in the list
    #[serde(default)]
    pub order: Option<i32>,
    #[serde(default)]
    pub disabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptEvent {
    PointerMove,
    Key(KeyEvent),
    /// Close the top-most layer
    PopLayer,
}

/// A recorded session: host state plus the events to replay
#[derive(Debug, Clone, Deserialize)]
pub struct SessionScript {
    /// TV runtime answer; absent means the runtime cannot tell
    #[serde(default)]
    pub tv: Option<bool>,
    #[serde(default = "default_history")]
    pub history: Vec<String>,
    /// Answers to successive exit prompts
    #[serde(default)]
    pub confirm: Vec<bool>,
    #[serde(default)]
    pub layers: Vec<LayerSpec>,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

fn default_history() -> Vec<String> {
    vec!["/".to_string()]
}

impl SessionScript {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse session script")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read session script {}", path.display()))?;
        Self::from_json_str(&contents)
    }
}

/// State at the end of a replay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub mode: NavigationMode,
    pub focused: Option<String>,
    pub history_depth: usize,
    pub exited: bool,
    pub events: usize,
    pub handled: usize,
    pub focus_moves: usize,
    pub activations: Vec<String>,
}

/// Run every event of `script` through a controller built from `config`.
///
/// Replay stops early once the application has exited.
pub fn replay(script: &SessionScript, config: &ControllerConfig, force_tv: bool) -> Result<ReplaySummary> {
    let probe: Box<dyn TvRuntimeProbe> = match (force_tv, script.tv) {
        (true, _) => Box::new(StaticProbe(true)),
        (false, Some(tv)) => Box::new(StaticProbe(tv)),
        (false, None) => Box::new(UnknownRuntime),
    };

    let mut controller = RemoteNavigationController::new(config, probe.as_ref())
        .context("Invalid controller configuration")?;
    let mut host = ConsoleHost::new(script.history.clone(), script.confirm.clone());
    let mut layers: Vec<(LayerId, String)> = Vec::new();

    for layer in &script.layers {
        let mut container_config = ContainerConfig::new().auto_focus(layer.auto_focus);
        if layer.consume_back {
            let name = layer.name.clone();
            container_config = container_config.on_back(move || {
                info!(layer = %name, "back consumed by layer");
                true
            });
        }

        let mut container = controller.container(container_config);
        for (position, element) in layer.elements.iter().enumerate() {
            let binding = controller.focusable(FocusableConfig::new().disabled(element.disabled));
            let order = element.order.unwrap_or(position as i32);
            let id = container.register(binding, order);
            host.set_label(id, element.label.clone());
        }

        let id = controller.push_layer(container, &mut host);
        info!(layer = %layer.name, elements = layer.elements.len(), "layer mounted");
        layers.push((id, layer.name.clone()));
    }

    let mut handled = 0;
    let mut processed = 0;
    for (index, event) in script.events.iter().enumerate() {
        if host.exited() {
            break;
        }
        processed += 1;

        let outcome = match event {
            ScriptEvent::PointerMove => controller.handle_input(&InputEvent::PointerMove, &mut host),
            ScriptEvent::Key(key) => controller.handle_input(&InputEvent::Key(key.clone()), &mut host),
            ScriptEvent::PopLayer => match layers.pop() {
                Some((id, name)) => {
                    controller.pop_layer(id);
                    info!(layer = %name, "layer closed");
                    EventOutcome::Handled
                }
                None => {
                    warn!(index, "pop_layer with no layer left");
                    EventOutcome::Unhandled
                }
            },
        };

        if outcome.is_handled() {
            handled += 1;
        }
        info!(
            index,
            ?event,
            ?outcome,
            mode = ?controller.mode(),
            focused = ?focused_label(&controller, &host),
            "event replayed"
        );
    }

    Ok(ReplaySummary {
        mode: controller.mode(),
        focused: focused_label(&controller, &host),
        history_depth: host.history_depth(),
        exited: host.exited(),
        events: processed,
        handled,
        focus_moves: host.focus_log().len(),
        activations: host.activations().iter().map(|id| host.label(*id)).collect(),
    })
}

fn focused_label(controller: &RemoteNavigationController, host: &ConsoleHost) -> Option<String> {
    let top = controller.top_layer()?;
    let current = controller.layer(top)?.current()?;
    Some(host.label(current))
}
