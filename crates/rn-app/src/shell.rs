//! Console host: a history stack and scripted exit answers standing in for
//! the TV runtime.

use std::collections::{HashMap, VecDeque};

use rn_core::{ElementId, ExitConfirmation, FocusDriver, HistoryNavigator};
use tracing::info;

#[derive(Debug, Default)]
pub struct ConsoleHost {
    labels: HashMap<ElementId, String>,
    history: Vec<String>,
    answers: VecDeque<bool>,
    exited: bool,
    focus_log: Vec<ElementId>,
    activations: Vec<ElementId>,
}

impl ConsoleHost {
    pub fn new(history: Vec<String>, answers: Vec<bool>) -> Self {
        Self {
            history,
            answers: answers.into(),
            ..Default::default()
        }
    }

    pub fn set_label(&mut self, id: ElementId, label: impl Into<String>) {
        self.labels.insert(id, label.into());
    }

    pub fn label(&self, id: ElementId) -> String {
        self.labels
            .get(&id)
            .cloned()
            .unwrap_or_else(|| id.to_string())
    }

    pub fn history_depth(&self) -> usize {
        self.history.len()
    }

    pub fn current_route(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }

    pub fn exited(&self) -> bool {
        self.exited
    }

    pub fn focus_log(&self) -> &[ElementId] {
        &self.focus_log
    }

    pub fn activations(&self) -> &[ElementId] {
        &self.activations
    }
}

impl FocusDriver for ConsoleHost {
    fn focus(&mut self, id: ElementId) {
        info!(element = %self.label(id), "focus");
        self.focus_log.push(id);
    }

    fn activate(&mut self, id: ElementId) {
        info!(element = %self.label(id), "click");
        self.activations.push(id);
    }
}

impl HistoryNavigator for ConsoleHost {
    fn can_go_back(&self) -> bool {
        self.history.len() > 1
    }

    fn go_back(&mut self) {
        if let Some(route) = self.history.pop() {
            info!(from = %route, to = ?self.current_route(), "history back");
        }
    }
}

impl ExitConfirmation for ConsoleHost {
    fn confirm(&mut self, message: &str) -> bool {
        // no scripted answer left: the user dismissed the dialog
        let answer = self.answers.pop_front().unwrap_or(false);
        info!(prompt = message, answer, "exit confirmation");
        answer
    }

    fn exit(&mut self) {
        info!("application closed");
        self.exited = true;
    }
}
