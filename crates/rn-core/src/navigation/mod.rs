use serde::{Serialize, Deserialize};

mod engine;
mod position;
mod subscriber;

pub use engine::ModeEngine;
pub use position::{wrap_step, initial_step};
pub use subscriber::{ModeSubscriber, SubscriptionId, FnSubscriber};

/// Input modality currently driving focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationMode {
    /// Mouse, touch or the TV's pointer remote
    Pointer,
    /// 5-way remote: arrows plus OK and Back
    RemoteDPad,
}

impl NavigationMode {
    pub fn is_remote(self) -> bool {
        matches!(self, NavigationMode::RemoteDPad)
    }
}

/// Direction of a D-pad press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Right and Down advance through the focus sequence, Left and Up go back.
    pub fn is_forward(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }
}

/// Semantic action a remote key maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteAction {
    Move(Direction),
    Activate,
    Back,
}
