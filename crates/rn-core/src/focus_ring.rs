//! Focus ring treatment derived from mode and focus state

use serde::{Serialize, Deserialize};

use crate::navigation::NavigationMode;

/// Which focus indicator an element should render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusRing {
    Hidden,
    /// Thin outline while the pointer drives the UI
    Subtle,
    /// Thick glowing outline readable from the couch
    Enhanced,
}

impl FocusRing {
    pub fn for_state(mode: NavigationMode, focused: bool) -> Self {
        match (focused, mode) {
            (false, _) => FocusRing::Hidden,
            (true, NavigationMode::Pointer) => FocusRing::Subtle,
            (true, NavigationMode::RemoteDPad) => FocusRing::Enhanced,
        }
    }

    pub fn is_visible(self) -> bool {
        !matches!(self, FocusRing::Hidden)
    }
}

/// Focus ring styling handed to the rendering layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocusRingStyle {
    pub stroke_width: f32,
    /// RGBA
    pub color: [u8; 4],
    pub corner_radius: f32,
    pub padding: f32,
    pub glow: bool,
}

impl FocusRingStyle {
    pub fn for_ring(ring: FocusRing) -> Option<Self> {
        match ring {
            FocusRing::Hidden => None,
            FocusRing::Subtle => Some(Self {
                stroke_width: 1.5,
                color: [255, 255, 255, 140],
                corner_radius: 6.0,
                padding: 1.0,
                glow: false,
            }),
            FocusRing::Enhanced => Some(Self {
                stroke_width: 3.0,
                color: [229, 9, 20, 255],
                corner_radius: 8.0,
                padding: 3.0,
                glow: true,
            }),
        }
    }
}
