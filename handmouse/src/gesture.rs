//! Gesture resolution from finger extension state.
//!
//! Maps the extended-finger vector of one hand to exactly one mouse
//! gesture per frame. Matching uses the number of extended fingers *and*
//! their identity, so shapes that merely share a count (thumb + pinky vs
//! index + middle) do not alias.

use serde::Serialize;

use crate::hand::FingerState;

// ── Gesture types ──────────────────────────────────────────

/// The mouse gesture recognized for a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gesture {
    /// Index finger only: move the pointer.
    Move,
    /// Index + middle: left click.
    LeftClick,
    /// Index + middle + ring: right click.
    RightClick,
    /// Four fingers: scroll up.
    ScrollUp,
    /// Open hand: scroll down.
    ScrollDown,
    /// No hand or no matching pattern.
    #[default]
    None,
}

/// RGB colour used by overlays.
pub type Rgb = [u8; 3];

/// Box colour shown while no action fires.
pub const IDLE_COLOR: Rgb = [255, 0, 255];

impl Gesture {
    /// Resolve a finger state into a gesture. First match wins.
    pub fn resolve(fingers: FingerState) -> Self {
        let FingerState {
            index,
            middle,
            ring,
            ..
        } = fingers;

        match fingers.count() {
            1 if index => Self::Move,
            2 if index && middle => Self::LeftClick,
            3 if index && middle && ring => Self::RightClick,
            4 => Self::ScrollUp,
            5 => Self::ScrollDown,
            _ => Self::None,
        }
    }

    /// Resolve an optional hand; no hand always yields `None`.
    pub fn resolve_opt(fingers: Option<FingerState>) -> Self {
        fingers.map(Self::resolve).unwrap_or_default()
    }

    /// String representation for logs and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::LeftClick => "left-click",
            Self::RightClick => "right-click",
            Self::ScrollUp => "scroll-up",
            Self::ScrollDown => "scroll-down",
            Self::None => "none",
        }
    }

    /// Human-readable overlay label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Move => "Moving Mouse",
            Self::LeftClick => "Left Click",
            Self::RightClick => "Right Click",
            Self::ScrollUp => "Scroll Up",
            Self::ScrollDown => "Scroll Down",
            Self::None => "",
        }
    }

    /// Overlay colour for this gesture.
    pub fn color(&self) -> Rgb {
        match self {
            Self::Move => [0, 255, 0],
            Self::LeftClick => [0, 0, 255],
            Self::RightClick => [255, 165, 0],
            Self::ScrollUp | Self::ScrollDown => [255, 255, 0],
            Self::None => IDLE_COLOR,
        }
    }

    /// Whether this gesture fires a one-shot action guarded by a cooldown.
    pub fn is_discrete(&self) -> bool {
        !matches!(self, Self::Move | Self::None)
    }
}

// ── Tests ──────────────────────────────────────────────────
