//! Hand landmark model.
//!
//! Models the 21 keypoints per hand produced by MediaPipe-style hand
//! detectors, in pixel coordinates of the (mirrored) camera frame.

use serde::Serialize;

// ── Landmark definitions ───────────────────────────────────

/// The 21 hand keypoints in detector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandLandmark {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

/// Total number of landmarks per hand.
pub const LANDMARK_COUNT: usize = 21;

impl HandLandmark {
    /// Convert landmark enum to array index (0-20).
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Fingertips, thumb first.
    pub fn fingertips() -> [HandLandmark; 5] {
        [
            Self::ThumbTip,
            Self::IndexTip,
            Self::MiddleTip,
            Self::RingTip,
            Self::PinkyTip,
        ]
    }
}

// ── Points ─────────────────────────────────────────────────

/// A keypoint in image pixels. `y` grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Landmark {
    pub x: i32,
    pub y: i32,
}

impl Landmark {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Scale a normalized `[0, 1]` detector point to frame pixels.
    ///
    /// Truncates toward zero, matching how detector overlays index pixels.
    pub fn from_normalized(nx: f32, ny: f32, width: u32, height: u32) -> Self {
        Self {
            x: (nx * width as f32) as i32,
            y: (ny * height as f32) as i32,
        }
    }
}

// ── Hand ───────────────────────────────────────────────────

/// All 21 landmarks of one detected hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandLandmarks {
    points: [Landmark; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Build from normalized detector output.
    ///
    /// Returns `None` unless exactly 21 points are given.
    pub fn from_normalized(points: &[[f32; 2]], width: u32, height: u32) -> Option<Self> {
        if points.len() != LANDMARK_COUNT {
            return None;
        }
        let mut out = [Landmark::default(); LANDMARK_COUNT];
        for (slot, p) in out.iter_mut().zip(points) {
            *slot = Landmark::from_normalized(p[0], p[1], width, height);
        }
        Some(Self { points: out })
    }

    pub fn get(&self, landmark: HandLandmark) -> Landmark {
        self.points[landmark.index()]
    }
}

impl From<[Landmark; LANDMARK_COUNT]> for HandLandmarks {
    fn from(points: [Landmark; LANDMARK_COUNT]) -> Self {
        Self::new(points)
    }
}

// ── Tests ──────────────────────────────────────────────────
