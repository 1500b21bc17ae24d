//! Frame sources — where per-frame hand landmarks come from.
//!
//! The detector runs outside this crate. A source yields one
//! `LandmarkFrame` per captured camera frame until the stream ends.

pub mod jsonl;

use std::collections::VecDeque;

pub use jsonl::JsonLinesSource;

use crate::hand::HandLandmarks;
use crate::motion::Size;

/// Landmarks detected in one camera frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkFrame {
    /// Camera frame size the landmarks were scaled to.
    pub size: Size,
    /// Detected hands in detector order; may be empty.
    pub hands: Vec<HandLandmarks>,
    /// The display side forwarded a quit request with this frame.
    pub quit: bool,
}

impl LandmarkFrame {
    pub fn new(size: Size, hands: Vec<HandLandmarks>) -> Self {
        Self {
            size,
            hands,
            quit: false,
        }
    }

    /// A frame in which no hand was detected.
    pub fn empty(size: Size) -> Self {
        Self::new(size, Vec::new())
    }

    /// The tracked hand. Only the first detection is used.
    pub fn primary_hand(&self) -> Option<&HandLandmarks> {
        self.hands.first()
    }
}

/// A lazy stream of landmark frames.
pub trait LandmarkSource {
    /// Next frame, `Ok(None)` at end of stream. Errors are fatal for the
    /// session.
    fn next_frame(&mut self) -> crate::Result<Option<LandmarkFrame>>;
}

/// Replays an in-memory script of frames.
#[derive(Debug, Default)]
pub struct VecSource {
    frames: VecDeque<LandmarkFrame>,
}

impl VecSource {
    pub fn new(frames: impl IntoIterator<Item = LandmarkFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }
}

#[cfg(test)]
impl VecSource {
    /// Test-only: frames not yet consumed.
    pub(crate) fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl LandmarkSource for VecSource {
    fn next_frame(&mut self) -> crate::Result<Option<LandmarkFrame>> {
        Ok(self.frames.pop_front())
    }
}
