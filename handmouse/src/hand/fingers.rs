//! Finger extension classification from one hand's landmarks.

use serde::Serialize;

use super::landmarks::{HandLandmark, HandLandmarks};

/// Which fingers are extended on a hand, thumb first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct FingerState {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerState {
    pub fn new(thumb: bool, index: bool, middle: bool, ring: bool, pinky: bool) -> Self {
        Self {
            thumb,
            index,
            middle,
            ring,
            pinky,
        }
    }

    /// Classify a hand seen through a horizontally mirrored, front-facing
    /// camera.
    ///
    /// The thumb is extended when its tip lies left of the IP joint. Every
    /// other finger is extended when its tip sits above its PIP joint.
    pub fn classify(hand: &HandLandmarks) -> Self {
        let above = |tip: HandLandmark, pip: HandLandmark| hand.get(tip).y < hand.get(pip).y;
        Self {
            thumb: hand.get(HandLandmark::ThumbTip).x < hand.get(HandLandmark::ThumbIp).x,
            index: above(HandLandmark::IndexTip, HandLandmark::IndexPip),
            middle: above(HandLandmark::MiddleTip, HandLandmark::MiddlePip),
            ring: above(HandLandmark::RingTip, HandLandmark::RingPip),
            pinky: above(HandLandmark::PinkyTip, HandLandmark::PinkyPip),
        }
    }

    pub fn as_array(&self) -> [bool; 5] {
        [self.thumb, self.index, self.middle, self.ring, self.pinky]
    }

    /// Number of extended fingers.
    pub fn count(&self) -> usize {
        self.as_array().iter().filter(|&&up| up).count()
    }
}

impl From<[bool; 5]> for FingerState {
    fn from(f: [bool; 5]) -> Self {
        Self::new(f[0], f[1], f[2], f[3], f[4])
    }
}

// ── Test helpers ───────────────────────────────────────────

/// Synthesize a hand whose landmarks classify to `fingers`.
///
/// All joints sit on a neutral grid; tips are moved above (or below) their
/// PIP joints and the thumb tip left (or right) of its IP joint.
#[cfg(test)]
pub(crate) fn make_hand(fingers: FingerState, index_tip: (i32, i32)) -> HandLandmarks {
    use super::landmarks::{Landmark, LANDMARK_COUNT};

    let mut points = [Landmark::new(300, 300); LANDMARK_COUNT];
    points[HandLandmark::ThumbIp.index()] = Landmark::new(250, 300);
    points[HandLandmark::ThumbTip.index()] = if fingers.thumb {
        Landmark::new(220, 290)
    } else {
        Landmark::new(270, 290)
    };

    let chains = [
        (HandLandmark::IndexPip, HandLandmark::IndexTip, fingers.index),
        (HandLandmark::MiddlePip, HandLandmark::MiddleTip, fingers.middle),
        (HandLandmark::RingPip, HandLandmark::RingTip, fingers.ring),
        (HandLandmark::PinkyPip, HandLandmark::PinkyTip, fingers.pinky),
    ];
    for (pip, tip, up) in chains {
        points[pip.index()] = Landmark::new(300, 250);
        points[tip.index()] = if up {
            Landmark::new(300, 200)
        } else {
            Landmark::new(300, 280)
        };
    }

    if fingers.index {
        points[HandLandmark::IndexTip.index()] = Landmark::new(index_tip.0, index_tip.1);
        // Keep the PIP below the tip wherever the tip is placed.
        points[HandLandmark::IndexPip.index()] = Landmark::new(index_tip.0, index_tip.1 + 40);
    }

    HandLandmarks::new(points)
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::super::landmarks::{Landmark, LANDMARK_COUNT};
    use super::*;

    #[test]
    fn test_classify_round_trips_synthetic_hands() {
        for bits in 0u8..32 {
            let expected = FingerState::from([
                bits & 1 != 0,
                bits & 2 != 0,
                bits & 4 != 0,
                bits & 8 != 0,
                bits & 16 != 0,
            ]);
            let hand = make_hand(expected, (320, 160));
            assert_eq!(FingerState::classify(&hand), expected, "bits {:05b}", bits);
        }
    }

    #[test]
    fn test_thumb_uses_horizontal_axis() {
        let mut points = [Landmark::new(100, 100); LANDMARK_COUNT];
        // Tip far above the IP joint but to its right: folded.
        points[HandLandmark::ThumbIp.index()] = Landmark::new(100, 100);
        points[HandLandmark::ThumbTip.index()] = Landmark::new(110, 10);
        let state = FingerState::classify(&HandLandmarks::new(points));
        assert!(!state.thumb);

        points[HandLandmark::ThumbTip.index()] = Landmark::new(90, 190);
        let state = FingerState::classify(&HandLandmarks::new(points));
        assert!(state.thumb);
    }

    #[test]
    fn test_finger_compares_against_pip_not_dip() {
        let mut points = [Landmark::new(100, 100); LANDMARK_COUNT];
        points[HandLandmark::IndexPip.index()] = Landmark::new(100, 100);
        points[HandLandmark::IndexDip.index()] = Landmark::new(100, 50);
        points[HandLandmark::IndexTip.index()] = Landmark::new(100, 80);
        let state = FingerState::classify(&HandLandmarks::new(points));
        assert!(state.index, "tip above PIP counts as extended even if below DIP");
    }

    #[test]
    fn test_equal_coordinates_are_folded() {
        let points = [Landmark::new(100, 100); LANDMARK_COUNT];
        let state = FingerState::classify(&HandLandmarks::new(points));
        assert_eq!(state, FingerState::default());
        assert_eq!(state.count(), 0);
    }

    #[test]
    fn test_count() {
        assert_eq!(FingerState::from([true, true, true, true, true]).count(), 5);
        assert_eq!(FingerState::from([false, true, true, false, false]).count(), 2);
        assert_eq!(FingerState::from([true, false, false, false, true]).count(), 2);
    }
}
