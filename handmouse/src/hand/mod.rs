//! Hand model — landmarks in, finger extension state out.

pub mod fingers;
pub mod landmarks;

pub use fingers::FingerState;
pub use landmarks::{HandLandmark, HandLandmarks, Landmark, LANDMARK_COUNT};

#[cfg(test)]
pub(crate) use fingers::make_hand;
