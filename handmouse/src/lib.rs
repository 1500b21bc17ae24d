//! handmouse — touchless mouse control driven by a hand-landmark stream.
//!
//! Provides:
//! - `hand`: landmark model and finger-state classification
//! - `gesture`: finger state to a single mouse gesture per frame
//! - `motion`: active-region mapping and cursor smoothing
//! - `cooldown`: per-family frame timers for discrete actions
//! - `orchestrator`: the per-frame pipeline
//! - `session`: the frame loop and its stop conditions
//! - `source` / `output`: frame input adapters and pointer sinks

pub mod config;
pub mod cooldown;
pub mod frame_timing;
pub mod gesture;
pub mod hand;
pub mod motion;
pub mod orchestrator;
pub mod output;
pub mod session;
pub mod source;

pub use config::Config;
pub use gesture::Gesture;
pub use hand::{FingerState, HandLandmarks, Landmark};
pub use orchestrator::{FrameOrchestrator, FrameReport};
pub use session::{Session, SessionOptions, SessionStats, StopReason};

/// Result alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the crate's boundaries.
///
/// Gesture logic itself never fails; these cover reading frames,
/// loading configuration and talking to the OS input layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading from the frame source or writing an overlay stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A landmark line or overlay report failed JSON (de)serialization.
    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A frame decoded but violates the landmark contract.
    #[error("malformed frame {frame}: {reason}")]
    MalformedFrame { frame: u64, reason: String },

    /// Configuration file could not be parsed or holds invalid values.
    #[error("config error: {0}")]
    Config(String),

    /// The pointer backend could not be created or rejected a command.
    #[error("output backend error: {0}")]
    Output(String),
}
