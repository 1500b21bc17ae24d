//! Cursor smoothing — exponential approach toward the mapped target.

use super::ScreenPoint;

/// Divisor applied to the remaining distance each frame. Higher is
/// smoother with more lag.
pub const SMOOTHING_FACTOR: f64 = 15.0;

/// Damped pointer position carried across frames.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorSmoother {
    previous: ScreenPoint,
    factor: f64,
}

impl Default for CursorSmoother {
    fn default() -> Self {
        Self::new(SMOOTHING_FACTOR)
    }
}

impl CursorSmoother {
    /// Create a smoother starting at the screen origin.
    ///
    /// Factors below 1 would overshoot the target and are raised to 1.
    pub fn new(factor: f64) -> Self {
        Self {
            previous: ScreenPoint::default(),
            factor: factor.max(1.0),
        }
    }

    /// Step toward `target` and commit the result as the new position.
    pub fn smooth(&mut self, target: ScreenPoint) -> ScreenPoint {
        let current = ScreenPoint {
            x: self.previous.x + (target.x - self.previous.x) / self.factor,
            y: self.previous.y + (target.y - self.previous.y) / self.factor,
        };
        self.previous = current;
        current
    }

    /// Last committed position.
    pub fn position(&self) -> ScreenPoint {
        self.previous
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }
}
